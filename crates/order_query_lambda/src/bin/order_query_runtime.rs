use lambda_runtime::{service_fn, Error, LambdaEvent};
use order_query_lambda::adapters::dynamodb::DynamoOrderStore;
use order_query_lambda::config::HandlerConfig;
use order_query_lambda::handlers::router::OrderQueryRouter;
use order_query_lambda::handlers::ApiGatewayResponse;
use order_query_lambda::telemetry::init_tracing;
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    router: &OrderQueryRouter,
    store: &DynamoOrderStore,
) -> Result<ApiGatewayResponse, Error> {
    Ok(router.handle(&event.payload, store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = HandlerConfig::from_env()?;
    tracing::info!(
        component = "order_query_runtime",
        event = "cold_start",
        table = config.table_name.as_str(),
        account_index = config.account_orderdate_index.as_str(),
        vendor_index = config.vendor_orderdate_index.as_str(),
    );
    let router = OrderQueryRouter::new(config);
    let store = DynamoOrderStore::from_env().await;

    lambda_runtime::run(service_fn(|event| handle_request(event, &router, &store))).await
}
