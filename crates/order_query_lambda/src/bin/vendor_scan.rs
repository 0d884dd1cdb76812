use lambda_runtime::{service_fn, Error, LambdaEvent};
use order_query_lambda::adapters::dynamodb::DynamoOrderStore;
use order_query_lambda::config::HandlerConfig;
use order_query_lambda::handlers::vendor_scan::VendorScan;
use order_query_lambda::handlers::{ApiGatewayResponse, OrderReadHandler};
use order_query_lambda::telemetry::init_tracing;
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    handler: &VendorScan,
    store: &DynamoOrderStore,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handler.handle(&event.payload, store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let handler = VendorScan::new(HandlerConfig::from_env()?);
    let store = DynamoOrderStore::from_env().await;

    lambda_runtime::run(service_fn(|event| handle_request(event, &handler, &store))).await
}
