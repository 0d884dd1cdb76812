use serde_json::{json, Value};
use tracing::warn;

use crate::adapters::order_store::OrderStore;
use crate::config::HandlerConfig;
use crate::handlers::account_orderdate::AccountOrderDateQuery;
use crate::handlers::response::{error_response, ApiGatewayResponse};
use crate::handlers::vendor_orderdate::VendorOrderDateQuery;
use crate::handlers::vendor_scan::VendorScan;
use crate::handlers::OrderReadHandler;

pub const ACCOUNT_QUERY_ROUTE: &str = "/query/account";
pub const VENDOR_QUERY_ROUTE: &str = "/query/vendor";
pub const VENDOR_SCAN_ROUTE: &str = "/scan";

/// Serves all three lookups from one function, keyed by API resource path.
#[derive(Debug, Clone)]
pub struct OrderQueryRouter {
    account_query: AccountOrderDateQuery,
    vendor_query: VendorOrderDateQuery,
    vendor_scan: VendorScan,
}

impl OrderQueryRouter {
    pub fn new(config: HandlerConfig) -> Self {
        Self {
            account_query: AccountOrderDateQuery::new(config.clone()),
            vendor_query: VendorOrderDateQuery::new(config.clone()),
            vendor_scan: VendorScan::new(config),
        }
    }

    pub fn handler_for(&self, route: &str) -> Option<&dyn OrderReadHandler> {
        let handler: &dyn OrderReadHandler = match route.trim_end_matches('/') {
            ACCOUNT_QUERY_ROUTE => &self.account_query,
            VENDOR_QUERY_ROUTE => &self.vendor_query,
            VENDOR_SCAN_ROUTE => &self.vendor_scan,
            _ => return None,
        };
        Some(handler)
    }

    pub fn handle(&self, event: &Value, store: &dyn OrderStore) -> ApiGatewayResponse {
        let route = resolve_route(event);
        match route.and_then(|path| self.handler_for(path)) {
            Some(handler) => handler.handle(event, store),
            None => {
                warn!(
                    component = "order_query_router",
                    event = "route_not_found",
                    route = route.unwrap_or_default(),
                );
                error_response(
                    404,
                    json!({
                        "error": "not_found",
                        "message": format!("no handler for route '{}'", route.unwrap_or_default()),
                    }),
                )
            }
        }
    }
}

/// REST API events carry `resource` and `path`; HTTP API events carry `rawPath`.
fn resolve_route(event: &Value) -> Option<&str> {
    ["resource", "path", "rawPath"]
        .iter()
        .find_map(|field| event.get(*field).and_then(Value::as_str))
}
