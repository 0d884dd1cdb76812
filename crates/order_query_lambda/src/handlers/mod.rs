pub mod account_orderdate;
pub mod response;
pub mod router;
pub mod vendor_orderdate;
pub mod vendor_scan;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::adapters::order_store::OrderStore;
use crate::error::HandlerError;
use crate::runtime::contract::{QueryParameters, ReadOutput, ValidationError};
use crate::runtime::read_plan::ReadRequest;

pub use response::ApiGatewayResponse;

const COMPONENT: &str = "order_query";

/// A read-only endpoint: turns query-string parameters into one planned read
/// against the configured table.
pub trait OrderReadHandler {
    fn name(&self) -> &'static str;

    fn table_name(&self) -> &str;

    fn plan(&self, parameters: &QueryParameters) -> Result<ReadRequest, ValidationError>;

    fn execute(&self, event: &Value, store: &dyn OrderStore) -> Result<ReadOutput, HandlerError> {
        let parameters = QueryParameters::from_event(event)?;
        let request = self.plan(&parameters)?;
        let table = self.table_name();

        store
            .read(table, &request)
            .map_err(|message| HandlerError::Store {
                table: table.to_string(),
                operation: request.operation(),
                message,
            })
    }

    fn handle(&self, event: &Value, store: &dyn OrderStore) -> ApiGatewayResponse {
        match self.execute(event, store) {
            Ok(output) => {
                info!(
                    component = COMPONENT,
                    event = "read_completed",
                    handler = self.name(),
                    table = self.table_name(),
                    count = output.count,
                    scanned_count = output.scanned_count,
                );
                response::success_response(&output)
            }
            Err(failure) => {
                match &failure {
                    HandlerError::Validation(reason) => warn!(
                        component = COMPONENT,
                        event = "read_rejected",
                        handler = self.name(),
                        reason = %reason,
                    ),
                    HandlerError::Store {
                        table,
                        operation,
                        message,
                    } => error!(
                        component = COMPONENT,
                        event = "read_failed",
                        handler = self.name(),
                        table = table.as_str(),
                        operation = *operation,
                        error = message.as_str(),
                    ),
                }
                response::error_response(failure.status_code(), failure.to_body())
            }
        }
    }
}
