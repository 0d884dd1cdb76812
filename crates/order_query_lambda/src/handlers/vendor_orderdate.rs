use crate::config::HandlerConfig;
use crate::handlers::OrderReadHandler;
use crate::runtime::contract::{QueryParameters, ValidationError, VendorOrderDateParams};
use crate::runtime::read_plan::{vendor_orderdate_query, ReadRequest};

/// Orders for one vendor within an order-date range, served from the global
/// secondary index. Items carry `accountid` so callers can correlate accounts.
#[derive(Debug, Clone)]
pub struct VendorOrderDateQuery {
    config: HandlerConfig,
}

impl VendorOrderDateQuery {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }
}

impl OrderReadHandler for VendorOrderDateQuery {
    fn name(&self) -> &'static str {
        "vendor_orderdate_query"
    }

    fn table_name(&self) -> &str {
        &self.config.table_name
    }

    fn plan(&self, parameters: &QueryParameters) -> Result<ReadRequest, ValidationError> {
        let params = VendorOrderDateParams::from_query(parameters)?;
        Ok(vendor_orderdate_query(
            &self.config.vendor_orderdate_index,
            &params,
        ))
    }
}
