use crate::config::HandlerConfig;
use crate::handlers::OrderReadHandler;
use crate::runtime::contract::{QueryParameters, ValidationError, VendorScanParams};
use crate::runtime::read_plan::{vendor_scan, ReadRequest};

/// Every order for a vendor, found by scanning the whole base table.
///
/// This is the only unindexed path and its cost grows with the table, not with
/// the number of matches. It must stay a scan: callers rely on it seeing every
/// record regardless of index membership.
#[derive(Debug, Clone)]
pub struct VendorScan {
    config: HandlerConfig,
}

impl VendorScan {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }
}

impl OrderReadHandler for VendorScan {
    fn name(&self) -> &'static str {
        "vendor_scan"
    }

    fn table_name(&self) -> &str {
        &self.config.table_name
    }

    fn plan(&self, parameters: &QueryParameters) -> Result<ReadRequest, ValidationError> {
        let params = VendorScanParams::from_query(parameters)?;
        Ok(vendor_scan(&params))
    }
}
