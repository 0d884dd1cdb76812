use crate::config::HandlerConfig;
use crate::handlers::OrderReadHandler;
use crate::runtime::contract::{AccountOrderDateParams, QueryParameters, ValidationError};
use crate::runtime::read_plan::{account_orderdate_query, ReadRequest};

/// Orders for one account within an order-date range, served from the
/// account-local secondary index.
#[derive(Debug, Clone)]
pub struct AccountOrderDateQuery {
    config: HandlerConfig,
}

impl AccountOrderDateQuery {
    pub fn new(config: HandlerConfig) -> Self {
        Self { config }
    }
}

impl OrderReadHandler for AccountOrderDateQuery {
    fn name(&self) -> &'static str {
        "account_orderdate_query"
    }

    fn table_name(&self) -> &str {
        &self.config.table_name
    }

    fn plan(&self, parameters: &QueryParameters) -> Result<ReadRequest, ValidationError> {
        let params = AccountOrderDateParams::from_query(parameters)?;
        Ok(account_orderdate_query(
            &self.config.account_orderdate_index,
            &params,
        ))
    }
}
