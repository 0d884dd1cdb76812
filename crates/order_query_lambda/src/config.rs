use crate::error::ConfigError;
use crate::runtime::read_plan::{DEFAULT_ACCOUNT_ORDERDATE_INDEX, DEFAULT_VENDOR_ORDERDATE_INDEX};

pub const TABLE_NAME_ENV: &str = "TABLENAME";
pub const ACCOUNT_ORDERDATE_INDEX_ENV: &str = "ACCOUNT_ORDERDATE_INDEX";
pub const VENDOR_ORDERDATE_INDEX_ENV: &str = "VENDOR_ORDERDATE_INDEX";

/// Table and index names shared by every handler, resolved once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub table_name: String,
    pub account_orderdate_index: String,
    pub vendor_orderdate_index: String,
}

impl HandlerConfig {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            account_orderdate_index: DEFAULT_ACCOUNT_ORDERDATE_INDEX.to_string(),
            vendor_orderdate_index: DEFAULT_VENDOR_ORDERDATE_INDEX.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let resolve = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let table_name =
            resolve(TABLE_NAME_ENV).ok_or(ConfigError::MissingVariable(TABLE_NAME_ENV))?;
        let mut config = Self::new(table_name);
        if let Some(index) = resolve(ACCOUNT_ORDERDATE_INDEX_ENV) {
            config.account_orderdate_index = index;
        }
        if let Some(index) = resolve(VENDOR_ORDERDATE_INDEX_ENV) {
            config.vendor_orderdate_index = index;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name: &str| values.get(name).cloned()
    }

    #[test]
    fn missing_table_name_is_rejected() {
        let error = HandlerConfig::from_lookup(lookup(&[])).expect_err("table is required");
        assert_eq!(error, ConfigError::MissingVariable("TABLENAME"));

        let error = HandlerConfig::from_lookup(lookup(&[("TABLENAME", "   ")]))
            .expect_err("blank table should fail");
        assert_eq!(
            error.to_string(),
            "environment variable TABLENAME must be configured"
        );
    }

    #[test]
    fn index_names_default_to_table_definition() {
        let config = HandlerConfig::from_lookup(lookup(&[("TABLENAME", "dynamodb_indexes")]))
            .expect("config should load");
        assert_eq!(config.table_name, "dynamodb_indexes");
        assert_eq!(config.account_orderdate_index, "lsi-accountid_orderdate");
        assert_eq!(config.vendor_orderdate_index, "gsi-vendorid_orderdate");
    }

    #[test]
    fn index_names_can_be_overridden() {
        let config = HandlerConfig::from_lookup(lookup(&[
            ("TABLENAME", "orders"),
            ("ACCOUNT_ORDERDATE_INDEX", "lsi_accountid_orderdate"),
            ("VENDOR_ORDERDATE_INDEX", "gsi_vendorid_orderdate"),
        ]))
        .expect("config should load");
        assert_eq!(config.account_orderdate_index, "lsi_accountid_orderdate");
        assert_eq!(config.vendor_orderdate_index, "gsi_vendorid_orderdate");
    }
}
