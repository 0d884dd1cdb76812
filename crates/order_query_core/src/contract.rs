use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::read_plan::{ACCOUNT_ID_ATTRIBUTE, VENDOR_ID_ATTRIBUTE};

pub const FROM_PARAM: &str = "from";
pub const TO_PARAM: &str = "to";

/// A single record as returned by the store, attribute name to JSON value.
pub type Item = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("query parameter '{0}' is required")]
    MissingParameter(&'static str),
    #[error("query parameter '{0}' cannot be empty")]
    EmptyParameter(&'static str),
    #[error("query parameter '{name}' is not a valid date: '{value}'")]
    InvalidDate { name: &'static str, value: String },
    #[error("'from' ({from}) must not be after 'to' ({to})")]
    ReversedRange { from: String, to: String },
    #[error("queryStringParameters must be an object of string values")]
    MalformedParameters,
}

/// Query-string parameters lifted out of an API Gateway proxy event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    values: BTreeMap<String, String>,
}

impl QueryParameters {
    /// Reads `queryStringParameters`. API Gateway sends `null` when the
    /// request has no query string, which is treated as empty.
    pub fn from_event(event: &Value) -> Result<Self, ValidationError> {
        match event.get("queryStringParameters") {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(object)) => {
                let mut values = BTreeMap::new();
                for (name, value) in object {
                    let Value::String(text) = value else {
                        return Err(ValidationError::MalformedParameters);
                    };
                    values.insert(name.clone(), text.clone());
                }
                Ok(Self { values })
            }
            Some(_) => Err(ValidationError::MalformedParameters),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &'static str) -> Result<&str, ValidationError> {
        let value = self
            .get(name)
            .ok_or(ValidationError::MissingParameter(name))?;
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyParameter(name));
        }
        Ok(value)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Inclusive `orderdate` bounds. The raw strings are kept as sent because the
/// store compares sort keys lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDateRange {
    pub from: String,
    pub to: String,
}

impl OrderDateRange {
    pub fn from_query(parameters: &QueryParameters) -> Result<Self, ValidationError> {
        let from = parameters.require(FROM_PARAM)?;
        let to = parameters.require(TO_PARAM)?;
        validate_order_date(FROM_PARAM, from)?;
        validate_order_date(TO_PARAM, to)?;

        if from > to {
            return Err(ValidationError::ReversedRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub fn contains(&self, order_date: &str) -> bool {
        self.from.as_str() <= order_date && order_date <= self.to.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOrderDateParams {
    pub account_id: String,
    pub range: OrderDateRange,
}

impl AccountOrderDateParams {
    pub fn from_query(parameters: &QueryParameters) -> Result<Self, ValidationError> {
        let account_id = parameters.require(ACCOUNT_ID_ATTRIBUTE)?.to_string();
        let range = OrderDateRange::from_query(parameters)?;
        Ok(Self { account_id, range })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorOrderDateParams {
    pub vendor_id: String,
    pub range: OrderDateRange,
}

impl VendorOrderDateParams {
    pub fn from_query(parameters: &QueryParameters) -> Result<Self, ValidationError> {
        let vendor_id = parameters.require(VENDOR_ID_ATTRIBUTE)?.to_string();
        let range = OrderDateRange::from_query(parameters)?;
        Ok(Self { vendor_id, range })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorScanParams {
    pub vendor_id: String,
}

impl VendorScanParams {
    pub fn from_query(parameters: &QueryParameters) -> Result<Self, ValidationError> {
        let vendor_id = parameters.require(VENDOR_ID_ATTRIBUTE)?.to_string();
        Ok(Self { vendor_id })
    }
}

/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM:SS[.f]` timestamp, or RFC 3339.
/// Fields must be zero-padded so the value orders lexically with stored dates.
pub fn validate_order_date(name: &'static str, value: &str) -> Result<(), ValidationError> {
    let parses = has_canonical_prefix(value)
        && (NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
            || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
            || DateTime::parse_from_rfc3339(value).is_ok());
    if parses {
        Ok(())
    } else {
        Err(ValidationError::InvalidDate {
            name,
            value: value.to_string(),
        })
    }
}

/// `YYYY-MM-DD`, optionally followed by `THH:MM:SS`, every field at full width.
fn has_canonical_prefix(value: &str) -> bool {
    const DATE: &[u8] = b"dddd-dd-dd";
    const TIME: &[u8] = b"Tdd:dd:dd";

    let matches = |bytes: &[u8], pattern: &[u8]| {
        bytes.len() >= pattern.len()
            && pattern.iter().zip(bytes).all(|(expected, actual)| match *expected {
                b'd' => actual.is_ascii_digit(),
                literal => literal == *actual,
            })
    };

    let bytes = value.as_bytes();
    if !matches(bytes, DATE) {
        return false;
    }
    let rest = &bytes[DATE.len()..];
    rest.is_empty() || matches(rest, TIME)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumedCapacity {
    pub table_name: String,
    pub capacity_units: f64,
}

/// Read result envelope, serialized with the store's own field names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ReadOutput {
    pub items: Vec<Item>,
    pub count: usize,
    pub scanned_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

impl ReadOutput {
    /// Folds one page of a paginated read into the accumulated result.
    pub fn merge_page(&mut self, page: ReadOutput) {
        self.items.extend(page.items);
        self.count += page.count;
        self.scanned_count += page.scanned_count;
        self.consumed_capacity = match (self.consumed_capacity.take(), page.consumed_capacity) {
            (Some(mut total), Some(next)) => {
                total.capacity_units += next.capacity_units;
                Some(total)
            }
            (total, next) => total.or(next),
        };
    }
}
