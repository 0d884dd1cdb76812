use std::sync::Mutex;

use serde_json::{json, Value};

use crate::adapters::order_store::OrderStore;
use crate::runtime::contract::{Item, ReadOutput};
use crate::runtime::read_plan::{ReadRequest, ORDER_DATE_ATTRIBUTE};

/// Table double evaluating plans with the store's equality, BETWEEN and
/// projection semantics. Records scan in insertion order.
pub(crate) struct MemoryOrderStore {
    records: Vec<Item>,
    failure: Option<String>,
    requests: Mutex<Vec<(String, ReadRequest)>>,
}

impl MemoryOrderStore {
    pub(crate) fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: records
                .into_iter()
                .filter_map(|record| match record {
                    Value::Object(item) => Some(item),
                    _ => None,
                })
                .collect(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::with_records(Vec::new())
        }
    }

    /// The two-record table used throughout the handler tests.
    pub(crate) fn sample() -> Self {
        Self::with_records(vec![
            json!({"accountid": "A1", "vendorid": "V1", "orderdate": "2024-01-10", "details": "x"}),
            json!({"accountid": "A1", "vendorid": "V2", "orderdate": "2024-02-15", "details": "y"}),
        ])
    }

    pub(crate) fn requests(&self) -> Vec<(String, ReadRequest)> {
        self.requests.lock().expect("poisoned mutex").clone()
    }
}

impl OrderStore for MemoryOrderStore {
    fn read(&self, table_name: &str, request: &ReadRequest) -> Result<ReadOutput, String> {
        self.requests
            .lock()
            .expect("poisoned mutex")
            .push((table_name.to_string(), request.clone()));

        if let Some(message) = &self.failure {
            return Err(message.clone());
        }

        let (matched, scanned_count) = match request {
            ReadRequest::Query(query) => {
                let mut matched: Vec<&Item> = self
                    .records
                    .iter()
                    .filter(|record| {
                        string_attribute(record, query.partition_attribute)
                            == Some(query.partition_value.as_str())
                            && string_attribute(record, ORDER_DATE_ATTRIBUTE)
                                .map(|order_date| query.range.contains(order_date))
                                .unwrap_or(false)
                    })
                    .collect();
                matched.sort_by_key(|record| string_attribute(*record, ORDER_DATE_ATTRIBUTE));
                let scanned_count = matched.len();
                (matched, scanned_count)
            }
            ReadRequest::Scan(scan) => {
                let matched: Vec<&Item> = self
                    .records
                    .iter()
                    .filter(|record| {
                        string_attribute(record, scan.filter_attribute)
                            == Some(scan.filter_value.as_str())
                    })
                    .collect();
                (matched, self.records.len())
            }
        };

        let items: Vec<Item> = matched
            .into_iter()
            .map(|record| {
                request
                    .projection()
                    .iter()
                    .filter_map(|attribute| {
                        record
                            .get(*attribute)
                            .map(|value| (attribute.to_string(), value.clone()))
                    })
                    .collect::<Item>()
            })
            .collect();

        Ok(ReadOutput {
            count: items.len(),
            items,
            scanned_count,
            consumed_capacity: None,
        })
    }
}

fn string_attribute<'a>(record: &'a Item, attribute: &str) -> Option<&'a str> {
    record.get(attribute).and_then(Value::as_str)
}
