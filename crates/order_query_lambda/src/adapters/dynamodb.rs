use std::collections::HashMap;
use std::future::Future;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnConsumedCapacity};
use aws_sdk_dynamodb::Client;

use crate::adapters::order_store::OrderStore;
use crate::runtime::contract::{ConsumedCapacity, Item, ReadOutput};
use crate::runtime::read_plan::{FilteredScan, IndexQuery, ReadRequest};

type Key = HashMap<String, AttributeValue>;

/// DynamoDB-backed store. Follows `LastEvaluatedKey` until the read is
/// exhausted; retries are left to the SDK's default retry policy.
#[derive(Debug, Clone)]
pub struct DynamoOrderStore {
    client: Client,
}

impl DynamoOrderStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn from_env() -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&aws_config))
    }

    pub async fn read_all(
        &self,
        table_name: &str,
        request: &ReadRequest,
    ) -> Result<ReadOutput, String> {
        collect_pages(move |start_key| async move {
            match request {
                ReadRequest::Query(query) => {
                    self.query_page(table_name, request, query, start_key)
                        .await
                }
                ReadRequest::Scan(scan) => {
                    self.scan_page(table_name, request, scan, start_key)
                        .await
                }
            }
        })
        .await
    }

    async fn query_page(
        &self,
        table_name: &str,
        request: &ReadRequest,
        query: &IndexQuery,
        start_key: Option<Key>,
    ) -> Result<(ReadOutput, Option<Key>), String> {
        let response = self
            .client
            .query()
            .table_name(table_name)
            .index_name(&query.index_name)
            .key_condition_expression(query.key_condition_expression())
            .projection_expression(request.projection_expression())
            .set_expression_attribute_names(Some(attribute_names(request)))
            .set_expression_attribute_values(Some(attribute_values(request)))
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(|error| DisplayErrorContext(&error).to_string())?;

        let page = read_output_page(
            response.items,
            response.count,
            response.scanned_count,
            response.consumed_capacity,
        )?;
        Ok((page, response.last_evaluated_key))
    }

    async fn scan_page(
        &self,
        table_name: &str,
        request: &ReadRequest,
        scan: &FilteredScan,
        start_key: Option<Key>,
    ) -> Result<(ReadOutput, Option<Key>), String> {
        let response = self
            .client
            .scan()
            .table_name(table_name)
            .filter_expression(scan.filter_expression())
            .projection_expression(request.projection_expression())
            .set_expression_attribute_names(Some(attribute_names(request)))
            .set_expression_attribute_values(Some(attribute_values(request)))
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(|error| DisplayErrorContext(&error).to_string())?;

        let page = read_output_page(
            response.items,
            response.count,
            response.scanned_count,
            response.consumed_capacity,
        )?;
        Ok((page, response.last_evaluated_key))
    }
}

impl OrderStore for DynamoOrderStore {
    fn read(&self, table_name: &str, request: &ReadRequest) -> Result<ReadOutput, String> {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(self.read_all(table_name, request))
        })
    }
}

/// Requests pages until the store stops returning a continuation key. An
/// empty key also ends the read.
async fn collect_pages<F, Fut>(mut fetch_page: F) -> Result<ReadOutput, String>
where
    F: FnMut(Option<Key>) -> Fut,
    Fut: Future<Output = Result<(ReadOutput, Option<Key>), String>>,
{
    let mut output = ReadOutput::default();
    let mut start_key: Option<Key> = None;

    loop {
        let (page, next_key) = fetch_page(start_key.take()).await?;
        output.merge_page(page);

        match next_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    Ok(output)
}

fn attribute_names(request: &ReadRequest) -> HashMap<String, String> {
    request.expression_attribute_names().into_iter().collect()
}

fn attribute_values(request: &ReadRequest) -> HashMap<String, AttributeValue> {
    request
        .expression_attribute_values()
        .into_iter()
        .map(|(placeholder, value)| (placeholder, AttributeValue::S(value)))
        .collect()
}

fn read_output_page(
    items: Option<Vec<Key>>,
    count: i32,
    scanned_count: i32,
    consumed_capacity: Option<aws_sdk_dynamodb::types::ConsumedCapacity>,
) -> Result<ReadOutput, String> {
    let items = items
        .unwrap_or_default()
        .into_iter()
        .map(decode_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReadOutput {
        items,
        count: usize::try_from(count).unwrap_or_default(),
        scanned_count: usize::try_from(scanned_count).unwrap_or_default(),
        consumed_capacity: consumed_capacity.map(|capacity| ConsumedCapacity {
            table_name: capacity.table_name.unwrap_or_default(),
            capacity_units: capacity.capacity_units.unwrap_or_default(),
        }),
    })
}

fn decode_item(item: Key) -> Result<Item, String> {
    let item: Key = item
        .into_iter()
        .map(|(name, value)| (name, binary_as_text(value)))
        .collect();
    let decoded: Item = serde_dynamo::from_item(item)
        .map_err(|error| format!("failed to decode order item: {error}"))?;
    Ok(decoded)
}

/// JSON has no bytes type, so binary attributes are carried as base64 strings.
fn binary_as_text(value: AttributeValue) -> AttributeValue {
    match value {
        AttributeValue::B(blob) => AttributeValue::S(base64::encode(blob.into_inner())),
        AttributeValue::Bs(blobs) => AttributeValue::Ss(
            blobs
                .into_iter()
                .map(|blob| base64::encode(blob.into_inner()))
                .collect(),
        ),
        AttributeValue::L(values) => {
            AttributeValue::L(values.into_iter().map(binary_as_text).collect())
        }
        AttributeValue::M(values) => AttributeValue::M(
            values
                .into_iter()
                .map(|(name, value)| (name, binary_as_text(value)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;

    use crate::runtime::contract::VendorScanParams;
    use crate::runtime::read_plan::vendor_scan;

    use super::*;

    #[test]
    fn expression_values_are_bound_as_strings() {
        let request = vendor_scan(&VendorScanParams {
            vendor_id: "V2".to_string(),
        });

        let values = attribute_values(&request);
        assert_eq!(values.len(), 1);
        assert_eq!(
            values.get(":filter"),
            Some(&AttributeValue::S("V2".to_string()))
        );
        assert_eq!(
            attribute_names(&request).get("#filter").map(String::as_str),
            Some("vendorid")
        );
    }

    #[test]
    fn pages_decode_into_plain_json_items() {
        let item = HashMap::from([
            ("vendorid".to_string(), AttributeValue::S("V1".to_string())),
            ("details".to_string(), AttributeValue::S("x".to_string())),
            ("shipped".to_string(), AttributeValue::Bool(true)),
        ]);
        let capacity = aws_sdk_dynamodb::types::ConsumedCapacity::builder()
            .table_name("orders")
            .capacity_units(0.5)
            .build();

        let page = read_output_page(Some(vec![item]), 1, 3, Some(capacity))
            .expect("page should decode");

        assert_eq!(page.count, 1);
        assert_eq!(page.scanned_count, 3);
        assert_eq!(
            serde_json::to_value(&page).expect("page should serialize"),
            json!({
                "Items": [{"vendorid": "V1", "details": "x", "shipped": true}],
                "Count": 1,
                "ScannedCount": 3,
                "ConsumedCapacity": {"TableName": "orders", "CapacityUnits": 0.5},
            })
        );
    }

    #[test]
    fn binary_attributes_decode_as_base64_text() {
        let item = HashMap::from([
            (
                "details".to_string(),
                AttributeValue::B(Blob::new(b"order".to_vec())),
            ),
            (
                "tags".to_string(),
                AttributeValue::M(HashMap::from([(
                    "raw".to_string(),
                    AttributeValue::Bs(vec![Blob::new(b"a".to_vec())]),
                )])),
            ),
        ]);

        let decoded = decode_item(item).expect("binary item should decode");
        assert_eq!(decoded["details"], json!("b3JkZXI="));
        assert_eq!(decoded["tags"], json!({"raw": ["YQ=="]}));
    }

    fn key(vendor_id: &str) -> Key {
        HashMap::from([(
            "vendorid".to_string(),
            AttributeValue::S(vendor_id.to_string()),
        )])
    }

    fn page(vendor_id: &str, scanned_count: usize) -> ReadOutput {
        ReadOutput {
            items: vec![Item::from_iter([(
                "vendorid".to_string(),
                json!(vendor_id),
            )])],
            count: 1,
            scanned_count,
            consumed_capacity: None,
        }
    }

    #[tokio::test]
    async fn pagination_resumes_from_each_continuation_key() {
        let mut pages = vec![
            (page("V1", 10), Some(key("K1"))),
            (page("V2", 20), Some(key("K2"))),
            (page("V3", 5), Some(HashMap::new())),
        ]
        .into_iter();
        let mut start_keys = Vec::new();

        let output = collect_pages(|start_key| {
            start_keys.push(start_key);
            let next = pages.next();
            async move { next.ok_or_else(|| "read past the last page".to_string()) }
        })
        .await
        .expect("pages should merge");

        assert_eq!(start_keys, vec![None, Some(key("K1")), Some(key("K2"))]);
        assert_eq!(output.count, 3);
        assert_eq!(output.scanned_count, 35);
        let vendors: Vec<&str> = output
            .items
            .iter()
            .filter_map(|item| item["vendorid"].as_str())
            .collect();
        assert_eq!(vendors, vec!["V1", "V2", "V3"]);
    }

    #[tokio::test]
    async fn pagination_stops_without_a_key_and_surfaces_errors() {
        let mut calls = 0;
        let output = collect_pages(|_| {
            calls += 1;
            async { Ok((page("V1", 1), None)) }
        })
        .await
        .expect("single page should merge");
        assert_eq!(calls, 1);
        assert_eq!(output.count, 1);

        let mut results = vec![
            Ok((page("V1", 4), Some(key("K1")))),
            Err("ProvisionedThroughputExceededException".to_string()),
        ]
        .into_iter();
        let error = collect_pages(|_| {
            let next = results.next().expect("no further pages requested");
            async move { next }
        })
        .await
        .expect_err("second page failure should fail the read");
        assert_eq!(error, "ProvisionedThroughputExceededException");
    }

    #[test]
    fn missing_items_yield_an_empty_page() {
        let page = read_output_page(None, 0, 0, None).expect("empty page should decode");
        assert_eq!(page, ReadOutput::default());
    }
}
