use std::collections::BTreeMap;

use crate::contract::{
    AccountOrderDateParams, OrderDateRange, VendorOrderDateParams, VendorScanParams,
};

pub const ACCOUNT_ID_ATTRIBUTE: &str = "accountid";
pub const VENDOR_ID_ATTRIBUTE: &str = "vendorid";
pub const ORDER_DATE_ATTRIBUTE: &str = "orderdate";
pub const DETAILS_ATTRIBUTE: &str = "details";

pub const DEFAULT_ACCOUNT_ORDERDATE_INDEX: &str = "lsi-accountid_orderdate";
pub const DEFAULT_VENDOR_ORDERDATE_INDEX: &str = "gsi-vendorid_orderdate";

pub const ACCOUNT_ORDERDATE_PROJECTION: &[&str] = &[VENDOR_ID_ATTRIBUTE, DETAILS_ATTRIBUTE];
pub const VENDOR_ORDERDATE_PROJECTION: &[&str] =
    &[VENDOR_ID_ATTRIBUTE, ACCOUNT_ID_ATTRIBUTE, DETAILS_ATTRIBUTE];
pub const VENDOR_SCAN_PROJECTION: &[&str] =
    &[VENDOR_ID_ATTRIBUTE, ORDER_DATE_ATTRIBUTE, ACCOUNT_ID_ATTRIBUTE];

const PARTITION_NAME: &str = "#pk";
const SORT_NAME: &str = "#sk";
const FILTER_NAME: &str = "#filter";
const PARTITION_VALUE: &str = ":pk";
const FROM_VALUE: &str = ":from";
const TO_VALUE: &str = ":to";
const FILTER_VALUE: &str = ":filter";

/// One read against the order table: a keyed index query or a filtered scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadRequest {
    Query(IndexQuery),
    Scan(FilteredScan),
}

/// Equality on the index partition key plus an inclusive range on `orderdate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    pub index_name: String,
    pub partition_attribute: &'static str,
    pub partition_value: String,
    pub range: OrderDateRange,
    pub projection: &'static [&'static str],
}

/// Full-table scan with an equality filter. Cost scales with table size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredScan {
    pub filter_attribute: &'static str,
    pub filter_value: String,
    pub projection: &'static [&'static str],
}

impl IndexQuery {
    pub fn key_condition_expression(&self) -> String {
        format!("{PARTITION_NAME} = {PARTITION_VALUE} AND {SORT_NAME} BETWEEN {FROM_VALUE} AND {TO_VALUE}")
    }
}

impl FilteredScan {
    pub fn filter_expression(&self) -> String {
        format!("{FILTER_NAME} = {FILTER_VALUE}")
    }
}

impl ReadRequest {
    pub fn operation(&self) -> &'static str {
        match self {
            ReadRequest::Query(_) => "Query",
            ReadRequest::Scan(_) => "Scan",
        }
    }

    pub fn index_name(&self) -> Option<&str> {
        match self {
            ReadRequest::Query(query) => Some(&query.index_name),
            ReadRequest::Scan(_) => None,
        }
    }

    pub fn projection(&self) -> &'static [&'static str] {
        match self {
            ReadRequest::Query(query) => query.projection,
            ReadRequest::Scan(scan) => scan.projection,
        }
    }

    /// Placeholders keep attribute names clear of the reserved word list.
    pub fn projection_expression(&self) -> String {
        (0..self.projection().len())
            .map(projection_placeholder)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn expression_attribute_names(&self) -> BTreeMap<String, String> {
        let mut names: BTreeMap<String, String> = self
            .projection()
            .iter()
            .enumerate()
            .map(|(position, attribute)| (projection_placeholder(position), attribute.to_string()))
            .collect();

        match self {
            ReadRequest::Query(query) => {
                names.insert(
                    PARTITION_NAME.to_string(),
                    query.partition_attribute.to_string(),
                );
                names.insert(SORT_NAME.to_string(), ORDER_DATE_ATTRIBUTE.to_string());
            }
            ReadRequest::Scan(scan) => {
                names.insert(FILTER_NAME.to_string(), scan.filter_attribute.to_string());
            }
        }
        names
    }

    /// String-typed values bound to the expression placeholders.
    pub fn expression_attribute_values(&self) -> BTreeMap<String, String> {
        match self {
            ReadRequest::Query(query) => BTreeMap::from([
                (PARTITION_VALUE.to_string(), query.partition_value.clone()),
                (FROM_VALUE.to_string(), query.range.from.clone()),
                (TO_VALUE.to_string(), query.range.to.clone()),
            ]),
            ReadRequest::Scan(scan) => {
                BTreeMap::from([(FILTER_VALUE.to_string(), scan.filter_value.clone())])
            }
        }
    }
}

fn projection_placeholder(position: usize) -> String {
    format!("#p{position}")
}

pub fn account_orderdate_query(index_name: &str, params: &AccountOrderDateParams) -> ReadRequest {
    ReadRequest::Query(IndexQuery {
        index_name: index_name.to_string(),
        partition_attribute: ACCOUNT_ID_ATTRIBUTE,
        partition_value: params.account_id.clone(),
        range: params.range.clone(),
        projection: ACCOUNT_ORDERDATE_PROJECTION,
    })
}

pub fn vendor_orderdate_query(index_name: &str, params: &VendorOrderDateParams) -> ReadRequest {
    ReadRequest::Query(IndexQuery {
        index_name: index_name.to_string(),
        partition_attribute: VENDOR_ID_ATTRIBUTE,
        partition_value: params.vendor_id.clone(),
        range: params.range.clone(),
        projection: VENDOR_ORDERDATE_PROJECTION,
    })
}

pub fn vendor_scan(params: &VendorScanParams) -> ReadRequest {
    ReadRequest::Scan(FilteredScan {
        filter_attribute: VENDOR_ID_ATTRIBUTE,
        filter_value: params.vendor_id.clone(),
        projection: VENDOR_SCAN_PROJECTION,
    })
}
