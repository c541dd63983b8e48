//! DynamoDB output types for the item-level operations.
//!
//! All output structs use `PascalCase` JSON field naming to match the
//! `2011-12-05` wire protocol. Every field is defaulted on decode so that
//! sparse responses (no `Items` on a count-only query, no `Attributes` when
//! `ReturnValues` was `NONE`) parse without special casing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{AttributeMap, Key, KeysAndAttributes, WriteRequest};

// ---------------------------------------------------------------------------
// Item CRUD
// ---------------------------------------------------------------------------

/// Output for the `PutItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemOutput {
    /// The previous item, when `ReturnValues` was `ALL_OLD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeMap>,

    /// The write capacity units consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity_units: Option<f64>,
}

/// Output for the `GetItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemOutput {
    /// The item, or `None` when no item has the given key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<AttributeMap>,

    /// The read capacity units consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity_units: Option<f64>,
}

/// Output for the `UpdateItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemOutput {
    /// The attributes selected by `ReturnValues`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeMap>,

    /// The write capacity units consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity_units: Option<f64>,
}

/// Output for the `DeleteItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemOutput {
    /// The deleted item, when `ReturnValues` was `ALL_OLD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeMap>,

    /// The write capacity units consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity_units: Option<f64>,
}

// ---------------------------------------------------------------------------
// Query & Scan
// ---------------------------------------------------------------------------

/// Output for the `Query` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryOutput {
    /// The matching items. Absent when `Count` was requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<AttributeMap>,

    /// The number of items in the response.
    #[serde(default)]
    pub count: u64,

    /// The primary key of the item where the query stopped. Use this value as
    /// `ExclusiveStartKey` in a subsequent query to continue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Key>,

    /// The read capacity units consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity_units: Option<f64>,
}

/// Output for the `Scan` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanOutput {
    /// The matching items. Absent when `Count` was requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<AttributeMap>,

    /// The number of items in the response.
    #[serde(default)]
    pub count: u64,

    /// The number of items evaluated before `ScanFilter` was applied.
    #[serde(default)]
    pub scanned_count: u64,

    /// The primary key of the item where the scan stopped. Use this value as
    /// `ExclusiveStartKey` in a subsequent scan to continue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Key>,

    /// The read capacity units consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity_units: Option<f64>,
}

// ---------------------------------------------------------------------------
// Batch operations
// ---------------------------------------------------------------------------

/// Items returned for one table of a `BatchGetItem` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetTableResponse {
    /// The retrieved items.
    #[serde(default)]
    pub items: Vec<AttributeMap>,

    /// The read capacity units consumed against this table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity_units: Option<f64>,
}

/// Output for the `BatchGetItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetItemOutput {
    /// A map of table names to the items retrieved from each table.
    #[serde(default)]
    pub responses: IndexMap<String, BatchGetTableResponse>,

    /// Keys that were not processed. Use these values as `RequestItems` in a
    /// subsequent `BatchGetItem` call.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub unprocessed_keys: IndexMap<String, KeysAndAttributes>,
}

/// Capacity consumed against one table of a `BatchWriteItem` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteTableResponse {
    /// The write capacity units consumed against this table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_capacity_units: Option<f64>,
}

/// Output for the `BatchWriteItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteItemOutput {
    /// Per-table consumed capacity.
    #[serde(default)]
    pub responses: IndexMap<String, BatchWriteTableResponse>,

    /// Write requests that were not processed. Use these values as
    /// `RequestItems` in a subsequent `BatchWriteItem` call.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub unprocessed_items: IndexMap<String, Vec<WriteRequest>>,
}
