//! DynamoDB input types for the item-level operations.
//!
//! All input structs use `PascalCase` JSON field naming to match the
//! `2011-12-05` wire protocol. Optional fields are omitted when `None`,
//! empty maps and `Vec`s are omitted to produce minimal JSON payloads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;
use crate::types::{
    AttributeMap, AttributeValueUpdate, Condition, ExpectedAttributeValue, Key, KeysAndAttributes,
    ReturnValue, WriteRequest,
};

// ---------------------------------------------------------------------------
// Item CRUD
// ---------------------------------------------------------------------------

/// Input for the `PutItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemInput {
    /// The name of the table to put the item into.
    pub table_name: String,

    /// The item attributes to write.
    pub item: AttributeMap,

    /// Conditions that must hold on the stored item for the write to succeed.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub expected: IndexMap<String, ExpectedAttributeValue>,

    /// Whether to return the previous item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
}

/// Input for the `GetItem` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemInput {
    /// The name of the table containing the item.
    pub table_name: String,

    /// The primary key of the item to retrieve.
    pub key: Key,

    /// The attributes to retrieve. If empty, all attributes are returned.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes_to_get: Vec<String>,

    /// Whether to use strongly consistent reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

/// Input for the `UpdateItem` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemInput {
    /// The name of the table containing the item.
    pub table_name: String,

    /// The primary key of the item to update.
    pub key: Key,

    /// Per-attribute mutations.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attribute_updates: IndexMap<String, AttributeValueUpdate>,

    /// Conditions that must hold on the stored item for the update to succeed.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub expected: IndexMap<String, ExpectedAttributeValue>,

    /// Which attributes to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
}

/// Input for the `DeleteItem` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemInput {
    /// The name of the table containing the item.
    pub table_name: String,

    /// The primary key of the item to delete.
    pub key: Key,

    /// Conditions that must hold on the stored item for the delete to succeed.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub expected: IndexMap<String, ExpectedAttributeValue>,

    /// Whether to return the deleted item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
}

// ---------------------------------------------------------------------------
// Query & Scan
// ---------------------------------------------------------------------------

/// Input for the `Query` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryInput {
    /// The name of the table to query.
    pub table_name: String,

    /// The hash key value all returned items share.
    pub hash_key_value: AttributeValue,

    /// Optional condition on the range key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_key_condition: Option<Condition>,

    /// The attributes to retrieve.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes_to_get: Vec<String>,

    /// Whether to use strongly consistent reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,

    /// Return only the number of matching items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<bool>,

    /// The maximum number of items to evaluate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Traverse the range key in ascending (`true`) or descending order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_index_forward: Option<bool>,

    /// The primary key of the first item to evaluate (for pagination).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Key>,
}

/// Input for the `Scan` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanInput {
    /// The name of the table to scan.
    pub table_name: String,

    /// Conjunctive filter conditions, keyed by attribute name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub scan_filter: IndexMap<String, Condition>,

    /// The attributes to retrieve.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes_to_get: Vec<String>,

    /// Return only the number of matching items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<bool>,

    /// The maximum number of items to evaluate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// The primary key of the first item to evaluate (for pagination).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Key>,
}

// ---------------------------------------------------------------------------
// Batch operations
// ---------------------------------------------------------------------------

/// Input for the `BatchGetItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetItemInput {
    /// A map of table names to the keys and attributes to retrieve.
    pub request_items: IndexMap<String, KeysAndAttributes>,
}

/// Input for the `BatchWriteItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteItemInput {
    /// A map of table names to lists of write requests.
    pub request_items: IndexMap<String, Vec<WriteRequest>>,
}
