//! DynamoDB wire types for dynomap.
//!
//! This crate holds the request and response shapes of the `2011-12-05`
//! DynamoDB JSON protocol as consumed by the dynomap client core: typed
//! attribute values, per-operation inputs and outputs, the legacy condition
//! and update structures, and the classified error returned by a transport.
//! Everything is plain serde; the protocol's JSON maps directly onto derives.
// "DynamoDB" appears in virtually every doc comment in this crate.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)]

pub mod attribute_value;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use attribute_value::AttributeValue;
pub use error::{DynamoDBError, DynamoDBErrorCode, ErrorKind};
pub use operations::DynamoDBOperation;
