//! The RPC boundary.

use std::sync::Arc;

use dynomap_model::{DynamoDBError, DynamoDBOperation};

/// Executes one operation against the remote store.
///
/// The request and the successful response are the JSON bodies of the
/// `2011-12-05` protocol. A failure must arrive classified: implementations
/// turn the service's `__type` into a [`DynamoDBError`] (see
/// [`DynamoDBError::from_json_body`]) so the client core never inspects
/// message text.
pub trait Transport {
    /// Execute `operation` with the given request body.
    fn execute(
        &self,
        operation: DynamoDBOperation,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, DynamoDBError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(
        &self,
        operation: DynamoDBOperation,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, DynamoDBError> {
        (**self).execute(operation, request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(
        &self,
        operation: DynamoDBOperation,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, DynamoDBError> {
        (**self).execute(operation, request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(
        &self,
        operation: DynamoDBOperation,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, DynamoDBError> {
        (**self).execute(operation, request)
    }
}
