//! Error types for the dynomap client core.

use dynomap_model::types::ReturnValue;
use dynomap_model::{DynamoDBError, ErrorKind};

/// A request could not be built from the values supplied.
///
/// Raised synchronously while constructing attributes, conditions or
/// contexts. Never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstructionError {
    /// The value has no attribute representation (bool, null, object,
    /// nested array, empty set, array for a scalar type).
    #[error("invalid attribute value: {0}")]
    InvalidValue(String),

    /// A number attribute was requested for a value that is not numeric.
    #[error("not a number: {0:?}")]
    InvalidNumber(String),

    /// An attribute of one type was supplied where another was required.
    #[error("attribute type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The type the caller asked for.
        expected: &'static str,
        /// The type that was supplied.
        found: &'static str,
    },

    /// `BETWEEN` was given something other than exactly two bounds.
    #[error("BETWEEN requires exactly two values, got {0}")]
    BetweenArity(usize),

    /// A batch context already holds the maximum number of entries.
    #[error("batch limit of {limit} entries exceeded")]
    LimitExceeded {
        /// The maximum number of entries for the operation.
        limit: usize,
    },

    /// Scans cannot be strongly consistent.
    #[error("consistent read is not supported by scan")]
    ConsistentReadUnsupported,

    /// The return-values selector is not accepted by the operation.
    #[error("return values {0} not supported by this operation")]
    UnsupportedReturnValues(ReturnValue),

    /// Only set attributes can be iterated.
    #[error("attribute of type {0} is not iterable")]
    NotIterable(&'static str),

    /// The item has no table name.
    #[error("item has no table name")]
    MissingTable,

    /// A wire value declared a type its payload does not satisfy.
    #[error("invalid wire value: {0}")]
    InvalidWireValue(String),
}

/// Error returned by [`Connection`](crate::Connection) and
/// [`Repeater`](crate::Repeater) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be built, or a response could not be mapped
    /// back to attributes.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// The transport reported a classified service error.
    #[error(transparent)]
    Boundary(#[from] DynamoDBError),

    /// Rendering a request or decoding a response failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Classification of a boundary error, if this is one.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Boundary(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Whether resubmitting the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == Some(ErrorKind::CapacityExceeded)
    }
}

/// Convenience result type for dynomap operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
