//! DynamoDB error types.
//!
//! DynamoDB errors use JSON format with a `__type` field containing the
//! fully-qualified error type name. A transport classifies every failure into
//! a [`DynamoDBErrorCode`] exactly once; callers then branch on
//! [`ErrorKind`], never on message text.

use std::fmt;

use serde::Deserialize;

/// Well-known DynamoDB error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum DynamoDBErrorCode {
    /// Table already exists or is being modified.
    ResourceInUseException,
    /// Table not found.
    ResourceNotFoundException,
    /// Condition check failed.
    ConditionalCheckFailedException,
    /// Provisioned throughput exceeded.
    ProvisionedThroughputExceededException,
    /// Too many concurrent control-plane operations.
    LimitExceededException,
    /// Validation error.
    #[default]
    ValidationException,
    /// Serialization error.
    SerializationException,
    /// Internal server error.
    InternalServerError,
    /// Service temporarily unavailable.
    ServiceUnavailableException,
    /// Access denied.
    AccessDeniedException,
    /// Credentials not recognized.
    UnrecognizedClientException,
    /// The `__type` of the error body named no code known to this crate.
    UnknownError,
}

/// Coarse classification of a boundary failure.
///
/// Only [`ErrorKind::CapacityExceeded`] is recoverable by retrying the same
/// request; every other kind is fatal for the operation in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The table's provisioned throughput was exhausted.
    CapacityExceeded,
    /// The table does not exist.
    ResourceNotFound,
    /// The request was malformed or mismatched the table schema.
    Validation,
    /// Any other failure.
    Server,
}

impl DynamoDBErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceInUseException => "ResourceInUseException",
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::ConditionalCheckFailedException => "ConditionalCheckFailedException",
            Self::ProvisionedThroughputExceededException => {
                "ProvisionedThroughputExceededException"
            }
            Self::LimitExceededException => "LimitExceededException",
            Self::ValidationException => "ValidationException",
            Self::SerializationException => "SerializationException",
            Self::InternalServerError => "InternalServerError",
            Self::ServiceUnavailableException => "ServiceUnavailableException",
            Self::AccessDeniedException => "AccessDeniedException",
            Self::UnrecognizedClientException => "UnrecognizedClientException",
            Self::UnknownError => "UnknownError",
        }
    }

    /// Parse a `__type` value (fully-qualified or short) into a code.
    ///
    /// Unrecognized names map to [`DynamoDBErrorCode::UnknownError`].
    #[must_use]
    pub fn from_type(error_type: &str) -> Self {
        let short = error_type
            .rsplit_once('#')
            .map_or(error_type, |(_, code)| code);
        match short {
            "ResourceInUseException" => Self::ResourceInUseException,
            "ResourceNotFoundException" => Self::ResourceNotFoundException,
            "ConditionalCheckFailedException" => Self::ConditionalCheckFailedException,
            "ProvisionedThroughputExceededException" => {
                Self::ProvisionedThroughputExceededException
            }
            "LimitExceededException" => Self::LimitExceededException,
            "ValidationException" => Self::ValidationException,
            "SerializationException" => Self::SerializationException,
            "InternalServerError" | "InternalFailure" => Self::InternalServerError,
            "ServiceUnavailableException" => Self::ServiceUnavailableException,
            "AccessDeniedException" => Self::AccessDeniedException,
            "UnrecognizedClientException" => Self::UnrecognizedClientException,
            _ => Self::UnknownError,
        }
    }

    /// Classify this code.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProvisionedThroughputExceededException => ErrorKind::CapacityExceeded,
            Self::ResourceNotFoundException => ErrorKind::ResourceNotFound,
            Self::ValidationException | Self::SerializationException => ErrorKind::Validation,
            _ => ErrorKind::Server,
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::InternalServerError | Self::UnknownError => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ServiceUnavailableException => http::StatusCode::SERVICE_UNAVAILABLE,
            _ => http::StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for DynamoDBErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified DynamoDB error returned by a transport.
#[derive(Debug)]
pub struct DynamoDBError {
    /// The error code.
    pub code: DynamoDBErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for DynamoDBError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamoDBError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for DynamoDBError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Shape of an error response body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type", default)]
    error_type: Option<String>,
    #[serde(default, alias = "Message")]
    message: Option<String>,
}

impl DynamoDBError {
    /// Create a new `DynamoDBError` from an error code.
    #[must_use]
    pub fn new(code: DynamoDBErrorCode) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new `DynamoDBError` with a custom message.
    #[must_use]
    pub fn with_message(code: DynamoDBErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Set the HTTP status the error arrived with.
    #[must_use]
    pub fn with_status(mut self, status_code: http::StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    /// Classify a raw error response.
    ///
    /// The code is read from `__type`; the message from `message` or
    /// `Message`. Bodies that are not JSON become an `InternalServerError`
    /// carrying the body text.
    #[must_use]
    pub fn from_json_body(status_code: http::StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => {
                let code = parsed
                    .error_type
                    .as_deref()
                    .map_or(DynamoDBErrorCode::UnknownError, DynamoDBErrorCode::from_type);
                let message = parsed.message.unwrap_or_default();
                Self::with_message(code, message).with_status(status_code)
            }
            Err(e) => Self::with_message(
                DynamoDBErrorCode::InternalServerError,
                String::from_utf8_lossy(body).into_owned(),
            )
            .with_status(status_code)
            .with_source(e),
        }
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Whether resubmitting the identical request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::CapacityExceeded
    }

    // -- Convenience constructors --

    /// Provisioned throughput exhausted.
    #[must_use]
    pub fn capacity_exceeded(message: impl Into<String>) -> Self {
        Self::with_message(
            DynamoDBErrorCode::ProvisionedThroughputExceededException,
            message,
        )
    }

    /// Table or resource not found.
    #[must_use]
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        Self::with_message(DynamoDBErrorCode::ResourceNotFoundException, message)
    }

    /// Condition evaluated to false.
    #[must_use]
    pub fn conditional_check_failed(message: impl Into<String>) -> Self {
        Self::with_message(DynamoDBErrorCode::ConditionalCheckFailedException, message)
    }

    /// Validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(DynamoDBErrorCode::ValidationException, message)
    }

    /// Internal server error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(DynamoDBErrorCode::InternalServerError, message)
    }
}
