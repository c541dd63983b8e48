//! Primary keys.

use dynomap_model::types;

use crate::attribute::{Attribute, Value};
use crate::error::ConstructionError;

/// Identity of an item: a hash attribute and an optional range attribute.
///
/// Key attributes are scalars; sets are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    hash: Attribute,
    range: Option<Attribute>,
}

impl Key {
    /// A hash-only key.
    pub fn new(hash: impl Into<Value>) -> Result<Self, ConstructionError> {
        Ok(Self {
            hash: key_attribute(hash)?,
            range: None,
        })
    }

    /// A composite (hash, range) key.
    pub fn with_range(
        hash: impl Into<Value>,
        range: impl Into<Value>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            hash: key_attribute(hash)?,
            range: Some(key_attribute(range)?),
        })
    }

    /// The hash attribute.
    #[must_use]
    pub fn hash(&self) -> &Attribute {
        &self.hash
    }

    /// The range attribute, for composite keys.
    #[must_use]
    pub fn range(&self) -> Option<&Attribute> {
        self.range.as_ref()
    }

    /// Render as `{"HashKeyElement", "RangeKeyElement"?}`.
    #[must_use]
    pub fn to_wire(&self) -> types::Key {
        types::Key {
            hash_key_element: self.hash.to_wire(),
            range_key_element: self.range.as_ref().map(Attribute::to_wire),
        }
    }

    /// Decode a wire key.
    pub fn from_wire(key: &types::Key) -> Result<Self, ConstructionError> {
        Ok(Self {
            hash: Attribute::from_wire(&key.hash_key_element)?,
            range: key
                .range_key_element
                .as_ref()
                .map(Attribute::from_wire)
                .transpose()?,
        })
    }
}

fn key_attribute(value: impl Into<Value>) -> Result<Attribute, ConstructionError> {
    let attr = Attribute::new(value)?;
    if attr.is_set() {
        return Err(ConstructionError::InvalidValue(format!(
            "{} cannot be a key attribute",
            attr.kind()
        )));
    }
    Ok(attr)
}
