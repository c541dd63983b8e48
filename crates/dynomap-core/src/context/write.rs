//! Single-item write contexts: put, update and delete.
//!
//! All three take an optional [`Expected`] set and a `ReturnValues`
//! selector. Put and delete can only return the previous item, so they
//! accept `NONE` and `ALL_OLD`; update accepts every selector.

use dynomap_model::input::{DeleteItemInput, PutItemInput, UpdateItemInput};
use dynomap_model::types::ReturnValue;

use crate::condition::{AttributeUpdate, Expected};
use crate::error::ConstructionError;
use crate::item::Item;
use crate::key::Key;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct WriteOptions {
    expected: Expected,
    return_values: Option<ReturnValue>,
}

impl WriteOptions {
    fn set_return_values_for_put_or_delete(
        &mut self,
        return_values: ReturnValue,
    ) -> Result<(), ConstructionError> {
        if !return_values.is_valid_for_put_or_delete() {
            return Err(ConstructionError::UnsupportedReturnValues(return_values));
        }
        self.return_values = Some(return_values);
        Ok(())
    }
}

/// Options for a single-item put.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Put {
    options: WriteOptions,
}

impl Put {
    /// An unconditional put that returns nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only write if every precondition holds.
    pub fn set_expected(&mut self, expected: Expected) -> &mut Self {
        self.options.expected = expected;
        self
    }

    /// The preconditions.
    #[must_use]
    pub fn expected(&self) -> &Expected {
        &self.options.expected
    }

    /// Select what the response returns: `NONE` or `ALL_OLD`.
    pub fn set_return_values(
        &mut self,
        return_values: ReturnValue,
    ) -> Result<&mut Self, ConstructionError> {
        self.options
            .set_return_values_for_put_or_delete(return_values)?;
        Ok(self)
    }

    /// The selected return values, if any.
    #[must_use]
    pub fn return_values(&self) -> Option<ReturnValue> {
        self.options.return_values
    }

    /// Render a `PutItem` request for `item`.
    pub fn to_wire(&self, item: &Item) -> Result<PutItemInput, ConstructionError> {
        if item.table().is_empty() {
            return Err(ConstructionError::MissingTable);
        }
        Ok(PutItemInput {
            table_name: item.table().to_owned(),
            item: item.to_wire(),
            expected: self.options.expected.to_wire(),
            return_values: self.options.return_values,
        })
    }
}

/// Options for a single-item delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delete {
    options: WriteOptions,
}

impl Delete {
    /// An unconditional delete that returns nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only delete if every precondition holds.
    pub fn set_expected(&mut self, expected: Expected) -> &mut Self {
        self.options.expected = expected;
        self
    }

    /// The preconditions.
    #[must_use]
    pub fn expected(&self) -> &Expected {
        &self.options.expected
    }

    /// Select what the response returns: `NONE` or `ALL_OLD`.
    pub fn set_return_values(
        &mut self,
        return_values: ReturnValue,
    ) -> Result<&mut Self, ConstructionError> {
        self.options
            .set_return_values_for_put_or_delete(return_values)?;
        Ok(self)
    }

    /// The selected return values, if any.
    #[must_use]
    pub fn return_values(&self) -> Option<ReturnValue> {
        self.options.return_values
    }

    /// Render a `DeleteItem` request.
    #[must_use]
    pub fn to_wire(&self, table: &str, key: &Key) -> DeleteItemInput {
        DeleteItemInput {
            table_name: table.to_owned(),
            key: key.to_wire(),
            expected: self.options.expected.to_wire(),
            return_values: self.options.return_values,
        }
    }
}

/// Options for a single-item update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    options: WriteOptions,
}

impl Update {
    /// An unconditional update that returns nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only update if every precondition holds.
    pub fn set_expected(&mut self, expected: Expected) -> &mut Self {
        self.options.expected = expected;
        self
    }

    /// The preconditions.
    #[must_use]
    pub fn expected(&self) -> &Expected {
        &self.options.expected
    }

    /// Select which attributes the response returns.
    pub fn set_return_values(&mut self, return_values: ReturnValue) -> &mut Self {
        self.options.return_values = Some(return_values);
        self
    }

    /// The selected return values, if any.
    #[must_use]
    pub fn return_values(&self) -> Option<ReturnValue> {
        self.options.return_values
    }

    /// Render an `UpdateItem` request applying `updates`.
    #[must_use]
    pub fn to_wire(&self, table: &str, key: &Key, updates: &AttributeUpdate) -> UpdateItemInput {
        UpdateItemInput {
            table_name: table.to_owned(),
            key: key.to_wire(),
            attribute_updates: updates.to_wire(),
            expected: self.options.expected.to_wire(),
            return_values: self.options.return_values,
        }
    }
}
