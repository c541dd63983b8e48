//! Comparison, existence and mutation intents.
//!
//! - [`AttributeCondition`] filters a range key or scanned attribute.
//! - [`ExpectedAttribute`] guards a conditional write; several are combined
//!   conjunctively in an [`Expected`] set.
//! - [`UpdateAction`] mutates one attribute; several form an
//!   [`AttributeUpdate`] set.

use indexmap::IndexMap;
use serde_json::Value as Json;

use dynomap_model::types::{
    AttributeAction, AttributeValueUpdate, ComparisonOperator, Condition, ExpectedAttributeValue,
};

use crate::attribute::{Attribute, AttributeType, Value};
use crate::error::ConstructionError;

// ---------------------------------------------------------------------------
// AttributeCondition
// ---------------------------------------------------------------------------

/// A comparison operator bound to its operand(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeCondition {
    operator: ComparisonOperator,
    values: Vec<Attribute>,
}

impl AttributeCondition {
    /// Bind `operator` to `value`.
    ///
    /// `BETWEEN` takes a two-element array `[low, high]`; anything else is a
    /// [`ConstructionError::BetweenArity`]. Every other operator takes a
    /// single value.
    pub fn new(
        operator: ComparisonOperator,
        value: impl Into<Value>,
    ) -> Result<Self, ConstructionError> {
        let value = value.into();
        let values = if operator == ComparisonOperator::Between {
            match value {
                Value::Raw(Json::Array(bounds)) if bounds.len() == 2 => bounds
                    .into_iter()
                    .map(Attribute::new)
                    .collect::<Result<Vec<_>, _>>()?,
                Value::Raw(Json::Array(bounds)) => {
                    return Err(ConstructionError::BetweenArity(bounds.len()));
                }
                _ => return Err(ConstructionError::BetweenArity(1)),
            }
        } else {
            vec![Attribute::new(value)?]
        };
        Ok(Self { operator, values })
    }

    /// `BETWEEN low AND high`, bounds inclusive.
    pub fn between(
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            operator: ComparisonOperator::Between,
            values: vec![Attribute::new(low)?, Attribute::new(high)?],
        })
    }

    /// The comparison operator.
    #[must_use]
    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    /// The operands, `[low, high]` for `BETWEEN`.
    #[must_use]
    pub fn values(&self) -> &[Attribute] {
        &self.values
    }

    /// Render as `{"ComparisonOperator", "AttributeValueList"}`.
    #[must_use]
    pub fn to_wire(&self) -> Condition {
        Condition {
            comparison_operator: self.operator,
            attribute_value_list: self.values.iter().map(Attribute::to_wire).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Expected
// ---------------------------------------------------------------------------

/// A precondition on one stored attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedAttribute {
    /// The attribute must (`true`) or must not (`false`) exist.
    Exists(bool),
    /// The attribute must equal this value.
    Value(Attribute),
}

impl ExpectedAttribute {
    /// Expect the attribute to equal `value`.
    pub fn value(value: impl Into<Value>) -> Result<Self, ConstructionError> {
        Attribute::new(value).map(Self::Value)
    }

    /// Render as `{"Exists"}` or `{"Value"}`.
    #[must_use]
    pub fn to_wire(&self) -> ExpectedAttributeValue {
        match self {
            Self::Exists(exists) => ExpectedAttributeValue {
                value: None,
                exists: Some(*exists),
            },
            Self::Value(attr) => ExpectedAttributeValue {
                value: Some(attr.to_wire()),
                exists: None,
            },
        }
    }
}

/// Named preconditions, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expected(IndexMap<String, ExpectedAttribute>);

impl Expected {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the precondition on `name`.
    pub fn set(&mut self, name: impl Into<String>, expected: ExpectedAttribute) -> &mut Self {
        self.0.insert(name.into(), expected);
        self
    }

    /// The precondition on `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExpectedAttribute> {
        self.0.get(name)
    }

    /// Drop the precondition on `name`.
    pub fn remove(&mut self, name: &str) -> Option<ExpectedAttribute> {
        self.0.shift_remove(name)
    }

    /// Preconditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExpectedAttribute)> {
        self.0.iter()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the `Expected` parameter.
    #[must_use]
    pub fn to_wire(&self) -> IndexMap<String, ExpectedAttributeValue> {
        self.0
            .iter()
            .map(|(name, expected)| (name.clone(), expected.to_wire()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

/// A mutation of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAction {
    action: AttributeAction,
    value: Option<Attribute>,
}

impl UpdateAction {
    /// Bind `action` to an optional value, typed explicitly when `ty` is set.
    pub fn new(
        action: AttributeAction,
        value: Option<Value>,
        ty: Option<AttributeType>,
    ) -> Result<Self, ConstructionError> {
        let value = match (value, ty) {
            (None, _) => None,
            (Some(v), Some(ty)) => Some(Attribute::with_type(v, ty)?),
            (Some(v), None) => Some(Attribute::new(v)?),
        };
        Ok(Self { action, value })
    }

    /// Replace the attribute.
    pub fn put(value: impl Into<Value>) -> Result<Self, ConstructionError> {
        Self::new(AttributeAction::Put, Some(value.into()), None)
    }

    /// Increment a number or add members to a set.
    pub fn add(value: impl Into<Value>) -> Result<Self, ConstructionError> {
        Self::new(AttributeAction::Add, Some(value.into()), None)
    }

    /// Remove the attribute entirely.
    #[must_use]
    pub fn delete() -> Self {
        Self {
            action: AttributeAction::Delete,
            value: None,
        }
    }

    /// Remove members from a set attribute.
    pub fn delete_values(value: impl Into<Value>) -> Result<Self, ConstructionError> {
        Self::new(AttributeAction::Delete, Some(value.into()), None)
    }

    /// The action.
    #[must_use]
    pub fn action(&self) -> AttributeAction {
        self.action
    }

    /// The operand, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Attribute> {
        self.value.as_ref()
    }

    /// Render as `{"Action", "Value"?}`.
    #[must_use]
    pub fn to_wire(&self) -> AttributeValueUpdate {
        AttributeValueUpdate {
            value: self.value.as_ref().map(Attribute::to_wire),
            action: Some(self.action),
        }
    }
}

/// Named mutations applied by one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeUpdate(IndexMap<String, UpdateAction>);

impl AttributeUpdate {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the mutation of `name`.
    pub fn set(&mut self, name: impl Into<String>, action: UpdateAction) -> &mut Self {
        self.0.insert(name.into(), action);
        self
    }

    /// The mutation of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UpdateAction> {
        self.0.get(name)
    }

    /// Drop the mutation of `name`.
    pub fn remove(&mut self, name: &str) -> Option<UpdateAction> {
        self.0.shift_remove(name)
    }

    /// Mutations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &UpdateAction)> {
        self.0.iter()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of mutations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Render the `AttributeUpdates` parameter.
    #[must_use]
    pub fn to_wire(&self) -> IndexMap<String, AttributeValueUpdate> {
        self.0
            .iter()
            .map(|(name, action)| (name.clone(), action.to_wire()))
            .collect()
    }
}
