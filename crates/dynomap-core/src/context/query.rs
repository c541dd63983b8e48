use dynomap_model::input::QueryInput;

use super::{CollectionOptions, collection_options};
use crate::attribute::Attribute;
use crate::condition::AttributeCondition;
use crate::key::Key;

/// Options for a query over the items sharing one hash key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    base: CollectionOptions,
    range_condition: Option<AttributeCondition>,
    scan_index_forward: Option<bool>,
}

collection_options!(Query);

impl Query {
    /// An empty context: every item of the hash key, ascending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context restricted by a range key condition.
    #[must_use]
    pub fn with_range_condition(condition: AttributeCondition) -> Self {
        let mut query = Self::new();
        query.set_range_condition(condition);
        query
    }

    /// Filter on the range key.
    pub fn set_range_condition(&mut self, condition: AttributeCondition) -> &mut Self {
        self.range_condition = Some(condition);
        self
    }

    /// The range key condition, if any.
    #[must_use]
    pub fn range_condition(&self) -> Option<&AttributeCondition> {
        self.range_condition.as_ref()
    }

    /// Traverse the range key ascending (`true`) or descending.
    pub fn set_scan_index_forward(&mut self, forward: bool) -> &mut Self {
        self.scan_index_forward = Some(forward);
        self
    }

    /// Request a strongly consistent read.
    pub fn set_consistent_read(&mut self, consistent: bool) -> &mut Self {
        self.base.consistent_read = Some(consistent);
        self
    }

    /// The consistency explicitly requested, if any.
    #[must_use]
    pub fn consistent_read(&self) -> Option<bool> {
        self.base.consistent_read
    }

    /// Render a `Query` request for the items under `hash`.
    #[must_use]
    pub fn to_wire(&self, table: &str, hash: &Attribute) -> QueryInput {
        QueryInput {
            table_name: table.to_owned(),
            hash_key_value: hash.to_wire(),
            range_key_condition: self.range_condition.as_ref().map(AttributeCondition::to_wire),
            attributes_to_get: self.base.attributes_to_get.clone(),
            consistent_read: self.base.consistent_read,
            count: self.base.count,
            limit: self.base.limit,
            scan_index_forward: self.scan_index_forward,
            exclusive_start_key: self.base.exclusive_start_key.as_ref().map(Key::to_wire),
        }
    }
}
