use indexmap::IndexMap;

use dynomap_model::input::ScanInput;

use super::{CollectionOptions, collection_options};
use crate::condition::AttributeCondition;
use crate::error::ConstructionError;
use crate::key::Key;

/// Options for a full-table scan.
///
/// Filters are conjunctive. Scans are always eventually consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    base: CollectionOptions,
    filters: IndexMap<String, AttributeCondition>,
}

collection_options!(Scan);

impl Scan {
    /// An empty context: every item of the table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the filter on attribute `name`.
    pub fn add_filter(
        &mut self,
        name: impl Into<String>,
        condition: AttributeCondition,
    ) -> &mut Self {
        self.filters.insert(name.into(), condition);
        self
    }

    /// The filter on attribute `name`.
    #[must_use]
    pub fn filter(&self, name: &str) -> Option<&AttributeCondition> {
        self.filters.get(name)
    }

    /// Always fails: scans cannot be strongly consistent. The context is
    /// left unchanged.
    #[allow(clippy::unused_self)]
    pub fn set_consistent_read(
        &mut self,
        _consistent: bool,
    ) -> Result<&mut Self, ConstructionError> {
        Err(ConstructionError::ConsistentReadUnsupported)
    }

    /// Render a `Scan` request.
    #[must_use]
    pub fn to_wire(&self, table: &str) -> ScanInput {
        ScanInput {
            table_name: table.to_owned(),
            scan_filter: self
                .filters
                .iter()
                .map(|(name, cond)| (name.clone(), cond.to_wire()))
                .collect(),
            attributes_to_get: self.base.attributes_to_get.clone(),
            count: self.base.count,
            limit: self.base.limit,
            exclusive_start_key: self.base.exclusive_start_key.as_ref().map(Key::to_wire),
        }
    }
}
