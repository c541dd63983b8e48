use indexmap::IndexMap;

use dynomap_model::input::BatchGetItemInput;
use dynomap_model::types::KeysAndAttributes;

use crate::error::ConstructionError;
use crate::key::Key;

/// Maximum number of keys one `BatchGetItem` call may request.
pub const BATCH_GET_LIMIT: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TableRequest {
    keys: Vec<Key>,
    attributes_to_get: Vec<String>,
}

/// Keys to fetch from one or more tables in a single call.
///
/// Keys are grouped by table, tables in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchGet {
    tables: IndexMap<String, TableRequest>,
}

impl BatchGet {
    /// An empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the item with `key` from `table`.
    ///
    /// Fails with [`ConstructionError::LimitExceeded`] once the batch holds
    /// [`BATCH_GET_LIMIT`] keys.
    pub fn add_key(
        &mut self,
        table: impl Into<String>,
        key: Key,
    ) -> Result<&mut Self, ConstructionError> {
        if self.len() >= BATCH_GET_LIMIT {
            return Err(ConstructionError::LimitExceeded {
                limit: BATCH_GET_LIMIT,
            });
        }
        self.tables.entry(table.into()).or_default().keys.push(key);
        Ok(self)
    }

    /// Restrict the attributes returned for `table`.
    pub fn set_attributes_to_get<I, S>(&mut self, table: impl Into<String>, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables.entry(table.into()).or_default().attributes_to_get =
            names.into_iter().map(Into::into).collect();
        self
    }

    /// The projection for `table`, empty for all attributes.
    #[must_use]
    pub fn attributes_to_get(&self, table: &str) -> &[String] {
        self.tables
            .get(table)
            .map(|t| t.attributes_to_get.as_slice())
            .unwrap_or_default()
    }

    /// The keys requested from `table`.
    #[must_use]
    pub fn keys(&self, table: &str) -> &[Key] {
        self.tables
            .get(table)
            .map(|t| t.keys.as_slice())
            .unwrap_or_default()
    }

    /// Tables with at least one key, in first-seen order.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables
            .iter()
            .filter(|(_, t)| !t.keys.is_empty())
            .map(|(name, _)| name.as_str())
    }

    /// Total number of keys across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.values().map(|t| t.keys.len()).sum()
    }

    /// Whether no key has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render a `BatchGetItem` request.
    #[must_use]
    pub fn to_wire(&self) -> BatchGetItemInput {
        let request_items = self
            .tables
            .iter()
            .filter(|(_, t)| !t.keys.is_empty())
            .map(|(name, t)| {
                (
                    name.clone(),
                    KeysAndAttributes {
                        keys: t.keys.iter().map(Key::to_wire).collect(),
                        attributes_to_get: t.attributes_to_get.clone(),
                    },
                )
            })
            .collect();
        BatchGetItemInput { request_items }
    }

    /// Rebuild a batch from a response's `UnprocessedKeys`.
    ///
    /// Each key is re-added verbatim together with its table's projection.
    /// Returns `None` when nothing is left.
    pub fn from_unprocessed(
        unprocessed: &IndexMap<String, KeysAndAttributes>,
    ) -> Result<Option<Self>, ConstructionError> {
        let mut batch = Self::new();
        for (table, pending) in unprocessed {
            for key in &pending.keys {
                batch.add_key(table.as_str(), Key::from_wire(key)?)?;
            }
            if !pending.attributes_to_get.is_empty() {
                batch.set_attributes_to_get(
                    table.as_str(),
                    pending.attributes_to_get.iter().cloned(),
                );
            }
        }
        Ok((!batch.is_empty()).then_some(batch))
    }
}
