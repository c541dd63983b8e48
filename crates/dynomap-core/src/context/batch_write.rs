use indexmap::IndexMap;

use dynomap_model::input::BatchWriteItemInput;
use dynomap_model::types::WriteRequest;

use crate::error::ConstructionError;
use crate::item::Item;
use crate::key::Key;

/// Maximum number of put and delete requests one `BatchWriteItem` call may
/// carry.
pub const BATCH_WRITE_LIMIT: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Put(Item),
    Delete { table: String, key: Key },
}

impl Entry {
    fn table(&self) -> &str {
        match self {
            Self::Put(item) => item.table(),
            Self::Delete { table, .. } => table,
        }
    }

    fn to_wire(&self) -> WriteRequest {
        match self {
            Self::Put(item) => WriteRequest::put(item.to_wire()),
            Self::Delete { key, .. } => WriteRequest::delete(key.to_wire()),
        }
    }
}

/// Puts and deletes across one or more tables in a single call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchWrite {
    entries: Vec<Entry>,
}

impl BatchWrite {
    /// An empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `item` to its table.
    ///
    /// The item must name a table, and the batch must hold fewer than
    /// [`BATCH_WRITE_LIMIT`] requests.
    pub fn add_item_to_put(&mut self, item: Item) -> Result<&mut Self, ConstructionError> {
        self.check_capacity()?;
        if item.table().is_empty() {
            return Err(ConstructionError::MissingTable);
        }
        self.entries.push(Entry::Put(item));
        Ok(self)
    }

    /// Delete the item with `key` from `table`.
    pub fn add_key_to_delete(
        &mut self,
        table: impl Into<String>,
        key: Key,
    ) -> Result<&mut Self, ConstructionError> {
        self.check_capacity()?;
        self.entries.push(Entry::Delete {
            table: table.into(),
            key,
        });
        Ok(self)
    }

    /// Number of queued requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render a `BatchWriteItem` request, grouped by table in first-seen
    /// order.
    #[must_use]
    pub fn to_wire(&self) -> BatchWriteItemInput {
        let mut request_items: IndexMap<String, Vec<WriteRequest>> = IndexMap::new();
        for entry in &self.entries {
            request_items
                .entry(entry.table().to_owned())
                .or_default()
                .push(entry.to_wire());
        }
        BatchWriteItemInput { request_items }
    }

    /// Rebuild a batch from a response's `UnprocessedItems`.
    ///
    /// Returns `None` when nothing is left.
    pub fn from_unprocessed(
        unprocessed: &IndexMap<String, Vec<WriteRequest>>,
    ) -> Result<Option<Self>, ConstructionError> {
        let mut batch = Self::new();
        for (table, requests) in unprocessed {
            for request in requests {
                if let Some(put) = &request.put_request {
                    batch.add_item_to_put(Item::from_wire(table.as_str(), &put.item)?)?;
                }
                if let Some(delete) = &request.delete_request {
                    batch.add_key_to_delete(table.as_str(), Key::from_wire(&delete.key)?)?;
                }
            }
        }
        Ok((!batch.is_empty()).then_some(batch))
    }

    fn check_capacity(&self) -> Result<(), ConstructionError> {
        if self.entries.len() >= BATCH_WRITE_LIMIT {
            return Err(ConstructionError::LimitExceeded {
                limit: BATCH_WRITE_LIMIT,
            });
        }
        Ok(())
    }
}
