//! Result sets with continuation state.
//!
//! A [`Collection`] holds one page of items plus, when the server stopped
//! early, the context that fetches the next page. A [`BatchCollection`]
//! holds one collection per table plus the batch that re-requests the keys
//! the server did not process. Neither ever issues a call: the caller (or a
//! [`Repeater`](crate::Repeater)) feeds the continuation back.

use indexmap::IndexMap;

use crate::context::{BatchGet, Paginate};
use crate::item::Item;
use crate::key::Key;

/// Ordered items with an optional continuation context of type `C`.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<C = ()> {
    items: Vec<Item>,
    count: u64,
    scanned_count: u64,
    last_key: Option<Key>,
    next: Option<C>,
}

impl<C> Default for Collection<C> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            scanned_count: 0,
            last_key: None,
            next: None,
        }
    }
}

impl<C> Collection<C> {
    /// An empty, exhausted collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An exhausted collection of `items`.
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            count: items.len() as u64,
            items,
            ..Self::default()
        }
    }

    /// Append an item.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
        self.count += 1;
    }

    /// The materialized items, in server order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consume the collection, keeping the items.
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Iterate over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Number of materialized items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no item was materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical item count: the materialized length, or the server-reported
    /// count for count-only requests.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Items evaluated before filtering (scans only).
    #[must_use]
    pub fn scanned_count(&self) -> u64 {
        self.scanned_count
    }

    /// The key the server stopped at.
    #[must_use]
    pub fn last_key(&self) -> Option<&Key> {
        self.last_key.as_ref()
    }

    /// Whether another page is available.
    #[must_use]
    pub fn more(&self) -> bool {
        self.last_key.is_some()
    }

    /// The context that fetches the next page.
    #[must_use]
    pub fn next_context(&self) -> Option<&C> {
        self.next.as_ref()
    }

    /// Take the continuation context out of the collection.
    pub fn take_next_context(&mut self) -> Option<C> {
        self.last_key = None;
        self.next.take()
    }

    /// Append `other`'s items and add its counts. The continuation of
    /// `self` is kept; `other`'s is dropped.
    pub fn merge(&mut self, other: Self) {
        self.items.extend(other.items);
        self.count += other.count;
        self.scanned_count += other.scanned_count;
    }
}

impl<C: Paginate> Collection<C> {
    /// One page of a query or scan issued with `context`.
    ///
    /// When the server reported `last_key`, the continuation is a copy of
    /// `context` resuming after it. `count` is taken as the logical count
    /// when `count_only` is set.
    #[must_use]
    pub fn page(
        items: Vec<Item>,
        count: u64,
        scanned_count: u64,
        last_key: Option<Key>,
        context: &C,
        count_only: bool,
    ) -> Self {
        let next = last_key.clone().map(|cursor| context.continue_from(cursor));
        Self {
            count: if count_only { count } else { items.len() as u64 },
            items,
            scanned_count,
            last_key,
            next,
        }
    }
}

impl<C> IntoIterator for Collection<C> {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, C> IntoIterator for &'a Collection<C> {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Per-table results of a batch get, plus the keys left unprocessed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchCollection {
    tables: IndexMap<String, Collection>,
    unprocessed: Option<BatchGet>,
}

impl BatchCollection {
    /// An empty result with an optional unprocessed-keys batch.
    #[must_use]
    pub fn new(unprocessed: Option<BatchGet>) -> Self {
        Self {
            tables: IndexMap::new(),
            unprocessed,
        }
    }

    /// Store the items retrieved from `table`.
    pub fn set_items(&mut self, table: impl Into<String>, items: Collection) {
        self.tables.insert(table.into(), items);
    }

    /// The items retrieved from `table`.
    #[must_use]
    pub fn get(&self, table: &str) -> Option<&Collection> {
        self.tables.get(table)
    }

    /// Per-table collections in response order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Collection)> {
        self.tables.iter().map(|(name, items)| (name.as_str(), items))
    }

    /// Whether some keys were not processed.
    #[must_use]
    pub fn more(&self) -> bool {
        self.unprocessed.is_some()
    }

    /// The batch that re-requests the unprocessed keys.
    #[must_use]
    pub fn next_context(&self) -> Option<&BatchGet> {
        self.unprocessed.as_ref()
    }

    /// Take the unprocessed-keys batch out of the result.
    pub fn take_next_context(&mut self) -> Option<BatchGet> {
        self.unprocessed.take()
    }

    /// Total number of items across all tables.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.tables.values().map(Collection::count).sum()
    }

    /// Merge `other` table by table. The unprocessed batch of `self` is kept.
    pub fn merge(&mut self, other: Self) {
        for (table, items) in other.tables {
            self.tables.entry(table).or_default().merge(items);
        }
    }
}
