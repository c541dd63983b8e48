//! Per-operation option builders.
//!
//! A context accumulates the optional parameters of one call and renders the
//! typed input for its operation once the call-site identity (table, key,
//! item) is known. Contexts are plain values scoped to a single logical
//! operation; they are not meant to be shared between concurrent calls.
//!
//! Query and scan contexts carry a continuation cursor. A continuation is
//! always a fresh clone with the cursor installed, so the original context
//! can still request a first page.

mod batch_get;
mod batch_write;
mod get;
mod query;
mod scan;
mod write;

pub use batch_get::{BATCH_GET_LIMIT, BatchGet};
pub use batch_write::{BATCH_WRITE_LIMIT, BatchWrite};
pub use get::Get;
pub use query::Query;
pub use scan::Scan;
pub use write::{Delete, Put, Update};

use crate::key::Key;

/// A context that pages through results with `ExclusiveStartKey`.
pub trait Paginate: Clone {
    /// The cursor the next request starts after.
    fn exclusive_start_key(&self) -> Option<&Key>;

    /// Install or clear the cursor.
    fn set_exclusive_start_key(&mut self, key: Option<Key>) -> &mut Self;

    /// A copy of this context that resumes after `cursor`.
    #[must_use]
    fn continue_from(&self, cursor: Key) -> Self {
        let mut next = self.clone();
        next.set_exclusive_start_key(Some(cursor));
        next
    }
}

/// Options shared by query and scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CollectionOptions {
    pub(crate) attributes_to_get: Vec<String>,
    pub(crate) consistent_read: Option<bool>,
    pub(crate) count: Option<bool>,
    pub(crate) limit: Option<u32>,
    pub(crate) exclusive_start_key: Option<Key>,
}

/// Setters and accessors over a `base: CollectionOptions` field.
macro_rules! collection_options {
    ($ty:ty) => {
        impl $ty {
            /// Restrict the returned attributes.
            pub fn set_attributes_to_get<I, S>(&mut self, names: I) -> &mut Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                self.base.attributes_to_get = names.into_iter().map(Into::into).collect();
                self
            }

            /// The projection, empty for all attributes.
            #[must_use]
            pub fn attributes_to_get(&self) -> &[String] {
                &self.base.attributes_to_get
            }

            /// Return only the number of matching items.
            pub fn set_count(&mut self, count: bool) -> &mut Self {
                self.base.count = Some(count);
                self
            }

            /// Whether only a count is requested.
            #[must_use]
            pub fn count(&self) -> bool {
                self.base.count.unwrap_or(false)
            }

            /// Evaluate at most `limit` items per page.
            pub fn set_limit(&mut self, limit: u32) -> &mut Self {
                self.base.limit = Some(limit);
                self
            }

            /// The page size, if set.
            #[must_use]
            pub fn limit(&self) -> Option<u32> {
                self.base.limit
            }
        }

        impl $crate::context::Paginate for $ty {
            fn exclusive_start_key(&self) -> Option<&$crate::key::Key> {
                self.base.exclusive_start_key.as_ref()
            }

            fn set_exclusive_start_key(&mut self, key: Option<$crate::key::Key>) -> &mut Self {
                self.base.exclusive_start_key = key;
                self
            }
        }
    };
}

pub(crate) use collection_options;
