//! Client core for mapping application records onto DynamoDB items.
//!
//! The crate speaks the `2011-12-05` protocol through a pluggable
//! [`Transport`]:
//!
//! - [`Attribute`] infers or coerces the four attribute types (`S`, `N`,
//!   `SS`, `NS`) from JSON-like values.
//! - [`Item`] and [`Key`] identify and hold records.
//! - The [`context`] builders carry per-operation options and render the
//!   typed inputs of [`dynomap_model::input`].
//! - [`Connection`] dispatches operations and decodes the responses into
//!   items and [`Collection`]s with continuation contexts.
//! - [`Repeater`] follows continuations and retries throttled pages.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod attribute;
pub mod collection;
pub mod condition;
pub mod config;
pub mod connection;
pub mod context;
pub mod error;
pub mod item;
pub mod key;
pub mod logging;
pub mod repeater;
pub mod transport;
pub mod units;


pub use attribute::{Attribute, AttributeType, Number, Value};
pub use collection::{BatchCollection, Collection};
pub use condition::{
    AttributeCondition, AttributeUpdate, Expected, ExpectedAttribute, UpdateAction,
};
pub use config::ClientConfig;
pub use connection::Connection;
pub use error::{ConstructionError, Error, Result};
pub use item::Item;
pub use key::Key;
pub use logging::init_tracing;
pub use repeater::Repeater;
pub use transport::Transport;
pub use units::{ConsumedUnits, TableUnits};
