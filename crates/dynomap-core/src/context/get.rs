use dynomap_model::input::GetItemInput;

use crate::key::Key;

/// Options for a single-item read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Get {
    attributes_to_get: Vec<String>,
    consistent_read: Option<bool>,
}

impl Get {
    /// An empty context: all attributes, eventually consistent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the returned attributes.
    pub fn set_attributes_to_get<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes_to_get = names.into_iter().map(Into::into).collect();
        self
    }

    /// The projection, empty for all attributes.
    #[must_use]
    pub fn attributes_to_get(&self) -> &[String] {
        &self.attributes_to_get
    }

    /// Request a strongly consistent read.
    pub fn set_consistent_read(&mut self, consistent: bool) -> &mut Self {
        self.consistent_read = Some(consistent);
        self
    }

    /// The consistency explicitly requested, if any.
    #[must_use]
    pub fn consistent_read(&self) -> Option<bool> {
        self.consistent_read
    }

    /// Render a `GetItem` request.
    #[must_use]
    pub fn to_wire(&self, table: &str, key: &Key) -> GetItemInput {
        GetItemInput {
            table_name: table.to_owned(),
            key: key.to_wire(),
            attributes_to_get: self.attributes_to_get.clone(),
            consistent_read: self.consistent_read,
        }
    }
}
