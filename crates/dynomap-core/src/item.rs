//! Items: a table name plus an ordered set of named attributes.

use indexmap::IndexMap;
use indexmap::map::Iter;

use dynomap_model::types::AttributeMap;

use crate::attribute::{Attribute, AttributeType, Value};
use crate::error::ConstructionError;

/// A single item of a table.
///
/// Attributes keep insertion order. An item must have a non-empty table name
/// before it can be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    table: String,
    attributes: IndexMap<String, Attribute>,
}

impl Item {
    /// An empty item belonging to `table`.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            attributes: IndexMap::new(),
        }
    }

    /// The table this item belongs to.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Move the item to another table.
    pub fn set_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    /// Set an attribute from a native value, inferring its type unless `ty`
    /// is given. Typed attributes are stored as-is.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        ty: Option<AttributeType>,
    ) -> Result<&mut Self, ConstructionError> {
        let attr = match ty {
            Some(ty) => Attribute::with_type(value, ty)?,
            None => Attribute::new(value)?,
        };
        self.attributes.insert(name.into(), attr);
        Ok(self)
    }

    /// Store an attribute, returning the one it replaces.
    pub fn set(&mut self, name: impl Into<String>, attr: Attribute) -> Option<Attribute> {
        self.attributes.insert(name.into(), attr)
    }

    /// Look up an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Remove an attribute, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.shift_remove(name)
    }

    /// Whether the attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attributes in insertion order.
    pub fn iter(&self) -> Iter<'_, String, Attribute> {
        self.attributes.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the item has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// A copy restricted to `names`, in the order given. Missing names are
    /// skipped.
    #[must_use]
    pub fn project<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let attributes = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                self.attributes
                    .get(name)
                    .map(|attr| (name.to_owned(), attr.clone()))
            })
            .collect();
        Self {
            table: self.table.clone(),
            attributes,
        }
    }

    /// Render the attribute map. Empty strings are not stored by the
    /// protocol and are left out.
    #[must_use]
    pub fn to_wire(&self) -> AttributeMap {
        self.attributes
            .iter()
            .filter(|(_, attr)| !attr.is_empty_string())
            .map(|(name, attr)| (name.clone(), attr.to_wire()))
            .collect()
    }

    /// Decode an attribute map, typing each attribute by its wire tag.
    pub fn from_wire(
        table: impl Into<String>,
        attributes: &AttributeMap,
    ) -> Result<Self, ConstructionError> {
        let attributes = attributes
            .iter()
            .map(|(name, value)| Ok((name.clone(), Attribute::from_wire(value)?)))
            .collect::<Result<_, ConstructionError>>()?;
        Ok(Self {
            table: table.into(),
            attributes,
        })
    }
}

impl<'a> IntoIterator for &'a Item {
    type Item = (&'a String, &'a Attribute);
    type IntoIter = Iter<'a, String, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
