//! Ordered attribute lists for nodes and edges.
//!
//! DOT lets a statement redefine an attribute, with the last value winning,
//! and writers are expected to reproduce attributes in source order.
//! A plain `Vec` keeps both properties; attribute lists are short enough that
//! a linear lookup never shows up in profiles.

use serde::Serialize;

/// A single `name=value` pair.
///
/// The quoting flags record whether each side was written between double
/// quotes in the source, so the writer can reproduce it faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Attribute name (e.g., "label", "color")
    pub name: String,
    /// Attribute value, with escaped quotes already resolved
    pub value: String,
    /// Whether the name was quoted
    #[serde(skip)]
    pub quote_name: bool,
    /// Whether the value was quoted
    #[serde(skip)]
    pub quote_value: bool,
}

impl Attribute {
    /// Creates a new attribute.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        quote_name: bool,
        quote_value: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            quote_name,
            quote_value,
        }
    }
}

/// An insertion-ordered list of attributes with overwrite-on-duplicate semantics.
///
/// # Example
///
/// ```rust
/// use dotroot::graph::Attributes;
///
/// let mut attrs = Attributes::new();
/// attrs.set("color", "blue", false, false);
/// attrs.set("label", "hello", false, true);
/// attrs.set("color", "red", false, false);
///
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs.get("color"), Some("red"));
/// assert_eq!(attrs.iter().next().map(|a| a.name.as_str()), Some("color"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// Creates an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing the value of an existing one with the same name.
    ///
    /// When the attribute already exists its position is kept and both
    /// quoting flags are updated.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        quote_name: bool,
        quote_value: bool,
    ) {
        let name = name.into();
        let value = value.into();

        if let Some(existing) = self.0.iter_mut().find(|a| a.name == name) {
            existing.value = value;
            existing.quote_name = quote_name;
            existing.quote_value = quote_value;
        } else {
            self.0.push(Attribute::new(name, value, quote_name, quote_value));
        }
    }

    /// Inserts a fully built attribute with the same semantics as [`Attributes::set`].
    pub fn insert(&mut self, attribute: Attribute) {
        let Attribute {
            name,
            value,
            quote_name,
            quote_value,
        } = attribute;
        self.set(name, value, quote_name, quote_value);
    }

    /// Returns the value of the attribute with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns the full attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.0.iter().find(|a| a.name == name)
    }

    /// Returns true if an attribute with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|a| a.name == name)
    }

    /// Removes the attribute with the given name, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        let pos = self.0.iter().position(|a| a.name == name)?;
        Some(self.0.remove(pos))
    }

    /// Iterates over the attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for attribute in iter {
            attrs.insert(attribute);
        }
        attrs
    }
}
