//! Key paths for addressing nodes within a document tree
//!
//! Provides [`Key`] and [`KeyPath`] for walking from a document root down to
//! a nested node.

use crate::error::KeyPathError;
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// A single step into a node
///
/// Names index mappings (objects and document content), indices index arrays.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Mapping key
    Name(String),
    /// Array index
    Index(usize),
}

impl Key {
    /// Name of the key, if it is a mapping key
    #[inline]
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    /// Index of the key, if it is an array index
    #[inline]
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Name(_) => None,
            Self::Index(idx) => Some(*idx),
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Key {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

impl TryFrom<&Value> for Key {
    type Error = String;

    /// Strings become names, non-negative integers become indices.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(Self::Name(name.clone())),
            Value::Number(n) => n
                .as_u64()
                .and_then(|idx| usize::try_from(idx).ok())
                .map(Self::Index)
                .ok_or_else(|| format!("number {n}")),
            other => Err(json_type_name(other).to_string()),
        }
    }
}

/// Ordered sequence of keys from a document root
///
/// # Examples
/// - `["users", 0, "delete"]` → `["users"][0]["delete"]`
/// - `[]` → the root itself
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KeyPath(Vec<Key>);

impl KeyPath {
    /// Create new path from keys
    #[inline]
    #[must_use]
    pub fn new(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    /// Create path from a single key
    #[inline]
    #[must_use]
    pub fn single(key: impl Into<Key>) -> Self {
        Self(vec![key.into()])
    }

    /// Empty path (root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Get path keys
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Get number of keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First `len` keys of this path
    ///
    /// Saturates at the full path.
    #[inline]
    #[must_use]
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }

    /// Get parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.prefix(self.0.len() - 1))
        }
    }

    /// Get last key (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Key> {
        self.0.last()
    }

    /// Append a key, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut new = self.clone();
        new.0.push(key.into());
        new
    }

    /// Check if this path is a prefix of another
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.0.len() <= other.0.len() && self.0 == other.0[..self.0.len()]
    }

    /// Iterator over keys from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.0.iter()
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "[]");
        }
        for key in &self.0 {
            write!(f, "[{key}]")?;
        }
        Ok(())
    }
}

impl From<Vec<Key>> for KeyPath {
    fn from(keys: Vec<Key>) -> Self {
        Self(keys)
    }
}

impl From<&[Key]> for KeyPath {
    fn from(keys: &[Key]) -> Self {
        Self(keys.to_vec())
    }
}

impl FromIterator<Key> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<&Value> for KeyPath {
    type Error = KeyPathError;

    /// Validate a dynamically supplied key path
    ///
    /// Only a JSON array of strings and non-negative integers is accepted.
    /// Nothing is traversed here.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let Value::Array(items) = value else {
            return Err(KeyPathError::NotASequence {
                found: json_type_name(value),
            });
        };

        items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                Key::try_from(item).map_err(|found| KeyPathError::InvalidKey { position, found })
            })
            .collect()
    }
}

/// Build a [`KeyPath`] from names and indices
///
/// ```rust
/// use coreapi_document::{key_path, Key, KeyPath};
///
/// let path = key_path!["users", 0, "delete"];
/// assert_eq!(path.keys()[1], Key::Index(0));
/// assert_eq!(key_path![], KeyPath::root());
/// ```
#[macro_export]
macro_rules! key_path {
    ($($key:expr),* $(,)?) => {
        $crate::KeyPath::new(vec![$($crate::Key::from($key)),*])
    };
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
