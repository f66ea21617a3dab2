//! Key-path resolution
//!
//! Walks a key path from a document root to a link, recording every document
//! boundary crossed on the way.

use crate::error::{NotFoundCause, ResolveError};
use coreapi_document::{Document, Key, KeyPath, KeyPathError, Link, LinkAncestor, Node};
use serde_json::Value;

/// Conversion into a [`KeyPath`], checked before any traversal
///
/// Typed keys always convert. Dynamic JSON must be an array of strings and
/// non-negative integers.
pub trait IntoKeyPath {
    /// Convert into a key path
    ///
    /// # Errors
    /// Returns [`KeyPathError`] for malformed dynamic keys.
    fn into_key_path(self) -> Result<KeyPath, KeyPathError>;

    /// Convert for [`Client::action`](crate::Client::action), where a bare
    /// string names a single top-level key
    ///
    /// # Errors
    /// Returns [`KeyPathError`] for malformed dynamic keys.
    fn into_action_path(self) -> Result<KeyPath, KeyPathError>
    where
        Self: Sized,
    {
        self.into_key_path()
    }
}

impl IntoKeyPath for KeyPath {
    fn into_key_path(self) -> Result<KeyPath, KeyPathError> {
        Ok(self)
    }
}

impl IntoKeyPath for &KeyPath {
    fn into_key_path(self) -> Result<KeyPath, KeyPathError> {
        Ok(self.clone())
    }
}

impl IntoKeyPath for Vec<Key> {
    fn into_key_path(self) -> Result<KeyPath, KeyPathError> {
        Ok(KeyPath::new(self))
    }
}

impl IntoKeyPath for &[Key] {
    fn into_key_path(self) -> Result<KeyPath, KeyPathError> {
        Ok(KeyPath::from(self))
    }
}

impl IntoKeyPath for &str {
    fn into_key_path(self) -> Result<KeyPath, KeyPathError> {
        Ok(KeyPath::single(self))
    }
}

impl IntoKeyPath for String {
    fn into_key_path(self) -> Result<KeyPath, KeyPathError> {
        Ok(KeyPath::single(self))
    }
}

impl IntoKeyPath for &Value {
    fn into_key_path(self) -> Result<KeyPath, KeyPathError> {
        KeyPath::try_from(self)
    }

    fn into_action_path(self) -> Result<KeyPath, KeyPathError> {
        match self {
            Value::String(name) => Ok(KeyPath::single(name.as_str())),
            other => KeyPath::try_from(other),
        }
    }
}

impl IntoKeyPath for Value {
    fn into_key_path(self) -> Result<KeyPath, KeyPathError> {
        (&self).into_key_path()
    }

    fn into_action_path(self) -> Result<KeyPath, KeyPathError> {
        (&self).into_action_path()
    }
}

/// Resolve `keys` against `document` to a link and its ancestor chain
///
/// # Algorithm
/// 1. Validate the keys (fails fast with [`ResolveError::InvalidKeyPath`])
/// 2. Index one key at a time, mappings by name and arrays by position
/// 3. Record `(document, keys so far)` for every document reached
/// 4. Require the final node to be a link
///
/// The ancestor chain always starts with `(document, [])` and runs root to
/// leaf.
///
/// # Errors
/// Returns [`ResolveError::LinkNotFound`] if any key misses or the path ends
/// on a non-link.
pub fn resolve(
    document: &Document,
    keys: impl IntoKeyPath,
) -> Result<(Link, Vec<LinkAncestor>), ResolveError> {
    let path = keys.into_key_path()?;
    resolve_path(document, &path)
}

pub(crate) fn resolve_path(
    document: &Document,
    path: &KeyPath,
) -> Result<(Link, Vec<LinkAncestor>), ResolveError> {
    let root = Node::Document(document.clone());
    let mut ancestors = vec![LinkAncestor::new(document.clone(), KeyPath::root())];
    let mut node = &root;

    for (position, key) in path.iter().enumerate() {
        node = node.index(key).map_err(|failure| ResolveError::LinkNotFound {
            path: path.clone(),
            cause: NotFoundCause::Lookup {
                key: key.clone(),
                failure,
            },
        })?;

        if let Node::Document(inner) = node {
            ancestors.push(LinkAncestor::new(inner.clone(), path.prefix(position + 1)));
        }
    }

    match node {
        Node::Link(link) => {
            tracing::debug!(%path, url = link.url(), depth = ancestors.len(), "resolved link");
            Ok((link.clone(), ancestors))
        }
        other => Err(ResolveError::LinkNotFound {
            path: path.clone(),
            cause: NotFoundCause::NotALink {
                found: other.type_name(),
            },
        }),
    }
}
