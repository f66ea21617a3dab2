//! Error types for the document model

use crate::key_path::Key;

/// Why indexing a node with a key failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupFailure {
    /// Mapping has no entry for the key
    #[error("key {key:?} was not found")]
    MissingKey { key: String },

    /// Array index past the end
    #[error("index {index} is out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Node cannot be indexed at all
    #[error("value of type '{node_type}' cannot be indexed")]
    NotIndexable { node_type: &'static str },

    /// Integer key against a mapping, or string key against an array
    #[error("key {key} cannot index a value of type '{node_type}'")]
    KeyTypeMismatch { key: Key, node_type: &'static str },

    /// Replacing the root of a document with something that is not a document
    #[error("document root cannot be replaced by a value of type '{node_type}'")]
    RootNotDocument { node_type: &'static str },
}

/// Malformed key path supplied as dynamic data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyPathError {
    /// Keys were not a list
    #[error("'keys' must be a list of strings or ints, got {found}")]
    NotASequence { found: &'static str },

    /// A list element was neither a string nor a non-negative integer
    #[error("'keys' must be a list of strings or ints, element {position} is {found}")]
    InvalidKey { position: usize, found: String },
}
