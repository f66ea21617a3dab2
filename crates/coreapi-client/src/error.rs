//! Error types for the client
//!
//! Provides error handling for:
//! - Malformed key paths
//! - Key paths that do not lead to a link
//! - Transport and remote failures, surfaced unchanged

use coreapi_document::{ErrorDocument, Key, KeyPath, KeyPathError, LookupFailure};
use coreapi_transport::TransportError;
use std::fmt;

/// Why a key path did not reach a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundCause {
    /// Indexing with `key` failed part way down the path
    Lookup { key: Key, failure: LookupFailure },
    /// The path ended on a node that is not a link
    NotALink { found: &'static str },
}

/// Resolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Keys were not a sequence of strings and non-negative integers
    #[error(transparent)]
    InvalidKeyPath(#[from] KeyPathError),

    /// Traversal missed, or ended somewhere other than a link
    #[error("{}", describe_not_found(.path, .cause))]
    LinkNotFound { path: KeyPath, cause: NotFoundCause },
}

impl ResolveError {
    /// Full key path that was being resolved
    #[must_use]
    pub fn path(&self) -> Option<&KeyPath> {
        match self {
            Self::LinkNotFound { path, .. } => Some(path),
            Self::InvalidKeyPath(_) => None,
        }
    }
}

fn describe_not_found(path: &KeyPath, cause: &NotFoundCause) -> String {
    match cause {
        NotFoundCause::Lookup { key, failure } => {
            format!("Index {path} did not reference a link. Key {key}: {failure}")
        }
        NotFoundCause::NotALink { found } => {
            format!("Can only call 'action' on a Link. Index {path} returned type '{found}'")
        }
    }
}

impl fmt::Display for NotFoundCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup { key, failure } => write!(f, "at key {key}: {failure}"),
            Self::NotALink { found } => write!(f, "found '{found}', expected 'Link'"),
        }
    }
}

/// Main client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Key path could not be resolved to a link
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Transport selection, request or remote failure
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Check if the remote party reported failure
    #[inline]
    #[must_use]
    pub fn is_remote_error(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_remote_error())
    }

    /// Check if the key path did not lead to a link
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Resolve(ResolveError::LinkNotFound { .. }))
    }

    /// Check if the key path itself was malformed
    #[inline]
    #[must_use]
    pub fn is_invalid_key_path(&self) -> bool {
        matches!(self, Self::Resolve(ResolveError::InvalidKeyPath(_)))
    }

    /// Decoded remote error, if any
    #[must_use]
    pub fn error_document(&self) -> Option<&ErrorDocument> {
        match self {
            Self::Transport(e) => e.error_document(),
            Self::Resolve(_) => None,
        }
    }
}
