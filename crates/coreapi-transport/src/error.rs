//! Error types for transports
//!
//! Provides error handling for:
//! - Transport selection (scheme matching)
//! - Request construction (action, parameters, URL)
//! - Network failures
//! - Remote error responses

use coreapi_codec::CodecError;
use coreapi_document::{ErrorDocument, LookupFailure};
use std::collections::BTreeMap;

/// Main transport error type
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// URL is relative and no enclosing document supplies a base
    #[error("URL missing scheme '{url}'")]
    MissingScheme { url: String },

    /// No registered transport accepts the URL's scheme
    #[error("unsupported URL scheme '{scheme}' for '{url}'")]
    UnsupportedScheme { scheme: String, url: String },

    /// URL could not be parsed or joined
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Action does not map to a request method
    #[error("invalid action '{action}'")]
    InvalidAction { action: String },

    /// Parameters rejected, keyed by parameter name
    #[error("invalid parameters: {}", describe_parameter_errors(.0))]
    ParameterError(BTreeMap<String, String>),

    /// Transport configuration could not be parsed
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// Network-level failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response content could not be negotiated or decoded
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Remote party signalled failure
    #[error("error response: {0}")]
    ErrorMessage(ErrorDocument),

    /// Response decoded to something other than a document
    #[error("unexpected {found} payload from '{url}', expected a document")]
    UnexpectedPayload { found: &'static str, url: String },

    /// In-place response could not be placed back into the tree
    #[error("cannot splice response into document: {0}")]
    Splice(#[from] LookupFailure),
}

impl TransportError {
    /// Check if the remote party performed the call and reported failure
    #[inline]
    #[must_use]
    pub fn is_remote_error(&self) -> bool {
        matches!(self, Self::ErrorMessage(_))
    }

    /// Check if no transport could be chosen for the URL
    #[inline]
    #[must_use]
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            Self::MissingScheme { .. } | Self::UnsupportedScheme { .. } | Self::InvalidUrl { .. }
        )
    }

    /// Decoded error response, if any
    #[must_use]
    pub fn error_document(&self) -> Option<&ErrorDocument> {
        match self {
            Self::ErrorMessage(doc) => Some(doc),
            _ => None,
        }
    }
}

fn describe_parameter_errors(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(name, message)| format!("{name}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_error_display() {
        let mut errors = BTreeMap::new();
        errors.insert("id".to_string(), "This parameter is required.".to_string());
        errors.insert("q".to_string(), "Must be a primitive value.".to_string());
        let err = TransportError::ParameterError(errors);
        assert_eq!(
            err.to_string(),
            "invalid parameters: id: This parameter is required., q: Must be a primitive value."
        );
    }

    #[test]
    fn classification() {
        let remote = TransportError::ErrorMessage(ErrorDocument::new("500", Default::default()));
        assert!(remote.is_remote_error());
        assert!(!remote.is_selection_error());
        assert_eq!(remote.error_document().map(ErrorDocument::title), Some("500"));

        let scheme = TransportError::UnsupportedScheme {
            scheme: "ftp".into(),
            url: "ftp://x/".into(),
        };
        assert!(scheme.is_selection_error());
        assert!(!scheme.is_remote_error());
    }
}
