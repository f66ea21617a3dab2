//! Error types for codecs
//!
//! Distinguishes "this decoder does not handle that content type" from
//! "the content claimed a type we handle but is malformed".

/// Errors during content negotiation, decoding and encoding
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// No registered decoder accepts the response content type
    #[error("unsupported media type '{content_type}' (available: {available})")]
    UnsupportedMediaType {
        content_type: String,
        available: String,
    },

    /// Registry holds no decoders at all
    #[error("no decoders configured")]
    NoDecoders,

    /// Content is not well-formed for the decoder's media type
    #[error("malformed {media_type} content: {source}")]
    Parse {
        media_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Hypermedia payload whose top level is neither a document nor an error
    #[error("top level node must be a document or error message, got {found}")]
    InvalidTopLevel { found: &'static str },

    /// Serialization failure
    #[error("encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CodecError {
    /// Create parse error for a media type
    pub fn parse(media_type: &'static str, source: serde_json::Error) -> Self {
        Self::Parse { media_type, source }
    }

    /// Check if the failure was a negotiation miss rather than bad content
    #[inline]
    #[must_use]
    pub fn is_unsupported_media_type(&self) -> bool {
        matches!(self, Self::UnsupportedMediaType { .. } | Self::NoDecoders)
    }
}
