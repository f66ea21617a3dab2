//! Decoders for response payloads
//!
//! Provides decoding from wire bytes into document trees:
//! - CoreJSON hypermedia (`application/vnd.coreapi+json`)
//! - Plain JSON data (`application/json`)

use crate::error::CodecError;
use coreapi_document::{Document, ErrorDocument, Node};
use std::fmt;
use std::sync::Arc;

mod corejson;
mod json;

pub use corejson::{CoreJsonCodec, COREJSON_MEDIA_TYPE};
pub use json::JsonCodec;

/// Result of decoding a payload
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Ordinary content
    Node(Node),
    /// Remote party signalled failure
    Error(ErrorDocument),
}

impl Decoded {
    /// Decoded document, if that is what the payload was
    #[must_use]
    pub fn into_document(self) -> Option<Document> {
        match self {
            Self::Node(Node::Document(doc)) => Some(doc),
            _ => None,
        }
    }
}

/// Decoder trait for turning response bytes into document trees
///
/// Implement this trait to add support for new content types.
pub trait Decoder: Send + Sync + fmt::Debug {
    /// Media types handled, most preferred first (`type/*` and `*/*` allowed)
    fn media_types(&self) -> &[&'static str];

    /// Parse `bytes`, resolving relative URLs against `base_url`
    ///
    /// # Errors
    /// Returns [`CodecError`] if the content is malformed.
    fn decode(&self, bytes: &[u8], base_url: Option<&str>) -> Result<Decoded, CodecError>;

    /// Check if this decoder accepts a normalized media type
    fn accepts(&self, media_type: &str) -> bool {
        let main_type = media_type
            .split_once('/')
            .map(|(main, _)| format!("{main}/*"));
        self.media_types().iter().any(|candidate| {
            *candidate == media_type || *candidate == "*/*" || Some(*candidate) == main_type.as_deref()
        })
    }
}

/// Ordered, immutable list of decoders
///
/// Cloning shares the underlying list.
#[derive(Clone)]
pub struct DecoderRegistry {
    decoders: Arc<[Arc<dyn Decoder>]>,
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("decoder_count", &self.decoders.len())
            .field("media_types", &self.media_types())
            .finish()
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl DecoderRegistry {
    /// Registry over `decoders`, consulted in the given order
    #[must_use]
    pub fn new(decoders: Vec<Arc<dyn Decoder>>) -> Self {
        Self {
            decoders: decoders.into(),
        }
    }

    /// Registry with no decoders
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Built-in decoders: CoreJSON first, then plain JSON
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![Arc::new(CoreJsonCodec), Arc::new(JsonCodec)])
    }

    /// New registry with `decoder` appended
    #[must_use]
    pub fn with_decoder(&self, decoder: impl Decoder + 'static) -> Self {
        let mut decoders = self.decoders.to_vec();
        decoders.push(Arc::new(decoder));
        Self::new(decoders)
    }

    /// Select a decoder for a response content type
    ///
    /// # Selection Logic
    /// - no content type → first decoder
    /// - otherwise, the first decoder listing the exact type, `type/*` or `*/*`
    ///
    /// # Errors
    /// Returns [`CodecError::UnsupportedMediaType`] if no decoder matches,
    /// or [`CodecError::NoDecoders`] for an empty registry.
    pub fn negotiate(&self, content_type: Option<&str>) -> Result<&dyn Decoder, CodecError> {
        let Some(content_type) = content_type else {
            return self
                .decoders
                .first()
                .map(|d| &**d)
                .ok_or(CodecError::NoDecoders);
        };
        if self.decoders.is_empty() {
            return Err(CodecError::NoDecoders);
        }

        let media_type = normalize_media_type(content_type);
        let found = self.decoders.iter().find(|d| d.accepts(&media_type));
        tracing::debug!(content_type, found = found.is_some(), "negotiated decoder");

        found
            .map(|d| &**d)
            .ok_or_else(|| CodecError::UnsupportedMediaType {
                content_type: media_type,
                available: self.media_types().join(", "),
            })
    }

    /// All media types, in decoder order
    #[must_use]
    pub fn media_types(&self) -> Vec<&'static str> {
        self.decoders
            .iter()
            .flat_map(|d| d.media_types().iter().copied())
            .collect()
    }

    /// Value for an `Accept` request header
    #[must_use]
    pub fn accept_header(&self) -> String {
        self.media_types().join(", ")
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Decoder> {
        self.decoders.iter().map(|d| &**d)
    }
}

/// Lowercased `type/subtype` with parameters stripped
#[must_use]
pub fn normalize_media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TextDecoder;

    impl Decoder for TextDecoder {
        fn media_types(&self) -> &[&'static str] {
            &["text/*"]
        }

        fn decode(&self, bytes: &[u8], _base_url: Option<&str>) -> Result<Decoded, CodecError> {
            Ok(Decoded::Node(Node::from(
                String::from_utf8_lossy(bytes).into_owned(),
            )))
        }
    }

    #[test]
    fn normalize_strips_parameters() {
        assert_eq!(
            normalize_media_type("Application/JSON; charset=utf-8"),
            "application/json"
        );
        assert_eq!(normalize_media_type("  text/html "), "text/html");
    }

    #[test]
    fn negotiate_without_content_type_picks_first() {
        let registry = DecoderRegistry::standard();
        let decoder = registry.negotiate(None).unwrap();
        assert_eq!(decoder.media_types()[0], COREJSON_MEDIA_TYPE);
    }

    #[test]
    fn negotiate_exact_match_in_order() {
        let registry = DecoderRegistry::standard();
        let decoder = registry.negotiate(Some("application/json")).unwrap();
        assert_eq!(decoder.media_types(), &["application/json"]);

        let decoder = registry
            .negotiate(Some("application/coreapi+json; charset=utf-8"))
            .unwrap();
        assert_eq!(decoder.media_types()[0], COREJSON_MEDIA_TYPE);
    }

    #[test]
    fn negotiate_main_type_wildcard() {
        let registry = DecoderRegistry::standard().with_decoder(TextDecoder);
        let decoder = registry.negotiate(Some("text/plain")).unwrap();
        assert_eq!(decoder.media_types(), &["text/*"]);
    }

    #[test]
    fn negotiate_unsupported_is_distinct_error() {
        let registry = DecoderRegistry::standard();
        let err = registry.negotiate(Some("image/png")).unwrap_err();
        assert!(err.is_unsupported_media_type());
        assert!(err.to_string().contains("image/png"));
    }

    #[test]
    fn negotiate_empty_registry() {
        let registry = DecoderRegistry::empty();
        assert!(matches!(registry.negotiate(None), Err(CodecError::NoDecoders)));
        assert!(matches!(
            registry.negotiate(Some("application/json")),
            Err(CodecError::NoDecoders)
        ));
    }

    #[test]
    fn with_decoder_leaves_original_untouched() {
        let registry = DecoderRegistry::standard();
        let extended = registry.with_decoder(TextDecoder);
        assert_eq!(registry.len(), 2);
        assert_eq!(extended.len(), 3);
    }

    #[test]
    fn accept_header_lists_media_types_in_order() {
        let registry = DecoderRegistry::standard();
        assert_eq!(
            registry.accept_header(),
            "application/vnd.coreapi+json, application/coreapi+json, application/json"
        );
    }

    #[test]
    fn registry_debug() {
        let debug_str = format!("{:?}", DecoderRegistry::standard());
        assert!(debug_str.contains("DecoderRegistry"));
        assert!(debug_str.contains("application/json"));
    }
}
