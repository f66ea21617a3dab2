//! CoreAPI Codecs
//!
//! The boundary between wire bytes and document trees.
//!
//! # Core Operations
//!
//! - **Negotiate**: pick a [`Decoder`] for a response `Content-Type`
//! - **Decode**: bytes → [`Decoded`] (a node tree or a remote error)
//! - **Encode**: [`Document`] → CoreJSON bytes
//!
//! # Example
//!
//! ```rust
//! use coreapi_codec::{dump, load};
//!
//! let encoded = br#"{"_type":"document","_meta":{"url":"http://example.org"},"a":123,"next":{"_type":"link"}}"#;
//! let document = load(encoded).unwrap().into_document().unwrap();
//! assert_eq!(document.url(), "http://example.org");
//!
//! let (content_type, bytes) = dump(&document).unwrap();
//! assert_eq!(content_type, "application/vnd.coreapi+json");
//! assert_eq!(bytes, encoded.to_vec());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod codecs;
pub mod error;

// Re-exports for convenience
pub use codecs::{
    normalize_media_type, CoreJsonCodec, Decoded, Decoder, DecoderRegistry, JsonCodec,
    COREJSON_MEDIA_TYPE,
};
pub use error::CodecError;

use coreapi_document::Document;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decode CoreJSON bytes with no base URL
///
/// # Errors
/// Returns [`CodecError`] for malformed content or a non-document top level.
pub fn load(bytes: &[u8]) -> Result<Decoded, CodecError> {
    CoreJsonCodec.decode(bytes, None)
}

/// Encode a document as CoreJSON, returning `(content_type, bytes)`
///
/// # Errors
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn dump(document: &Document) -> Result<(&'static str, Vec<u8>), CodecError> {
    Ok((COREJSON_MEDIA_TYPE, CoreJsonCodec.encode(document)?))
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with codecs
    pub use crate::codecs::{CoreJsonCodec, Decoded, Decoder, DecoderRegistry, JsonCodec};
    pub use crate::error::CodecError;
    pub use crate::{dump, load};
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use coreapi_document::{Link, Node};
    use pretty_assertions::assert_eq;

    const ENCODED: &[u8] = br#"{"_type":"document","_meta":{"url":"http://example.org"},"a":123,"next":{"_type":"link"}}"#;

    #[test]
    fn load_reference_document() {
        let document = load(ENCODED).unwrap().into_document().unwrap();
        let expected = Document::new("http://example.org")
            .with_entry("a", 123_i64)
            .with_entry("next", Link::new("http://example.org"));
        assert_eq!(document, expected);
    }

    #[test]
    fn dump_reference_document() {
        let document = load(ENCODED).unwrap().into_document().unwrap();
        let (content_type, content) = dump(&document).unwrap();
        assert_eq!(content_type, COREJSON_MEDIA_TYPE);
        assert_eq!(content, ENCODED.to_vec());
    }

    #[test]
    fn negotiated_decoder_decodes() {
        let registry = DecoderRegistry::standard();
        let decoder = registry.negotiate(Some("application/json")).unwrap();
        let decoded = decoder.decode(br#"{"example": 123}"#, None).unwrap();
        let Decoded::Node(Node::Object(map)) = decoded else {
            panic!("expected object");
        };
        assert_eq!(map.get("example"), Some(&Node::from(123_i64)));
    }
}
