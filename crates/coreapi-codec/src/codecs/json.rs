//! Plain JSON decoder
//!
//! Uses serde_json; produces objects, arrays and primitives with no
//! hypermedia interpretation.

use crate::codecs::{Decoded, Decoder};
use crate::error::CodecError;
use coreapi_document::Node;
use serde_json::Value;

/// JSON decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create new JSON decoder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for JsonCodec {
    fn media_types(&self) -> &[&'static str] {
        &["application/json"]
    }

    fn decode(&self, bytes: &[u8], _base_url: Option<&str>) -> Result<Decoded, CodecError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| CodecError::parse("application/json", e))?;
        Ok(Decoded::Node(Node::from(value)))
    }
}
