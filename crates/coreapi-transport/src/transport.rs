//! The transport capability
//!
//! A transport declares the URL schemes it handles and performs one
//! transition per call.

use crate::error::TransportError;
use async_trait::async_trait;
use coreapi_codec::DecoderRegistry;
use coreapi_document::{Document, Link, LinkAncestor};
use std::fmt;
use url::Url;

/// Parameter values supplied for a link's fields
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Performs link transitions for a set of URL schemes
///
/// Implement this trait to add support for new protocols.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// URL schemes handled, lowercase
    fn schemes(&self) -> &[&'static str];

    /// Check if this transport accepts the URL
    fn can_handle(&self, url: &Url) -> bool {
        self.schemes().contains(&url.scheme())
    }

    /// Invoke `link` and return the resulting document
    ///
    /// `ancestors` is the resolution chain of the link, root first. It is
    /// empty for transitions that did not start from a document.
    ///
    /// # Errors
    /// Returns [`TransportError`] for request, decoding or remote failures.
    async fn transition(
        &self,
        link: &Link,
        params: Option<&Params>,
        decoders: &DecoderRegistry,
        ancestors: &[LinkAncestor],
    ) -> Result<Document, TransportError>;
}
