//! Testing utilities for the CoreAPI client workspace
//!
//! Shared fixtures, a recording mock transport, and tracing setup.

#![allow(missing_docs)]

use async_trait::async_trait;
use coreapi_codec::DecoderRegistry;
use coreapi_document::{Document, Link, LinkAncestor};
use coreapi_transport::{splice_inplace, Params, Transport, TransportError};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

type Responder = dyn Fn(&Link) -> Result<Document, TransportError> + Send + Sync;

/// One `transition` call seen by a [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub link: Link,
    pub params: Option<Params>,
    pub ancestors: Vec<LinkAncestor>,
    pub accept: String,
}

/// Transport that answers from a closure and records every call
///
/// Clones share the call log, so keep one handle for assertions and hand
/// another to the registry. In-place results are spliced like a real
/// transport would.
#[derive(Clone)]
pub struct MockTransport {
    schemes: Vec<&'static str>,
    respond: Arc<Responder>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("schemes", &self.schemes)
            .field("calls", &self.calls.lock().len())
            .finish()
    }
}

impl MockTransport {
    /// Mock for `http`/`https` answering with `respond`
    pub fn new(
        respond: impl Fn(&Link) -> Result<Document, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            schemes: vec!["http", "https"],
            respond: Arc::new(respond),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that always answers with `document`
    pub fn returning(document: Document) -> Self {
        Self::new(move |_| Ok(document.clone()))
    }

    /// Mock that answers with a document at the requested URL
    pub fn echoing() -> Self {
        Self::new(|link| Ok(Document::new(link.url()).with_entry("action", link.action())))
    }

    #[must_use]
    pub fn with_schemes(mut self, schemes: Vec<&'static str>) -> Self {
        self.schemes = schemes;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Most recent call, if any
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn schemes(&self) -> &[&'static str] {
        &self.schemes
    }

    async fn transition(
        &self,
        link: &Link,
        params: Option<&Params>,
        decoders: &DecoderRegistry,
        ancestors: &[LinkAncestor],
    ) -> Result<Document, TransportError> {
        self.calls.lock().push(RecordedCall {
            link: link.clone(),
            params: params.cloned(),
            ancestors: ancestors.to_vec(),
            accept: decoders.accept_header(),
        });
        let document = (self.respond)(link)?;
        splice_inplace(document, link, ancestors)
    }
}

/// `{"a": 123, "next": Link("http://x/")}` at `http://example.org/`
pub fn reference_document() -> Document {
    Document::new("http://example.org/")
        .with_entry("a", 123_i64)
        .with_entry("next", Link::new("http://x/"))
}

/// Root document with a nested child document holding a relative link
pub fn nested_document() -> Document {
    let child = Document::new("http://y/").with_entry("go", Link::new("/z"));
    Document::new("http://example.org/").with_entry("child", child)
}

/// Install a test-friendly subscriber honouring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_calls() {
        let mock = MockTransport::echoing();
        let handle = mock.clone();
        let link = Link::new("http://x/").with_action("post");

        let document = mock
            .transition(&link, None, &DecoderRegistry::standard(), &[])
            .await
            .unwrap();

        assert_eq!(document.url(), "http://x/");
        assert_eq!(handle.call_count(), 1);
        let call = handle.last_call().unwrap();
        assert_eq!(call.link, link);
        assert!(call.accept.starts_with("application/vnd.coreapi+json"));
    }

    #[test]
    fn fixtures_have_expected_shape() {
        assert_eq!(reference_document().len(), 2);
        assert!(nested_document().get("child").and_then(|n| n.as_document()).is_some());
    }
}
