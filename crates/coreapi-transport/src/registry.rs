//! Transport registry and scheme-based selection
//!
//! Provides [`TransportRegistry`] for holding transports and choosing the one
//! that handles a link's URL.

use crate::error::TransportError;
use crate::http::HttpTransport;
use crate::transport::Transport;
use coreapi_document::LinkAncestor;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Ordered, immutable list of transports
///
/// Cloning shares the underlying list.
#[derive(Clone)]
pub struct TransportRegistry {
    transports: Arc<[Arc<dyn Transport>]>,
}

impl fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRegistry")
            .field("transport_count", &self.transports.len())
            .field("schemes", &self.schemes())
            .finish()
    }
}

impl Default for TransportRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl TransportRegistry {
    /// Registry over `transports`, consulted in the given order
    #[must_use]
    pub fn new(transports: Vec<Arc<dyn Transport>>) -> Self {
        Self {
            transports: transports.into(),
        }
    }

    /// Registry with no transports
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Built-in transports: HTTP(S) with default configuration
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![Arc::new(HttpTransport::default())])
    }

    /// New registry with `transport` appended
    #[must_use]
    pub fn with_transport(&self, transport: impl Transport + 'static) -> Self {
        let mut transports = self.transports.to_vec();
        transports.push(Arc::new(transport));
        Self::new(transports)
    }

    /// Select the transport for a link URL
    ///
    /// # Selection Logic
    /// - relative URLs are made absolute against the nearest ancestor (see [`effective_url`])
    /// - the first transport whose schemes include the URL's scheme wins
    ///
    /// # Errors
    /// Returns [`TransportError::MissingScheme`] / [`TransportError::InvalidUrl`]
    /// if no absolute URL can be formed, or [`TransportError::UnsupportedScheme`]
    /// if no transport matches.
    pub fn determine(
        &self,
        url: &str,
        ancestors: &[LinkAncestor],
    ) -> Result<&dyn Transport, TransportError> {
        let absolute = effective_url(url, ancestors)?;
        let transport = self
            .transports
            .iter()
            .find(|t| t.can_handle(&absolute))
            .ok_or_else(|| TransportError::UnsupportedScheme {
                scheme: absolute.scheme().to_string(),
                url: absolute.to_string(),
            })?;

        tracing::debug!(url = %absolute, ?transport, "selected transport");
        Ok(&**transport)
    }

    /// All schemes, in transport order
    #[must_use]
    pub fn schemes(&self) -> Vec<&'static str> {
        self.transports
            .iter()
            .flat_map(|t| t.schemes().iter().copied())
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.transports.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Transport> {
        self.transports.iter().map(|t| &**t)
    }
}

/// Absolute URL for a link
///
/// Absolute URLs are used as-is. Relative ones are joined against the most
/// specific ancestor document whose own URL is absolute.
///
/// # Errors
/// Returns [`TransportError::MissingScheme`] when the URL is relative and no
/// ancestor supplies a base.
pub fn effective_url(url: &str, ancestors: &[LinkAncestor]) -> Result<Url, TransportError> {
    let invalid = |source| TransportError::InvalidUrl {
        url: url.to_string(),
        source,
    };

    match Url::parse(url) {
        Ok(absolute) => Ok(absolute),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = ancestors
                .iter()
                .rev()
                .find_map(|ancestor| Url::parse(ancestor.document.url()).ok())
                .ok_or_else(|| TransportError::MissingScheme {
                    url: url.to_string(),
                })?;
            base.join(url).map_err(invalid)
        }
        Err(source) => Err(invalid(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Params;
    use async_trait::async_trait;
    use coreapi_codec::DecoderRegistry;
    use coreapi_document::{key_path, Document, KeyPath, Link};

    #[derive(Debug)]
    struct FtpTransport;

    #[async_trait]
    impl Transport for FtpTransport {
        fn schemes(&self) -> &[&'static str] {
            &["ftp"]
        }

        async fn transition(
            &self,
            _link: &Link,
            _params: Option<&Params>,
            _decoders: &DecoderRegistry,
            _ancestors: &[LinkAncestor],
        ) -> Result<Document, TransportError> {
            Ok(Document::new("ftp://files/"))
        }
    }

    fn ancestors() -> Vec<LinkAncestor> {
        vec![
            LinkAncestor::new(Document::new("http://x/api/"), KeyPath::root()),
            LinkAncestor::new(Document::new("http://y/child/"), key_path!["child"]),
        ]
    }

    #[test]
    fn effective_url_absolute_passthrough() {
        let url = effective_url("https://a.example/p?q=1", &ancestors()).unwrap();
        assert_eq!(url.as_str(), "https://a.example/p?q=1");
    }

    #[test]
    fn effective_url_uses_most_specific_ancestor() {
        let url = effective_url("/z", &ancestors()).unwrap();
        assert_eq!(url.as_str(), "http://y/z");

        let url = effective_url("next", &ancestors()).unwrap();
        assert_eq!(url.as_str(), "http://y/child/next");
    }

    #[test]
    fn effective_url_skips_ancestors_without_absolute_url() {
        let chain = vec![
            LinkAncestor::new(Document::new("http://x/api/"), KeyPath::root()),
            LinkAncestor::new(Document::new(""), key_path!["inner"]),
        ];
        let url = effective_url("items", &chain).unwrap();
        assert_eq!(url.as_str(), "http://x/api/items");
    }

    #[test]
    fn effective_url_missing_scheme() {
        let err = effective_url("/z", &[]).unwrap_err();
        assert!(matches!(err, TransportError::MissingScheme { url } if url == "/z"));

        let err = effective_url("", &[]).unwrap_err();
        assert!(matches!(err, TransportError::MissingScheme { .. }));
    }

    #[test]
    fn effective_url_invalid() {
        let err = effective_url("http://[::1", &[]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    #[test]
    fn determine_by_scheme_in_order() {
        let registry = TransportRegistry::standard().with_transport(FtpTransport);

        let http = registry.determine("http://example.org/", &[]).unwrap();
        assert_eq!(http.schemes(), &["http", "https"]);

        let ftp = registry.determine("ftp://example.org/file", &[]).unwrap();
        assert_eq!(ftp.schemes(), &["ftp"]);
    }

    #[test]
    fn determine_unsupported_scheme() {
        let registry = TransportRegistry::standard();
        let err = registry.determine("mailto:someone@example.org", &[]).unwrap_err();
        assert!(matches!(
            err,
            TransportError::UnsupportedScheme { ref scheme, .. } if scheme == "mailto"
        ));
    }

    #[test]
    fn determine_empty_registry() {
        let err = TransportRegistry::empty()
            .determine("http://example.org/", &[])
            .unwrap_err();
        assert!(err.is_selection_error());
    }

    #[test]
    fn registry_debug_lists_schemes() {
        let debug_str = format!("{:?}", TransportRegistry::standard());
        assert!(debug_str.contains("TransportRegistry"));
        assert!(debug_str.contains("https"));
    }
}
