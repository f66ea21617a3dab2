//! The hypermedia client
//!
//! Turns "follow this key path and invoke" into a single transport
//! transition.

use crate::config::ClientConfig;
use crate::error::{ClientError, ResolveError};
use crate::resolve::{resolve_path, IntoKeyPath};
use coreapi_codec::DecoderRegistry;
use coreapi_document::{Document, Link, LinkAncestor, DEFAULT_ACTION};
use coreapi_transport::{Params, TransportError, TransportRegistry};

/// Per-call options for [`Client::action`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOptions {
    /// Values for the link's fields
    pub params: Option<Params>,
    /// Replaces the link's action
    pub action: Option<String>,
    /// Replaces the link's in-place flag
    pub inplace: Option<bool>,
}

impl ActionOptions {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With parameter values
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// With a single parameter value
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params
            .get_or_insert_with(Params::new)
            .insert(name.into(), value.into());
        self
    }

    /// With action override
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// With in-place override
    #[inline]
    #[must_use]
    pub fn with_inplace(mut self, inplace: bool) -> Self {
        self.inplace = Some(inplace);
        self
    }

    fn has_overrides(&self) -> bool {
        self.action.is_some() || self.inplace.is_some()
    }
}

/// Hypermedia API client
///
/// Holds an immutable [`ClientConfig`]; cloning is cheap and clones may be
/// used concurrently.
#[derive(Debug, Clone, Default)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Create client with configuration
    #[inline]
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn decoders(&self) -> &DecoderRegistry {
        &self.config.decoders
    }

    #[inline]
    #[must_use]
    pub fn transports(&self) -> &TransportRegistry {
        &self.config.transports
    }

    /// Fetch the document at `url`
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] for selection, request or remote
    /// failures.
    pub async fn get(&self, url: &str) -> Result<Document, ClientError> {
        let link = Link::new(url).with_action(DEFAULT_ACTION);
        self.transition(&link, None, &[]).await
    }

    /// Fetch a fresh copy of `document` from its own URL
    ///
    /// # Errors
    /// Same as [`Client::get`].
    pub async fn reload(&self, document: &Document) -> Result<Document, ClientError> {
        self.get(document.url()).await
    }

    /// Invoke the link at `keys` within `document`
    ///
    /// # Workflow
    /// 1. Resolve `keys` to a link and its ancestor chain
    /// 2. Apply action/in-place overrides, only if at least one is given
    /// 3. Select a transport by URL scheme
    /// 4. Perform the transition and return its result unchanged
    ///
    /// A bare string (typed or JSON) is a one-element path. `document` is
    /// never modified; in-place results come back as a new root.
    ///
    /// # Errors
    /// Returns [`ClientError::Resolve`] if `keys` do not lead to a link,
    /// otherwise any [`TransportError`] as [`ClientError::Transport`].
    pub async fn action(
        &self,
        document: &Document,
        keys: impl IntoKeyPath,
        options: ActionOptions,
    ) -> Result<Document, ClientError> {
        let path = keys.into_action_path().map_err(ResolveError::from)?;
        let (link, ancestors) = resolve_path(document, &path)?;

        let link = if options.has_overrides() {
            link.with_overrides(options.action.as_deref(), options.inplace)
        } else {
            link
        };

        tracing::debug!(%path, action = link.action(), inplace = link.is_inplace(), "invoking link");
        self.transition(&link, options.params.as_ref(), &ancestors).await
    }

    async fn transition(
        &self,
        link: &Link,
        params: Option<&Params>,
        ancestors: &[LinkAncestor],
    ) -> Result<Document, ClientError> {
        let transport = self.config.transports.determine(link.url(), ancestors)?;
        tracing::info!(url = link.url(), action = link.action(), "transition");

        match transport
            .transition(link, params, &self.config.decoders, ancestors)
            .await
        {
            Ok(document) => Ok(document),
            Err(err @ TransportError::ErrorMessage(_)) => {
                tracing::warn!(url = link.url(), error = %err, "remote error response");
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
