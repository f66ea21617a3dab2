//! HTTP(S) transport backed by reqwest

use crate::config::HttpConfig;
use crate::error::TransportError;
use crate::params::{expand_path_template, http_method, split_params};
use crate::registry::effective_url;
use crate::response::{decode_response, splice_inplace, RawResponse};
use crate::transport::{Params, Transport};
use async_trait::async_trait;
use coreapi_codec::DecoderRegistry;
use coreapi_document::{Document, Link, LinkAncestor};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};

/// Transport for `http` and `https` URLs
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: HttpConfig,
}

impl Default for HttpTransport {
    fn default() -> Self {
        let config = HttpConfig::default();
        let client = build_client(&config).unwrap_or_else(|error| {
            tracing::warn!(%error, "HTTP client build failed, using reqwest defaults");
            Client::new()
        });
        Self { client, config }
    }
}

fn build_client(config: &HttpConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

impl HttpTransport {
    /// Create transport with configuration
    ///
    /// # Errors
    /// Returns [`TransportError::Request`] if the HTTP client cannot be built.
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(&config)?,
            config,
        })
    }

    /// Use a preconfigured reqwest client
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Build the request for a link without sending it
    ///
    /// # Errors
    /// Returns [`TransportError`] for invalid actions, parameters or URLs.
    pub fn build_request(
        &self,
        link: &Link,
        params: Option<&Params>,
        decoders: &DecoderRegistry,
        ancestors: &[LinkAncestor],
    ) -> Result<RequestBuilder, TransportError> {
        let method = http_method(link.action())?;
        let split = split_params(&method, link.fields(), params)?;

        let expanded = expand_path_template(link.url(), &split.path);
        let mut url = effective_url(&expanded, ancestors)?;
        if !split.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&split.query);
        }

        let mut request = self
            .client
            .request(method, url.clone())
            .header(ACCEPT, decoders.accept_header());
        for (name, value) in &self.config.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(credentials) = url
            .host_str()
            .and_then(|host| self.config.authorization_for(host))
        {
            request = request.header(AUTHORIZATION, credentials);
        }
        if let Some(body) = &split.body {
            request = request.json(body);
        }
        Ok(request)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn schemes(&self) -> &[&'static str] {
        &["http", "https"]
    }

    async fn transition(
        &self,
        link: &Link,
        params: Option<&Params>,
        decoders: &DecoderRegistry,
        ancestors: &[LinkAncestor],
    ) -> Result<Document, TransportError> {
        let request = self.build_request(link, params, decoders, ancestors)?.build()?;
        tracing::info!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;
        tracing::debug!(%status, content_type = ?content_type, len = body.len(), "received response");

        let document = decode_response(
            RawResponse {
                status,
                url: &url,
                content_type: content_type.as_deref(),
                body: &body,
            },
            decoders,
        )?;
        splice_inplace(document, link, ancestors)
    }
}
