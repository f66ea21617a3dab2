//! Client configuration

use coreapi_codec::{Decoder, DecoderRegistry};
use coreapi_transport::{HttpConfig, HttpTransport, Transport, TransportError, TransportRegistry};
use std::sync::Arc;

/// Decoders and transports a [`Client`](crate::Client) hands to each call
///
/// Both lists are ordered and immutable once built; cloning shares them.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Response decoders, most preferred first
    pub decoders: DecoderRegistry,
    /// Transports, consulted in order by URL scheme
    pub transports: TransportRegistry,
}

impl ClientConfig {
    /// Built-in decoders (CoreJSON, JSON) and the default HTTP transport
    #[must_use]
    pub fn standard() -> Self {
        Self {
            decoders: DecoderRegistry::standard(),
            transports: TransportRegistry::standard(),
        }
    }

    /// Built-in decoders with an HTTP transport using `http`
    ///
    /// # Errors
    /// Returns [`TransportError::Request`] if the HTTP client cannot be built.
    pub fn with_http(http: HttpConfig) -> Result<Self, TransportError> {
        Ok(Self {
            decoders: DecoderRegistry::standard(),
            transports: TransportRegistry::new(vec![Arc::new(HttpTransport::new(http)?)]),
        })
    }

    /// With decoders
    #[inline]
    #[must_use]
    pub fn with_decoders(mut self, decoders: DecoderRegistry) -> Self {
        self.decoders = decoders;
        self
    }

    /// With transports
    #[inline]
    #[must_use]
    pub fn with_transports(mut self, transports: TransportRegistry) -> Self {
        self.transports = transports;
        self
    }

    /// With one more decoder, after the existing ones
    #[must_use]
    pub fn add_decoder(mut self, decoder: impl Decoder + 'static) -> Self {
        self.decoders = self.decoders.with_decoder(decoder);
        self
    }

    /// With one more transport, after the existing ones
    #[must_use]
    pub fn add_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transports = self.transports.with_transport(transport);
        self
    }
}
