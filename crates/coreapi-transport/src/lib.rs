//! CoreAPI Transports
//!
//! Performs link transitions: turns a [`Link`](coreapi_document::Link) plus
//! parameters into a request, and the response back into a document.
//!
//! # Core Operations
//!
//! - **Select**: [`TransportRegistry::determine`] picks a transport by URL scheme
//! - **Transition**: [`Transport::transition`] performs one request/response
//! - **Splice**: in-place results are written back into the root document
//!
//! The built-in [`HttpTransport`] speaks HTTP(S) through reqwest and is
//! configured with [`HttpConfig`].

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod registry;
pub mod response;
pub mod transport;

pub use config::{HttpConfig, DEFAULT_USER_AGENT};
pub use error::TransportError;
pub use http::HttpTransport;
pub use params::{expand_path_template, http_method, split_params, RequestParams};
pub use registry::{effective_url, TransportRegistry};
pub use response::{decode_response, splice_inplace, status_line, RawResponse};
pub use transport::{Params, Transport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with transports
    pub use crate::config::HttpConfig;
    pub use crate::error::TransportError;
    pub use crate::http::HttpTransport;
    pub use crate::registry::TransportRegistry;
    pub use crate::transport::{Params, Transport};
}
