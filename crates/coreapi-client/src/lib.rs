//! CoreAPI Client
//!
//! A hypermedia API client: fetch a document describing an API, then invoke
//! its links by key path.
//!
//! # Core Operations
//!
//! - **Get**: [`Client::get`] fetches a document by URL
//! - **Resolve**: [`resolve`] walks a key path to a link, recording enclosing documents
//! - **Action**: [`Client::action`] resolves, applies overrides and performs the transition
//! - **Reload**: [`Client::reload`] re-fetches a document from its own URL
//!
//! # Example
//!
//! ```rust,no_run
//! use coreapi_client::{key_path, ActionOptions, Client};
//!
//! # async fn run() -> Result<(), coreapi_client::ClientError> {
//! let client = Client::default();
//! let schema = client.get("https://api.example.org/").await?;
//! let users = client
//!     .action(&schema, key_path!["users", "list"], ActionOptions::new())
//!     .await?;
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod client;
pub mod config;
pub mod error;
pub mod resolve;

pub use client::{ActionOptions, Client};
pub use config::ClientConfig;
pub use error::{ClientError, NotFoundCause, ResolveError};
pub use resolve::{resolve, IntoKeyPath};

// Document model, re-exported so most callers need only this crate
pub use coreapi_document::{
    key_path, Document, ErrorDocument, Field, FieldLocation, Key, KeyPath, Link, LinkAncestor,
    Node,
};
pub use coreapi_transport::{HttpConfig, Params};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the client
    pub use crate::client::{ActionOptions, Client};
    pub use crate::config::ClientConfig;
    pub use crate::error::{ClientError, ResolveError};
    pub use crate::resolve::resolve;
    pub use coreapi_document::{key_path, Document, Key, KeyPath, Link};
}
