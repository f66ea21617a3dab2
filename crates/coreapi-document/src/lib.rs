//! CoreAPI Document Model
//!
//! Immutable hypermedia trees: data, nested documents and callable links.
//!
//! # Core Concepts
//!
//! - [`Node`]: Sum of every value in a tree (document, link, object, array, primitive)
//! - [`Document`]: URL-addressed node with a title and ordered content
//! - [`Link`]: Action descriptor (url, verb, in-place hint, field schema)
//! - [`KeyPath`]: Sequence of names and indices addressing a nested node
//! - [`LinkAncestor`]: An enclosing document of a link and the path to it
//!
//! # Example
//!
//! ```rust
//! use coreapi_document::{key_path, Document, Key, Link, Node};
//!
//! let doc = Document::new("http://example.org/")
//!     .with_entry("a", 123_i64)
//!     .with_entry("next", Link::new("http://example.org/next"));
//!
//! let node = Node::from(doc);
//! let next = node.index(&Key::from("next")).unwrap();
//! assert_eq!(next.as_link().map(Link::url), Some("http://example.org/next"));
//! assert_eq!(key_path!["next"].to_string(), r#"["next"]"#);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod document;
mod error;
mod key_path;
mod link;
mod node;

// Re-exports
pub use document::{Document, ErrorDocument, LinkAncestor};
pub use error::{KeyPathError, LookupFailure};
pub use key_path::{Key, KeyPath};
pub use link::{Field, FieldLocation, Link, DEFAULT_ACTION};
pub use node::{Node, Object, Primitive};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
