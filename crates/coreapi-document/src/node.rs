//! Polymorphic document tree nodes
//!
//! Provides [`Node`], the sum of every value that can appear in a document,
//! and the explicit [`Node::index`] lookup used by path traversal.

use crate::document::Document;
use crate::error::LookupFailure;
use crate::key_path::Key;
use crate::link::Link;
use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::fmt::{self, Display, Formatter};

/// Insertion-ordered mapping of string keys to nodes
pub type Object = IndexMap<String, Node>;

/// Scalar leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// JSON null
    Null,
    /// Boolean
    Bool(bool),
    /// Integer or float, kept as parsed
    Number(Number),
    /// String
    String(String),
}

impl Primitive {
    /// Type name used in diagnostics
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Number(_) => "Number",
            Self::String(_) => "String",
        }
    }
}

impl Display for Primitive {
    /// Renders the value as it would appear in a query string
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Any value found in a document tree
///
/// Immutable once constructed; "changes" always build new trees
/// (see [`Document::set_in`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Nested, URL-addressed document
    Document(Document),
    /// Callable action descriptor
    Link(Link),
    /// Plain mapping
    Object(Object),
    /// Plain sequence
    Array(Vec<Node>),
    /// Scalar
    Primitive(Primitive),
}

impl Node {
    /// Type name used in diagnostics
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Document(_) => "Document",
            Self::Link(_) => "Link",
            Self::Object(_) => "Object",
            Self::Array(_) => "Array",
            Self::Primitive(p) => p.type_name(),
        }
    }

    /// Index into this node with a single key
    ///
    /// Names are valid against objects and document content; indices only
    /// against arrays.
    ///
    /// # Errors
    /// Returns [`LookupFailure`] describing why the key did not resolve.
    pub fn index(&self, key: &Key) -> Result<&Node, LookupFailure> {
        match (self, key) {
            (Self::Document(doc), Key::Name(name)) => lookup_name(doc.content(), name),
            (Self::Object(map), Key::Name(name)) => lookup_name(map, name),
            (Self::Array(items), Key::Index(index)) => {
                items.get(*index).ok_or(LookupFailure::IndexOutOfRange {
                    index: *index,
                    len: items.len(),
                })
            }
            (Self::Document(_) | Self::Object(_), Key::Index(_))
            | (Self::Array(_), Key::Name(_)) => Err(LookupFailure::KeyTypeMismatch {
                key: key.clone(),
                node_type: self.type_name(),
            }),
            (Self::Link(_) | Self::Primitive(_), _) => Err(LookupFailure::NotIndexable {
                node_type: self.type_name(),
            }),
        }
    }

    /// Index into this node, discarding the failure reason
    #[inline]
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Node> {
        self.index(key).ok()
    }

    #[inline]
    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(doc) => Some(doc),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Primitive(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Build a copy of this tree with the node at `keys` replaced
    pub(crate) fn replace_at(&self, keys: &[Key], value: Node) -> Result<Node, LookupFailure> {
        let Some((first, rest)) = keys.split_first() else {
            return Ok(value);
        };
        let replaced = self.index(first)?.replace_at(rest, value)?;

        Ok(match (self, first) {
            (Self::Document(doc), Key::Name(name)) => {
                Self::Document(doc.clone().with_entry(name.clone(), replaced))
            }
            (Self::Object(map), Key::Name(name)) => {
                let mut map = map.clone();
                map.insert(name.clone(), replaced);
                Self::Object(map)
            }
            (Self::Array(items), Key::Index(index)) => {
                let mut items = items.clone();
                items[*index] = replaced;
                Self::Array(items)
            }
            _ => {
                return Err(LookupFailure::KeyTypeMismatch {
                    key: first.clone(),
                    node_type: self.type_name(),
                })
            }
        })
    }
}

fn lookup_name<'a>(map: &'a Object, name: &str) -> Result<&'a Node, LookupFailure> {
    map.get(name).ok_or_else(|| LookupFailure::MissingKey {
        key: name.to_string(),
    })
}

impl From<Document> for Node {
    fn from(doc: Document) -> Self {
        Self::Document(doc)
    }
}

impl From<Link> for Node {
    fn from(link: Link) -> Self {
        Self::Link(link)
    }
}

impl From<Object> for Node {
    fn from(map: Object) -> Self {
        Self::Object(map)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Array(items)
    }
}

impl From<Primitive> for Node {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Primitive(Primitive::String(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Primitive(Primitive::String(s))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Self::Primitive(Primitive::Bool(b))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Self::Primitive(Primitive::Number(n.into()))
    }
}

impl From<Value> for Node {
    /// Plain data conversion; no hypermedia interpretation
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Primitive(Primitive::Null),
            Value::Bool(b) => Self::Primitive(Primitive::Bool(b)),
            Value::Number(n) => Self::Primitive(Primitive::Number(n)),
            Value::String(s) => Self::Primitive(Primitive::String(s)),
            Value::Array(items) => Self::Array(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}
