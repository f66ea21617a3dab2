//! Documents, error documents and link ancestry

use crate::error::LookupFailure;
use crate::key_path::KeyPath;
use crate::node::{Node, Object};
use std::fmt::{self, Display, Formatter};

/// Named, URL-addressed node bundling content and the links reachable from it
///
/// Documents nest: any value in `content` may itself be a document, which
/// establishes the hierarchy used for relative link resolution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    url: String,
    title: String,
    content: Object,
}

impl Document {
    /// Empty, untitled document at `url`
    #[inline]
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            content: Object::new(),
        }
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// With full content mapping
    #[inline]
    #[must_use]
    pub fn with_content(mut self, content: Object) -> Self {
        self.content = content;
        self
    }

    /// With one content entry added (or replaced in place)
    #[inline]
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    #[must_use]
    pub fn content(&self) -> &Object {
        &self.content
    }

    /// Content entry by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.content.get(key)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Return a new document with the node at `keys` replaced by `value`
    ///
    /// Every key along the path must already exist. An empty path replaces
    /// the whole document, so `value` must then be a document itself.
    ///
    /// # Errors
    /// Returns [`LookupFailure`] if a key does not resolve, or if the root
    /// would be replaced by a non-document.
    pub fn set_in(&self, keys: &KeyPath, value: impl Into<Node>) -> Result<Self, LookupFailure> {
        match Node::Document(self.clone()).replace_at(keys.keys(), value.into())? {
            Node::Document(doc) => Ok(doc),
            other => Err(LookupFailure::RootNotDocument {
                node_type: other.type_name(),
            }),
        }
    }
}

/// Decoded error response from a remote party
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorDocument {
    title: String,
    content: Object,
}

impl ErrorDocument {
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>, content: Object) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    #[must_use]
    pub fn content(&self) -> &Object {
        &self.content
    }

    /// All string messages in the content, flattened one array level deep
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.content
            .values()
            .flat_map(|node| match node {
                Node::Array(items) => items.iter().filter_map(Node::as_str).collect(),
                other => other.as_str().into_iter().collect::<Vec<_>>(),
            })
            .collect()
    }
}

impl Display for ErrorDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let messages = self.messages();
        match (self.title.is_empty(), messages.is_empty()) {
            (true, true) => f.write_str("error response"),
            (false, true) => f.write_str(&self.title),
            (true, false) => f.write_str(&messages.join("; ")),
            (false, false) => write!(f, "{}: {}", self.title, messages.join("; ")),
        }
    }
}

/// An enclosing document of a resolved link, and the keys that reached it
///
/// Resolution yields these root first, most specific last.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAncestor {
    /// The enclosing document
    pub document: Document,
    /// Path from the root to `document`
    pub keys: KeyPath,
}

impl LinkAncestor {
    #[inline]
    #[must_use]
    pub fn new(document: Document, keys: KeyPath) -> Self {
        Self { document, keys }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key_path, Link};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn nested() -> Document {
        let child = Document::new("http://y/").with_entry("go", Link::new("/z"));
        Document::new("http://x/")
            .with_title("Root")
            .with_entry("a", 123_i64)
            .with_entry("child", child)
            .with_entry("items", Node::from(json!([1, 2])))
    }

    #[test]
    fn document_accessors() {
        let doc = nested();
        assert_eq!(doc.url(), "http://x/");
        assert_eq!(doc.title(), "Root");
        assert_eq!(doc.len(), 3);
        assert!(doc.get("child").and_then(Node::as_document).is_some());
    }

    #[test]
    fn set_in_replaces_nested_document() {
        let doc = nested();
        let replacement = Document::new("http://y/").with_entry("done", true);

        let updated = doc.set_in(&key_path!["child"], replacement.clone()).unwrap();

        assert_eq!(updated.get("child"), Some(&Node::Document(replacement)));
        assert_eq!(updated.get("a"), doc.get("a"));
        // original untouched
        assert!(doc
            .get("child")
            .and_then(Node::as_document)
            .and_then(|c| c.get("go"))
            .is_some());
    }

    #[test]
    fn set_in_preserves_key_order() {
        let doc = nested();
        let updated = doc.set_in(&key_path!["child"], Document::new("")).unwrap();
        let keys: Vec<_> = updated.content().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "child", "items"]);
    }

    #[test]
    fn set_in_array_element() {
        let doc = nested();
        let updated = doc.set_in(&key_path!["items", 1], "two").unwrap();
        assert_eq!(
            updated.get("items"),
            Some(&Node::Array(vec![Node::from(json!(1)), Node::from("two")]))
        );
    }

    #[test]
    fn set_in_empty_path_replaces_root() {
        let doc = nested();
        let other = Document::new("http://other/");
        assert_eq!(doc.set_in(&KeyPath::root(), other.clone()).unwrap(), other);

        let err = doc.set_in(&KeyPath::root(), 5_i64).unwrap_err();
        assert_eq!(err, LookupFailure::RootNotDocument { node_type: "Number" });
    }

    #[test]
    fn set_in_missing_key_fails() {
        let err = nested().set_in(&key_path!["nope", "x"], 1_i64).unwrap_err();
        assert_eq!(err, LookupFailure::MissingKey { key: "nope".into() });
    }

    #[test]
    fn error_document_messages() {
        let mut content = Object::new();
        content.insert("message".into(), Node::from(json!(["failed", "badly"])));
        content.insert("detail".into(), Node::from("nope"));
        let err = ErrorDocument::new("400 Bad Request", content);

        assert_eq!(err.messages(), vec!["failed", "badly", "nope"]);
        assert_eq!(err.to_string(), "400 Bad Request: failed; badly; nope");
        assert_eq!(ErrorDocument::default().to_string(), "error response");
    }
}
