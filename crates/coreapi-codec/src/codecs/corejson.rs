//! CoreJSON hypermedia codec
//!
//! JSON with `_type`-tagged objects for documents, links and errors.
//! Object keys that begin with `_` are escaped by doubling the underscore.

use crate::codecs::{Decoded, Decoder};
use crate::error::CodecError;
use coreapi_document::{
    Document, ErrorDocument, Field, FieldLocation, Link, Node, Object, Primitive, DEFAULT_ACTION,
};
use serde_json::{Map, Value};
use url::Url;

/// Preferred CoreJSON media type
pub const COREJSON_MEDIA_TYPE: &str = "application/vnd.coreapi+json";

const MEDIA_TYPES: &[&str] = &[COREJSON_MEDIA_TYPE, "application/coreapi+json"];

/// CoreJSON codec
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreJsonCodec;

impl CoreJsonCodec {
    /// Create new CoreJSON codec
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode a document as compact CoreJSON
    ///
    /// # Errors
    /// Returns [`CodecError::Encode`] if serialization fails.
    pub fn encode(&self, document: &Document) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(&document_to_value(document)).map_err(CodecError::Encode)
    }

    /// Encode a document as indented CoreJSON
    ///
    /// # Errors
    /// Returns [`CodecError::Encode`] if serialization fails.
    pub fn encode_pretty(&self, document: &Document) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec_pretty(&document_to_value(document)).map_err(CodecError::Encode)
    }
}

impl Decoder for CoreJsonCodec {
    fn media_types(&self) -> &[&'static str] {
        MEDIA_TYPES
    }

    fn decode(&self, bytes: &[u8], base_url: Option<&str>) -> Result<Decoded, CodecError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| CodecError::parse(COREJSON_MEDIA_TYPE, e))?;
        let base_url = base_url.unwrap_or_default();

        if let Value::Object(map) = &value {
            match type_tag(map) {
                Some("document") => {
                    return Ok(Decoded::Node(Node::Document(value_to_document(map, base_url))))
                }
                Some("error") => {
                    let title = meta_str(map, "title").unwrap_or_default();
                    let content = value_to_content(map, base_url);
                    return Ok(Decoded::Error(ErrorDocument::new(title, content)));
                }
                _ => {}
            }
        }

        Err(CodecError::InvalidTopLevel {
            found: value_to_node(&value, base_url).type_name(),
        })
    }
}

fn type_tag(map: &Map<String, Value>) -> Option<&str> {
    map.get("_type").and_then(Value::as_str)
}

fn meta_str<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    map.get("_meta")
        .and_then(|meta| meta.get(name))
        .and_then(Value::as_str)
}

fn value_to_node(value: &Value, base_url: &str) -> Node {
    match value {
        Value::Object(map) => match type_tag(map) {
            Some("document") => Node::Document(value_to_document(map, base_url)),
            Some("link") => Node::Link(value_to_link(map, base_url)),
            // nested errors carry no meaning of their own; keep their data
            _ => Node::Object(value_to_content(map, base_url)),
        },
        Value::Array(items) => Node::Array(items.iter().map(|v| value_to_node(v, base_url)).collect()),
        scalar => Node::from(scalar.clone()),
    }
}

fn value_to_document(map: &Map<String, Value>, base_url: &str) -> Document {
    let url = join_url(base_url, meta_str(map, "url").unwrap_or_default());
    let title = meta_str(map, "title").unwrap_or_default();
    let content = value_to_content(map, &url);
    Document::new(url).with_title(title).with_content(content)
}

fn value_to_content(map: &Map<String, Value>, base_url: &str) -> Object {
    map.iter()
        .filter(|(key, _)| key.as_str() != "_type" && key.as_str() != "_meta")
        .map(|(key, value)| (unescape_key(key), value_to_node(value, base_url)))
        .collect()
}

fn value_to_link(map: &Map<String, Value>, base_url: &str) -> Link {
    let url = join_url(base_url, map.get("url").and_then(Value::as_str).unwrap_or_default());
    let action = map
        .get("action")
        .and_then(Value::as_str)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_ACTION);

    let fields = map
        .get("fields")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(value_to_field).collect())
        .unwrap_or_default();

    let mut link = Link::new(url).with_action(action).with_fields(fields);
    if let Some(inplace) = map.get("inplace").and_then(Value::as_bool) {
        link = link.with_inplace(inplace);
    }
    link
}

fn value_to_field(value: &Value) -> Option<Field> {
    let name = value.get("name").and_then(Value::as_str)?;
    let mut field = Field::new(name);
    if value.get("required").and_then(Value::as_bool) == Some(true) {
        field = field.required();
    }
    if let Some(location) = value.get("location").and_then(Value::as_str) {
        match FieldLocation::parse(location) {
            Some(location) => field = field.with_location(location),
            None => tracing::debug!(field = name, location, "ignoring unknown field location"),
        }
    }
    Some(field)
}

/// Resolve `url` against `base`; an empty `url` refers to the base itself
pub(crate) fn join_url(base: &str, url: &str) -> String {
    if url.is_empty() {
        return base.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(url)) {
        Ok(joined) => joined.into(),
        Err(_) => url.to_string(),
    }
}

fn unescape_key(key: &str) -> String {
    match key.strip_prefix('_') {
        Some(rest) if rest.starts_with('_') => rest.to_string(),
        _ => key.to_string(),
    }
}

fn escape_key(key: &str) -> String {
    if key.starts_with('_') {
        format!("_{key}")
    } else {
        key.to_string()
    }
}

fn document_to_value(document: &Document) -> Value {
    let mut map = Map::new();
    map.insert("_type".into(), Value::from("document"));

    let mut meta = Map::new();
    if !document.url().is_empty() {
        meta.insert("url".into(), Value::from(document.url()));
    }
    if !document.title().is_empty() {
        meta.insert("title".into(), Value::from(document.title()));
    }
    if !meta.is_empty() {
        map.insert("_meta".into(), Value::Object(meta));
    }

    for (key, node) in document.content() {
        map.insert(escape_key(key), node_to_value(node, document.url()));
    }
    Value::Object(map)
}

fn link_to_value(link: &Link, base_url: &str) -> Value {
    let mut map = Map::new();
    map.insert("_type".into(), Value::from("link"));
    if !link.url().is_empty() && link.url() != base_url {
        map.insert("url".into(), Value::from(link.url()));
    }
    if link.action() != DEFAULT_ACTION {
        map.insert("action".into(), Value::from(link.action()));
    }
    if let Some(inplace) = link.inplace() {
        map.insert("inplace".into(), Value::from(inplace));
    }
    if !link.fields().is_empty() {
        let fields = link
            .fields()
            .iter()
            .map(|field| {
                let mut entry = Map::new();
                entry.insert("name".into(), Value::from(field.name.as_str()));
                if field.required {
                    entry.insert("required".into(), Value::from(true));
                }
                if let Some(location) = field.location {
                    entry.insert("location".into(), Value::from(location.as_str()));
                }
                Value::Object(entry)
            })
            .collect();
        map.insert("fields".into(), Value::Array(fields));
    }
    Value::Object(map)
}

fn node_to_value(node: &Node, base_url: &str) -> Value {
    match node {
        Node::Document(doc) => document_to_value(doc),
        Node::Link(link) => link_to_value(link, base_url),
        Node::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (escape_key(key), node_to_value(value, base_url)))
                .collect(),
        ),
        Node::Array(items) => Value::Array(items.iter().map(|v| node_to_value(v, base_url)).collect()),
        Node::Primitive(p) => match p {
            Primitive::Null => Value::Null,
            Primitive::Bool(b) => Value::Bool(*b),
            Primitive::Number(n) => Value::Number(n.clone()),
            Primitive::String(s) => Value::String(s.clone()),
        },
    }
}
