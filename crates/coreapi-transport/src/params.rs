//! Request construction from link fields
//!
//! Maps actions to HTTP methods and sorts parameter values into path, query
//! and body slots according to each field's declared location.

use crate::error::TransportError;
use crate::transport::Params;
use coreapi_document::{Field, FieldLocation};
use reqwest::Method;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const REQUIRED_MESSAGE: &str = "This parameter is required.";
const PRIMITIVE_MESSAGE: &str = "Must be a primitive type.";
const PRIMITIVE_OR_LIST_MESSAGE: &str = "Must be a primitive type or a list of primitive types.";

/// Parameters sorted by request location
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    /// Values for `{name}` URL placeholders
    pub path: BTreeMap<String, String>,
    /// Query string pairs, in parameter order
    pub query: Vec<(String, String)>,
    /// JSON request body, if any
    pub body: Option<Value>,
}

/// HTTP method for a link action
///
/// # Errors
/// Returns [`TransportError::InvalidAction`] if the action is not a valid
/// method token.
pub fn http_method(action: &str) -> Result<Method, TransportError> {
    let method = match action.to_ascii_lowercase().as_str() {
        "get" | "list" | "read" | "retrieve" => Method::GET,
        "post" | "create" => Method::POST,
        "put" | "update" => Method::PUT,
        "patch" | "partial_update" => Method::PATCH,
        "delete" | "destroy" | "remove" => Method::DELETE,
        _ => Method::from_bytes(action.to_ascii_uppercase().as_bytes()).map_err(|_| {
            TransportError::InvalidAction {
                action: action.to_string(),
            }
        })?,
    };
    Ok(method)
}

/// Sort `params` into request slots using the link's `fields`
///
/// All problems are collected before failing.
///
/// # Errors
/// Returns [`TransportError::ParameterError`] keyed by parameter name.
pub fn split_params(
    method: &Method,
    fields: &[Field],
    params: Option<&Params>,
) -> Result<RequestParams, TransportError> {
    let empty = Params::new();
    let params = params.unwrap_or(&empty);
    let bodyless = *method == Method::GET || *method == Method::DELETE;

    let mut errors = BTreeMap::new();
    let mut split = RequestParams::default();
    let mut form = Map::new();
    let mut body = None;

    for field in fields.iter().filter(|f| f.required) {
        if !params.contains_key(&field.name) {
            errors.insert(field.name.clone(), REQUIRED_MESSAGE.to_string());
        }
    }

    for (name, value) in params {
        let declared = fields
            .iter()
            .find(|f| f.name == *name)
            .and_then(|f| f.location);
        let location = match declared {
            Some(FieldLocation::Form) | None if bodyless => FieldLocation::Query,
            Some(location) => location,
            None => FieldLocation::Form,
        };

        match location {
            FieldLocation::Path => match primitive_string(value) {
                Some(rendered) => {
                    split.path.insert(name.clone(), rendered);
                }
                None => {
                    errors.insert(name.clone(), PRIMITIVE_MESSAGE.to_string());
                }
            },
            FieldLocation::Query => match query_strings(value) {
                Some(rendered) => split
                    .query
                    .extend(rendered.into_iter().map(|v| (name.clone(), v))),
                None => {
                    errors.insert(name.clone(), PRIMITIVE_OR_LIST_MESSAGE.to_string());
                }
            },
            FieldLocation::Form => {
                form.insert(name.clone(), value.clone());
            }
            FieldLocation::Body => {
                body = Some(value.clone());
            }
        }
    }

    if !errors.is_empty() {
        return Err(TransportError::ParameterError(errors));
    }

    split.body = match body {
        Some(body) => Some(body),
        None if !form.is_empty() => Some(Value::Object(form)),
        None => None,
    };
    Ok(split)
}

/// Replace `{name}` placeholders in `url` with percent-encoded values
///
/// Placeholders whose braces were already percent-encoded by URL joining are
/// replaced too.
#[must_use]
pub fn expand_path_template(url: &str, path: &BTreeMap<String, String>) -> String {
    let mut expanded = url.to_string();
    for (name, value) in path {
        let encoded = percent_encode(value);
        for placeholder in [
            format!("{{{name}}}"),
            format!("%7B{name}%7D"),
            format!("%7b{name}%7d"),
        ] {
            expanded = expanded.replace(&placeholder, &encoded);
        }
    }
    expanded
}

fn primitive_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn query_strings(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items.iter().map(primitive_string).collect(),
        other => primitive_string(other).map(|s| vec![s]),
    }
}

// RFC 3986 unreserved characters pass through, everything else is escaped.
fn percent_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn method_mapping() {
        assert_eq!(http_method("get").unwrap(), Method::GET);
        assert_eq!(http_method("LIST").unwrap(), Method::GET);
        assert_eq!(http_method("create").unwrap(), Method::POST);
        assert_eq!(http_method("update").unwrap(), Method::PUT);
        assert_eq!(http_method("partial_update").unwrap(), Method::PATCH);
        assert_eq!(http_method("destroy").unwrap(), Method::DELETE);
        assert_eq!(http_method("purge").unwrap().as_str(), "PURGE");
    }

    #[test]
    fn invalid_action() {
        let err = http_method("not a method").unwrap_err();
        assert!(matches!(err, TransportError::InvalidAction { action } if action == "not a method"));
    }

    #[test]
    fn get_defaults_to_query() {
        let fields = vec![Field::new("page")];
        let values = params(json!({"page": 2, "search": "x", "tags": ["a", "b"]}));
        let split = split_params(&Method::GET, &fields, Some(&values)).unwrap();

        assert_eq!(
            split.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("search".to_string(), "x".to_string()),
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "b".to_string()),
            ]
        );
        assert_eq!(split.body, None);
    }

    #[test]
    fn get_downgrades_form_to_query() {
        let fields = vec![Field::new("q").with_location(FieldLocation::Form)];
        let values = params(json!({"q": "rust"}));
        let split = split_params(&Method::GET, &fields, Some(&values)).unwrap();
        assert_eq!(split.query, vec![("q".to_string(), "rust".to_string())]);
    }

    #[test]
    fn post_defaults_to_form_body() {
        let fields = vec![
            Field::new("id").with_location(FieldLocation::Path),
            Field::new("verbose").with_location(FieldLocation::Query),
        ];
        let values = params(json!({"id": 7, "verbose": true, "name": "x", "n": {"a": 1}}));
        let split = split_params(&Method::POST, &fields, Some(&values)).unwrap();

        assert_eq!(split.path.get("id").map(String::as_str), Some("7"));
        assert_eq!(split.query, vec![("verbose".to_string(), "true".to_string())]);
        assert_eq!(split.body, Some(json!({"name": "x", "n": {"a": 1}})));
    }

    #[test]
    fn body_param_replaces_form() {
        let fields = vec![Field::new("payload").with_location(FieldLocation::Body)];
        let values = params(json!({"payload": [1, 2, 3], "other": "ignored"}));
        let split = split_params(&Method::PUT, &fields, Some(&values)).unwrap();
        assert_eq!(split.body, Some(json!([1, 2, 3])));
    }

    #[test]
    fn errors_are_collected() {
        let fields = vec![
            Field::new("id").required().with_location(FieldLocation::Path),
            Field::new("where").with_location(FieldLocation::Query),
            Field::new("slug").with_location(FieldLocation::Path),
        ];
        let values = params(json!({"where": {"a": 1}, "slug": [1]}));
        let err = split_params(&Method::GET, &fields, Some(&values)).unwrap_err();

        let TransportError::ParameterError(errors) = err else {
            panic!("expected parameter error");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["id"], REQUIRED_MESSAGE);
        assert_eq!(errors["where"], PRIMITIVE_OR_LIST_MESSAGE);
        assert_eq!(errors["slug"], PRIMITIVE_MESSAGE);
    }

    #[test]
    fn no_params() {
        let split = split_params(&Method::GET, &[], None).unwrap();
        assert_eq!(split, RequestParams::default());
    }

    #[test]
    fn expand_plain_and_encoded_placeholders() {
        let mut path = BTreeMap::new();
        path.insert("id".to_string(), "a b/c".to_string());
        path.insert("kind".to_string(), "x".to_string());

        assert_eq!(
            expand_path_template("http://e.org/{kind}/{id}/", &path),
            "http://e.org/x/a%20b%2Fc/"
        );
        assert_eq!(
            expand_path_template("http://e.org/%7Bkind%7D/%7bid%7d/", &path),
            "http://e.org/x/a%20b%2Fc/"
        );
    }

    #[test]
    fn percent_encode_keeps_unreserved() {
        assert_eq!(percent_encode("Az09-._~"), "Az09-._~");
        assert_eq!(percent_encode("é?"), "%C3%A9%3F");
    }
}
