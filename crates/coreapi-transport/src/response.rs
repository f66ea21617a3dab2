//! Response decoding and in-place splicing
//!
//! Kept apart from the network code so any transport that produces status,
//! content type and bytes can reuse it.

use crate::error::TransportError;
use coreapi_codec::{Decoded, DecoderRegistry};
use coreapi_document::{Document, ErrorDocument, Link, LinkAncestor, Node, Object};
use reqwest::StatusCode;

/// Response fields needed for decoding
#[derive(Debug, Clone, Copy)]
pub struct RawResponse<'a> {
    pub status: StatusCode,
    /// Final response URL, used as the decoding base
    pub url: &'a str,
    pub content_type: Option<&'a str>,
    pub body: &'a [u8],
}

/// `"<code> <reason>"`, e.g. `"404 Not Found"`
#[must_use]
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

/// Decode a response into the resulting document
///
/// # Errors
/// - [`TransportError::ErrorMessage`] for decoded errors and non-2xx statuses
/// - [`TransportError::Codec`] if no decoder matches or the body is malformed
/// - [`TransportError::UnexpectedPayload`] if a 2xx body is not a document
pub fn decode_response(
    response: RawResponse<'_>,
    decoders: &DecoderRegistry,
) -> Result<Document, TransportError> {
    let success = response.status.is_success();
    if !success {
        return Err(TransportError::ErrorMessage(decode_failure(response, decoders)));
    }

    if response.body.is_empty() {
        return Ok(Document::new(response.url));
    }

    let decoder = decoders.negotiate(response.content_type)?;
    match decoder.decode(response.body, Some(response.url))? {
        Decoded::Error(error) => Err(TransportError::ErrorMessage(error)),
        Decoded::Node(Node::Document(document)) => Ok(document),
        Decoded::Node(Node::Object(content)) => {
            Ok(Document::new(response.url).with_content(content))
        }
        Decoded::Node(other) => Err(TransportError::UnexpectedPayload {
            found: other.type_name(),
            url: response.url.to_string(),
        }),
    }
}

// Error statuses always fail; the body only contributes detail when it decodes.
fn decode_failure(response: RawResponse<'_>, decoders: &DecoderRegistry) -> ErrorDocument {
    let title = status_line(response.status);
    if response.body.is_empty() {
        return ErrorDocument::new(title, Object::new());
    }

    let decoded = decoders
        .negotiate(response.content_type)
        .and_then(|decoder| decoder.decode(response.body, Some(response.url)));

    match decoded {
        Ok(Decoded::Error(error)) => error,
        Ok(Decoded::Node(Node::Document(document))) => {
            ErrorDocument::new(title, document.content().clone())
        }
        Ok(Decoded::Node(Node::Object(content))) => ErrorDocument::new(title, content),
        Ok(Decoded::Node(_)) => ErrorDocument::new(title, Object::new()),
        Err(error) => {
            tracing::debug!(%error, url = response.url, "undecodable error response body");
            ErrorDocument::new(title, Object::new())
        }
    }
}

/// Place an in-place transition's result back into the root document
///
/// Returns `result` unchanged when the link is not in place or there are no
/// ancestors.
///
/// # Errors
/// Returns [`TransportError::Splice`] if the ancestor path no longer exists.
pub fn splice_inplace(
    result: Document,
    link: &Link,
    ancestors: &[LinkAncestor],
) -> Result<Document, TransportError> {
    let (Some(root), Some(parent)) = (ancestors.first(), ancestors.last()) else {
        return Ok(result);
    };
    if !link.is_inplace() {
        return Ok(result);
    }

    tracing::debug!(keys = %parent.keys, "splicing in-place result");
    Ok(root.document.set_in(&parent.keys, result)?)
}
