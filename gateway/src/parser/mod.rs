use serde::Deserialize;
use tracing::info;

use crate::error::GatewayError;
use crate::models::{ContentKind, NotificationRequest};

/// JSON test payload, used by diagnostic callers
#[derive(Debug, Deserialize)]
struct JsonPushBody {
    token: Option<String>,
    #[serde(rename = "apnsToken")]
    apns_token: Option<String>,
    #[allow(dead_code)]
    platform: Option<String>,
    sender: Option<String>,
    count: Option<u32>,
}

/// Normalize an inbound push hook into a canonical request
///
/// Accepts the XEP-0357 XML stanza or the JSON diagnostic form; anything
/// else is a malformed payload. Pure transform, no side effects.
pub fn parse(content_type: &str, body: &[u8]) -> Result<NotificationRequest, GatewayError> {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    let request = match media_type.as_str() {
        "application/xml" | "text/xml" => parse_xml(body)?,
        "application/json" => parse_json(body)?,
        other => {
            return Err(GatewayError::MalformedPayload(format!(
                "Unsupported content type: {other}"
            )))
        }
    };

    info!(
        sender = %request.sender,
        count = request.message_count,
        kind = ?request.content_type,
        "Parsed push hook"
    );

    Ok(request)
}

/// XML path: `<push><node>token</node>...</push>` plus optional data-form
/// fields `last-message-sender` and `message-count`
fn parse_xml(body: &[u8]) -> Result<NotificationRequest, GatewayError> {
    let text = std::str::from_utf8(body)
        .map_err(|_| GatewayError::MalformedPayload("Body is not valid UTF-8".to_string()))?;

    let doc = roxmltree::Document::parse(text)
        .map_err(|e| GatewayError::MalformedPayload(format!("Invalid XML: {e}")))?;

    // Namespace-agnostic lookup; hook stanzas arrive with varying prefixes.
    let raw_token = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "node")
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            GatewayError::MalformedPayload("Missing <node> token element".to_string())
        })?
        .to_string();

    let sender = form_field(&doc, "last-message-sender")
        .unwrap_or_else(|| "unknown".to_string());
    let message_count = form_field(&doc, "message-count")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);

    Ok(NotificationRequest {
        raw_token,
        sender,
        message_count,
        content_type: ContentKind::Xml,
    })
}

/// Look up a notification data-form field by its `var` name
fn form_field(doc: &roxmltree::Document, var: &str) -> Option<String> {
    doc.descendants()
        .find(|n| {
            n.is_element() && n.tag_name().name() == "field" && n.attribute("var") == Some(var)
        })
        .and_then(|field| {
            field
                .children()
                .find(|c| c.is_element() && c.tag_name().name() == "value")
        })
        .and_then(|value| value.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// JSON path: `token` and `apnsToken` may appear in any combination
fn parse_json(body: &[u8]) -> Result<NotificationRequest, GatewayError> {
    let parsed: JsonPushBody = serde_json::from_slice(body)
        .map_err(|e| GatewayError::MalformedPayload(format!("Invalid JSON: {e}")))?;

    let raw_token = match (parsed.apns_token, parsed.token) {
        (Some(apns), Some(fcm)) => format!("apns:{apns}|fcm:{fcm}"),
        (Some(apns), None) => format!("apns:{apns}"),
        (None, Some(token)) => token,
        (None, None) => {
            return Err(GatewayError::MalformedPayload(
                "Neither token nor apnsToken present".to_string(),
            ))
        }
    };

    Ok(NotificationRequest {
        raw_token,
        sender: parsed.sender.unwrap_or_else(|| "unknown".to_string()),
        message_count: parsed.count.unwrap_or(1),
        content_type: ContentKind::Json,
    })
}
