use serde::{Deserialize, Serialize};

/// Body encoding of the inbound hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    Xml,
    Json,
}

/// Canonical notification request, produced once per inbound call
///
/// Immutable after parsing and discarded when the request completes;
/// nothing is persisted.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub raw_token: String,
    pub sender: String,
    pub message_count: u32,
    pub content_type: ContentKind,
}

/// Which platform the token string claimed to be for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformHint {
    Ios,
    Android,
    Unknown,
}

/// Platform-specific tokens decoded from the opaque token string
///
/// At least one of the two fields is populated; the codec rejects the
/// request otherwise. Both may be present when the string encodes a
/// dual token.
#[derive(Debug, Clone)]
pub struct ResolvedTokens {
    pub platform_hint: PlatformHint,
    pub apns_token: Option<String>,
    pub fcm_token: Option<String>,
}

/// Notification content, built once and reused by whichever client sends
#[derive(Debug, Clone)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    pub badge: u32,
    pub sender: String,
}

impl PushPayload {
    pub fn from_request(request: &NotificationRequest) -> Self {
        // A hook with count 0 still announces one message.
        let count = request.message_count.max(1);

        let title = if count == 1 {
            "New message".to_string()
        } else {
            format!("{count} new messages")
        };

        let body = match (request.sender.as_str(), count) {
            ("unknown", 1) => "You have a new message".to_string(),
            ("unknown", _) => "You have new messages".to_string(),
            (sender, 1) => format!("New message from {sender}"),
            (sender, _) => format!("New messages from {sender}"),
        };

        Self {
            title,
            body,
            badge: count,
            sender: request.sender.clone(),
        }
    }
}

/// Which delivery path carried the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    Apns,
    Fcm,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Apns => "apns",
            DeliveryMethod::Fcm => "fcm",
        }
    }
}

/// Outcome of a successful delivery attempt
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub method: DeliveryMethod,
    pub message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(sender: &str, count: u32) -> NotificationRequest {
        NotificationRequest {
            raw_token: "fcm:token".to_string(),
            sender: sender.to_string(),
            message_count: count,
            content_type: ContentKind::Json,
        }
    }

    #[test]
    fn test_payload_singular() {
        let payload = PushPayload::from_request(&request("oma@example.net", 1));
        assert_eq!(payload.title, "New message");
        assert_eq!(payload.body, "New message from oma@example.net");
        assert_eq!(payload.badge, 1);
    }

    #[test]
    fn test_payload_plural_reflects_count() {
        let payload = PushPayload::from_request(&request("oma@example.net", 2));
        assert_eq!(payload.title, "2 new messages");
        assert_eq!(payload.body, "New messages from oma@example.net");
        assert_eq!(payload.badge, 2);
    }

    #[test]
    fn test_payload_unknown_sender() {
        let payload = PushPayload::from_request(&request("unknown", 1));
        assert_eq!(payload.body, "You have a new message");
    }

    #[test]
    fn test_zero_count_clamps_to_one() {
        let payload = PushPayload::from_request(&request("oma@example.net", 0));
        assert_eq!(payload.badge, 1);
        assert_eq!(payload.title, "New message");
    }
}
