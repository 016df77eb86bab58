pub mod diagnostics;
pub mod health;
pub mod push;

use serde_json::json;

use crate::models::{DeliveryMethod, DeliveryOutcome};

/// Shape the success body; the id key depends on the delivery path
pub(crate) fn success_body(outcome: &DeliveryOutcome) -> serde_json::Value {
    match outcome.method {
        DeliveryMethod::Apns => json!({
            "success": true,
            "method": "apns",
            "apnsId": outcome.message_id,
        }),
        DeliveryMethod::Fcm => json!({
            "success": true,
            "method": "fcm",
            "messageId": outcome.message_id,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_keys_per_method() {
        let apns = success_body(&DeliveryOutcome {
            method: DeliveryMethod::Apns,
            message_id: Some("1234".to_string()),
        });
        assert_eq!(apns["success"], true);
        assert_eq!(apns["method"], "apns");
        assert_eq!(apns["apnsId"], "1234");
        assert!(apns.get("messageId").is_none());

        let fcm = success_body(&DeliveryOutcome {
            method: DeliveryMethod::Fcm,
            message_id: Some("projects/p/messages/42".to_string()),
        });
        assert_eq!(fcm["method"], "fcm");
        assert_eq!(fcm["messageId"], "projects/p/messages/42");
        assert!(fcm.get("apnsId").is_none());
    }
}
