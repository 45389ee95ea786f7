//! Push notification collaborator interface.
//!
//! A push event carries an optional JSON payload with `message` and `tag`
//! fields. This module turns it into a platform notification with a fixed
//! icon/badge and two actions, and resolves a click on "view" to the
//! notification-tagged application URL. Actual presentation is an external
//! collaborator behind [`NotificationPresenter`].

use async_trait::async_trait;
use lantern_core::Error;
use serde::{Deserialize, Serialize};

pub const NOTIFICATION_ICON: &str = "/icons/icon-192.png";
pub const NOTIFICATION_BADGE: &str = "/icons/badge-72.png";

const DEFAULT_TITLE: &str = "Lantern";
const DEFAULT_MESSAGE: &str = "New content is available";
const DEFAULT_TAG: &str = "general";

/// Payload delivered with a push event. Both fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub tag: Option<String>,
}

/// An action button on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// A platform notification ready to display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub actions: Vec<NotificationAction>,
}

/// Build the notification for a push event.
///
/// A missing or unparseable payload falls back on defaults rather than
/// dropping the notification.
pub fn notification_for_push(payload: Option<&[u8]>) -> Notification {
    let payload: PushPayload = payload
        .and_then(|bytes| serde_json::from_slice(bytes).ok())
        .unwrap_or_default();

    Notification {
        title: DEFAULT_TITLE.to_string(),
        body: payload.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
        icon: NOTIFICATION_ICON.to_string(),
        badge: NOTIFICATION_BADGE.to_string(),
        tag: payload.tag.unwrap_or_else(|| DEFAULT_TAG.to_string()),
        actions: vec![
            NotificationAction { action: "view".to_string(), title: "View".to_string() },
            NotificationAction { action: "dismiss".to_string(), title: "Dismiss".to_string() },
        ],
    }
}

/// Resolve a notification click: "view" opens the app at the tagged URL,
/// anything else dismisses.
pub fn notification_click(action: &str, tag: &str) -> Option<String> {
    if action == "view" {
        return Some(format!("/?notification={tag}"));
    }
    None
}

/// External presentation collaborator: shows notifications and opens or
/// focuses the application window.
#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    async fn show(&self, notification: &Notification) -> Result<(), Error>;
    async fn open(&self, url: &str) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_with_payload() {
        let payload = br#"{"message": "Quest complete", "tag": "quest-42"}"#;
        let n = notification_for_push(Some(payload));
        assert_eq!(n.body, "Quest complete");
        assert_eq!(n.tag, "quest-42");
        assert_eq!(n.icon, NOTIFICATION_ICON);
        assert_eq!(n.actions.len(), 2);
    }

    #[test]
    fn test_push_without_payload_uses_defaults() {
        let n = notification_for_push(None);
        assert_eq!(n.body, DEFAULT_MESSAGE);
        assert_eq!(n.tag, DEFAULT_TAG);
    }

    #[test]
    fn test_push_with_garbage_payload_uses_defaults() {
        let n = notification_for_push(Some(b"not json"));
        assert_eq!(n.body, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_push_with_partial_payload() {
        let n = notification_for_push(Some(br#"{"tag": "sync"}"#));
        assert_eq!(n.body, DEFAULT_MESSAGE);
        assert_eq!(n.tag, "sync");
    }

    #[test]
    fn test_click_view_opens_tagged_url() {
        assert_eq!(notification_click("view", "quest-42"), Some("/?notification=quest-42".to_string()));
    }

    #[test]
    fn test_click_dismiss_does_nothing() {
        assert_eq!(notification_click("dismiss", "quest-42"), None);
        assert_eq!(notification_click("unknown", "quest-42"), None);
    }
}
