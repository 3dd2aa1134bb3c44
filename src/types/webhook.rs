//! BookStack webhook payload and acknowledgment types.

use serde::{Deserialize, Serialize};

/// The entity a webhook event refers to (a page, for the events we handle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRelatedItem {
    /// Page id
    pub id: i64,

    /// Page name
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Book containing the page
    pub book_id: i64,

    /// Chapter containing the page, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<i64>,

    /// Page URL
    pub url: String,
}

/// Webhook payload as sent by BookStack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Event name, e.g. "page_update" or "page_create"
    pub event: String,

    /// Human-readable event description
    pub text: String,

    /// BookStack instance URL
    pub url: String,

    /// The page the event refers to
    pub related_item: WebhookRelatedItem,
}

/// Synchronous acknowledgment returned to the webhook caller.
///
/// Serializes as `{"status","message"}` when processing was started and as
/// `{"status","reason"}` when the event was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    /// "success" or "ignored"
    pub status: String,

    /// Set when background processing was started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Set when the event was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl WebhookAck {
    /// Acknowledge that background processing of `page_id` was started.
    pub fn accepted(page_id: i64) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(format!(
                "Processamento da página {} iniciado em background.",
                page_id
            )),
            reason: None,
        }
    }

    /// Acknowledge that the event was skipped.
    pub fn ignored(reason: impl Into<String>) -> Self {
        Self {
            status: "ignored".to_string(),
            message: None,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accepted_ack_shape() {
        let ack = WebhookAck::accepted(101);
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "success",
                "message": "Processamento da página 101 iniciado em background."
            })
        );
    }

    #[test]
    fn test_ignored_ack_shape() {
        let ack = WebhookAck::ignored("Book not in monitored list");
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "ignored",
                "reason": "Book not in monitored list"
            })
        );
    }

    #[test]
    fn test_payload_deserializes_without_chapter() {
        let payload: WebhookPayload = serde_json::from_value(serde_json::json!({
            "event": "page_update",
            "text": "Page updated",
            "url": "http://wiki/",
            "related_item": {
                "id": 101,
                "name": "Runbook",
                "slug": "runbook",
                "book_id": 2,
                "url": "http://wiki/books/ops/page/runbook"
            }
        }))
        .unwrap();
        assert_eq!(payload.related_item.id, 101);
        assert_eq!(payload.related_item.chapter_id, None);
    }
}
