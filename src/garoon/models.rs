//! Request and response shapes for the Garoon REST API. Garoon wraps most
//! scalar fields in objects (`{"value": ...}`, `{"dateTime": ...}`), so the
//! structs here mirror that nesting. Unknown fields are passed through via
//! flattened maps so responses survive a round trip to the caller intact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
    pub value: String,
}

impl TextValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDateTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub subject: TextValue,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<TextValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /g/api/v1/schedule/events`.
#[derive(Debug, Serialize)]
pub struct NewScheduleEvent {
    pub subject: TextValue,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<TextValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Value,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub subject: TextValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<TextValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct Recipient {
    pub r#type: &'static str,
    pub id: String,
}

impl Recipient {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            r#type: "USER",
            id: id.into(),
        }
    }
}

/// Body for `POST /g/api/v1/messages`.
#[derive(Debug, Serialize)]
pub struct NewMessage {
    pub recipients: Vec<Recipient>,
    pub subject: TextValue,
    pub body: TextValue,
}

// Envelope shapes returned by list endpoints.

#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<ScheduleEvent>,
}

#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_passes_through_unknown_event_fields() {
        let raw = r#"{
            "id": "42",
            "subject": {"value": "Standup"},
            "start": {"dateTime": "2026-01-05T09:00:00+09:00", "timeZone": "Asia/Tokyo"},
            "end": {"dateTime": "2026-01-05T09:15:00+09:00"},
            "eventType": "REGULAR"
        }"#;
        let event: ScheduleEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.subject.value, "Standup");
        assert_eq!(event.extra["eventType"], "REGULAR");

        let round_trip = serde_json::to_value(&event).unwrap();
        assert_eq!(round_trip["eventType"], "REGULAR");
    }

    #[test]
    fn it_serializes_a_new_event_in_garoon_shape() {
        let event = NewScheduleEvent {
            subject: TextValue::new("Planning"),
            start: EventDateTime {
                date_time: "2026-01-05T10:00:00+09:00".to_string(),
                time_zone: None,
            },
            end: EventDateTime {
                date_time: "2026-01-05T11:00:00+09:00".to_string(),
                time_zone: None,
            },
            notes: Some(TextValue::new("Q1 roadmap")),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["subject"]["value"], "Planning");
        assert_eq!(value["start"]["dateTime"], "2026-01-05T10:00:00+09:00");
        assert_eq!(value["notes"]["value"], "Q1 roadmap");
    }

    #[test]
    fn it_accepts_numeric_user_ids() {
        let raw = r#"{"users": [{"id": 7, "name": "tanaka"}, {"id": "8", "name": "suzuki"}]}"#;
        let resp: UsersResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.users.len(), 2);
        assert_eq!(resp.users[0].name, "tanaka");
    }
}
