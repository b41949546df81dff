use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::EventType;

/// Reference to an event inside a registration. The backend sometimes
/// populates the full event document and sometimes sends the bare id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl EventRef {
    pub fn id(&self) -> &str {
        match self {
            EventRef::Id(id) => id,
            EventRef::Populated { id } => id,
        }
    }
}

/// A participant's link to one event, created by the backend on successful
/// registration. The client never mutates these; it re-fetches after any
/// mutating call succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub event_id: EventRef,
    pub event_type: EventType,
    #[serde(default)]
    pub team_id: Option<String>,
    pub registration_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_ref_accepts_both_shapes() {
        let bare: Registration = serde_json::from_str(
            r#"{"eventId": "ev1", "eventType": "solo", "registrationDate": "2025-10-01T09:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(bare.event_id.id(), "ev1");
        assert!(bare.team_id.is_none());

        let populated: Registration = serde_json::from_str(
            r#"{"eventId": {"_id": "ev2", "name": "Robo Race"},
                "eventType": "team",
                "teamId": "TEAM01",
                "registrationDate": "2025-10-01T09:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(populated.event_id.id(), "ev2");
        assert_eq!(populated.team_id.as_deref(), Some("TEAM01"));
    }
}
