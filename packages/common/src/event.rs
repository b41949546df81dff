use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_TEAM_SIZE;

/// How an event is entered: individually or as a bounded-size team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Solo,
    Team,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Solo => "solo",
            EventType::Team => "team",
        }
    }
}

/// Display status derived from capacity and the active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Open,
    Full,
    Inactive,
}

/// A festival event as returned by the catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    /// Per-event fee. Zero means no event-specific fee.
    #[serde(default)]
    pub amount: u32,
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default)]
    pub min_team_size: Option<u32>,
    #[serde(default)]
    pub max_team_size: Option<u32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }

    /// Status for rendering. A full event is never shown as open, even when
    /// the backend still flags it active.
    pub fn status(&self) -> EventStatus {
        if !self.is_active {
            EventStatus::Inactive
        } else if self.is_full() {
            EventStatus::Full
        } else {
            EventStatus::Open
        }
    }

    /// Inclusive team-size bounds, counting the leader. Solo events are
    /// (1, 1); team events without explicit bounds default to (1, 5).
    pub fn team_size_bounds(&self) -> (u32, u32) {
        match self.event_type {
            EventType::Solo => (1, 1),
            EventType::Team => (
                self.min_team_size.unwrap_or(1),
                self.max_team_size.unwrap_or(MAX_TEAM_SIZE),
            ),
        }
    }
}
