use serde::{Deserialize, Serialize};

use crate::constants::MAX_EVENTS_PER_USER;
use crate::registration::Registration;

/// A registered participant, as returned by the dashboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub pid: String,
    pub name: String,
    pub rollno: String,
    pub branch: String,
    pub batch: String,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub registered_events: Vec<Registration>,
    #[serde(default)]
    pub events_count: u32,
}

impl Participant {
    /// Whether the participant has exhausted the 3-event quota.
    pub fn at_event_limit(&self) -> bool {
        self.events_count >= MAX_EVENTS_PER_USER
    }

    /// Whether this participant already holds a registration for `event_id`.
    pub fn is_registered_for(&self, event_id: &str) -> bool {
        self.registered_events
            .iter()
            .any(|r| r.event_id.id() == event_id)
    }
}
