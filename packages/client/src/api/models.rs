//! Request and response DTOs for the backend REST API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use common::event::Event;
use common::participant::Participant;
use common::registration::Registration;
use common::team::{MemberProfile, Team};

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub token: String,
    #[serde(default)]
    pub user: Option<Participant>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminAuthResponse {
    #[serde(default)]
    pub success: bool,
    pub token: String,
    /// Administrator profile; shape is backend-defined, cached verbatim.
    #[serde(default)]
    pub admin: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub success: bool,
    pub user: Participant,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub struct EventResponse {
    #[serde(default)]
    pub success: bool,
    pub event: Event,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoloRegistrationRequest {
    pub event_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SoloRegistrationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub registration: Option<Registration>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub event_id: String,
    pub team_name: String,
    /// Validated member PIDs, leader excluded.
    pub members: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub team: Option<Team>,
}

#[derive(Debug, Serialize)]
pub struct ValidateMemberRequest {
    pub pid: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateMemberResponse {
    pub valid: bool,
    #[serde(default)]
    pub member: Option<MemberProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Event-creation form, discriminated by event type so team-size fields can
/// only exist on team events. Serializes to the flat body the backend
/// expects, with sizes pinned to 1 for solo events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CreateEventRequest {
    #[serde(rename_all = "camelCase")]
    Solo {
        name: String,
        description: String,
        date: String,
        time: String,
        venue: String,
        amount: u32,
        max_participants: u32,
        #[serde(serialize_with = "one")]
        min_team_size: (),
        #[serde(serialize_with = "one")]
        max_team_size: (),
    },
    #[serde(rename_all = "camelCase")]
    Team {
        name: String,
        description: String,
        date: String,
        time: String,
        venue: String,
        amount: u32,
        max_participants: u32,
        min_team_size: u32,
        max_team_size: u32,
    },
}

fn one<S: serde::Serializer>(_: &(), s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u32(1)
}

impl CreateEventRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn solo(
        name: String,
        description: String,
        date: String,
        time: String,
        venue: String,
        amount: u32,
        max_participants: u32,
    ) -> Self {
        CreateEventRequest::Solo {
            name,
            description,
            date,
            time,
            venue,
            amount,
            max_participants,
            min_team_size: (),
            max_team_size: (),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn team(
        name: String,
        description: String,
        date: String,
        time: String,
        venue: String,
        amount: u32,
        max_participants: u32,
        min_team_size: u32,
        max_team_size: u32,
    ) -> Self {
        CreateEventRequest::Team {
            name,
            description,
            date,
            time,
            venue,
            amount,
            max_participants,
            min_team_size,
            max_team_size,
        }
    }

    /// Local checks mirroring the backend's rules, run before any network
    /// call: required text fields, capacity, and team-size ordering.
    pub fn validate(&self) -> Result<(), String> {
        let (name, description, date, time, venue, max_participants) = match self {
            CreateEventRequest::Solo {
                name,
                description,
                date,
                time,
                venue,
                max_participants,
                ..
            }
            | CreateEventRequest::Team {
                name,
                description,
                date,
                time,
                venue,
                max_participants,
                ..
            } => (name, description, date, time, venue, *max_participants),
        };

        for (label, value) in [
            ("name", name),
            ("description", description),
            ("date", date),
            ("time", time),
            ("venue", venue),
        ] {
            if value.trim().is_empty() {
                return Err(format!("Please fill all required fields ({label} is empty)"));
            }
        }
        if max_participants == 0 {
            return Err("Maximum participants must be at least 1".into());
        }
        if let CreateEventRequest::Team {
            min_team_size,
            max_team_size,
            ..
        } = self
        {
            if *min_team_size == 0 || *max_team_size == 0 {
                return Err("Please specify team sizes for team events".into());
            }
            if min_team_size > max_team_size {
                return Err(
                    "Minimum team size cannot be greater than maximum team size".into(),
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEventResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub event: Option<Event>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteEventResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Aggregate counts shown on the admin statistics screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_teams: u64,
    #[serde(default)]
    pub active_events: u64,
    #[serde(default)]
    pub solo_events: u64,
    #[serde(default)]
    pub team_events: u64,
}

#[derive(Debug, Deserialize)]
pub struct StatisticsResponse {
    #[serde(default)]
    pub success: bool,
    pub statistics: Statistics,
}

/// Generic error body returned by the backend on rejected requests.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
