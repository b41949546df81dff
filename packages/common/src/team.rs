use serde::{Deserialize, Serialize};

/// Profile resolved for a prospective team member by the validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub pid: String,
    pub name: String,
    pub branch: String,
    #[serde(default)]
    pub events_count: u32,
}

/// Outcome of validating one member PID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidation {
    Valid(MemberProfile),
    Invalid { reason: String },
}

impl MemberValidation {
    pub fn invalid(reason: impl Into<String>) -> Self {
        MemberValidation::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, MemberValidation::Valid(_))
    }

    pub fn profile(&self) -> Option<&MemberProfile> {
        match self {
            MemberValidation::Valid(profile) => Some(profile),
            MemberValidation::Invalid { .. } => None,
        }
    }
}

/// A created team, as returned by the team-creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub tid: String,
    pub team_name: String,
    #[serde(default)]
    pub event_id: Option<String>,
    /// PID of the creating participant. Implicitly a member; never listed
    /// among `members`.
    #[serde(default)]
    pub leader: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberProfile>,
}
