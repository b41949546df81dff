use async_trait::async_trait;

use common::team::MemberValidation;

use crate::api::ApiClient;

/// Resolves a PID to a member profile, or to a reason it cannot join.
///
/// Transport failures are folded into an invalid result with a generic
/// reason: member validation is recoverable and surfaced next to the slot,
/// never fatal to the builder session.
#[async_trait]
pub trait MemberValidator: Send + Sync {
    async fn validate(&self, pid: &str) -> MemberValidation;
}

#[async_trait]
impl MemberValidator for ApiClient {
    async fn validate(&self, pid: &str) -> MemberValidation {
        match self.validate_member(pid).await {
            Ok(resp) if resp.valid => match resp.member {
                Some(profile) => MemberValidation::Valid(profile),
                None => MemberValidation::invalid("Validation failed. Please try again."),
            },
            Ok(resp) => MemberValidation::invalid(
                resp.message.unwrap_or_else(|| "Invalid PID".to_string()),
            ),
            Err(e) => {
                tracing::warn!(%pid, error = %e, "member validation request failed");
                MemberValidation::invalid("Validation failed. Please try again.")
            }
        }
    }
}
