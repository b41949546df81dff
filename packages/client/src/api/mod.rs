//! Typed client for the backend REST API.
//!
//! Every call is a single attempt: transport failures surface as
//! [`ClientError::Network`] and the user re-triggers the action. A 401/403
//! from any endpoint clears both sessions before surfacing
//! [`ClientError::Auth`].

pub mod models;

use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use common::event::Event;
use common::team::Team;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::export::{DEFAULT_EXPORT_FILENAME, filename_from_content_disposition};
use crate::session::{Role, SessionStore};
use models::*;

/// A CSV blob downloaded from an export endpoint, named by the server when
/// it sends a `Content-Disposition` header.
#[derive(Debug)]
pub struct ExportDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

/// Admin-prefixed paths authenticate with the admin token; everything else
/// uses the participant token.
fn role_for_path(path: &str) -> Role {
    if path.starts_with("/admin") {
        Role::Admin
    } else {
        Role::Participant
    }
}

fn require_success(success: bool, message: Option<String>, fallback: &str) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(ClientError::BusinessRule(
            message.unwrap_or_else(|| fallback.to_string()),
        ))
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the role-appropriate bearer token, sends the request, and
    /// intercepts auth failures.
    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response> {
        let builder = match self.session.token(role_for_path(path)) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(%path, %status, "authentication rejected, clearing sessions");
            self.session.clear_all()?;
            return Err(ClientError::Auth);
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Request failed with status {status}"));
            return Err(ClientError::BusinessRule(message));
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Network(format!("unexpected response body: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.http.get(self.url(path)), path).await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .send(self.http.post(self.url(path)).json(body), path)
            .await?;
        Self::decode(response).await
    }

    // ---- Auth -------------------------------------------------------------

    pub async fn register(&self, signup: &common::signup::Signup) -> Result<AuthResponse> {
        let resp: AuthResponse = self.post_json("/auth/register", signup).await?;
        require_success(resp.success, resp.message.clone(), "Registration failed")?;
        let profile = resp
            .user
            .as_ref()
            .and_then(|u| serde_json::to_value(u).ok());
        self.session
            .set_session(Role::Participant, &resp.token, profile)?;
        Ok(resp)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let resp: AuthResponse = self
            .post_json(
                "/auth/login",
                &LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;
        require_success(resp.success, resp.message.clone(), "Login failed")?;
        let profile = resp
            .user
            .as_ref()
            .and_then(|u| serde_json::to_value(u).ok());
        self.session
            .set_session(Role::Participant, &resp.token, profile)?;
        Ok(resp)
    }

    pub async fn admin_login(&self, username: &str, password: &str) -> Result<AdminAuthResponse> {
        let resp: AdminAuthResponse = self
            .post_json(
                "/admin/login",
                &AdminLoginRequest {
                    username: username.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;
        require_success(resp.success, None, "Admin login failed")?;
        self.session
            .set_session(Role::Admin, &resp.token, resp.admin.clone())?;
        Ok(resp)
    }

    // ---- Participant ------------------------------------------------------

    pub async fn dashboard(&self) -> Result<DashboardResponse> {
        let resp: DashboardResponse = self.get_json("/users/dashboard").await?;
        require_success(resp.success, None, "Failed to load dashboard")?;
        Ok(resp)
    }

    pub async fn register_solo(&self, event_id: &str) -> Result<SoloRegistrationResponse> {
        let resp: SoloRegistrationResponse = self
            .post_json(
                "/users/register-solo",
                &SoloRegistrationRequest {
                    event_id: event_id.to_string(),
                },
            )
            .await?;
        require_success(resp.success, resp.message.clone(), "Registration failed")?;
        Ok(resp)
    }

    // ---- Events -----------------------------------------------------------

    pub async fn events(&self) -> Result<Vec<Event>> {
        let resp: EventsResponse = self.get_json("/events").await?;
        Ok(resp.events)
    }

    pub async fn event(&self, id: &str) -> Result<Event> {
        let resp: EventResponse = self.get_json(&format!("/events/{id}")).await?;
        Ok(resp.event)
    }

    // ---- Teams ------------------------------------------------------------

    pub async fn validate_member(&self, pid: &str) -> Result<ValidateMemberResponse> {
        self.post_json(
            "/teams/validate-member",
            &ValidateMemberRequest {
                pid: pid.to_string(),
            },
        )
        .await
    }

    pub async fn create_team(&self, request: &CreateTeamRequest) -> Result<Option<Team>> {
        let resp: CreateTeamResponse = self.post_json("/teams/create", request).await?;
        require_success(resp.success, resp.message.clone(), "Team creation failed")?;
        Ok(resp.team)
    }

    // ---- Admin ------------------------------------------------------------

    pub async fn admin_create_event(&self, request: &CreateEventRequest) -> Result<Option<Event>> {
        request.validate().map_err(ClientError::Validation)?;
        let resp: CreateEventResponse = self.post_json("/admin/events", request).await?;
        require_success(resp.success, resp.message.clone(), "Event creation failed")?;
        Ok(resp.event)
    }

    pub async fn admin_events(&self) -> Result<Vec<Event>> {
        let resp: EventsResponse = self.get_json("/admin/events").await?;
        require_success(resp.success, None, "Failed to load events")?;
        Ok(resp.events)
    }

    pub async fn admin_delete_event(&self, id: &str) -> Result<()> {
        let path = format!("/admin/events/{id}");
        let response = self.send(self.http.delete(self.url(&path)), &path).await?;
        let resp: DeleteEventResponse = Self::decode(response).await?;
        require_success(resp.success, resp.message, "Failed to delete event")
    }

    pub async fn admin_statistics(&self, range: &str) -> Result<Statistics> {
        let path = "/admin/statistics";
        let response = self
            .send(
                self.http.get(self.url(path)).query(&[("range", range)]),
                path,
            )
            .await?;
        let resp: StatisticsResponse = Self::decode(response).await?;
        require_success(resp.success, None, "Failed to load statistics")?;
        Ok(resp.statistics)
    }

    // ---- Admin exports ----------------------------------------------------

    async fn download(&self, path: &str, college: Option<&str>) -> Result<ExportDownload> {
        let mut builder = self.http.get(self.url(path));
        if let Some(college) = college {
            builder = builder.query(&[("college", college)]);
        }
        let response = self.send(builder, path).await?;

        let status = response.status();
        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string());
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Export failed with status {status}"));
            return Err(ClientError::BusinessRule(message));
        }
        Ok(ExportDownload {
            filename,
            bytes: bytes.to_vec(),
        })
    }

    pub async fn export_event_participants(
        &self,
        event_id: &str,
        college: Option<&str>,
    ) -> Result<ExportDownload> {
        self.download(&format!("/admin/export/event/{event_id}"), college)
            .await
    }

    pub async fn export_all_participants(&self, college: Option<&str>) -> Result<ExportDownload> {
        self.download("/admin/export/all-participants", college)
            .await
    }

    pub async fn export_by_college(&self, college: &str) -> Result<ExportDownload> {
        self.download(&format!("/admin/export/college/{college}"), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_paths_use_admin_token() {
        assert_eq!(role_for_path("/admin/events"), Role::Admin);
        assert_eq!(role_for_path("/admin/export/all-participants"), Role::Admin);
        assert_eq!(role_for_path("/users/dashboard"), Role::Participant);
        assert_eq!(role_for_path("/teams/create"), Role::Participant);
    }

    #[test]
    fn require_success_prefers_backend_message() {
        let err = require_success(false, Some("Event is full".into()), "fallback").unwrap_err();
        assert!(matches!(err, ClientError::BusinessRule(m) if m == "Event is full"));

        let err = require_success(false, None, "fallback").unwrap_err();
        assert!(matches!(err, ClientError::BusinessRule(m) if m == "fallback"));

        assert!(require_success(true, None, "fallback").is_ok());
    }
}
