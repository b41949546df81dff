//! Async driver around [`TeamBuilder`].
//!
//! Each edited slot gets its own validation task guarded by a cancellation
//! token; editing the slot again cancels the outstanding task before the
//! next one starts, and the generation check in the builder drops any result
//! that still slips through. Tasks for different slots run independently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use common::team::{MemberValidation, Team};

use crate::api::ApiClient;
use crate::api::models::CreateTeamRequest;
use crate::error::{ClientError, Result};
use crate::team::builder::{SlotId, TeamBuilder, TeamError, ValidationRequest};
use crate::team::validator::MemberValidator;

/// Submits a prepared roster to the team-creation endpoint.
#[async_trait]
pub trait TeamCreator: Send + Sync {
    async fn create_team(&self, request: &CreateTeamRequest) -> Result<Option<Team>>;
}

#[async_trait]
impl TeamCreator for ApiClient {
    async fn create_team(&self, request: &CreateTeamRequest) -> Result<Option<Team>> {
        ApiClient::create_team(self, request).await
    }
}

fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct TeamSession {
    builder: Arc<Mutex<TeamBuilder>>,
    validator: Arc<dyn MemberValidator>,
    tokens: StdMutex<HashMap<SlotId, CancellationToken>>,
    /// Slot -> generation currently being validated. A finishing task only
    /// clears the entry it created, so a newer task's indicator survives.
    validating: Arc<StdMutex<HashMap<SlotId, u64>>>,
    handles: StdMutex<Vec<JoinHandle<()>>>,
}

impl TeamSession {
    pub fn new(builder: TeamBuilder, validator: Arc<dyn MemberValidator>) -> Self {
        Self {
            builder: Arc::new(Mutex::new(builder)),
            validator,
            tokens: StdMutex::new(HashMap::new()),
            validating: Arc::new(StdMutex::new(HashMap::new())),
            handles: StdMutex::new(Vec::new()),
        }
    }

    /// Locks the underlying builder for inspection or direct edits.
    pub async fn builder(&self) -> tokio::sync::MutexGuard<'_, TeamBuilder> {
        self.builder.lock().await
    }

    pub fn is_validating(&self, slot: SlotId) -> bool {
        lock(&self.validating).contains_key(&slot)
    }

    pub async fn set_team_name(&self, name: &str) {
        self.builder.lock().await.set_team_name(name);
    }

    pub async fn add_slot(&self) -> std::result::Result<SlotId, TeamError> {
        self.builder.lock().await.add_slot()
    }

    pub async fn remove_slot(&self, slot: SlotId) -> std::result::Result<(), TeamError> {
        self.builder.lock().await.remove_slot(slot)?;
        if let Some(token) = lock(&self.tokens).remove(&slot) {
            token.cancel();
        }
        lock(&self.validating).remove(&slot);
        Ok(())
    }

    /// Updates a slot's text, superseding any validation still in flight for
    /// it, and starts a new validation once the text looks like a PID.
    pub async fn edit_slot(
        &self,
        slot: SlotId,
        text: &str,
    ) -> std::result::Result<(), TeamError> {
        let request = self.builder.lock().await.edit_slot(slot, text)?;
        self.supersede(slot);
        if let Some(request) = request {
            self.spawn_validation(request);
        }
        Ok(())
    }

    /// Explicit validation trigger for a slot (field blur).
    pub async fn blur_slot(&self, slot: SlotId) -> std::result::Result<(), TeamError> {
        let request = self.builder.lock().await.blur_slot(slot)?;
        if let Some(request) = request {
            self.spawn_validation(request);
        }
        Ok(())
    }

    fn supersede(&self, slot: SlotId) {
        if let Some(previous) = lock(&self.tokens).remove(&slot) {
            previous.cancel();
        }
    }

    fn spawn_validation(&self, request: ValidationRequest) {
        let token = CancellationToken::new();
        if let Some(previous) = lock(&self.tokens).insert(request.slot, token.clone()) {
            previous.cancel();
        }
        lock(&self.validating).insert(request.slot, request.generation);

        let builder = Arc::clone(&self.builder);
        let validator = Arc::clone(&self.validator);
        let validating = Arc::clone(&self.validating);

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                outcome = validator.validate(&request.text) => {
                    let mut builder = builder.lock().await;
                    let _ = builder.apply_validation(request.slot, request.generation, &outcome);
                }
            }
            let mut validating = lock(&validating);
            if validating.get(&request.slot) == Some(&request.generation) {
                validating.remove(&request.slot);
            }
        });
        lock(&self.handles).push(handle);
    }

    /// Waits for every validation task spawned so far to finish or observe
    /// its cancellation.
    pub async fn settle(&self) {
        let handles: Vec<_> = lock(&self.handles).drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
    }

    /// Runs the submission checks, re-validates every member over the
    /// network, and posts the roster. Client-side rejections happen before
    /// any network traffic.
    pub async fn submit(
        &self,
        creator: &dyn TeamCreator,
    ) -> std::result::Result<Option<Team>, TeamError> {
        let (event_id, team_name, pending) = {
            let mut builder = self.builder.lock().await;
            let pending = builder.prepare_submission()?;
            builder.mark_submitting();
            (
                builder.event().id.clone(),
                builder.team_name().trim().to_string(),
                pending,
            )
        };

        // Submit-time re-validation is unconditional, even for slots with a
        // cached profile.
        for member in &pending {
            let outcome = self.validator.validate(&member.pid).await;
            let mut builder = self.builder.lock().await;
            let _ = builder.apply_validation(member.slot, member.generation, &outcome);
            if let MemberValidation::Invalid { reason } = outcome {
                builder.mark_failed();
                return Err(TeamError::InvalidMember {
                    position: member.position,
                    reason,
                });
            }
        }

        let request = CreateTeamRequest {
            event_id,
            team_name,
            members: pending.iter().map(|m| m.pid.clone()).collect(),
        };
        match creator.create_team(&request).await {
            Ok(team) => {
                self.builder.lock().await.mark_succeeded();
                Ok(team)
            }
            Err(ClientError::BusinessRule(message)) => {
                self.builder.lock().await.mark_failed();
                Err(TeamError::Creation(message))
            }
            Err(e) => {
                self.builder.lock().await.mark_failed();
                Err(e.into())
            }
        }
    }

    /// Cancels outstanding validations and returns the builder to its
    /// initial state.
    pub async fn reset(&self) {
        for (_, token) in lock(&self.tokens).drain() {
            token.cancel();
        }
        lock(&self.validating).clear();
        self.builder.lock().await.reset();
    }
}
