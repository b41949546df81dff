//! Session/token state behind an explicit store interface.
//!
//! Participant and administrator sessions are held separately; the HTTP layer
//! picks the token matching the role of the endpoint it is calling. Any
//! 401/403 clears both sessions at once.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Which side of the application a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Participant,
    Admin,
}

/// One authenticated session: bearer token plus the profile JSON cached at
/// login time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionEntry {
    pub token: String,
    #[serde(default)]
    pub profile: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionState {
    #[serde(default)]
    participant: Option<SessionEntry>,
    #[serde(default)]
    admin: Option<SessionEntry>,
}

impl SessionState {
    fn slot(&self, role: Role) -> &Option<SessionEntry> {
        match role {
            Role::Participant => &self.participant,
            Role::Admin => &self.admin,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<SessionEntry> {
        match role {
            Role::Participant => &mut self.participant,
            Role::Admin => &mut self.admin,
        }
    }
}

/// Store for session tokens and cached profiles, injected into the HTTP
/// layer rather than read ad hoc.
pub trait SessionStore: Send + Sync {
    fn token(&self, role: Role) -> Option<String>;
    fn cached_profile(&self, role: Role) -> Option<Value>;
    fn set_session(&self, role: Role, token: &str, profile: Option<Value>) -> Result<()>;
    fn clear(&self, role: Role) -> Result<()>;
    /// Drops both sessions. Used on logout and on any auth failure.
    fn clear_all(&self) -> Result<()>;
}

/// Session store persisted as a JSON file in the user's config directory.
pub struct FileSessionStore {
    path: PathBuf,
    state: RwLock<SessionState>,
}

impl FileSessionStore {
    /// Opens the store at the platform config location
    /// (`<config_dir>/technovaganza/session.json`), loading existing state.
    pub fn open_default() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| ClientError::Session("no config directory available".into()))?;
        Self::open(base.join("technovaganza").join("session.json"))
    }

    pub fn open(path: PathBuf) -> Result<Self> {
        let state = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ClientError::Session(format!("corrupt session file: {e}")))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionState::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    fn persist(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(state)
            .map_err(|e| ClientError::Session(e.to_string()))?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, SessionState>> {
        self.state
            .write()
            .map_err(|_| ClientError::Session("session store poisoned".into()))
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self, role: Role) -> Option<String> {
        let state = self.state.read().ok()?;
        state.slot(role).as_ref().map(|s| s.token.clone())
    }

    fn cached_profile(&self, role: Role) -> Option<Value> {
        let state = self.state.read().ok()?;
        state.slot(role).as_ref().and_then(|s| s.profile.clone())
    }

    fn set_session(&self, role: Role, token: &str, profile: Option<Value>) -> Result<()> {
        let mut state = self.lock()?;
        *state.slot_mut(role) = Some(SessionEntry {
            token: token.to_string(),
            profile,
        });
        self.persist(&state)
    }

    fn clear(&self, role: Role) -> Result<()> {
        let mut state = self.lock()?;
        *state.slot_mut(role) = None;
        self.persist(&state)
    }

    fn clear_all(&self) -> Result<()> {
        let mut state = self.lock()?;
        *state = SessionState::default();
        self.persist(&state)
    }
}

/// In-memory store for tests and one-shot invocations.
#[derive(Default)]
pub struct MemorySessionStore {
    state: RwLock<SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self, role: Role) -> Option<String> {
        let state = self.state.read().ok()?;
        state.slot(role).as_ref().map(|s| s.token.clone())
    }

    fn cached_profile(&self, role: Role) -> Option<Value> {
        let state = self.state.read().ok()?;
        state.slot(role).as_ref().and_then(|s| s.profile.clone())
    }

    fn set_session(&self, role: Role, token: &str, profile: Option<Value>) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ClientError::Session("session store poisoned".into()))?;
        *state.slot_mut(role) = Some(SessionEntry {
            token: token.to_string(),
            profile,
        });
        Ok(())
    }

    fn clear(&self, role: Role) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ClientError::Session("session store poisoned".into()))?;
        *state.slot_mut(role) = None;
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ClientError::Session("session store poisoned".into()))?;
        *state = SessionState::default();
        Ok(())
    }
}
