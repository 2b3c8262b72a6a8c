//! File-based session identity store
//!
//! Persists the active session to a local JSON file so it survives process
//! restarts. This adapter stands in for the external identity provider,
//! whose internals are out of scope; it honors the provider contract the
//! gate depends on, including failing a `login` while a session exists.

use std::path::PathBuf;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use ux_core::identity::{AuthIntent, Identity, LoginError, LoginStatus};
use ux_core::ids::PrincipalId;
use ux_core::ports::IdentityPort;

pub const DEFAULT_SESSION_FILE: &str = ".session";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    identity: Identity,
    /// Why the session was started; kept for diagnostics
    intent: AuthIntent,
    created_at: DateTime<Utc>,
}

pub struct FileSessionStore {
    session_file_path: PathBuf,
    status: StdMutex<LoginStatus>,
}

impl FileSessionStore {
    /// Create a store with a custom session file path
    pub fn new(session_file_path: PathBuf) -> Self {
        Self {
            session_file_path,
            status: StdMutex::new(LoginStatus::Idle),
        }
    }

    /// Create a store with base dir and the default filename
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_SESSION_FILE))
    }

    async fn read_session(&self) -> Option<StoredSession> {
        if !self.session_file_path.exists() {
            return None;
        }
        let content = fs::read_to_string(&self.session_file_path).await.ok()?;
        if content.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "unreadable session file; treating as no session");
                None
            }
        }
    }

    async fn write_session(&self, session: &StoredSession) -> Result<(), LoginError> {
        if let Some(parent) = self.session_file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| LoginError::Storage(err.to_string()))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|err| LoginError::Storage(err.to_string()))?;
        let mut file = fs::File::create(&self.session_file_path)
            .await
            .map_err(|err| LoginError::Storage(err.to_string()))?;
        file.write_all(json.as_bytes())
            .await
            .map_err(|err| LoginError::Storage(err.to_string()))?;
        Ok(())
    }

    fn set_status(&self, status: LoginStatus) {
        *self.status.lock().unwrap() = status;
    }
}

#[async_trait]
impl IdentityPort for FileSessionStore {
    async fn identity(&self) -> Option<Identity> {
        self.read_session().await.map(|session| session.identity)
    }

    async fn login(&self, intent: AuthIntent) -> Result<Identity, LoginError> {
        if self.read_session().await.is_some() {
            return Err(LoginError::SessionExists);
        }

        self.set_status(LoginStatus::LoggingIn);
        let identity = Identity::new(PrincipalId::new(Uuid::new_v4().to_string()));
        let session = StoredSession {
            identity: identity.clone(),
            intent,
            created_at: Utc::now(),
        };
        match self.write_session(&session).await {
            Ok(()) => {
                debug!(principal = %identity.principal, ?intent, "session started");
                self.set_status(LoginStatus::Success);
                Ok(identity)
            }
            Err(err) => {
                self.set_status(LoginStatus::Error);
                Err(err)
            }
        }
    }

    async fn clear(&self) -> Result<(), LoginError> {
        if self.session_file_path.exists() {
            fs::remove_file(&self.session_file_path)
                .await
                .map_err(|err| LoginError::Storage(err.to_string()))?;
        }
        self.set_status(LoginStatus::Idle);
        debug!("session cleared");
        Ok(())
    }

    async fn login_status(&self) -> LoginStatus {
        *self.status.lock().unwrap()
    }
}
