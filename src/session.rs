//! Locally persisted sign-in state.
//!
//! Mirrors what the browser kept in local storage: an `isLoggedIn` flag and
//! the user record returned at login. There is no token; the remote API
//! never verifies this session.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use validator::{Validate, ValidationErrors};

use crate::api::user::{self, LoginRequest, RegisterRequest};
use crate::api::ApiClient;
use crate::error::SessionError;
use crate::models::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(rename = "isLoggedIn", default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub user: Option<User>,
}

impl SessionState {
    fn signed_in(user: User) -> Self {
        Self {
            is_logged_in: true,
            user: Some(user),
        }
    }

    /// The user, if the flag says signed in and a user is cached.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref().filter(|_| self.is_logged_in)
    }
}

pub struct SessionStore {
    path: PathBuf,
    client: ApiClient,
    state: RwLock<SessionState>,
}

/// Flattens validator output into one line, fields in name order.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

async fn read_state(path: &Path) -> SessionState {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return SessionState::default(),
        Err(e) => {
            warn!("Cannot read session file {}: {}", path.display(), e);
            return SessionState::default();
        }
    };
    match serde_json::from_slice(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("Ignoring corrupt session file {}: {}", path.display(), e);
            SessionState::default()
        }
    }
}

impl SessionStore {
    /// Reads the session file. A missing, unreadable or corrupt file means
    /// signed out.
    pub async fn load(path: impl Into<PathBuf>, client: ApiClient) -> Self {
        let path = path.into();
        let state = read_state(&path).await;
        debug!("Session loaded from {} (signed in: {})", path.display(), state.is_logged_in);
        Self {
            path,
            client,
            state: RwLock::new(state),
        }
    }

    async fn persist(&self, state: &SessionState) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(state)?).await?;
        Ok(())
    }

    async fn sign_in(&self, user: User) -> Result<User, SessionError> {
        let state = SessionState::signed_in(user.clone());
        self.persist(&state).await?;
        *self.state.write().await = state;
        Ok(user)
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.current_user().cloned()
    }

    pub async fn login(&self, request: LoginRequest) -> Result<User, SessionError> {
        request
            .validate()
            .map_err(|e| SessionError::Validation(validation_message(&e)))?;
        let user = user::login(&self.client, &request).await?;
        info!("Signed in as {}", user.email);
        self.sign_in(user).await
    }

    /// Registers and signs straight in with the returned account.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, SessionError> {
        request
            .validate()
            .map_err(|e| SessionError::Validation(validation_message(&e)))?;
        let user = user::register(&self.client, &request).await?;
        info!("Registered {}", user.email);
        self.sign_in(user).await
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *self.state.write().await = SessionState::default();
        info!("Signed out");
        Ok(())
    }

    /// Re-reads the signed-in user from the API, e.g. after the passenger
    /// profile was set up. `None` when nobody is signed in.
    pub async fn refresh(&self) -> Result<Option<User>, SessionError> {
        let Some(current) = self.current_user().await else {
            return Ok(None);
        };
        let fresh = user::get(&self.client, &current.id).await?;
        self.sign_in(fresh).await.map(Some)
    }
}
