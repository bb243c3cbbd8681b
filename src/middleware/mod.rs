use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::error::AppError;
use crate::models::User;
use crate::AppState;

/// The signed-in user, read from the local session.
///
/// Handlers that take this extractor answer 401 while nobody is signed in.
#[derive(Debug, Clone)]
pub struct SignedIn(pub User);

impl FromRequestParts<Arc<AppState>> for SignedIn {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        state
            .session
            .current_user()
            .await
            .map(SignedIn)
            .ok_or_else(|| AppError::Unauthorized("Please sign in first".to_string()))
    }
}
