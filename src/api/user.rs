//! `/user/*` endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{RecordId, User};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<User, ApiError> {
    client.post("user/login", request).await
}

pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<User, ApiError> {
    client.post("user/register", request).await
}

pub async fn get(client: &ApiClient, id: &RecordId) -> Result<User, ApiError> {
    client.get_one(&format!("user/{}", id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            email: "ops@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_requires_long_password() {
        let req = RegisterRequest {
            name: "Aigerim".to_string(),
            email: "a@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
