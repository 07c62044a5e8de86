//! Newsletter subscription route

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiError, ApiResult, FieldError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubscribeBody {
    pub email: String,
}

/// Minimal structural check: one '@', non-empty local part, dotted domain,
/// no whitespace. Anything stricter is the email provider's problem.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

/// Subscribe an email address to the newsletter.
///
/// A malformed address is rejected before any outbound call is made.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubscribeBody>,
) -> ApiResult<StatusCode> {
    let email = body.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::Validation(vec![FieldError::new(
            "email",
            "must be a valid email address",
        )]));
    }

    state
        .platform
        .subscribe_newsletter(&state.config.newsletter_function, &email)
        .await?;

    info!("Newsletter subscription accepted");
    Ok(StatusCode::ACCEPTED)
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("first.last@mail.example.co"));
        assert!(is_valid_email("tag+filter@example.io"));
    }

    #[test]
    fn test_rejects_missing_at() {
        assert!(!is_valid_email("example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("reader@"));
    }

    #[test]
    fn test_rejects_undotted_domain() {
        assert!(!is_valid_email("reader@localhost"));
    }

    #[test]
    fn test_rejects_whitespace() {
        assert!(!is_valid_email("rea der@example.com"));
        assert!(!is_valid_email("reader@exa mple.com"));
    }

    #[test]
    fn test_rejects_double_at() {
        assert!(!is_valid_email("reader@foo@example.com"));
    }

    #[test]
    fn test_rejects_short_tld() {
        assert!(!is_valid_email("reader@example.c"));
    }
}
