//! Session token verification
//!
//! Session cookies carry `<auth_user_id>.<expires_unix>.<hex signature>`,
//! signed by the auth provider with a shared HMAC-SHA256 secret. Tokens are
//! verified locally; the profile row is looked up separately.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Claims extracted from a valid session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub auth_user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Verify a session token's signature and expiry.
///
/// Returns None on any malformed, tampered, or expired token.
pub fn verify_session_token(token: &str, secret: &str, now: DateTime<Utc>) -> Option<SessionClaims> {
    let mut parts = token.splitn(3, '.');
    let user_part = parts.next()?;
    let expiry_part = parts.next()?;
    let signature_part = parts.next()?;

    let auth_user_id: Uuid = user_part.parse().ok()?;
    let expires_unix: i64 = expiry_part.parse().ok()?;
    let expires_at = DateTime::<Utc>::from_timestamp(expires_unix, 0)?;

    let signature_bytes = hex::decode(signature_part).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(format!("{user_part}.{expiry_part}").as_bytes());
    mac.verify_slice(&signature_bytes).ok()?;

    if expires_at <= now {
        return None;
    }

    Some(SessionClaims {
        auth_user_id,
        expires_at,
    })
}

/// Produce a signed session token (dev tooling and tests)
pub fn sign_session_token(auth_user_id: Uuid, expires_at: DateTime<Utc>, secret: &str) -> String {
    let payload = format!("{}.{}", auth_user_id, expires_at.timestamp());
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("{payload}.{signature}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_round_trip() {
        let user = Uuid::new_v4();
        let expires = Utc::now() + Duration::hours(1);
        let token = sign_session_token(user, expires, SECRET);

        let claims = verify_session_token(&token, SECRET, Utc::now()).unwrap();
        assert_eq!(claims.auth_user_id, user);
    }

    #[test]
    fn test_expired_token_rejected() {
        let user = Uuid::new_v4();
        let expires = Utc::now() - Duration::hours(1);
        let token = sign_session_token(user, expires, SECRET);

        assert!(verify_session_token(&token, SECRET, Utc::now()).is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user = Uuid::new_v4();
        let expires = Utc::now() + Duration::hours(1);
        let token = sign_session_token(user, expires, SECRET);

        assert!(verify_session_token(&token, "other-secret", Utc::now()).is_none());
    }

    #[test]
    fn test_tampered_user_rejected() {
        let user = Uuid::new_v4();
        let expires = Utc::now() + Duration::hours(1);
        let token = sign_session_token(user, expires, SECRET);

        let mut parts: Vec<&str> = token.split('.').collect();
        let other = Uuid::new_v4().to_string();
        parts[0] = &other;
        let forged = parts.join(".");

        assert!(verify_session_token(&forged, SECRET, Utc::now()).is_none());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(verify_session_token("", SECRET, Utc::now()).is_none());
        assert!(verify_session_token("not-a-token", SECRET, Utc::now()).is_none());
        assert!(verify_session_token("a.b.c", SECRET, Utc::now()).is_none());
    }
}
