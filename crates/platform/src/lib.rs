//! Client for the hosted platform: session verification, object storage,
//! and hosted function invocation

pub mod client;
pub mod verify;

pub use client::{ClientError, PlatformClient};
pub use verify::{sign_session_token, verify_session_token, SessionClaims};
