//! Token validators deciding whether an auth cookie grants access.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use super::User;

/// Turns the raw auth cookie value into a user, or rejects it
pub trait TokenValidator: Send + Sync + std::fmt::Debug {
    /// Validate `token` and return the user it belongs to
    fn validate(&self, token: &str) -> Result<User, TokenError>;
}

/// Reasons a token is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token is empty")]
    Empty,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Session expired at {0}")]
    Expired(DateTime<Utc>),

    #[error("Session has no user")]
    MissingUser,
}

/// Accepts any non-empty token and returns a fixed user
///
/// No signature or expiry check is made; suitable for development only.
#[derive(Debug, Clone)]
pub struct PresenceValidator {
    user: User,
}

impl PresenceValidator {
    /// Validator returning the development user
    pub fn new() -> Self {
        Self::with_user(User::new("123", "John Researcher"))
    }

    /// Validator returning `user` for every accepted token
    pub fn with_user(user: User) -> Self {
        Self { user }
    }
}

impl Default for PresenceValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenValidator for PresenceValidator {
    fn validate(&self, token: &str) -> Result<User, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(self.user.clone())
    }
}

/// Checks a Supabase session cookie for expiry and extracts its user
///
/// Accepts the `base64-` prefixed encoding as well as raw JSON. The access
/// token signature is not verified.
#[derive(Debug, Clone, Default)]
pub struct SessionValidator;

const BASE64_PREFIX: &str = "base64-";

#[derive(Debug, Deserialize)]
struct Session {
    expires_at: Option<i64>,
    user: Option<SessionUser>,
}

#[derive(Debug, Deserialize)]
struct SessionUser {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
    name: Option<String>,
}

impl SessionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `token` as of `now`
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<User, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        let json = decode_session(token)?;
        let session: Session = serde_json::from_str(&json)
            .map_err(|e| TokenError::Malformed(format!("session JSON: {}", e)))?;

        if let Some(expires_at) = session.expires_at {
            let expiry = Utc
                .timestamp_opt(expires_at, 0)
                .single()
                .ok_or_else(|| TokenError::Malformed(format!("expires_at {}", expires_at)))?;
            if now >= expiry {
                return Err(TokenError::Expired(expiry));
            }
        }

        let user = session.user.ok_or(TokenError::MissingUser)?;
        let name = user
            .user_metadata
            .full_name
            .or(user.user_metadata.name)
            .or(user.email)
            .unwrap_or_else(|| user.id.clone());

        Ok(User::new(user.id, name))
    }
}

impl TokenValidator for SessionValidator {
    fn validate(&self, token: &str) -> Result<User, TokenError> {
        self.validate_at(token, Utc::now())
    }
}

fn decode_session(token: &str) -> Result<String, TokenError> {
    let Some(encoded) = token.strip_prefix(BASE64_PREFIX) else {
        return Ok(token.to_string());
    };

    let encoded = encoded.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .map_err(|e| TokenError::Malformed(format!("base64: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| TokenError::Malformed(format!("utf-8: {}", e)))
}
