//! Per-request authentication gate.
//!
//! The gate looks for the project's auth cookie (`sb-<project-ref>-auth-token`)
//! and hands its value to a [`TokenValidator`]. A missing cookie or a rejected
//! token yields an unauthenticated [`AuthDecision`]; callers redirect to the
//! login view instead of rendering anything.
//!
//! ```
//! use http::{header::COOKIE, HeaderMap, HeaderValue};
//! use meritpath::auth::{AuthGate, PresenceValidator};
//! use std::sync::Arc;
//!
//! let gate = AuthGate::new("abcdefgh", Arc::new(PresenceValidator::new()));
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(COOKIE, HeaderValue::from_static("sb-abcdefgh-auth-token=token"));
//!
//! let decision = gate.check_auth(&headers);
//! assert!(decision.authenticated);
//! assert_eq!(decision.user.unwrap().name, "John Researcher");
//! ```

mod cookies;
mod validator;

pub use cookies::{
    cookie_name, cookie_value, parse_cookies, project_ref_from_env, PROJECT_REF_ENV_VARS,
};
pub use validator::{PresenceValidator, SessionValidator, TokenError, TokenValidator};

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{AuthConfig, ValidationMode};

/// The signed-in user shown in the page header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Outcome of an auth check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthDecision {
    pub authenticated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl AuthDecision {
    /// An authenticated decision for `user`
    pub fn granted(user: User) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }

    /// An unauthenticated decision
    pub fn denied() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }
}

/// Errors building an [`AuthGate`]
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(
        "No project reference configured: set auth.project_ref or one of {}",
        PROJECT_REF_ENV_VARS.join(", ")
    )]
    MissingProjectRef,
}

/// Cookie-based auth check performed on every request
#[derive(Debug, Clone)]
pub struct AuthGate {
    cookie_name: String,
    validator: Arc<dyn TokenValidator>,
}

impl AuthGate {
    /// Gate for `project_ref` using `validator`
    pub fn new(project_ref: &str, validator: Arc<dyn TokenValidator>) -> Self {
        Self {
            cookie_name: cookie_name(project_ref),
            validator,
        }
    }

    /// Gate built from configuration, falling back to the environment for
    /// the project reference
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let project_ref = config
            .project_ref
            .clone()
            .filter(|r| !r.trim().is_empty())
            .or_else(project_ref_from_env)
            .ok_or(AuthError::MissingProjectRef)?;

        let validator: Arc<dyn TokenValidator> = match config.validation {
            ValidationMode::Presence => Arc::new(PresenceValidator::new()),
            ValidationMode::Session => Arc::new(SessionValidator::new()),
        };

        Ok(Self::new(&project_ref, validator))
    }

    /// Name of the cookie this gate reads
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Decide whether the request carrying `headers` is authenticated
    pub fn check_auth(&self, headers: &HeaderMap) -> AuthDecision {
        let cookies = parse_cookies(headers);

        let Some(token) = cookie_value(&cookies, &self.cookie_name) else {
            tracing::debug!(cookie = %self.cookie_name, "Auth cookie not present");
            return AuthDecision::denied();
        };

        match self.validator.validate(&token) {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Request authenticated");
                AuthDecision::granted(user)
            }
            Err(e) => {
                tracing::debug!(cookie = %self.cookie_name, "Auth token rejected: {}", e);
                AuthDecision::denied()
            }
        }
    }
}
