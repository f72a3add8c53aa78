//! Session resolution.
//!
//! Callers identify themselves with an opaque token carried in the
//! `sessionId` cookie. Meal routes require it; registration mints one when
//! the caller has none.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::convert::Infallible;
use uuid::Uuid;

use super::error::AppError;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sessionId";

/// A session token that was present on the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session(String);

impl Session {
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Short prefix of the token, safe for logs.
    pub fn redacted(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_headers(&parts.headers).ok_or_else(|| {
            tracing::debug!("Rejected {} {}: no session cookie", parts.method, parts.uri);
            AppError::Unauthorized
        })
    }
}

/// Session for registration: the caller's token if present, otherwise a
/// freshly minted one that still has to be handed back as a cookie.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub session: Session,
    pub minted: bool,
}

impl ResolvedSession {
    /// `Set-Cookie` value for a minted token. Existing tokens are never
    /// re-issued.
    pub fn set_cookie(&self, max_age_secs: u64) -> Option<String> {
        self.minted.then(|| {
            format!(
                "{}={}; Path=/; Max-Age={}; HttpOnly",
                SESSION_COOKIE,
                self.session.id(),
                max_age_secs
            )
        })
    }
}

impl<S> FromRequestParts<S> for ResolvedSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match session_from_headers(&parts.headers) {
            Some(session) => ResolvedSession {
                session,
                minted: false,
            },
            None => ResolvedSession {
                session: mint(),
                minted: true,
            },
        })
    }
}

/// New random token (UUID v4).
pub fn mint() -> Session {
    Session(Uuid::new_v4().to_string())
}

/// Finds a non-empty `sessionId` cookie across all `Cookie` headers.
fn session_from_headers(headers: &HeaderMap) -> Option<Session> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| unquote(value.trim()))
        .filter(|value| !value.is_empty())
        .map(|value| Session(value.to_string()))
}

/// `"abc"` and `abc` name the same session.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}
