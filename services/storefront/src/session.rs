//! Bearer-token session extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use uuid::Uuid;

use bakehouse_domain::role::Role;

use crate::error::StorefrontError;
use crate::state::AppState;
use crate::usecase::token::validate_token;

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
///
/// Returns 401 when the header is absent or the token fails validation.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Session {
    pub account_id: Uuid,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_owned())
}

fn session_from_token(token: &str, secret: &str) -> Result<Session, StorefrontError> {
    let claims = validate_token(token, secret)?;
    let account_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| StorefrontError::Unauthorized("invalid session token"))?;
    let role = Role::from_u8(claims.role)
        .ok_or(StorefrontError::Unauthorized("invalid session token"))?;
    Ok(Session { account_id, role })
}

impl FromRequestParts<AppState> for Session {
    type Rejection = StorefrontError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(parts);
        let secret = state.jwt_secret.clone();
        async move {
            let token = token.ok_or(StorefrontError::Unauthorized("missing bearer token"))?;
            session_from_token(&token, &secret)
        }
    }
}

/// Like [`Session`] but never rejects: guests and callers with stale
/// tokens both come through as `None`.
#[derive(Debug, Clone)]
pub struct OptionalSession(pub Option<Session>);

impl OptionalSession {
    pub fn account_id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|s| s.account_id)
    }

    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(Session::is_admin)
    }
}

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(parts);
        let secret = state.jwt_secret.clone();
        async move {
            let session = token.and_then(|t| session_from_token(&t, &secret).ok());
            Ok(Self(session))
        }
    }
}
