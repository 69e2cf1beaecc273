use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use doe_auth::Claims;
use doe_core::AuthenticationError;

use crate::middleware::security::SecurityRejection;
use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Path prefix under which every request must carry a valid bearer token.
pub const PROTECTED_PREFIX: &str = "/rest";

/// Extractor that validates the bearer token and provides its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.0.has_authority(authority)
    }

    pub fn authorities(&self) -> Vec<String> {
        self.0.authorities()
    }

    pub fn subject(&self) -> Option<&str> {
        self.0.sub.as_deref()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = SecurityRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
            return Err(SecurityRejection::Unauthenticated(
                AuthenticationError::MissingToken,
            ));
        };

        let auth_header = auth_header
            .to_str()
            .map_err(|_| SecurityRejection::UnsupportedScheme)?;

        let token = bearer_token(auth_header).ok_or(SecurityRejection::UnsupportedScheme)?;

        if token.is_empty() {
            return Err(SecurityRejection::Unauthenticated(
                AuthenticationError::MissingToken,
            ));
        }

        let claims = state
            .decoder
            .authenticate(token)
            .map_err(SecurityRejection::Unauthenticated)?;

        Ok(AuthUser(claims))
    }
}

/// Authenticates every request under [`PROTECTED_PREFIX`] before routing, so
/// unknown routes, unsupported methods and negotiation failures there are
/// only reported to authenticated callers. The verified [`AuthUser`] is left
/// in the request extensions for the authority extractors.
pub async fn authenticate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !is_protected(req.uri().path()) {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();

    match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(auth_user) => {
            parts.extensions.insert(auth_user);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(rejection) => rejection.into_response(),
    }
}

fn is_protected(path: &str) -> bool {
    path.strip_prefix(PROTECTED_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// The credentials of a `Bearer` authorization header, scheme matched
/// case-insensitively.
fn bearer_token(auth_header: &str) -> Option<&str> {
    let auth_header = auth_header.trim();
    let (scheme, token) = auth_header
        .split_once(' ')
        .unwrap_or((auth_header, ""));

    scheme
        .eq_ignore_ascii_case(BEARER_SCHEME)
        .then(|| token.trim())
}

/// Defines an extractor that requires the caller to hold an authority.
#[macro_export]
macro_rules! require_authority {
    ($name:ident, $authority:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::middleware::security::SecurityRejection;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                if !auth_user.has_authority($authority) {
                    return Err($crate::middleware::security::SecurityRejection::AccessDenied {
                        authority: $authority,
                    });
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_authority!(RequireResourceRead, "SCOPE_resource:read");
require_authority!(RequireAdmin, "SCOPE_ADMIN");
