//! Authentication middleware and extractor.
//!
//! The middleware validates the session token through the [`SessionValidator`]
//! port and injects the authenticated user into request extensions; handlers
//! read it back with the [`RequireAuth`] extractor. The port keeps the
//! middleware identical between the real validator and the test mock.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::ports::{AuthError, AuthenticatedUser, SessionValidator};

/// Middleware state - the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates the `Authorization: Bearer <token>` header.
///
/// On success the [`AuthenticatedUser`] lands in request extensions; a
/// missing token continues without it (handlers enforce auth via
/// [`RequireAuth`]); an invalid token answers 401 immediately.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match validator.validate(token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => {
                let (status, message) = match &e {
                    AuthError::SessionExpired => (StatusCode::UNAUTHORIZED, "Session expired"),
                    AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid session"),
                    AuthError::ServiceUnavailable(msg) => {
                        tracing::error!("auth service unavailable: {}", msg);
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "Authentication service unavailable",
                        )
                    }
                };
                (
                    status,
                    Json(serde_json::json!({
                        "code": "AUTH_ERROR",
                        "message": message
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor requiring an authenticated user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection for requests without a validated session.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "code": "AUTH_ERROR",
                "message": "Authentication required"
            })),
        )
            .into_response()
    }
}
