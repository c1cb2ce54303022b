//! Bearer-token authentication middleware.

use super::{ApiError, AppState, Backend};
use crate::auth::Actor;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Caller resolved from the `Authorization` header; `None` for anonymous or
/// invalid tokens.
#[derive(Debug, Clone, Default)]
pub struct CurrentActor(pub Option<Actor>);

impl CurrentActor {
    /// Returns the actor, if any.
    #[must_use]
    pub const fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }

    /// Returns the actor or fails with 401.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for anonymous callers.
    pub fn require(&self) -> Result<&Actor, ApiError> {
        self.0.as_ref().ok_or(ApiError::Unauthorized)
    }
}

/// Verifies the bearer token, if present, and stores the resulting
/// [`CurrentActor`] in the request extensions.
pub(crate) async fn authenticate<K: Backend>(
    State(state): State<Arc<AppState<K>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);
    let actor = token.and_then(|raw| {
        state
            .verifier
            .verify(raw)
            .inspect_err(|err| tracing::debug!(error = %err, "ignoring invalid bearer token"))
            .ok()
    });
    request.extensions_mut().insert(CurrentActor(actor));
    next.run(request).await
}
