//! Per-request store access.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::AppState;
use super::errors::ApiError;
use crate::store::ProjectStore;

/// A store session scoped to one request.
///
/// Opened before the handler runs and dropped with the handler's future, so
/// the underlying connection goes back to the pool however the request ends.
pub struct DbSession<S: ProjectStore>(pub S::Session);

#[async_trait]
impl<S> FromRequestParts<AppState<S>> for DbSession<S>
where
    S: ProjectStore,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let session = state.store.open_session().await?;
        Ok(DbSession(session))
    }
}
