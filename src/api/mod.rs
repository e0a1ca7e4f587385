//! # HTTP API
//!
//! - `GET /` - greeting
//! - `POST /projects/` - register a project
//! - `GET /projects/` - list every project in creation order

pub mod errors;
pub mod session;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::models::{Project, ProjectCreate};
use crate::store::{ProjectSession, ProjectStore};

use errors::ApiResult;
use session::DbSession;

pub const GREETING: &str = "API de la Plataforma de Contenidos funcionando con SQLite!";

/// State shared by every handler
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the router over the given store
pub fn router<S: ProjectStore>(store: S) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route(
            "/projects/",
            get(list_projects::<S>).post(create_project::<S>),
        )
        .route(
            "/projects",
            get(list_projects::<S>).post(create_project::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

async fn read_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: GREETING.to_string(),
    })
}

async fn create_project<S: ProjectStore>(
    DbSession(mut session): DbSession<S>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let input = ProjectCreate::from_body(&body)?;

    let project = session.create(input).await?;
    tracing::info!(id = project.id, name = %project.name, "project created");

    Ok((StatusCode::CREATED, Json(project)))
}

async fn list_projects<S: ProjectStore>(
    DbSession(mut session): DbSession<S>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = session.list().await?;
    Ok(Json(projects))
}
