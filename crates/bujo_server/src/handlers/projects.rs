//! Project endpoint handlers.

use crate::error::{ApiError, ApiResult};
use crate::response;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bujo_core::{Collection, DocId, ProjectInput, ProjectResource, ResourceService};
use log::info;

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<ProjectInput>,
) -> ApiResult<impl IntoResponse> {
    let store = state.store()?;
    let created = ResourceService::<ProjectResource>::new(&store).create(&input)?;
    info!(
        "event=project_create module=api status=ok id={} tasks={}",
        created.id,
        created.doc.associated_tasks.len()
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.store()?;
    let projects = ResourceService::<ProjectResource>::new(&store).list_expanded()?;
    Ok(response::list("No projects found", projects))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    let project = ResourceService::<ProjectResource>::new(&store)
        .get_expanded(&id)?
        .ok_or_else(|| ApiError::not_found(Collection::Projects))?;
    Ok(Json(project))
}

/// PUT /api/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProjectInput>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    let updated = ResourceService::<ProjectResource>::new(&store).update(&id, &input)?;
    info!("event=project_update module=api status=ok id={id}");
    Ok(response::updated("Project updated successfully", updated))
}

/// DELETE /api/projects/:id
///
/// No cascade: habits and expenses referencing the project keep their
/// now-dangling identifiers.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    ResourceService::<ProjectResource>::new(&store).delete(&id)?;
    info!("event=project_delete module=api status=ok id={id}");
    Ok(response::confirmation("Project deleted successfully"))
}
