//! Task endpoint handlers.
//!
//! Tasks keep their legacy route names (`/create`, `/getall`, ...) for
//! compatibility with the existing SPA.

use crate::error::{ApiError, ApiResult};
use crate::response;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bujo_core::{Collection, DocId, ResourceService, TaskInput, TaskResource};
use log::info;

/// POST /api/create
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<TaskInput>,
) -> ApiResult<impl IntoResponse> {
    let store = state.store()?;
    let created = ResourceService::<TaskResource>::new(&store).create(&input)?;
    info!("event=task_create module=api status=ok id={}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/getall
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.store()?;
    let tasks = ResourceService::<TaskResource>::new(&store).list_expanded()?;
    Ok(response::list("No tasks found", tasks))
}

/// GET /api/getone/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    let task = ResourceService::<TaskResource>::new(&store)
        .get_expanded(&id)?
        .ok_or_else(|| ApiError::not_found(Collection::Tasks))?;
    Ok(Json(task))
}

/// PUT /api/update/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<TaskInput>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    let updated = ResourceService::<TaskResource>::new(&store).update(&id, &input)?;
    info!("event=task_update module=api status=ok id={id}");
    Ok(response::updated("Task updated successfully", updated))
}

/// DELETE /api/delete/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    ResourceService::<TaskResource>::new(&store).delete(&id)?;
    info!("event=task_delete module=api status=ok id={id}");
    Ok(response::confirmation("Task deleted successfully"))
}
