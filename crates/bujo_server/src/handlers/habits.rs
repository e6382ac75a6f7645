//! Habit endpoint handlers.

use crate::error::{ApiError, ApiResult};
use crate::response;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bujo_core::{Collection, DocId, HabitInput, HabitResource, ResourceService};
use log::info;

/// POST /api/habits
pub async fn create_habit(
    State(state): State<AppState>,
    Json(input): Json<HabitInput>,
) -> ApiResult<impl IntoResponse> {
    let store = state.store()?;
    let created = ResourceService::<HabitResource>::new(&store).create(&input)?;
    info!("event=habit_create module=api status=ok id={}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/habits
pub async fn list_habits(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.store()?;
    let habits = ResourceService::<HabitResource>::new(&store).list_expanded()?;
    Ok(response::list("No habits found", habits))
}

/// GET /api/habits/:id
pub async fn get_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    let habit = ResourceService::<HabitResource>::new(&store)
        .get_expanded(&id)?
        .ok_or_else(|| ApiError::not_found(Collection::Habits))?;
    Ok(Json(habit))
}

/// PUT /api/habits/:id
pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<HabitInput>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    let updated = ResourceService::<HabitResource>::new(&store).update(&id, &input)?;
    info!("event=habit_update module=api status=ok id={id}");
    Ok(response::updated("Habit updated successfully", updated))
}

/// DELETE /api/habits/:id
pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    ResourceService::<HabitResource>::new(&store).delete(&id)?;
    info!("event=habit_delete module=api status=ok id={id}");
    Ok(response::confirmation("Habit deleted successfully"))
}
