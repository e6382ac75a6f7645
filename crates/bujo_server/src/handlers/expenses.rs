//! Expense endpoint handlers.

use crate::error::{ApiError, ApiResult};
use crate::response;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bujo_core::{Collection, DocId, ExpenseInput, ExpenseResource, ResourceService};
use log::info;

/// POST /api/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Json(input): Json<ExpenseInput>,
) -> ApiResult<impl IntoResponse> {
    let store = state.store()?;
    let created = ResourceService::<ExpenseResource>::new(&store).create(&input)?;
    info!(
        "event=expense_create module=api status=ok id={} amount={}",
        created.id, created.doc.amount
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/expenses
pub async fn list_expenses(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let store = state.store()?;
    let expenses = ResourceService::<ExpenseResource>::new(&store).list_expanded()?;
    Ok(response::list("No expenses found", expenses))
}

/// GET /api/expenses/:id
pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    let expense = ResourceService::<ExpenseResource>::new(&store)
        .get_expanded(&id)?
        .ok_or_else(|| ApiError::not_found(Collection::Expenses))?;
    Ok(Json(expense))
}

/// PUT /api/expenses/:id
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ExpenseInput>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    let updated = ResourceService::<ExpenseResource>::new(&store).update(&id, &input)?;
    info!("event=expense_update module=api status=ok id={id}");
    Ok(response::updated("Expense updated successfully", updated))
}

/// DELETE /api/expenses/:id
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = DocId::from(id);
    let store = state.store()?;
    ResourceService::<ExpenseResource>::new(&store).delete(&id)?;
    info!("event=expense_delete module=api status=ok id={id}");
    Ok(response::confirmation("Expense deleted successfully"))
}
