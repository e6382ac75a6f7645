//! API route definitions and shared application state.

use crate::error::ApiError;
use crate::handlers;
use axum::routing::{delete, get, post, put};
use axum::Router;
use bujo_core::Store;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;

/// Shared application state: the injected store client.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Store handle for the duration of one request pipeline.
    pub fn store(&self) -> Result<MutexGuard<'_, Store>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::internal("store lock poisoned"))
    }
}

/// Builds the complete API router.
///
/// The SPA is served from another origin, hence the permissive CORS layer.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Task endpoints keep their legacy route names.
        .route("/api/create", post(handlers::create_task))
        .route("/api/getall", get(handlers::list_tasks))
        .route("/api/getone/:id", get(handlers::get_task))
        .route("/api/update/:id", put(handlers::update_task))
        .route("/api/delete/:id", delete(handlers::delete_task))
        // Project endpoints
        .route(
            "/api/projects",
            post(handlers::create_project).get(handlers::list_projects),
        )
        .route(
            "/api/projects/:id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        // Habit endpoints
        .route(
            "/api/habits",
            post(handlers::create_habit).get(handlers::list_habits),
        )
        .route(
            "/api/habits/:id",
            get(handlers::get_habit)
                .put(handlers::update_habit)
                .delete(handlers::delete_habit),
        )
        // Expense endpoints
        .route(
            "/api/expenses",
            post(handlers::create_expense).get(handlers::list_expenses),
        )
        .route(
            "/api/expenses/:id",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
