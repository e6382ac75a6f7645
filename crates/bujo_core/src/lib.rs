//! Core domain logic for the bujo bullet-journal tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod resolve;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::expense::{ExpenseCategory, ExpenseInput, ExpenseRecord, ExpenseResource};
pub use model::habit::{HabitFrequency, HabitInput, HabitRecord, HabitResource, HabitStatus};
pub use model::project::{
    ProjectInput, ProjectRecord, ProjectResource, ProjectStatus, ProjectSymbol,
};
pub use model::task::{Priority, TaskInput, TaskRecord, TaskResource, TaskSymbol};
pub use model::ValidationError;
pub use resolve::{ReferenceSpec, ResolveError, ResolvedReferences};
pub use service::resource_service::{CoreError, CoreResult, ResourceSchema, ResourceService};
pub use store::{Collection, DocId, Store, StoreError, StoreResult, Stored};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
