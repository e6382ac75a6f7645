//! Endpoint handlers, one module per resource.

pub mod expenses;
pub mod habits;
pub mod projects;
pub mod tasks;

pub use expenses::*;
pub use habits::*;
pub use projects::*;
pub use tasks::*;
