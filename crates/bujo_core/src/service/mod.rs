//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, reference resolution, normalization and store
//!   operations into one generic CRUD pipeline.
//! - Keep transport layers decoupled from storage and validation details.

pub mod resource_service;
