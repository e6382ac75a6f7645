//! Project resource: the only record carrying a date range and a batch of
//! outgoing task references.
//!
//! # Invariants
//! - `startDate <= endDate`, on creation and update.
//! - Every id in `associatedTasks` resolves to an existing task at
//!   validation time; unresolved ids invalidate the whole write.

use super::{parse_date, require_member, require_text, ValidationError, ValidationResult};
use crate::resolve::{ExpandedReference, ReferenceKind, ReferenceSpec, ResolvedReferences};
use crate::service::resource_service::ResourceSchema;
use crate::store::{Collection, DocId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const SYMBOL_VALUES: &str = "◇";
const STATUS_VALUES: &str = "En progreso|Planificado|Pendiente|Completado";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectSymbol {
    #[serde(rename = "◇")]
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "En progreso")]
    InProgress,
    #[serde(rename = "Planificado")]
    Planned,
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Completado")]
    Completed,
}

/// Raw create/update payload as received from the transport layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInput {
    pub symbol: Option<String>,
    #[serde(rename = "project")]
    pub name: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "associatedTasks")]
    pub associated_tasks: Option<Vec<String>>,
}

/// Typed output of field validation, input to normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFields {
    pub symbol: ProjectSymbol,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
}

/// Canonical persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub symbol: ProjectSymbol,
    #[serde(rename = "project")]
    pub name: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    /// Always persisted, empty list when no tasks are linked.
    #[serde(rename = "associatedTasks")]
    pub associated_tasks: Vec<DocId>,
}

fn parse_symbol(value: &str) -> Option<ProjectSymbol> {
    match value {
        "◇" => Some(ProjectSymbol::Diamond),
        _ => None,
    }
}

fn parse_status(value: &str) -> Option<ProjectStatus> {
    match value {
        "En progreso" => Some(ProjectStatus::InProgress),
        "Planificado" => Some(ProjectStatus::Planned),
        "Pendiente" => Some(ProjectStatus::Pending),
        "Completado" => Some(ProjectStatus::Completed),
        _ => None,
    }
}

/// Schema binding for the generic CRUD pipeline.
pub struct ProjectResource;

impl ResourceSchema for ProjectResource {
    const COLLECTION: Collection = Collection::Projects;
    type Input = ProjectInput;
    type Fields = ProjectFields;
    type Record = ProjectRecord;

    fn validate(input: &ProjectInput) -> ValidationResult<ProjectFields> {
        let symbol = require_text("symbol", input.symbol.as_deref())?;
        let name = require_text("project", input.name.as_deref())?;
        let start_date = require_text("startDate", input.start_date.as_deref())?;
        let end_date = require_text("endDate", input.end_date.as_deref())?;
        let status = require_text("status", input.status.as_deref())?;

        let symbol = require_member("symbol", symbol, SYMBOL_VALUES, parse_symbol)?;
        let status = require_member("status", status, STATUS_VALUES, parse_status)?;
        let start_date = parse_date("startDate", &start_date)?;
        let end_date = parse_date("endDate", &end_date)?;

        if start_date > end_date {
            return Err(ValidationError::InvertedDateRange {
                start: start_date,
                end: end_date,
            });
        }

        Ok(ProjectFields {
            symbol,
            name,
            start_date,
            end_date,
            status,
        })
    }

    fn references(input: &ProjectInput) -> ReferenceSpec {
        let ids = input
            .associated_tasks
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|id| DocId::from(id.as_str()))
            .collect();

        ReferenceSpec::Batch {
            target: Collection::Tasks,
            ids,
        }
    }

    fn normalize(fields: ProjectFields, refs: ResolvedReferences) -> ProjectRecord {
        ProjectRecord {
            symbol: fields.symbol,
            name: fields.name,
            start_date: fields.start_date,
            end_date: fields.end_date,
            status: fields.status,
            associated_tasks: refs.batch,
        }
    }

    fn expansion() -> Option<ExpandedReference> {
        Some(ExpandedReference {
            field: "associatedTasks",
            target: Collection::Tasks,
            kind: ReferenceKind::Batch,
        })
    }
}
