//! Task resource: journal entries carrying a bullet symbol and a priority.
//!
//! # Invariants
//! - `symbol` and `priority` are closed sets; see the `expected` strings.
//! - Tasks hold no outgoing references.

use super::{parse_date, require_member, require_text, ValidationResult};
use crate::resolve::{ExpandedReference, ReferenceSpec, ResolvedReferences};
use crate::service::resource_service::ResourceSchema;
use crate::store::Collection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const SYMBOL_VALUES: &str = "•|x|>|<";
const PRIORITY_VALUES: &str = "Alta|Media|Baja";

/// Bullet-journal entry symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskSymbol {
    /// `•`: open entry.
    #[serde(rename = "•")]
    Bullet,
    /// `x`: completed entry.
    #[serde(rename = "x")]
    Done,
    /// `>`: migrated to a collection.
    #[serde(rename = ">")]
    Migrated,
    /// `<`: scheduled into the future log.
    #[serde(rename = "<")]
    Scheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Baja")]
    Low,
}

/// Raw create/update payload as received from the transport layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInput {
    pub symbol: Option<String>,
    #[serde(rename = "task")]
    pub name: Option<String>,
    pub date: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,
}

/// Typed output of field validation, input to normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub symbol: TaskSymbol,
    pub name: String,
    pub date: NaiveDate,
    pub priority: Priority,
    pub notes: Option<String>,
}

/// Canonical persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub symbol: TaskSymbol,
    #[serde(rename = "task")]
    pub name: String,
    pub date: NaiveDate,
    pub priority: Priority,
    /// Always persisted, empty string when not supplied.
    pub notes: String,
}

fn parse_symbol(value: &str) -> Option<TaskSymbol> {
    match value {
        "•" => Some(TaskSymbol::Bullet),
        "x" => Some(TaskSymbol::Done),
        ">" => Some(TaskSymbol::Migrated),
        "<" => Some(TaskSymbol::Scheduled),
        _ => None,
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "Alta" => Some(Priority::High),
        "Media" => Some(Priority::Medium),
        "Baja" => Some(Priority::Low),
        _ => None,
    }
}

/// Schema binding for the generic CRUD pipeline.
pub struct TaskResource;

impl ResourceSchema for TaskResource {
    const COLLECTION: Collection = Collection::Tasks;
    type Input = TaskInput;
    type Fields = TaskFields;
    type Record = TaskRecord;

    fn validate(input: &TaskInput) -> ValidationResult<TaskFields> {
        let symbol = require_text("symbol", input.symbol.as_deref())?;
        let name = require_text("task", input.name.as_deref())?;
        let date = require_text("date", input.date.as_deref())?;
        let priority = require_text("priority", input.priority.as_deref())?;

        let symbol = require_member("symbol", symbol, SYMBOL_VALUES, parse_symbol)?;
        let priority = require_member("priority", priority, PRIORITY_VALUES, parse_priority)?;
        let date = parse_date("date", &date)?;

        Ok(TaskFields {
            symbol,
            name,
            date,
            priority,
            notes: input.notes.clone(),
        })
    }

    fn references(_input: &TaskInput) -> ReferenceSpec {
        ReferenceSpec::None
    }

    fn normalize(fields: TaskFields, _refs: ResolvedReferences) -> TaskRecord {
        TaskRecord {
            symbol: fields.symbol,
            name: fields.name,
            date: fields.date,
            priority: fields.priority,
            notes: fields.notes.unwrap_or_default(),
        }
    }

    fn expansion() -> Option<ExpandedReference> {
        None
    }
}
