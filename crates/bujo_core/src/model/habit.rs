//! Habit resource: recurring practices with an optional project link.

use super::{require_member, require_text, ValidationResult};
use crate::resolve::{ExpandedReference, ReferenceKind, ReferenceSpec, ResolvedReferences};
use crate::service::resource_service::ResourceSchema;
use crate::store::{Collection, DocId};
use serde::{Deserialize, Serialize};

const FREQUENCY_VALUES: &str = "Diario|Semanal|Mensual|Ocasional|2 veces/semana|3 veces/semana|Quincenal|Bimestral|Anual|Personalizado";
const STATUS_VALUES: &str =
    "Completado|Pendiente|En progreso|Cancelado|Reprogramado|Inspirado";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HabitFrequency {
    #[serde(rename = "Diario")]
    Daily,
    #[serde(rename = "Semanal")]
    Weekly,
    #[serde(rename = "Mensual")]
    Monthly,
    #[serde(rename = "Ocasional")]
    Occasional,
    #[serde(rename = "2 veces/semana")]
    TwiceWeekly,
    #[serde(rename = "3 veces/semana")]
    ThriceWeekly,
    #[serde(rename = "Quincenal")]
    Biweekly,
    #[serde(rename = "Bimestral")]
    Bimonthly,
    #[serde(rename = "Anual")]
    Yearly,
    #[serde(rename = "Personalizado")]
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HabitStatus {
    #[serde(rename = "Completado")]
    Completed,
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En progreso")]
    InProgress,
    #[serde(rename = "Cancelado")]
    Cancelled,
    #[serde(rename = "Reprogramado")]
    Rescheduled,
    #[serde(rename = "Inspirado")]
    Inspired,
}

/// Raw create/update payload as received from the transport layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HabitInput {
    #[serde(rename = "habit")]
    pub name: Option<String>,
    pub frequency: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "associatedProject")]
    pub associated_project: Option<String>,
}

/// Typed output of field validation, input to normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitFields {
    pub name: String,
    pub frequency: HabitFrequency,
    pub status: HabitStatus,
    pub notes: Option<String>,
}

/// Canonical persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRecord {
    #[serde(rename = "habit")]
    pub name: String,
    pub frequency: HabitFrequency,
    pub status: HabitStatus,
    /// Always persisted, empty string when not supplied.
    pub notes: String,
    /// Always persisted, null when the habit is not linked to a project.
    #[serde(rename = "associatedProject")]
    pub associated_project: Option<DocId>,
}

fn parse_frequency(value: &str) -> Option<HabitFrequency> {
    match value {
        "Diario" => Some(HabitFrequency::Daily),
        "Semanal" => Some(HabitFrequency::Weekly),
        "Mensual" => Some(HabitFrequency::Monthly),
        "Ocasional" => Some(HabitFrequency::Occasional),
        "2 veces/semana" => Some(HabitFrequency::TwiceWeekly),
        "3 veces/semana" => Some(HabitFrequency::ThriceWeekly),
        "Quincenal" => Some(HabitFrequency::Biweekly),
        "Bimestral" => Some(HabitFrequency::Bimonthly),
        "Anual" => Some(HabitFrequency::Yearly),
        "Personalizado" => Some(HabitFrequency::Custom),
        _ => None,
    }
}

fn parse_status(value: &str) -> Option<HabitStatus> {
    match value {
        "Completado" => Some(HabitStatus::Completed),
        "Pendiente" => Some(HabitStatus::Pending),
        "En progreso" => Some(HabitStatus::InProgress),
        "Cancelado" => Some(HabitStatus::Cancelled),
        "Reprogramado" => Some(HabitStatus::Rescheduled),
        "Inspirado" => Some(HabitStatus::Inspired),
        _ => None,
    }
}

/// Schema binding for the generic CRUD pipeline.
pub struct HabitResource;

impl ResourceSchema for HabitResource {
    const COLLECTION: Collection = Collection::Habits;
    type Input = HabitInput;
    type Fields = HabitFields;
    type Record = HabitRecord;

    fn validate(input: &HabitInput) -> ValidationResult<HabitFields> {
        let name = require_text("habit", input.name.as_deref())?;
        let frequency = require_text("frequency", input.frequency.as_deref())?;
        let status = require_text("status", input.status.as_deref())?;

        let frequency = require_member("frequency", frequency, FREQUENCY_VALUES, parse_frequency)?;
        let status = require_member("status", status, STATUS_VALUES, parse_status)?;

        Ok(HabitFields {
            name,
            frequency,
            status,
            notes: input.notes.clone(),
        })
    }

    fn references(input: &HabitInput) -> ReferenceSpec {
        ReferenceSpec::Single {
            target: Collection::Projects,
            id: input
                .associated_project
                .as_deref()
                .filter(|id| !id.is_empty())
                .map(DocId::from),
        }
    }

    fn normalize(fields: HabitFields, refs: ResolvedReferences) -> HabitRecord {
        HabitRecord {
            name: fields.name,
            frequency: fields.frequency,
            status: fields.status,
            notes: fields.notes.unwrap_or_default(),
            associated_project: refs.single,
        }
    }

    fn expansion() -> Option<ExpandedReference> {
        Some(ExpandedReference {
            field: "associatedProject",
            target: Collection::Projects,
            kind: ReferenceKind::Single,
        })
    }
}
