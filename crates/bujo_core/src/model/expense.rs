//! Expense resource: dated spending records with an optional project link.
//!
//! # Invariants
//! - `amount` is a non-negative number. A supplied `0` is valid and present;
//!   only an absent field fails the presence rule.

use super::{parse_date, require_member, require_text, ValidationError, ValidationResult};
use crate::resolve::{ExpandedReference, ReferenceKind, ReferenceSpec, ResolvedReferences};
use crate::service::resource_service::ResourceSchema;
use crate::store::{Collection, DocId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const CATEGORY_VALUES: &str = "Transporte|Alimentación|Educación|Salud|Servicios|Otros";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Transporte")]
    Transport,
    #[serde(rename = "Alimentación")]
    Food,
    #[serde(rename = "Educación")]
    Education,
    #[serde(rename = "Salud")]
    Health,
    #[serde(rename = "Servicios")]
    Services,
    #[serde(rename = "Otros")]
    Other,
}

/// Raw create/update payload as received from the transport layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseInput {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "associatedProject")]
    pub associated_project: Option<String>,
}

/// Typed output of field validation, input to normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Canonical persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub date: NaiveDate,
    /// Always persisted, empty string when not supplied.
    pub description: String,
    /// Always persisted, null when the expense is not linked to a project.
    #[serde(rename = "associatedProject")]
    pub associated_project: Option<DocId>,
}

fn parse_category(value: &str) -> Option<ExpenseCategory> {
    match value {
        "Transporte" => Some(ExpenseCategory::Transport),
        "Alimentación" => Some(ExpenseCategory::Food),
        "Educación" => Some(ExpenseCategory::Education),
        "Salud" => Some(ExpenseCategory::Health),
        "Servicios" => Some(ExpenseCategory::Services),
        "Otros" => Some(ExpenseCategory::Other),
        _ => None,
    }
}

/// Schema binding for the generic CRUD pipeline.
pub struct ExpenseResource;

impl ResourceSchema for ExpenseResource {
    const COLLECTION: Collection = Collection::Expenses;
    type Input = ExpenseInput;
    type Fields = ExpenseFields;
    type Record = ExpenseRecord;

    fn validate(input: &ExpenseInput) -> ValidationResult<ExpenseFields> {
        let category = require_text("category", input.category.as_deref())?;
        let amount = input
            .amount
            .ok_or(ValidationError::MissingField("amount"))?;
        let date = require_text("date", input.date.as_deref())?;

        let category = require_member("category", category, CATEGORY_VALUES, parse_category)?;
        if amount < 0.0 {
            return Err(ValidationError::NegativeAmount { amount });
        }
        let date = parse_date("date", &date)?;

        Ok(ExpenseFields {
            category,
            amount,
            date,
            description: input.description.clone(),
        })
    }

    fn references(input: &ExpenseInput) -> ReferenceSpec {
        ReferenceSpec::Single {
            target: Collection::Projects,
            id: input
                .associated_project
                .as_deref()
                .filter(|id| !id.is_empty())
                .map(DocId::from),
        }
    }

    fn normalize(fields: ExpenseFields, refs: ResolvedReferences) -> ExpenseRecord {
        ExpenseRecord {
            category: fields.category,
            amount: fields.amount,
            date: fields.date,
            description: fields.description.unwrap_or_default(),
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
