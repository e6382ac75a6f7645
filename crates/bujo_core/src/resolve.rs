//! Reference resolution against the live store.
//!
//! # Responsibility
//! - Confirm that every foreign identifier a payload carries points at an
//!   existing record, before anything is persisted.
//! - Expand stored references into their target documents for read paths.
//!
//! # Invariants
//! - Resolution performs exactly one store read per call (point lookup for a
//!   single reference, one batch query for a set) and never writes.
//! - A failed batch resolution names every missing identifier, not just the
//!   first one.
//! - An absent single reference or an empty id set is valid and resolves to
//!   "no reference", not an error.

use crate::store::{Collection, DocId, Store, StoreError, StoreResult};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outgoing references declared by a payload, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSpec {
    /// The resource holds no outgoing references.
    None,
    /// At most one reference to a record in `target`.
    Single {
        target: Collection,
        id: Option<DocId>,
    },
    /// A set of references into `target`. Duplicates collapse to one.
    Batch {
        target: Collection,
        ids: Vec<DocId>,
    },
}

/// Confirmed references, ready for normalization into the persisted shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedReferences {
    pub single: Option<DocId>,
    pub batch: Vec<DocId>,
}

/// Shape of the reference field a read path expands in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Single,
    Batch,
}

/// Stored reference field replaced by its target document(s) on reads.
#[derive(Debug, Clone, Copy)]
pub struct ExpandedReference {
    pub field: &'static str,
    pub target: Collection,
    pub kind: ReferenceKind,
}

#[derive(Debug)]
pub enum ResolveError {
    /// One or more referenced identifiers do not exist. User-fixable.
    Missing {
        collection: Collection,
        missing: Vec<DocId>,
    },
    Store(StoreError),
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing {
                collection,
                missing,
            } => write!(
                f,
                "referenced {collection} not found: {}",
                join_ids(missing)
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Missing { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ResolveError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub(crate) fn join_ids(ids: &[DocId]) -> String {
    ids.iter()
        .map(DocId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolves a payload's declared references against the live store.
pub fn resolve_references(
    store: &Store,
    spec: ReferenceSpec,
) -> Result<ResolvedReferences, ResolveError> {
    match spec {
        ReferenceSpec::None | ReferenceSpec::Single { id: None, .. } => {
            Ok(ResolvedReferences::default())
        }
        ReferenceSpec::Single {
            target,
            id: Some(id),
        } => {
            if !store.exists(target, &id)? {
                return Err(ResolveError::Missing {
                    collection: target,
                    missing: vec![id],
                });
            }
            Ok(ResolvedReferences {
                single: Some(id),
                ..ResolvedReferences::default()
            })
        }
        ReferenceSpec::Batch { target, ids } => {
            let ids = dedupe(ids);
            if ids.is_empty() {
                return Ok(ResolvedReferences::default());
            }

            let found = store.existing_ids(target, &ids)?;
            if found.len() != ids.len() {
                let missing = ids
                    .into_iter()
                    .filter(|id| !found.contains(id))
                    .collect::<Vec<_>>();
                return Err(ResolveError::Missing {
                    collection: target,
                    missing,
                });
            }

            Ok(ResolvedReferences {
                single: None,
                batch: ids,
            })
        }
    }
}

/// Expands a stored reference field into the referenced document(s).
///
/// A dangling single reference expands to null; dangling batch members are
/// omitted. Dangling references are an accepted state: deleting a referenced
/// record does not cascade into its referrers.
pub fn expand_document(
    store: &Store,
    expansion: &ExpandedReference,
    mut doc: Value,
) -> StoreResult<Value> {
    let Some(object) = doc.as_object_mut() else {
        return Ok(doc);
    };

    let expanded = match expansion.kind {
        ReferenceKind::Single => {
            match object.get(expansion.field).and_then(Value::as_str) {
                Some(id) => store
                    .find_raw(expansion.target, &DocId::from(id))?
                    .unwrap_or(Value::Null),
                None => Value::Null,
            }
        }
        ReferenceKind::Batch => {
            let ids: Vec<DocId> = object
                .get(expansion.field)
                .and_then(Value::as_array)
                .map(|ids| {
                    ids.iter()
                        .filter_map(Value::as_str)
                        .map(DocId::from)
                        .collect()
                })
                .unwrap_or_default();

            let mut targets = Vec::with_capacity(ids.len());
            for id in &ids {
                if let Some(target) = store.find_raw(expansion.target, id)? {
                    targets.push(target);
                }
            }
            Value::Array(targets)
        }
    };

    object.insert(expansion.field.to_string(), expanded);
    Ok(doc)
}

/// First occurrence wins; reference sets have set semantics.
fn dedupe(ids: Vec<DocId>) -> Vec<DocId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
