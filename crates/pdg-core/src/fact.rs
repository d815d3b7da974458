//! Fact rows and the linking pass that rewrites them against the dimensions.

use crate::dimension::{DimensionId, DimensionMapping, NaturalKey};
use crate::normalize;
use crate::schema::DimensionKind;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A raw fact row as it arrives from the normalized source extract: cat
/// attributes plus the natural-key strings that will become foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCat {
    pub id: i64,
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub registration_number: String,
    pub title_before: String,
    pub title_after: String,
    pub chip: String,

    pub breed_code: String,
    pub breed_name: String,
    pub color_code: String,
    pub color_name: String,
    pub country_origin: String,
    pub country_current: String,
    pub cattery_name: String,
    pub source_db_name: String,

    pub father_id: Option<i64>,
    pub mother_id: Option<i64>,
}

impl RawCat {
    /// The `(key, attributes)` extractions this row contributes to a
    /// dimension. Country contributes two entries, one per country column;
    /// every other dimension contributes one.
    pub fn dimension_entries(&self, kind: DimensionKind) -> Vec<(NaturalKey, Vec<String>)> {
        match kind {
            DimensionKind::Breed => vec![(
                NaturalKey::single(&self.breed_code),
                vec![normalize::normalize(&self.breed_name)],
            )],
            DimensionKind::Color => vec![(
                NaturalKey::composite(&[&self.breed_code, &self.color_code]),
                vec![normalize::normalize(&self.color_name)],
            )],
            DimensionKind::Country => vec![
                (NaturalKey::single(&self.country_origin), Vec::new()),
                (NaturalKey::single(&self.country_current), Vec::new()),
            ],
            DimensionKind::Cattery => vec![(NaturalKey::single(&self.cattery_name), Vec::new())],
            DimensionKind::SourceDb => {
                vec![(NaturalKey::single(&self.source_db_name), Vec::new())]
            }
        }
    }
}

/// A fact row after linking: every descriptive reference replaced by a
/// surrogate identifier, parent references validated against the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedCat {
    pub id: i64,
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub registration_number: String,
    pub title_before: String,
    pub title_after: String,
    pub chip: String,

    pub breed_id: DimensionId,
    pub color_id: DimensionId,
    pub country_origin_id: DimensionId,
    pub country_current_id: DimensionId,
    pub cattery_id: DimensionId,
    pub source_db_id: DimensionId,

    /// Parent references; `None` when the source value was missing or named
    /// a cat absent from the dataset. Serialized as `-1` at the storage
    /// boundary.
    pub father_id: Option<i64>,
    pub mother_id: Option<i64>,
}

impl LinkedCat {
    /// Foreign-key identifier for a dimension-referencing column, by
    /// schema column name.
    pub fn fk(&self, column: &str) -> DimensionId {
        match column {
            "breed_id" => self.breed_id,
            "color_id" => self.color_id,
            "country_origin_id" => self.country_origin_id,
            "country_current_id" => self.country_current_id,
            "cattery_id" => self.cattery_id,
            "source_db_id" => self.source_db_id,
            other => unreachable!("not a fact foreign-key column: {other}"),
        }
    }
}

/// The full set of dimension mappings, one per [`DimensionKind`].
#[derive(Debug, Clone)]
pub struct DimensionMappings {
    mappings: HashMap<DimensionKind, DimensionMapping>,
}

impl DimensionMappings {
    /// Assemble from one mapping per dimension; panics in debug builds if a
    /// dimension is missing, which only a broken pipeline can cause.
    pub fn new(mappings: Vec<DimensionMapping>) -> Self {
        let mappings: HashMap<_, _> = mappings.into_iter().map(|m| (m.kind(), m)).collect();
        debug_assert_eq!(mappings.len(), DimensionKind::ALL.len());
        DimensionMappings { mappings }
    }

    /// The mapping for one dimension.
    pub fn get(&self, kind: DimensionKind) -> &DimensionMapping {
        &self.mappings[&kind]
    }
}

/// Rewrites raw fact rows to reference surrogate identifiers.
///
/// Linking is a total function: every lookup failure resolves to the
/// sentinel, so the output never contains a null or dangling foreign key.
#[derive(Debug)]
pub struct FactLinker<'a> {
    mappings: &'a DimensionMappings,
    known_cats: HashSet<i64>,
}

impl<'a> FactLinker<'a> {
    /// Create a linker over the given mappings and the set of cat ids
    /// present in the dataset (used to validate parent references).
    pub fn new(mappings: &'a DimensionMappings, known_cats: HashSet<i64>) -> Self {
        FactLinker {
            mappings,
            known_cats,
        }
    }

    /// Link one raw row.
    pub fn link(&self, raw: &RawCat) -> LinkedCat {
        let resolve = |kind: DimensionKind, key: NaturalKey| self.mappings.get(kind).resolve(&key).id();

        LinkedCat {
            id: raw.id,
            name: normalize::normalize(&raw.name),
            date_of_birth: normalize::normalize(&raw.date_of_birth),
            gender: normalize::normalize(&raw.gender),
            registration_number: normalize::normalize(&raw.registration_number),
            title_before: normalize::normalize(&raw.title_before),
            title_after: normalize::normalize(&raw.title_after),
            chip: normalize::normalize(&raw.chip),

            breed_id: resolve(DimensionKind::Breed, NaturalKey::single(&raw.breed_code)),
            color_id: resolve(
                DimensionKind::Color,
                NaturalKey::composite(&[&raw.breed_code, &raw.color_code]),
            ),
            country_origin_id: resolve(
                DimensionKind::Country,
                NaturalKey::single(&raw.country_origin),
            ),
            country_current_id: resolve(
                DimensionKind::Country,
                NaturalKey::single(&raw.country_current),
            ),
            cattery_id: resolve(DimensionKind::Cattery, NaturalKey::single(&raw.cattery_name)),
            source_db_id: resolve(
                DimensionKind::SourceDb,
                NaturalKey::single(&raw.source_db_name),
            ),

            father_id: self.parent_ref(raw.father_id),
            mother_id: self.parent_ref(raw.mother_id),
        }
    }

    /// Validate a parent reference against the dataset.
    fn parent_ref(&self, parent: Option<i64>) -> Option<i64> {
        parent.filter(|id| self.known_cats.contains(id))
    }
}

#[cfg(test)]
#[path = "fact_test.rs"]
mod tests;
