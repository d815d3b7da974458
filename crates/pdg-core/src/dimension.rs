//! Dimension construction with stable surrogate identifiers.
//!
//! [`DimensionBuilder`] turns the natural-key values extracted from fact rows
//! into an ordered dimension table plus a lookup mapping. Identifier
//! assignment is deterministic: distinct keys are sorted lexicographically on
//! the full key tuple and numbered `1..N`, with a reserved sentinel row
//! prepended. Downstream stages (fact linking, graph projection) rely on this
//! stability, so reproducibility here is a correctness property rather than a
//! nicety.

use crate::checksum::compute_checksum;
use crate::normalize::{self, UNKNOWN_TOKEN};
use crate::schema::DimensionKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Surrogate identifier of a dimension row.
///
/// The reserved value [`DimensionId::UNKNOWN`] marks the sentinel row; all
/// real rows carry consecutive positive identifiers. Keeping this a newtype
/// confines the numeric `-1` to serialization boundaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DimensionId(i64);

impl DimensionId {
    /// The sentinel identifier of the reserved "unknown" row.
    pub const UNKNOWN: DimensionId = DimensionId(-1);

    /// Wrap a raw identifier read back from storage.
    pub fn from_raw(id: i64) -> Self {
        DimensionId(id)
    }

    /// The raw integer value, `-1` for the sentinel.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Whether this is the sentinel identifier.
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a natural-key lookup against a [`DimensionMapping`].
///
/// An explicit enum rather than a magic `-1` scattered through comparisons:
/// callers decide what "unknown" means at their own boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLookup {
    /// The key names a real dimension row.
    Found(DimensionId),
    /// The key is blank, the sentinel token, or was never seen.
    Unknown,
}

impl KeyLookup {
    /// Collapse the lookup into an identifier, sentinel included.
    pub fn id(&self) -> DimensionId {
        match self {
            KeyLookup::Found(id) => *id,
            KeyLookup::Unknown => DimensionId::UNKNOWN,
        }
    }
}

/// A normalized natural key: one component per key column, in column order.
///
/// Ordering is derived, which gives exactly the lexicographic
/// full-tuple comparison the id-assignment algorithm calls for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NaturalKey(Vec<String>);

impl NaturalKey {
    /// Build a single-column key, normalizing the raw value.
    pub fn single(raw: &str) -> Self {
        NaturalKey(vec![normalize::normalize(raw)])
    }

    /// Build a composite key, normalizing each component.
    pub fn composite(parts: &[&str]) -> Self {
        NaturalKey(parts.iter().map(|p| normalize::normalize(p)).collect())
    }

    /// The sentinel key of the given width: every component is the token.
    pub fn unknown(width: usize) -> Self {
        NaturalKey(vec![UNKNOWN_TOKEN.to_string(); width])
    }

    /// A key is unknown when any component is the sentinel token: a color
    /// code without its breed code does not identify a color.
    pub fn is_unknown(&self) -> bool {
        self.0.iter().any(|p| p == UNKNOWN_TOKEN)
    }

    /// Key components in column order.
    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// One row of a dimension table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRow {
    /// Surrogate identifier.
    pub id: DimensionId,

    /// Natural key, one component per key column.
    pub key: NaturalKey,

    /// Descriptive attribute values, one per attribute column.
    pub attributes: Vec<String>,
}

/// A fully built dimension table: the sentinel row first, then real rows in
/// ascending natural-key order with consecutive ids `1..N`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionTable {
    /// Which dimension this table is.
    pub kind: DimensionKind,

    /// Rows, sentinel first.
    pub rows: Vec<DimensionRow>,
}

impl DimensionTable {
    /// Number of rows, sentinel included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when only the sentinel row is present.
    pub fn is_empty(&self) -> bool {
        self.rows.len() <= 1
    }

    /// SHA-256 checksum over the serialized rows.
    ///
    /// Two builds from identical input must produce identical checksums;
    /// the run manifest records them so reruns can be verified.
    pub fn checksum(&self) -> String {
        let mut buf = String::new();
        for row in &self.rows {
            buf.push_str(&row.id.to_string());
            for part in row.key.parts() {
                buf.push('\x1f');
                buf.push_str(part);
            }
            for attr in &row.attributes {
                buf.push('\x1f');
                buf.push_str(attr);
            }
            buf.push('\n');
        }
        compute_checksum(&buf)
    }
}

/// Lookup mapping from natural key to surrogate identifier.
#[derive(Debug, Clone)]
pub struct DimensionMapping {
    kind: DimensionKind,
    ids: HashMap<NaturalKey, DimensionId>,
}

impl DimensionMapping {
    /// Which dimension this mapping belongs to.
    pub fn kind(&self) -> DimensionKind {
        self.kind
    }

    /// Resolve a natural key.
    ///
    /// Total: sentinel keys and keys never seen during the build both come
    /// back as [`KeyLookup::Unknown`].
    pub fn resolve(&self, key: &NaturalKey) -> KeyLookup {
        if key.is_unknown() {
            return KeyLookup::Unknown;
        }
        match self.ids.get(key) {
            Some(id) => KeyLookup::Found(*id),
            None => KeyLookup::Unknown,
        }
    }

    /// Number of real (non-sentinel) keys in the mapping.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no real keys were seen.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Builds one dimension table from fact-row extractions.
#[derive(Debug)]
pub struct DimensionBuilder {
    kind: DimensionKind,
}

impl DimensionBuilder {
    /// Create a builder for the given dimension.
    pub fn new(kind: DimensionKind) -> Self {
        DimensionBuilder { kind }
    }

    /// Build the dimension table and its lookup mapping.
    ///
    /// `entries` is one `(key, attributes)` pair per fact-row occurrence, in
    /// source order; keys are expected to be normalized already (they are if
    /// built through [`NaturalKey`]). Duplicate keys keep the first-seen
    /// attributes. Sentinel keys are excluded from the table body; the
    /// reserved row is prepended unconditionally, so even an empty input
    /// yields a one-row table.
    pub fn build(&self, entries: &[(NaturalKey, Vec<String>)]) -> (DimensionTable, DimensionMapping) {
        // BTreeMap gives the ascending key order ids are assigned in;
        // first-seen attribute retention falls out of or_insert.
        let mut distinct: BTreeMap<&NaturalKey, &Vec<String>> = BTreeMap::new();
        for (key, attrs) in entries {
            if key.is_unknown() {
                continue;
            }
            distinct.entry(key).or_insert(attrs);
        }

        let width = self.kind.key_width();
        let attr_count = self.kind.attr_columns().len();

        let mut rows = Vec::with_capacity(distinct.len() + 1);
        rows.push(DimensionRow {
            id: DimensionId::UNKNOWN,
            key: NaturalKey::unknown(width),
            attributes: vec![UNKNOWN_TOKEN.to_string(); attr_count],
        });

        let mut ids = HashMap::with_capacity(distinct.len());
        for (ordinal, (key, attrs)) in distinct.into_iter().enumerate() {
            let id = DimensionId(ordinal as i64 + 1);
            rows.push(DimensionRow {
                id,
                key: key.clone(),
                attributes: attrs.clone(),
            });
            ids.insert(key.clone(), id);
        }

        log::debug!(
            "built dimension '{}': {} rows (+ sentinel)",
            self.kind,
            ids.len()
        );

        (
            DimensionTable {
                kind: self.kind,
                rows,
            },
            DimensionMapping {
                kind: self.kind,
                ids,
            },
        )
    }
}

#[cfg(test)]
#[path = "dimension_test.rs"]
mod tests;
