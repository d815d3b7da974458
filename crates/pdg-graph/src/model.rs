//! The property-graph schema: labels, relationship types, and the node/edge
//! records the projector produces.
//!
//! Pure data, no IO: these types cross the boundary between the projector,
//! the store, and the snapshot format.

use pdg_core::ancestry::Parentage;
use pdg_core::schema::DimensionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Node labels, one per entity type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Label {
    Cat,
    Breed,
    Color,
    Country,
    Cattery,
    SourceDb,
}

impl Label {
    /// The label a dimension's rows are tagged with.
    pub fn for_dimension(kind: DimensionKind) -> Self {
        match kind {
            DimensionKind::Breed => Label::Breed,
            DimensionKind::Color => Label::Color,
            DimensionKind::Country => Label::Country,
            DimensionKind::Cattery => Label::Cattery,
            DimensionKind::SourceDb => Label::SourceDb,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Cat => "Cat",
            Label::Breed => "Breed",
            Label::Color => "Color",
            Label::Country => "Country",
            Label::Cattery => "Cattery",
            Label::SourceDb => "SourceDB",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed relationships of the pedigree graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RelType {
    HasFather,
    HasMother,
    BelongsToBreed,
    HasColor,
    BornIn,
    LivesIn,
    BredBy,
    FromDatabase,
}

impl RelType {
    /// The edge type a fact foreign-key column projects to.
    pub fn for_fk_column(column: &str) -> Self {
        match column {
            "breed_id" => RelType::BelongsToBreed,
            "color_id" => RelType::HasColor,
            "country_origin_id" => RelType::BornIn,
            "country_current_id" => RelType::LivesIn,
            "cattery_id" => RelType::BredBy,
            "source_db_id" => RelType::FromDatabase,
            other => unreachable!("not a fact foreign-key column: {other}"),
        }
    }

    /// The parent relationship this edge type encodes, if any.
    pub fn parentage(&self) -> Option<Parentage> {
        match self {
            RelType::HasFather => Some(Parentage::Father),
            RelType::HasMother => Some(Parentage::Mother),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelType::HasFather => "HAS_FATHER",
            RelType::HasMother => "HAS_MOTHER",
            RelType::BelongsToBreed => "BELONGS_TO_BREED",
            RelType::HasColor => "HAS_COLOR",
            RelType::BornIn => "BORN_IN",
            RelType::LivesIn => "LIVES_IN",
            RelType::BredBy => "BRED_BY",
            RelType::FromDatabase => "FROM_DATABASE",
        }
    }
}

impl fmt::Display for RelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a node: entity-type label plus the entity's id. This is the
/// key match-or-create semantics operate on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeKey {
    pub label: Label,
    pub id: i64,
}

impl NodeKey {
    pub fn new(label: Label, id: i64) -> Self {
        NodeKey { label, id }
    }

    pub fn cat(id: i64) -> Self {
        NodeKey::new(Label::Cat, id)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label, self.id)
    }
}

/// One node as the projector emits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub key: NodeKey,
    pub props: BTreeMap<String, String>,
}

/// One edge as the projector emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeKey,
    pub rel: RelType,
    pub to: NodeKey,
}
