//! The dimensional build: raw fact rows in, dimensional model out.

use crate::dimension::{DimensionBuilder, DimensionTable};
use crate::fact::{DimensionMappings, FactLinker, LinkedCat, RawCat};
use crate::schema::DimensionKind;
use std::collections::{BTreeMap, HashSet};

/// The complete output of one dimensional build: all five dimension tables,
/// their lookup mappings, and the linked fact rows. Nothing in here is
/// mutated after construction; a rerun rebuilds the whole model.
#[derive(Debug)]
pub struct DimensionalModel {
    pub dimensions: Vec<DimensionTable>,
    pub mappings: DimensionMappings,
    pub facts: Vec<LinkedCat>,
}

impl DimensionalModel {
    /// The table for one dimension.
    pub fn dimension(&self, kind: DimensionKind) -> &DimensionTable {
        self.dimensions
            .iter()
            .find(|t| t.kind == kind)
            .expect("model is built with all dimensions")
    }

    /// Checksums of every dimension table, keyed by table name. Recorded in
    /// the run manifest so a rerun can be verified byte-for-byte.
    pub fn dimension_checksums(&self) -> BTreeMap<String, String> {
        self.dimensions
            .iter()
            .map(|t| (t.kind.table_name().to_string(), t.checksum()))
            .collect()
    }
}

/// Build the dimensional model from raw fact rows.
///
/// Runs stages 2 and 3 of the pipeline: one [`DimensionBuilder`] pass per
/// dimension over the key/attribute extractions of every row, then a
/// [`FactLinker`] pass rewriting each row against the fresh mappings.
pub fn build_model(raws: &[RawCat]) -> DimensionalModel {
    let mut dimensions = Vec::with_capacity(DimensionKind::ALL.len());
    let mut mappings = Vec::with_capacity(DimensionKind::ALL.len());

    for kind in DimensionKind::ALL {
        let entries: Vec<_> = raws
            .iter()
            .flat_map(|raw| raw.dimension_entries(kind))
            .collect();
        let (table, mapping) = DimensionBuilder::new(kind).build(&entries);
        dimensions.push(table);
        mappings.push(mapping);
    }

    let mappings = DimensionMappings::new(mappings);
    let known_cats: HashSet<i64> = raws.iter().map(|raw| raw.id).collect();
    let linker = FactLinker::new(&mappings, known_cats);
    let facts: Vec<LinkedCat> = raws.iter().map(|raw| linker.link(raw)).collect();

    log::info!(
        "built dimensional model: {} facts, {} dimensions",
        facts.len(),
        dimensions.len()
    );

    DimensionalModel {
        dimensions,
        mappings,
        facts,
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
