//! Static layout of the dimensional model.
//!
//! The five dimension tables and the cat fact table have a fixed column
//! layout shared by the warehouse DDL, the CSV exports, and the graph
//! projection. Everything that needs to agree on column names reads it from
//! here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five dimensions of the pedigree warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    Breed,
    Color,
    Country,
    Cattery,
    SourceDb,
}

impl DimensionKind {
    /// All dimensions, in the order they are built and exported.
    pub const ALL: [DimensionKind; 5] = [
        DimensionKind::Breed,
        DimensionKind::Color,
        DimensionKind::Country,
        DimensionKind::Cattery,
        DimensionKind::SourceDb,
    ];

    /// Warehouse table name for this dimension.
    pub fn table_name(&self) -> &'static str {
        match self {
            DimensionKind::Breed => "breeds",
            DimensionKind::Color => "colors",
            DimensionKind::Country => "countries",
            DimensionKind::Cattery => "catteries",
            DimensionKind::SourceDb => "source_dbs",
        }
    }

    /// File name used when exporting this dimension as CSV.
    pub fn csv_file(&self) -> &'static str {
        match self {
            DimensionKind::Breed => "breeds.csv",
            DimensionKind::Color => "colors.csv",
            DimensionKind::Country => "countries.csv",
            DimensionKind::Cattery => "catteries.csv",
            DimensionKind::SourceDb => "source_dbs.csv",
        }
    }

    /// Natural-key columns, in key-tuple order.
    ///
    /// Color is the one composite key: the same color code means different
    /// things under different breeds, so the code alone is not unique.
    pub fn key_columns(&self) -> &'static [&'static str] {
        match self {
            DimensionKind::Breed => &["breed_code"],
            DimensionKind::Color => &["breed_code", "color_code"],
            DimensionKind::Country => &["country_name"],
            DimensionKind::Cattery => &["cattery_name"],
            DimensionKind::SourceDb => &["source_db_name"],
        }
    }

    /// Descriptive (non-key) columns.
    pub fn attr_columns(&self) -> &'static [&'static str] {
        match self {
            DimensionKind::Breed => &["breed_name"],
            DimensionKind::Color => &["color_name"],
            DimensionKind::Country => &[],
            DimensionKind::Cattery => &[],
            DimensionKind::SourceDb => &[],
        }
    }

    /// Number of components in the natural-key tuple.
    pub fn key_width(&self) -> usize {
        self.key_columns().len()
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Foreign-key columns on the fact table, in schema order.
///
/// `country_origin_id` and `country_current_id` both reference the single
/// country dimension.
pub const FACT_FK_COLUMNS: [(&str, DimensionKind); 6] = [
    ("breed_id", DimensionKind::Breed),
    ("color_id", DimensionKind::Color),
    ("country_origin_id", DimensionKind::Country),
    ("country_current_id", DimensionKind::Country),
    ("cattery_id", DimensionKind::Cattery),
    ("source_db_id", DimensionKind::SourceDb),
];

/// Descriptive attribute columns on the fact table, in schema order.
pub const FACT_ATTR_COLUMNS: [&str; 7] = [
    "name",
    "date_of_birth",
    "gender",
    "registration_number",
    "title_before",
    "title_after",
    "chip",
];

/// Warehouse table name for the fact table.
pub const FACT_TABLE: &str = "cats";

/// CSV file name for the exported fact table.
pub const FACT_CSV_FILE: &str = "cats.csv";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_widths() {
        assert_eq!(DimensionKind::Breed.key_width(), 1);
        assert_eq!(DimensionKind::Color.key_width(), 2);
        for kind in DimensionKind::ALL {
            assert!(kind.key_width() >= 1);
        }
    }

    #[test]
    fn test_fact_fk_columns_cover_all_dimensions() {
        for kind in DimensionKind::ALL {
            assert!(
                FACT_FK_COLUMNS.iter().any(|(_, k)| *k == kind),
                "no foreign key column references {kind}"
            );
        }
    }
}
