//! Warehouse schema and typed IO against the relational backend.
//!
//! Owns the DDL for the five dimension tables, the cat fact table, and the
//! row-per-edge `parent_edges` view the recursive traversal runs against.
//! Tables are rebuilt in full on every pipeline run; the write happens inside
//! one transaction so a failed run never leaves a partial warehouse behind.

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use duckdb::types::Value;
use duckdb::Connection;
use pdg_core::dimension::{DimensionId, DimensionRow, DimensionTable, NaturalKey};
use pdg_core::fact::{LinkedCat, RawCat};
use pdg_core::pipeline::DimensionalModel;
use pdg_core::schema::{DimensionKind, FACT_ATTR_COLUMNS, FACT_CSV_FILE, FACT_FK_COLUMNS, FACT_TABLE};
use pdg_core::Parentage;
use std::path::{Path, PathBuf};

/// Staging table the raw source CSV is loaded into.
const RAW_TABLE: &str = "raw_cats";

/// Row-per-edge view over the fact table's parent references. Sentinel
/// references are filtered here, so every row is a real edge.
pub const PARENT_EDGES_VIEW: &str = "parent_edges";

/// Typed access to the pedigree warehouse inside a [`DuckDbBackend`].
pub struct Warehouse<'a> {
    db: &'a DuckDbBackend,
}

impl<'a> Warehouse<'a> {
    pub fn new(db: &'a DuckDbBackend) -> Self {
        Warehouse { db }
    }

    /// Load the raw source CSV and map it into [`RawCat`] rows.
    ///
    /// A missing file or a row without a usable id is fatal: dimension
    /// construction must not run over a partial extract.
    pub fn load_raw_cats(&self, path: &Path) -> DbResult<Vec<RawCat>> {
        if !path.exists() {
            return Err(DbError::SourceNotFound(path.display().to_string()));
        }

        let conn = self.db.lock()?;
        conn.execute_batch(&format!(
            "CREATE OR REPLACE TABLE {RAW_TABLE} AS \
             SELECT * FROM read_csv_auto('{}', all_varchar = true)",
            path.display()
        ))
        .map_err(|e| DbError::CsvError(e.to_string()))?;

        let select = format!(
            "SELECT TRY_CAST(id AS BIGINT), name, date_of_birth, gender, \
             registration_number, title_before, title_after, chip, \
             breed_code, breed_name, color_code, color_name, \
             country_origin, country_current, cattery_name, source_db_name, \
             TRY_CAST(father_id AS BIGINT), TRY_CAST(mother_id AS BIGINT) \
             FROM {RAW_TABLE}"
        );
        let mut stmt = conn
            .prepare(&select)
            .map_err(|e| DbError::CsvError(e.to_string()))?;

        let rows: Vec<(Option<i64>, RawCat)> = stmt
            .query_map([], |row| {
                let id: Option<i64> = row.get(0)?;
                let raw = RawCat {
                    id: id.unwrap_or(-1),
                    name: opt_text(row, 1)?,
                    date_of_birth: opt_text(row, 2)?,
                    gender: opt_text(row, 3)?,
                    registration_number: opt_text(row, 4)?,
                    title_before: opt_text(row, 5)?,
                    title_after: opt_text(row, 6)?,
                    chip: opt_text(row, 7)?,
                    breed_code: opt_text(row, 8)?,
                    breed_name: opt_text(row, 9)?,
                    color_code: opt_text(row, 10)?,
                    color_name: opt_text(row, 11)?,
                    country_origin: opt_text(row, 12)?,
                    country_current: opt_text(row, 13)?,
                    cattery_name: opt_text(row, 14)?,
                    source_db_name: opt_text(row, 15)?,
                    father_id: row.get(16)?,
                    mother_id: row.get(17)?,
                };
                Ok((id, raw))
            })
            .map_err(|e| DbError::CsvError(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| DbError::CsvError(e.to_string()))?;

        let mut cats = Vec::with_capacity(rows.len());
        for (idx, (id, raw)) in rows.into_iter().enumerate() {
            if id.is_none() {
                return Err(DbError::CsvError(format!(
                    "row {} has no usable id",
                    idx + 1
                )));
            }
            cats.push(raw);
        }

        log::info!("loaded {} raw fact rows from {}", cats.len(), path.display());
        Ok(cats)
    }

    /// Rewrite the warehouse from a freshly built model, transactionally.
    pub fn write_model(&self, model: &DimensionalModel) -> DbResult<()> {
        let conn = self.db.lock()?;

        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| DbError::ExecutionError(format!("BEGIN failed: {e}")))?;

        let result = write_model_inner(&conn, model);

        match &result {
            Ok(_) => {
                conn.execute_batch("COMMIT")
                    .map_err(|e| DbError::ExecutionError(format!("COMMIT failed: {e}")))?;
            }
            Err(_) => {
                let _ = conn.execute_batch("ROLLBACK");
            }
        }
        result
    }

    /// Read one dimension table back, sentinel row first.
    pub fn fetch_dimension(&self, kind: DimensionKind) -> DbResult<DimensionTable> {
        let conn = self.db.lock()?;
        let columns = dimension_columns(kind);
        let select = format!(
            "SELECT id, {} FROM {} ORDER BY id",
            columns.join(", "),
            kind.table_name()
        );

        let mut stmt = conn.prepare(&select)?;
        let key_width = kind.key_width();
        let rows: Vec<DimensionRow> = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let mut values = Vec::with_capacity(columns.len());
                for idx in 0..columns.len() {
                    values.push(opt_text(row, idx + 1)?);
                }
                let key_parts: Vec<&str> = values[..key_width].iter().map(String::as_str).collect();
                Ok(DimensionRow {
                    id: DimensionId::from_raw(id),
                    key: NaturalKey::composite(&key_parts),
                    attributes: values[key_width..].to_vec(),
                })
            })?
            .collect::<Result<_, _>>()
            .map_err(|e| DbError::RowMapping {
                table: kind.table_name().to_string(),
                message: e.to_string(),
            })?;

        Ok(DimensionTable { kind, rows })
    }

    /// Read the linked fact rows back.
    pub fn fetch_facts(&self) -> DbResult<Vec<LinkedCat>> {
        let conn = self.db.lock()?;
        let select = format!(
            "SELECT id, {}, {}, father_id, mother_id FROM {FACT_TABLE} ORDER BY id",
            FACT_ATTR_COLUMNS.join(", "),
            FACT_FK_COLUMNS.map(|(c, _)| c).join(", "),
        );

        let mut stmt = conn.prepare(&select)?;
        let facts: Vec<LinkedCat> = stmt
            .query_map([], |row| {
                let fk = |idx: usize| -> duckdb::Result<DimensionId> {
                    Ok(DimensionId::from_raw(row.get(idx)?))
                };
                let parent = |idx: usize| -> duckdb::Result<Option<i64>> {
                    let id: i64 = row.get(idx)?;
                    Ok((id != DimensionId::UNKNOWN.as_i64()).then_some(id))
                };
                Ok(LinkedCat {
                    id: row.get(0)?,
                    name: opt_text(row, 1)?,
                    date_of_birth: opt_text(row, 2)?,
                    gender: opt_text(row, 3)?,
                    registration_number: opt_text(row, 4)?,
                    title_before: opt_text(row, 5)?,
                    title_after: opt_text(row, 6)?,
                    chip: opt_text(row, 7)?,
                    breed_id: fk(8)?,
                    color_id: fk(9)?,
                    country_origin_id: fk(10)?,
                    country_current_id: fk(11)?,
                    cattery_id: fk(12)?,
                    source_db_id: fk(13)?,
                    father_id: parent(14)?,
                    mother_id: parent(15)?,
                })
            })?
            .collect::<Result<_, _>>()
            .map_err(|e| DbError::RowMapping {
                table: FACT_TABLE.to_string(),
                message: e.to_string(),
            })?;

        Ok(facts)
    }

    /// Export all warehouse tables as CSV files into `dir`.
    ///
    /// `id` leads every file; dimension rows come out sentinel-first and
    /// then in ascending natural-key order, which is exactly ascending id
    /// order by construction.
    pub fn export_csv(&self, dir: &Path) -> DbResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .map_err(|e| DbError::CsvError(format!("{}: {e}", dir.display())))?;

        let conn = self.db.lock()?;
        let mut written = Vec::new();

        for kind in DimensionKind::ALL {
            let path = dir.join(kind.csv_file());
            let select = format!(
                "SELECT id, {} FROM {} ORDER BY id",
                dimension_columns(kind).join(", "),
                kind.table_name()
            );
            copy_to(&conn, &select, &path)?;
            written.push(path);
        }

        let path = dir.join(FACT_CSV_FILE);
        let select = format!(
            "SELECT id, {}, {}, father_id, mother_id FROM {FACT_TABLE} ORDER BY id",
            FACT_ATTR_COLUMNS.join(", "),
            FACT_FK_COLUMNS.map(|(c, _)| c).join(", "),
        );
        copy_to(&conn, &select, &path)?;
        written.push(path);

        Ok(written)
    }
}

fn copy_to(conn: &Connection, select: &str, path: &Path) -> DbResult<()> {
    conn.execute_batch(&format!(
        "COPY ({select}) TO '{}' (HEADER, DELIMITER ',')",
        path.display()
    ))
    .map_err(|e| DbError::CsvError(format!("{}: {e}", path.display())))?;
    Ok(())
}

/// Key and attribute columns of a dimension, in table order.
fn dimension_columns(kind: DimensionKind) -> Vec<&'static str> {
    kind.key_columns()
        .iter()
        .chain(kind.attr_columns())
        .copied()
        .collect()
}

fn dimension_ddl(kind: DimensionKind) -> String {
    let mut cols = vec!["id BIGINT NOT NULL".to_string()];
    cols.extend(
        dimension_columns(kind)
            .iter()
            .map(|c| format!("{c} VARCHAR NOT NULL")),
    );
    format!(
        "CREATE OR REPLACE TABLE {} ({})",
        kind.table_name(),
        cols.join(", ")
    )
}

fn fact_ddl() -> String {
    let mut cols = vec!["id BIGINT NOT NULL".to_string()];
    cols.extend(FACT_ATTR_COLUMNS.map(|c| format!("{c} VARCHAR NOT NULL")));
    cols.extend(FACT_FK_COLUMNS.map(|(c, _)| format!("{c} BIGINT NOT NULL")));
    cols.push("father_id BIGINT NOT NULL".to_string());
    cols.push("mother_id BIGINT NOT NULL".to_string());
    format!("CREATE OR REPLACE TABLE {FACT_TABLE} ({})", cols.join(", "))
}

fn parent_edges_ddl() -> String {
    format!(
        "CREATE OR REPLACE VIEW {PARENT_EDGES_VIEW} AS \
         SELECT id AS child_id, father_id AS parent_id, '{father}' AS relationship \
         FROM {FACT_TABLE} WHERE father_id <> -1 \
         UNION ALL \
         SELECT id AS child_id, mother_id AS parent_id, '{mother}' AS relationship \
         FROM {FACT_TABLE} WHERE mother_id <> -1",
        father = Parentage::Father.edge_label(),
        mother = Parentage::Mother.edge_label(),
    )
}

fn write_model_inner(conn: &Connection, model: &DimensionalModel) -> DbResult<()> {
    for table in &model.dimensions {
        conn.execute_batch(&dimension_ddl(table.kind))?;

        let columns = dimension_columns(table.kind);
        let placeholders = vec!["?"; columns.len() + 1].join(", ");
        let insert = format!(
            "INSERT INTO {} (id, {}) VALUES ({})",
            table.kind.table_name(),
            columns.join(", "),
            placeholders
        );
        let mut stmt = conn.prepare(&insert)?;
        for row in &table.rows {
            let mut values = vec![Value::BigInt(row.id.as_i64())];
            values.extend(row.key.parts().iter().map(|p| Value::Text(p.clone())));
            values.extend(row.attributes.iter().map(|a| Value::Text(a.clone())));
            stmt.execute(duckdb::params_from_iter(values))?;
        }
    }

    conn.execute_batch(&fact_ddl())?;
    let insert = format!(
        "INSERT INTO {FACT_TABLE} (id, {}, {}, father_id, mother_id) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        FACT_ATTR_COLUMNS.join(", "),
        FACT_FK_COLUMNS.map(|(c, _)| c).join(", "),
    );
    let mut stmt = conn.prepare(&insert)?;
    let sentinel = DimensionId::UNKNOWN.as_i64();
    for cat in &model.facts {
        stmt.execute(duckdb::params![
            cat.id,
            cat.name,
            cat.date_of_birth,
            cat.gender,
            cat.registration_number,
            cat.title_before,
            cat.title_after,
            cat.chip,
            cat.breed_id.as_i64(),
            cat.color_id.as_i64(),
            cat.country_origin_id.as_i64(),
            cat.country_current_id.as_i64(),
            cat.cattery_id.as_i64(),
            cat.source_db_id.as_i64(),
            cat.father_id.unwrap_or(sentinel),
            cat.mother_id.unwrap_or(sentinel),
        ])?;
    }

    conn.execute_batch(&parent_edges_ddl())?;
    Ok(())
}

/// Read a column that may be NULL as an empty-string-defaulted String.
fn opt_text(row: &duckdb::Row<'_>, idx: usize) -> duckdb::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}
