use super::*;
use crate::dimension::DimensionId;
use crate::fact::RawCat;
use crate::schema::FACT_FK_COLUMNS;

fn raw(id: i64, breed: &str, color: &str, origin: &str) -> RawCat {
    RawCat {
        id,
        name: format!("cat-{id}"),
        date_of_birth: "2018-01-01".to_string(),
        gender: "female".to_string(),
        registration_number: format!("R{id}"),
        title_before: "".to_string(),
        title_after: "".to_string(),
        chip: "".to_string(),
        breed_code: breed.to_string(),
        breed_name: format!("{breed} breed"),
        color_code: color.to_string(),
        color_name: format!("{color} color"),
        country_origin: origin.to_string(),
        country_current: origin.to_string(),
        cattery_name: "Cattery".to_string(),
        source_db_name: "registry".to_string(),
        father_id: None,
        mother_id: None,
    }
}

#[test]
fn test_model_builds_all_dimensions() {
    let raws = vec![raw(1, "NFO", "n", "Norway"), raw(2, "PER", "d", "Iran")];
    let model = build_model(&raws);

    assert_eq!(model.dimensions.len(), DimensionKind::ALL.len());
    assert_eq!(model.facts.len(), 2);
    for kind in DimensionKind::ALL {
        assert!(model.dimension(kind).rows[0].id.is_unknown());
    }
}

#[test]
fn test_model_is_deterministic() {
    let raws = vec![
        raw(3, "SIB", "ny", "Russia"),
        raw(1, "NFO", "n", "Norway"),
        raw(2, "NFO", "a", "Norway"),
    ];
    let a = build_model(&raws);
    let b = build_model(&raws);

    assert_eq!(a.dimension_checksums(), b.dimension_checksums());
    assert_eq!(a.facts, b.facts);
}

#[test]
fn test_fact_ids_reference_existing_dimension_rows() {
    let raws = vec![raw(1, "NFO", "n", "Norway"), raw(2, "", "", "")];
    let model = build_model(&raws);

    for fact in &model.facts {
        for (column, kind) in FACT_FK_COLUMNS {
            let id = fact.fk(column);
            let table = model.dimension(kind);
            assert!(
                table.rows.iter().any(|r| r.id == id),
                "{column} = {id} not present in {kind}"
            );
        }
    }
}

#[test]
fn test_empty_source_yields_sentinel_only_model() {
    let model = build_model(&[]);

    assert!(model.facts.is_empty());
    for kind in DimensionKind::ALL {
        let table = model.dimension(kind);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].id, DimensionId::UNKNOWN);
    }
}
