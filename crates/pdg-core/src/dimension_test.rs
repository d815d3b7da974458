use super::*;

fn breed_entries(codes: &[(&str, &str)]) -> Vec<(NaturalKey, Vec<String>)> {
    codes
        .iter()
        .map(|(code, name)| (NaturalKey::single(code), vec![name.to_string()]))
        .collect()
}

#[test]
fn test_ids_are_consecutive_in_key_order() {
    let entries = breed_entries(&[("PER", "Persian"), ("ABY", "Abyssinian"), ("NFO", "Norwegian Forest Cat")]);
    let (table, _) = DimensionBuilder::new(DimensionKind::Breed).build(&entries);

    // Sentinel first, then ABY < NFO < PER.
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[0].id, DimensionId::UNKNOWN);
    assert_eq!(table.rows[1].key.parts(), ["ABY"]);
    assert_eq!(table.rows[1].id.as_i64(), 1);
    assert_eq!(table.rows[2].key.parts(), ["NFO"]);
    assert_eq!(table.rows[2].id.as_i64(), 2);
    assert_eq!(table.rows[3].key.parts(), ["PER"]);
    assert_eq!(table.rows[3].id.as_i64(), 3);
}

#[test]
fn test_sentinel_invariant() {
    let entries = breed_entries(&[("PER", "Persian"), ("unknown", "whatever"), ("", "blank")]);
    let (table, _) = DimensionBuilder::new(DimensionKind::Breed).build(&entries);

    let sentinels: Vec<_> = table.rows.iter().filter(|r| r.id.is_unknown()).collect();
    assert_eq!(sentinels.len(), 1);
    assert_eq!(sentinels[0].key, NaturalKey::unknown(1));
    assert_eq!(sentinels[0].attributes, vec![UNKNOWN_TOKEN.to_string()]);
    assert!(table.rows.iter().all(|r| r.id.is_unknown() || r.id.as_i64() >= 1));
}

#[test]
fn test_empty_input_yields_sentinel_only_table() {
    let (table, mapping) = DimensionBuilder::new(DimensionKind::Cattery).build(&[]);

    assert!(table.is_empty());
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].id, DimensionId::UNKNOWN);
    assert!(mapping.is_empty());
}

#[test]
fn test_duplicate_keys_keep_first_seen_attributes() {
    let entries = breed_entries(&[("PER", "Persian"), ("PER", "Persian (typo)")]);
    let (table, _) = DimensionBuilder::new(DimensionKind::Breed).build(&entries);

    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1].attributes, vec!["Persian".to_string()]);
}

#[test]
fn test_determinism() {
    let entries = breed_entries(&[
        ("SIB", "Siberian"),
        ("PER", "Persian"),
        ("ABY", "Abyssinian"),
        ("SIB", "Siberian dup"),
    ]);
    let (a, _) = DimensionBuilder::new(DimensionKind::Breed).build(&entries);
    let (b, _) = DimensionBuilder::new(DimensionKind::Breed).build(&entries);

    assert_eq!(a.rows, b.rows);
    assert_eq!(a.checksum(), b.checksum());
}

#[test]
fn test_composite_key_sorts_on_full_tuple() {
    let entries = vec![
        (NaturalKey::composite(&["PER", "d"]), vec!["red".to_string()]),
        (NaturalKey::composite(&["ABY", "n"]), vec!["ruddy".to_string()]),
        (NaturalKey::composite(&["ABY", "a"]), vec!["blue".to_string()]),
    ];
    let (table, mapping) = DimensionBuilder::new(DimensionKind::Color).build(&entries);

    assert_eq!(table.rows[1].key.parts(), ["ABY", "a"]);
    assert_eq!(table.rows[2].key.parts(), ["ABY", "n"]);
    assert_eq!(table.rows[3].key.parts(), ["PER", "d"]);

    let looked_up = mapping.resolve(&NaturalKey::composite(&["ABY", "n"]));
    assert_eq!(looked_up, KeyLookup::Found(DimensionId::from_raw(2)));
}

#[test]
fn test_partially_unknown_composite_key_is_excluded() {
    let entries = vec![
        (NaturalKey::composite(&["PER", ""]), vec!["?".to_string()]),
        (NaturalKey::composite(&["PER", "d"]), vec!["red".to_string()]),
    ];
    let (table, mapping) = DimensionBuilder::new(DimensionKind::Color).build(&entries);

    assert_eq!(table.rows.len(), 2);
    assert_eq!(
        mapping.resolve(&NaturalKey::composite(&["PER", ""])),
        KeyLookup::Unknown
    );
}

#[test]
fn test_mapping_resolves_unknown_and_unseen_to_sentinel() {
    let entries = breed_entries(&[("PER", "Persian")]);
    let (_, mapping) = DimensionBuilder::new(DimensionKind::Breed).build(&entries);

    assert_eq!(mapping.resolve(&NaturalKey::single("PER")).id().as_i64(), 1);
    assert_eq!(mapping.resolve(&NaturalKey::single("unknown")).id(), DimensionId::UNKNOWN);
    assert_eq!(mapping.resolve(&NaturalKey::single("")).id(), DimensionId::UNKNOWN);
    assert_eq!(mapping.resolve(&NaturalKey::single("MCO")).id(), DimensionId::UNKNOWN);
}

#[test]
fn test_checksum_changes_with_content() {
    let (a, _) = DimensionBuilder::new(DimensionKind::Breed)
        .build(&breed_entries(&[("PER", "Persian")]));
    let (b, _) = DimensionBuilder::new(DimensionKind::Breed)
        .build(&breed_entries(&[("ABY", "Abyssinian")]));

    assert_ne!(a.checksum(), b.checksum());
}
