use super::*;
use std::collections::HashMap;

/// Toy backend over a hard-coded pedigree, used to exercise the comparison
/// harness itself.
struct FixedBackend {
    name: &'static str,
    triples: HashMap<(i64, u32), Vec<AncestorTriple>>,
}

impl AncestryBackend for FixedBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn ancestors(&self, root_id: i64, max_depth: u32) -> CoreResult<Vec<AncestorTriple>> {
        Ok(self
            .triples
            .get(&(root_id, max_depth))
            .cloned()
            .unwrap_or_default())
    }
}

fn triple(ancestor: i64, depth: u32, rel: Parentage) -> AncestorTriple {
    AncestorTriple::new(ancestor, depth, rel)
}

#[test]
fn test_triple_ordering_is_depth_then_id_then_relationship() {
    let mut triples = vec![
        triple(9, 2, Parentage::Father),
        triple(3, 1, Parentage::Mother),
        triple(3, 1, Parentage::Father),
        triple(2, 1, Parentage::Father),
    ];
    triples.sort();

    assert_eq!(
        triples,
        vec![
            triple(2, 1, Parentage::Father),
            triple(3, 1, Parentage::Father),
            triple(3, 1, Parentage::Mother),
            triple(9, 2, Parentage::Father),
        ]
    );
}

#[test]
fn test_parentage_labels_round_trip() {
    for rel in [Parentage::Father, Parentage::Mother] {
        assert_eq!(Parentage::from_edge_label(rel.edge_label()), Some(rel));
    }
    assert_eq!(Parentage::from_edge_label("HAS_SIBLING"), None);
}

#[test]
fn test_comparison_reports_equivalence() {
    let shared = vec![triple(2, 1, Parentage::Father), triple(3, 1, Parentage::Mother)];
    let left = FixedBackend {
        name: "left",
        triples: HashMap::from([((1, 1), shared.clone())]),
    };
    let right = FixedBackend {
        name: "right",
        triples: HashMap::from([((1, 1), shared)]),
    };

    let cmp = compare_backends(&left, &right, 1, 1).unwrap();
    assert!(cmp.is_equivalent());
    assert_eq!(cmp.matched, 2);
}

#[test]
fn test_comparison_reports_divergence_both_ways() {
    let left = FixedBackend {
        name: "left",
        triples: HashMap::from([((1, 2), vec![triple(2, 1, Parentage::Father)])]),
    };
    let right = FixedBackend {
        name: "right",
        triples: HashMap::from([((1, 2), vec![triple(3, 1, Parentage::Mother)])]),
    };

    let cmp = compare_backends(&left, &right, 1, 2).unwrap();
    assert!(!cmp.is_equivalent());
    assert_eq!(cmp.left_only, vec![triple(2, 1, Parentage::Father)]);
    assert_eq!(cmp.right_only, vec![triple(3, 1, Parentage::Mother)]);
    assert_eq!(cmp.matched, 0);
}
