use serde_json::json;
use simplicial_complex::SimplicialComplex;
use simplicial_core::{labels, Attributes, Label, Renaming, SimplicialError};

fn build(points: &[&str], edges: &[(&str, &str, &str)]) -> SimplicialComplex {
    let mut complex = SimplicialComplex::new();
    for point in points {
        complex.add_simplex(&[], Some((*point).into()), None).unwrap();
    }
    for (label, a, b) in edges {
        complex
            .add_simplex(&labels([*a, *b]), Some((*label).into()), None)
            .unwrap();
    }
    complex
}

fn weight(value: i64) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("w".into(), json!(value));
    attributes
}

#[test]
fn compose_merges_shared_simplices() {
    let mut left = build(&["a", "b", "c"], &[("ab", "a", "b"), ("bc", "b", "c"), ("ca", "c", "a")]);
    let mut right = build(&["b", "c", "d"], &[("bc", "b", "c"), ("cd", "c", "d"), ("db", "d", "b")]);
    left.set_attributes(&Label::from("bc"), weight(1)).unwrap();
    let mut incoming = weight(2);
    incoming.insert("x".into(), json!(3));
    right.set_attributes(&Label::from("bc"), incoming).unwrap();

    let composed = left.compose(&right).unwrap();
    assert_eq!(composed.number_of_simplices_of_order(0), 4);
    assert_eq!(composed.number_of_simplices_of_order(1), 5);
    let merged = composed.attributes(&Label::from("bc")).unwrap();
    assert_eq!(merged.get("w"), Some(&json!(2)));
    assert_eq!(merged.get("x"), Some(&json!(3)));
    assert!(left <= composed);
    assert!(right <= composed);
    assert_eq!(left.number_of_simplices(), 6);
    composed.validate().unwrap();
}

#[test]
fn compose_rejects_a_label_with_two_bases() {
    let left = build(&["a", "b"], &[("e", "a", "b")]);
    let right = build(&["a", "c"], &[("e", "a", "c")]);
    let err = left.compose(&right).unwrap_err();
    assert!(
        matches!(err, SimplicialError::InvalidStructure(ref info) if info.code == "basis-conflict")
    );
}

#[test]
fn compose_rejects_a_basis_with_two_labels() {
    let left = build(&["a", "b"], &[("e", "a", "b")]);
    let right = build(&["a", "b"], &[("f", "a", "b")]);
    let err = left.compose(&right).unwrap_err();
    assert!(matches!(err, SimplicialError::DuplicateBasis(_)));
}

#[test]
fn composing_disjoint_complexes_is_a_union() {
    let left = build(&["a", "b"], &[("ab", "a", "b")]);
    let right = build(&["c"], &[]);
    let composed = left.compose(&right).unwrap();
    assert_eq!(composed.number_of_simplices(), 4);
    assert!(composed.disjoint(&labels(["ab", "c"])).unwrap());
}

#[test]
fn add_simplices_from_needs_a_renaming_on_collision() {
    let mut target = build(&["a", "b"], &[("ab", "a", "b")]);
    let source = target.copy();

    let err = target.add_simplices_from(&source, None).unwrap_err();
    assert!(matches!(err, SimplicialError::DuplicateLabel(_)));
    assert_eq!(target.number_of_simplices(), 3);

    let mut renaming = Renaming::function(|label: &Label| Label::from(format!("copy-{label}")));
    let created = target
        .add_simplices_from(&source, Some(&mut renaming))
        .unwrap();
    assert_eq!(created.len(), 3);
    assert_eq!(target.number_of_simplices(), 6);
    assert!(target.contains_simplex(&Label::from("copy-ab")));
    assert_eq!(
        target.faces(&Label::from("copy-ab")).unwrap(),
        labels(["copy-a", "copy-b"])
            .into_iter()
            .collect::<std::collections::BTreeSet<_>>()
    );
    target.validate().unwrap();
}

#[test]
fn add_simplices_from_rejects_non_injective_renamings() {
    let mut target = SimplicialComplex::new();
    let source = build(&["a", "b"], &[]);
    let mut renaming = Renaming::function(|_: &Label| Label::from("same"));
    let err = target
        .add_simplices_from(&source, Some(&mut renaming))
        .unwrap_err();
    assert!(matches!(err, SimplicialError::DuplicateLabel(_)));
    assert_eq!(target.number_of_simplices(), 0);
}

#[test]
fn relabel_disjoint_then_compose_merges_nothing() {
    let mut left = build(&["a", "b"], &[("ab", "a", "b")]);
    let right = build(&["a", "c"], &[("ac", "a", "c")]);
    let changes = left.relabel_disjoint_from(&right).unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(
        changes.get(&Label::from("a")),
        Some(&Label::from("a->0d1"))
    );

    let composed = left.compose(&right).unwrap();
    assert_eq!(composed.number_of_simplices(), 6);
    composed.validate().unwrap();
}
