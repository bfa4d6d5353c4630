use std::collections::BTreeSet;

use serde_json::json;
use simplicial_complex::{canonical_hash, SimplicialComplex};
use simplicial_core::{labels, Attributes, Label, SimplicialError};

fn set<const N: usize>(names: [&str; N]) -> BTreeSet<Label> {
    names.into_iter().map(Label::from).collect()
}

fn point(complex: &mut SimplicialComplex, name: &str) -> Label {
    complex.add_simplex(&[], Some(Label::from(name)), None).unwrap()
}

fn hollow_triangle() -> SimplicialComplex {
    let mut complex = SimplicialComplex::new();
    for name in ["a", "b", "c"] {
        point(&mut complex, name);
    }
    complex
        .add_simplex(&labels(["a", "b"]), Some("ab".into()), None)
        .unwrap();
    complex
        .add_simplex(&labels(["b", "c"]), Some("bc".into()), None)
        .unwrap();
    complex
        .add_simplex(&labels(["a", "c"]), Some("ac".into()), None)
        .unwrap();
    complex
}

#[test]
fn auto_labels_follow_order_and_sequence() {
    let mut complex = SimplicialComplex::new();
    let first = complex.add_simplex(&[], None, None).unwrap();
    let second = complex.add_simplex(&[], None, None).unwrap();
    let edge = complex
        .add_simplex(&[first.clone(), second.clone()], None, None)
        .unwrap();
    assert_eq!(first, Label::from("0d1"));
    assert_eq!(second, Label::from("0d2"));
    assert_eq!(edge, Label::from("1d3"));
}

#[test]
fn auto_labels_skip_taken_names() {
    let mut complex = SimplicialComplex::new();
    complex.add_simplex(&[], Some("0d1".into()), None).unwrap();
    let fresh = complex.add_simplex(&[], None, None).unwrap();
    assert_eq!(fresh, Label::from("0d2"));
}

#[test]
fn faces_and_cofaces_are_wired() {
    let mut complex = hollow_triangle();
    let triangle = complex
        .add_simplex(&labels(["ab", "bc", "ac"]), Some("abc".into()), None)
        .unwrap();

    assert_eq!(complex.order_of(&triangle).unwrap(), 2);
    assert_eq!(complex.max_order(), Some(2));
    assert_eq!(complex.number_of_simplices(), 7);
    assert_eq!(complex.number_of_simplices_of_order(1), 3);
    assert_eq!(
        complex.faces(&triangle).unwrap(),
        set(["ab", "ac", "bc"])
    );
    assert_eq!(
        complex.cofaces(&Label::from("a")).unwrap(),
        set(["ab", "ac"])
    );
    assert_eq!(
        complex.basis_of(&triangle).unwrap(),
        set(["a", "b", "c"])
    );
    assert!(complex.faces(&Label::from("a")).unwrap().is_empty());
    complex.validate().unwrap();
}

#[test]
fn single_face_is_rejected() {
    let mut complex = SimplicialComplex::new();
    point(&mut complex, "a");
    let err = complex.add_simplex(&labels(["a"]), None, None).unwrap_err();
    assert!(matches!(err, SimplicialError::InvalidOrder(ref info) if info.code == "face-count"));
}

#[test]
fn repeated_faces_are_rejected() {
    let mut complex = SimplicialComplex::new();
    point(&mut complex, "a");
    let err = complex
        .add_simplex(&labels(["a", "a"]), None, None)
        .unwrap_err();
    assert!(matches!(err, SimplicialError::InvalidOrder(ref info) if info.code == "repeated-face"));
}

#[test]
fn faces_of_wrong_order_are_rejected() {
    let mut complex = hollow_triangle();
    let err = complex
        .add_simplex(&labels(["a", "ab"]), None, None)
        .unwrap_err();
    assert!(matches!(err, SimplicialError::InvalidOrder(ref info) if info.code == "face-order"));
}

#[test]
fn faces_must_bound_one_simplex() {
    let mut complex = hollow_triangle();
    point(&mut complex, "d");
    complex
        .add_simplex(&labels(["c", "d"]), Some("cd".into()), None)
        .unwrap();
    let err = complex
        .add_simplex(&labels(["ab", "bc", "cd"]), None, None)
        .unwrap_err();
    assert!(
        matches!(err, SimplicialError::InvalidStructure(ref info) if info.code == "not-a-simplex")
    );
}

#[test]
fn unknown_faces_and_duplicates_fail_atomically() {
    let mut complex = hollow_triangle();
    let before = canonical_hash(&complex).unwrap();

    let err = complex
        .add_simplex(&labels(["a", "zz"]), None, None)
        .unwrap_err();
    assert!(matches!(err, SimplicialError::NotFound(_)));

    let err = complex
        .add_simplex(&labels(["a", "b"]), Some("again".into()), None)
        .unwrap_err();
    assert!(matches!(err, SimplicialError::DuplicateBasis(_)));

    let err = complex
        .add_simplex(&[], Some("a".into()), None)
        .unwrap_err();
    assert!(matches!(err, SimplicialError::DuplicateLabel(_)));

    assert_eq!(complex.number_of_simplices(), 6);
    assert_eq!(canonical_hash(&complex).unwrap(), before);
    complex.validate().unwrap();
}

#[test]
fn attributes_attach_to_the_new_simplex_only() {
    let mut complex = hollow_triangle();
    let mut attributes = Attributes::new();
    attributes.insert("weight".into(), json!(2.5));
    let triangle = complex
        .add_simplex(&labels(["ab", "bc", "ac"]), None, Some(attributes.clone()))
        .unwrap();
    assert_eq!(complex.attributes(&triangle).unwrap(), &attributes);
    assert!(complex.attributes(&Label::from("ab")).unwrap().is_empty());

    complex
        .attributes_mut(&Label::from("ab"))
        .unwrap()
        .insert("colour".into(), json!("red"));
    assert_eq!(
        complex.attributes(&Label::from("ab")).unwrap().get("colour"),
        Some(&json!("red"))
    );
    complex
        .set_attributes(&Label::from("ab"), Attributes::new())
        .unwrap();
    assert!(complex.attributes(&Label::from("ab")).unwrap().is_empty());
}

#[test]
fn integer_and_string_labels_mix() {
    let mut complex = SimplicialComplex::new();
    complex.add_simplex(&[], Some(Label::from(1)), None).unwrap();
    complex.add_simplex(&[], Some(Label::from("two")), None).unwrap();
    let edge = complex
        .add_simplex(&[Label::from(1), Label::from("two")], Some(Label::from(12)), None)
        .unwrap();
    assert_eq!(edge.as_int(), Some(12));
    assert_eq!(
        complex.simplices_of_order(0),
        vec![Label::from(1), Label::from("two")]
    );
}
