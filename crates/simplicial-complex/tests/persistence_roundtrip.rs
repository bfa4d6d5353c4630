use serde_json::json;
use simplicial_complex::{
    canonical_hash, from_bytes, from_json, read_json, to_bytes, to_json, write_json,
    ReferenceRepresentation, SimplicialComplex,
};
use simplicial_core::{labels, Attributes, Label, SimplicialError};
use tempfile::tempdir;

fn sample() -> SimplicialComplex {
    let mut complex = SimplicialComplex::new();
    let mut attributes = Attributes::new();
    attributes.insert("height".into(), json!(1.5));
    complex
        .add_simplex_with_basis(&labels(["a", "b", "c"]), Some("t".into()), None)
        .unwrap();
    complex.add_simplex(&[], Some(Label::from(7)), Some(attributes)).unwrap();
    complex
        .add_simplex(&[Label::from("a"), Label::from(7)], Some("a7".into()), None)
        .unwrap();
    complex
}

#[test]
fn json_roundtrip_preserves_structure_and_attributes() {
    let complex = sample();
    let json = to_json(&complex).unwrap();
    let restored: SimplicialComplex = from_json(&json).unwrap();

    assert_eq!(restored, complex);
    assert_eq!(canonical_hash(&restored).unwrap(), canonical_hash(&complex).unwrap());
    assert_eq!(
        restored.attributes(&Label::from(7)).unwrap().get("height"),
        Some(&json!(1.5))
    );
    restored.validate().unwrap();
}

#[test]
fn writer_lists_lower_orders_first() {
    let json = to_json(&sample()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let orders: Vec<u64> = value["simplices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["order"].as_u64().unwrap())
        .collect();
    let mut sorted = orders.clone();
    sorted.sort();
    assert_eq!(orders, sorted);
    assert_eq!(value["schema_version"]["major"], json!(1));
}

#[test]
fn loader_tolerates_forward_references() {
    let document = json!({
        "schema_version": {"major": 1, "minor": 0, "patch": 0},
        "simplices": [
            {"label": "ab", "order": 1, "faces": ["a", "b"], "attributes": {"w": 2}},
            {"label": "a", "order": 0, "faces": []},
            {"label": "b", "order": 0}
        ]
    });
    let complex: SimplicialComplex = from_json(&document.to_string()).unwrap();
    assert_eq!(complex.number_of_simplices(), 3);
    assert_eq!(complex.order_of(&Label::from("ab")).unwrap(), 1);
    assert_eq!(
        complex.attributes(&Label::from("ab")).unwrap().get("w"),
        Some(&json!(2))
    );
}

#[test]
fn loader_reports_engine_errors() {
    let wrong_count = json!({
        "schema_version": {"major": 1, "minor": 0, "patch": 0},
        "simplices": [
            {"label": "a", "order": 0, "faces": []},
            {"label": "b", "order": 0, "faces": []},
            {"label": "t", "order": 2, "faces": ["a", "b"]}
        ]
    });
    let err = from_json::<ReferenceRepresentation>(&wrong_count.to_string()).unwrap_err();
    assert!(matches!(err, SimplicialError::InvalidOrder(ref info) if info.code == "face-count"));

    let dangling = json!({
        "schema_version": {"major": 1, "minor": 0, "patch": 0},
        "simplices": [
            {"label": "a", "order": 0, "faces": []},
            {"label": "ab", "order": 1, "faces": ["a", "b"]}
        ]
    });
    let err = from_json::<ReferenceRepresentation>(&dangling.to_string()).unwrap_err();
    assert!(matches!(err, SimplicialError::NotFound(_)));

    let err = from_json::<ReferenceRepresentation>("{not json").unwrap_err();
    assert!(matches!(err, SimplicialError::Serde(ref info) if info.code == "deserialize-json"));
}

#[test]
fn newer_major_schema_is_rejected() {
    let document = json!({
        "schema_version": {"major": 2, "minor": 0, "patch": 0},
        "simplices": []
    });
    let err = from_json::<ReferenceRepresentation>(&document.to_string()).unwrap_err();
    assert_eq!(err.code(), "schema-version");
}

#[test]
fn binary_roundtrip() {
    let complex = sample();
    let bytes = to_bytes(&complex).unwrap();
    let restored: SimplicialComplex = from_bytes(&bytes).unwrap();
    assert_eq!(restored, complex);
    assert_eq!(
        restored.attributes(&Label::from(7)).unwrap(),
        complex.attributes(&Label::from(7)).unwrap()
    );

    let err = from_bytes::<ReferenceRepresentation>(&bytes[..bytes.len() / 2]).unwrap_err();
    assert_eq!(err.code(), "deserialize-bytes");
}

#[test]
fn file_roundtrip() {
    let dir = tempdir().expect("tmp dir");
    let path = dir.path().join("complex.json");
    let complex = sample();
    write_json(&complex, &path).unwrap();
    let restored: SimplicialComplex = read_json(&path).unwrap();
    assert_eq!(restored, complex);

    let err = read_json::<ReferenceRepresentation>(dir.path().join("missing.json")).unwrap_err();
    assert_eq!(err.code(), "read-file");
}

#[test]
fn hash_ignores_insertion_order() {
    let mut forward = SimplicialComplex::new();
    let mut backward = SimplicialComplex::new();
    for name in ["a", "b", "c"] {
        forward.add_simplex(&[], Some(name.into()), None).unwrap();
    }
    for name in ["c", "b", "a"] {
        backward.add_simplex(&[], Some(name.into()), None).unwrap();
    }
    for complex in [&mut forward, &mut backward] {
        complex
            .add_simplex(&labels(["a", "b"]), Some("ab".into()), None)
            .unwrap();
    }
    assert_eq!(canonical_hash(&forward).unwrap(), canonical_hash(&backward).unwrap());

    backward
        .add_simplex(&labels(["b", "c"]), Some("bc".into()), None)
        .unwrap();
    assert_ne!(canonical_hash(&forward).unwrap(), canonical_hash(&backward).unwrap());
}
