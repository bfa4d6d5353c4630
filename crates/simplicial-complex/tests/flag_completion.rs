use simplicial_complex::{ComplexConfig, SimplicialComplex};
use simplicial_core::{labels, Label};

fn graph(points: &[&str], edges: &[(&str, &str)]) -> SimplicialComplex {
    let mut complex = SimplicialComplex::new();
    for point in points {
        complex.add_simplex(&[], Some((*point).into()), None).unwrap();
    }
    for (a, b) in edges {
        complex
            .add_simplex(&labels([*a, *b]), None, None)
            .unwrap();
    }
    complex
}

#[test]
fn square_with_diagonal_gains_two_triangles() {
    let mut complex = graph(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a"), ("a", "c")],
    );
    let added = complex.complete_flag().unwrap();
    assert_eq!(added.len(), 2);
    assert!(complex.contains_simplex_with_basis(&labels(["a", "b", "c"])));
    assert!(complex.contains_simplex_with_basis(&labels(["a", "c", "d"])));
    assert!(!complex.contains_simplex_with_basis(&labels(["b", "c", "d"])));
    complex.validate().unwrap();
}

#[test]
fn complete_graph_fills_to_a_tetrahedron() {
    let complex = graph(
        &["a", "b", "c", "d"],
        &[
            ("a", "b"),
            ("a", "c"),
            ("a", "d"),
            ("b", "c"),
            ("b", "d"),
            ("c", "d"),
        ],
    );
    let filled = complex.flag_complex().unwrap();
    assert_eq!(filled.number_of_simplices_of_order(2), 4);
    assert_eq!(filled.number_of_simplices_of_order(3), 1);
    assert_eq!(complex.number_of_simplices(), 10);
    assert!(filled > complex);
}

#[test]
fn completion_is_idempotent() {
    let mut complex = graph(
        &["a", "b", "c", "d", "e"],
        &[("a", "b"), ("b", "c"), ("a", "c"), ("c", "d"), ("d", "e"), ("c", "e")],
    );
    complex.complete_flag().unwrap();
    let once = complex.clone();
    let added = complex.complete_flag().unwrap();
    assert!(added.is_empty());
    assert_eq!(complex, once);
}

#[test]
fn growth_from_a_new_edge_only_touches_its_neighbourhood() {
    let mut complex = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
    complex.complete_flag().unwrap();
    assert_eq!(complex.max_order(), Some(1));

    let edge = complex
        .add_simplex(&labels(["a", "c"]), Some("ac".into()), None)
        .unwrap();
    let added = complex.grow_flag_complex(&[edge]).unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(complex.order_of(&added[0]).unwrap(), 2);
}

#[test]
fn growth_respects_the_order_limit() {
    let config = ComplexConfig {
        max_order: Some(2),
        ..ComplexConfig::default()
    };
    let mut complex = SimplicialComplex::with_config(config);
    for point in ["a", "b", "c", "d"] {
        complex.add_simplex(&[], Some(point.into()), None).unwrap();
    }
    let points = ["a", "b", "c", "d"];
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            complex.add_simplex(&labels([*a, *b]), None, None).unwrap();
        }
    }
    complex.complete_flag().unwrap();
    assert_eq!(complex.number_of_simplices_of_order(2), 4);
    assert_eq!(complex.max_order(), Some(2));
}

#[test]
fn isolated_points_gain_nothing() {
    let mut complex = graph(&["a", "b"], &[]);
    assert!(complex.complete_flag().unwrap().is_empty());
    assert!(complex.contains_simplex(&Label::from("a")));
}
