use simplicial_complex::{ComplexConfig, GraphRepresentation, SimplicialComplex};
use simplicial_core::{labels, Label, SimplicialError};

type GraphComplex = SimplicialComplex<GraphRepresentation>;

fn cycle(names: &[&str]) -> GraphComplex {
    let mut complex = GraphComplex::with_backend(ComplexConfig::graph());
    for name in names {
        complex.add_simplex(&[], Some((*name).into()), None).unwrap();
    }
    for (i, a) in names.iter().enumerate() {
        let b = names[(i + 1) % names.len()];
        complex.add_simplex(&labels([*a, b]), None, None).unwrap();
    }
    complex
}

#[test]
fn graph_backend_refuses_triangles() {
    let mut complex = cycle(&["a", "b", "c"]);
    let before = complex.number_of_simplices();
    let err = complex
        .add_simplex_with_basis(&labels(["a", "b", "c"]), None, None)
        .unwrap_err();
    assert!(
        matches!(err, SimplicialError::InvalidStructure(ref info) if info.code == "order-limit")
    );
    assert_eq!(complex.number_of_simplices(), before);
    assert!(complex.complete_flag().unwrap().is_empty());
}

#[test]
fn graph_backend_limit_applies_without_config() {
    let mut complex = GraphComplex::default();
    assert_eq!(complex.order_limit(), Some(1));
    let err = complex.add_simplex_of_order(2, None, None).unwrap_err();
    assert_eq!(err.code(), "order-limit");
}

#[test]
fn boundary_matches_the_reference_backend() {
    let graph = cycle(&["a", "b", "c", "d"]);
    let mut reference = SimplicialComplex::new();
    reference.add_simplices_from(&graph, None).unwrap();

    for order in 0..=3 {
        assert_eq!(
            graph.boundary_operator(order),
            reference.boundary_operator(order),
            "order {order}"
        );
    }
    assert_eq!(graph, reference);
    reference.validate().unwrap();
    graph.validate().unwrap();
}

#[test]
fn graph_queries_and_cascade() {
    let mut complex = cycle(&["a", "b", "c"]);
    let neighbours = complex
        .representation()
        .neighbours(&Label::from("a"))
        .unwrap();
    assert_eq!(neighbours.len(), 2);
    let edge = complex.simplex_with_basis(&labels(["a", "b"])).unwrap();
    assert_eq!(
        complex.basis_of(&edge).unwrap(),
        labels(["a", "b"])
            .into_iter()
            .collect::<std::collections::BTreeSet<_>>()
    );

    complex.delete_simplex(&Label::from("a")).unwrap();
    assert_eq!(complex.number_of_simplices(), 3);
    assert_eq!(complex.boundary_operator(1).shape(), (2, 1));
    complex.validate().unwrap();
}

#[test]
fn graph_relabel_keeps_incidence() {
    let mut complex = cycle(&["a", "b", "c"]);
    complex
        .relabel_simplex(&Label::from("a"), Label::from("z"))
        .unwrap();
    assert!(complex.contains_simplex_with_basis(&labels(["z", "b"])));
    assert_eq!(complex.cofaces(&Label::from("z")).unwrap().len(), 2);
    complex.validate().unwrap();
}

#[test]
fn basis_lookups_agree_across_backends() {
    let graph = cycle(&["a", "b", "c"]);
    let mut reference = SimplicialComplex::new();
    reference.add_simplices_from(&graph, None).unwrap();

    let edge = graph.simplex_with_basis(&labels(["a", "b"])).unwrap();
    let queries = [
        vec![Label::from("a")],
        vec![edge.clone()],
        labels(["a", "b"]),
        vec![Label::from("a"), edge],
        labels(["missing"]),
    ];
    for basis in &queries {
        assert_eq!(
            graph.simplex_with_basis(basis),
            reference.simplex_with_basis(basis),
            "{basis:?}"
        );
        assert_eq!(
            graph.contains_simplex_with_basis(basis),
            reference.contains_simplex_with_basis(basis),
            "{basis:?}"
        );
    }
    assert_eq!(graph.simplex_with_basis(&labels(["a"])), Some(Label::from("a")));
    let edge = graph.simplex_with_basis(&labels(["b", "c"])).unwrap();
    assert_eq!(graph.simplex_with_basis(&[edge]), None);
}
