use std::collections::BTreeMap;

use simplicial_complex::{ComplexConfig, GraphRepresentation, SimplicialComplex};
use simplicial_core::{labels, Label};
use simplicial_homology::{betti_number, HomologyExt};

fn filled_triangle() -> SimplicialComplex {
    let mut complex = SimplicialComplex::new();
    complex
        .add_simplex_with_basis(&labels(["a", "b", "c"]), Some("abc".into()), None)
        .unwrap();
    complex
}

fn hollow_tetrahedron() -> SimplicialComplex {
    let mut complex = SimplicialComplex::new();
    for triple in [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]] {
        let basis: Vec<Label> = triple.iter().map(|p| Label::from(*p)).collect();
        complex.ensure_simplex_with_basis(&basis, None, None).unwrap();
    }
    complex
}

fn expected(pairs: &[(usize, usize)]) -> BTreeMap<usize, usize> {
    pairs.iter().copied().collect()
}

#[test]
fn filled_triangle_is_contractible() {
    let complex = filled_triangle();
    assert_eq!(complex.betti_numbers(None), expected(&[(0, 1), (1, 0), (2, 0)]));
}

#[test]
fn hollow_triangle_has_one_loop() {
    let mut complex = filled_triangle();
    complex.delete_simplex(&Label::from("abc")).unwrap();
    assert_eq!(complex.betti_numbers(None), expected(&[(0, 1), (1, 1)]));
}

#[test]
fn isolated_points_are_separate_components() {
    let mut complex = SimplicialComplex::new();
    for _ in 0..4 {
        complex.add_simplex(&[], None, None).unwrap();
    }
    assert_eq!(complex.betti_numbers(None)[&0], 4);
    assert_eq!(complex.betti_number(1), 0);
}

#[test]
fn empty_complex_has_no_betti_numbers() {
    let complex = SimplicialComplex::new();
    assert!(complex.betti_numbers(None).is_empty());
    assert_eq!(betti_number(&complex, 0), 0);
}

#[test]
fn hollow_tetrahedron_encloses_a_void() {
    let complex = hollow_tetrahedron();
    assert_eq!(complex.number_of_simplices(), 14);
    assert_eq!(complex.betti_numbers(None), expected(&[(0, 1), (1, 0), (2, 1)]));

    let mut solid = complex.copy();
    let faces: Vec<Label> = solid.simplices_of_order(2);
    solid.add_simplex(&faces, Some("solid".into()), None).unwrap();
    assert_eq!(
        solid.betti_numbers(None),
        expected(&[(0, 1), (1, 0), (2, 0), (3, 0)])
    );
}

#[test]
fn explicit_orders_are_reported_even_when_empty() {
    let complex = filled_triangle();
    assert_eq!(
        complex.betti_numbers(Some(&[0, 5])),
        expected(&[(0, 1), (5, 0)])
    );
}

#[test]
fn graph_backend_square_has_one_loop() {
    let mut complex: SimplicialComplex<GraphRepresentation> =
        SimplicialComplex::with_backend(ComplexConfig::graph());
    let corners = labels(["a", "b", "c", "d"]);
    for (i, corner) in corners.iter().enumerate() {
        let next = corners[(i + 1) % corners.len()].clone();
        complex
            .ensure_simplex_with_basis(&[corner.clone(), next], None, None)
            .unwrap();
    }
    assert_eq!(complex.betti_numbers(None), expected(&[(0, 1), (1, 1)]));
}

#[test]
fn alternating_betti_sum_matches_euler_characteristic() {
    for complex in [filled_triangle(), hollow_tetrahedron()] {
        let alternating: i64 = complex
            .betti_numbers(None)
            .into_iter()
            .map(|(order, betti)| {
                let betti = betti as i64;
                if order % 2 == 0 {
                    betti
                } else {
                    -betti
                }
            })
            .sum();
        assert_eq!(alternating, complex.euler_characteristic());
    }
}
