use simplicial_complex::SimplicialComplex;
use simplicial_core::Label;
use simplicial_homology::{Chain, HomologyExt};
use proptest::prelude::*;

fn complex_from(simplices: &[Vec<u8>]) -> SimplicialComplex {
    let mut complex = SimplicialComplex::new();
    for points in simplices {
        let mut basis: Vec<Label> = points.iter().map(|p| Label::from(i64::from(*p))).collect();
        basis.sort();
        basis.dedup();
        complex.ensure_simplex_with_basis(&basis, None, None).unwrap();
    }
    complex
}

fn simplices() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0u8..7, 1..4), 1..12)
}

proptest! {
    #[test]
    fn boundary_of_boundary_vanishes(pieces in simplices()) {
        let complex = complex_from(&pieces);
        let top = complex.max_order().unwrap_or(0);
        for order in 1..=top + 1 {
            let lower = complex.boundary_operator(order);
            let upper = complex.boundary_operator(order + 1);
            prop_assert!(lower.multiply(&upper).unwrap().is_zero(), "order {}", order);
        }
        for simplex in complex.simplices(false) {
            let order = complex.order_of(&simplex).unwrap();
            let chain = Chain::from_simplices(order, [simplex]);
            let twice = complex.boundary(&complex.boundary(&chain).unwrap()).unwrap();
            prop_assert!(twice.is_empty());
        }
    }

    #[test]
    fn homology_basis_matches_betti(pieces in simplices()) {
        let complex = complex_from(&pieces);
        let betti = complex.betti_numbers(None);
        for (order, count) in &betti {
            let basis = complex.homology_basis(*order).unwrap();
            prop_assert_eq!(basis.len(), *count);
            for generator in &basis {
                prop_assert!(complex.boundary(generator).unwrap().is_empty());
            }
        }
        let alternating: i64 = betti
            .iter()
            .map(|(order, count)| if order % 2 == 0 { *count as i64 } else { -(*count as i64) })
            .sum();
        prop_assert_eq!(alternating, complex.euler_characteristic());
    }

    #[test]
    fn reductions_are_diagonal_and_tracked(pieces in simplices()) {
        let complex = complex_from(&pieces);
        for order in 0..=complex.max_order().unwrap_or(0) {
            let reduction = complex.smith_normal_form(order).unwrap();
            prop_assert_eq!(reduction.matrix.count_ones(), reduction.rank);
            prop_assert_eq!(reduction.rank, complex.boundary_operator(order).rank());
            for i in 0..reduction.rank {
                prop_assert!(reduction.matrix.get(i, i));
            }
            for (j, column) in reduction.columns.iter().enumerate() {
                let image = complex
                    .boundary(&Chain::from_simplices(order, column.iter().cloned()))
                    .unwrap();
                if j < reduction.rank {
                    prop_assert_eq!(image.simplices(), &reduction.rows[j]);
                } else {
                    prop_assert!(image.is_empty());
                }
            }
        }
    }
}
