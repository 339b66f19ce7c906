//! Integration tests for lag-polynomial algebra on randomized factors.

use approx::assert_abs_diff_eq;
use lagtf_poly::{Expr, LagPolynomial, find_roots, gcd};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Candidate roots, spaced so products stay well conditioned.
const GRID: [f64; 8] = [-0.8, -0.6, -0.4, -0.2, 0.2, 0.4, 0.6, 0.8];

fn factor(root: f64) -> LagPolynomial {
    LagPolynomial::from_numeric(&[1.0, -root])
}

fn product(roots: &[f64]) -> LagPolynomial {
    roots
        .iter()
        .fold(LagPolynomial::one(), |acc, &r| &acc * &factor(r))
}

#[test]
fn gcd_recovers_shared_factor() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut grid = GRID.to_vec();
        grid.shuffle(&mut rng);
        let shared = grid[0];
        let a = product(&[shared, grid[1], grid[2]]);
        let b = product(&[shared, grid[3]]);

        let g = gcd(&a, &b, 1e-9).unwrap();
        let c = g.numeric_coeffs().unwrap();
        assert_eq!(c.len(), 2, "shared root {shared}, gcd {c:?}");
        assert_abs_diff_eq!(c[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[1], -shared, epsilon = 1e-7);
    }
}

#[test]
fn gcd_of_disjoint_factors_is_one() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let mut grid = GRID.to_vec();
        grid.shuffle(&mut rng);
        let a = product(&grid[..2]);
        let b = product(&grid[2..4]);
        assert!(gcd(&a, &b, 1e-9).unwrap().is_one());
    }
}

#[test]
fn exact_division_undoes_multiplication() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let mut grid = GRID.to_vec();
        grid.shuffle(&mut rng);
        let a = product(&grid[..3]);
        let b = product(&grid[3..5]);
        let q = (&a * &b).div_exact(&b, 1e-9).unwrap();
        let (qc, ac) = (q.numeric_coeffs().unwrap(), a.numeric_coeffs().unwrap());
        assert_eq!(qc.len(), ac.len());
        for (x, y) in qc.iter().zip(&ac) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-10);
        }
    }
}

#[test]
fn reversed_roots_are_the_factor_roots() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut grid = GRID.to_vec();
    grid.shuffle(&mut rng);
    let mut roots = grid[..4].to_vec();
    let p = product(&roots);

    let found = find_roots(&p.reversed().numeric_coeffs().unwrap(), 500).unwrap();
    roots.sort_by(f64::total_cmp);
    assert_eq!(found.len(), 4);
    for (z, r) in found.iter().zip(&roots) {
        assert_abs_diff_eq!(z.re, *r, epsilon = 1e-8);
        assert_abs_diff_eq!(z.im, 0.0, epsilon = 1e-8);
    }
}

#[test]
fn symbolic_factor_cancels_in_exact_division() {
    let shared = LagPolynomial::new(vec![Expr::one(), Expr::unknown("c")]);
    let num = &shared * &factor(0.5);
    let den = &shared * &factor(-0.3);

    let g = gcd(&num, &den, 1e-9).unwrap();
    assert_eq!(g, shared);
    let reduced_num = num.div_exact(&g, 1e-9).unwrap();
    let reduced_den = den.div_exact(&g, 1e-9).unwrap();
    assert_eq!(reduced_num.numeric_coeffs().unwrap(), vec![1.0, -0.5]);
    assert_eq!(reduced_den.numeric_coeffs().unwrap(), vec![1.0, 0.3]);
}

#[test]
fn series_of_product_over_factor_terminates() {
    let a = product(&[0.5, -0.4]);
    let b = factor(0.2);
    let h = (&a * &b).series(&b, 6, None).unwrap();
    let ac = a.numeric_coeffs().unwrap();
    for (j, hj) in h.iter().enumerate() {
        let expected = ac.get(j).copied().unwrap_or(0.0);
        assert_abs_diff_eq!(hj.as_constant().unwrap(), expected, epsilon = 1e-12);
    }
}
