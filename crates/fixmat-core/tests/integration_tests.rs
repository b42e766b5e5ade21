//! Integration tests for fixmat-core
//!
//! The multiplication and addition oracles compare every structural type
//! pair against a dense reference for all scheduled sizes. The remaining
//! tests walk through end-to-end scenarios.

use fixmat_core::{kind, Compact, FxP, Mat, MatError, MatType, MulWith, Structure, SumWith, Vector};

/// Deterministic compact buffer with positive and negative values
fn sample<S: Compact<N, N>, const N: usize>(seed: i64) -> Mat<i64, N, N, S> {
    let values: Vec<i64> = (0..Mat::<i64, N, N, S>::SIZE)
        .map(|i| ((i as i64) * 7 + seed * 3) % 11 - 5)
        .collect();
    Mat::from_slice(&values).unwrap()
}

fn dense<S: Compact<N, N>, const N: usize>(m: &Mat<i64, N, N, S>) -> Mat<i64, N, N> {
    Mat::from_read(m)
}

fn check_mul<L, R, const N: usize>()
where
    L: MulWith<R> + Compact<N, N>,
    R: Compact<N, N>,
    <L as MulWith<R>>::Output: Compact<N, N>,
{
    let lhs = sample::<L, N>(1);
    let rhs = sample::<R, N>(2);
    let reference = dense(&lhs) * dense(&rhs);

    let expected_kind = L::KIND.mul_type(R::KIND, N, N, N);
    assert_eq!(
        <<L as MulWith<R>>::Output as Structure>::KIND,
        expected_kind,
        "{} x {} at n = {}",
        L::KIND,
        R::KIND,
        N
    );

    let product = lhs * rhs;
    assert!(product == reference, "{} x {} at n = {}: {:?}", L::KIND, R::KIND, N, product);

    // into a dense destination every cell is computed
    let mut full = Mat::<i64, N, N>::zeros();
    full.mul(&lhs, &rhs);
    assert_eq!(full.as_slice(), reference.as_slice(), "{} x {} at n = {}", L::KIND, R::KIND, N);
}

fn check_add<L, R, const N: usize>()
where
    L: SumWith<R> + Compact<N, N>,
    R: Compact<N, N>,
    <L as SumWith<R>>::Output: Compact<N, N>,
{
    let lhs = sample::<L, N>(3);
    let rhs = sample::<R, N>(4);
    assert_eq!(<<L as SumWith<R>>::Output as Structure>::KIND, L::KIND.sum_type(R::KIND));

    let sum = lhs + rhs;
    assert!(sum == dense(&lhs) + dense(&rhs), "{} + {} at n = {}", L::KIND, R::KIND, N);
    let mut back = Mat::<i64, N, N, L>::zeros();
    back.sub(&sum, &rhs);
    assert_eq!(back.as_slice(), lhs.as_slice(), "{} + {} - {} at n = {}", L::KIND, R::KIND, R::KIND, N);
}

fn check_restricted<L: Compact<4, 4>, R: Compact<4, 4>, D: Compact<4, 4>>() {
    let lhs = sample::<L, 4>(5);
    let rhs = sample::<R, 4>(6);
    let reference = dense(&lhs) * dense(&rhs);
    let mut out = Mat::<i64, 4, 4, D>::filled(77);
    out.mul(&lhs, &rhs);
    let expected = Mat::<i64, 4, 4, D>::from_read(&reference);
    assert_eq!(out.as_slice(), expected.as_slice(), "{} x {} into {}", L::KIND, R::KIND, D::KIND);
}

macro_rules! for_each_size {
    ($check:ident, $l:ty, $r:ty) => {
        $check::<$l, $r, 1>();
        $check::<$l, $r, 2>();
        $check::<$l, $r, 3>();
        $check::<$l, $r, 4>();
        $check::<$l, $r, 5>();
        $check::<$l, $r, 6>();
        $check::<$l, $r, 7>();
        $check::<$l, $r, 8>();
    };
}

macro_rules! for_each_kind {
    ($mac:ident!($($prefix:tt)*)) => {
        $mac!($($prefix)* kind::Normal);
        $mac!($($prefix)* kind::Diagonal);
        $mac!($($prefix)* kind::Scalar);
        $mac!($($prefix)* kind::Upper);
        $mac!($($prefix)* kind::Lower);
        $mac!($($prefix)* kind::SUpper);
        $mac!($($prefix)* kind::SLower);
        $mac!($($prefix)* kind::Sym);
        $mac!($($prefix)* kind::ASym);
    };
}

macro_rules! sizes_for_rhs {
    ($check:ident, $l:ty, $r:ty) => {
        for_each_size!($check, $l, $r)
    };
}

macro_rules! pairs_for_lhs {
    ($check:ident, $l:ty) => {
        for_each_kind!(sizes_for_rhs!($check, $l,))
    };
}

macro_rules! restricted_for_rhs {
    ($l:ty, $r:ty, $d:ty) => {
        check_restricted::<$l, $r, $d>()
    };
}

macro_rules! destinations_for_pair {
    ($l:ty, $r:ty) => {
        for_each_kind!(restricted_for_rhs!($l, $r,))
    };
}

macro_rules! restricted_for_lhs {
    ($l:ty) => {
        for_each_kind!(destinations_for_pair!($l,))
    };
}

#[test]
fn test_mul_oracle_all_kind_pairs() {
    for_each_kind!(pairs_for_lhs!(check_mul,));
}

#[test]
fn test_add_oracle_all_kind_pairs() {
    for_each_kind!(pairs_for_lhs!(check_add,));
}

#[test]
fn test_mul_into_every_destination() {
    for_each_kind!(restricted_for_lhs!());
}

#[test]
fn test_scenario_vector_sum() {
    let a = Vector::<i32, 2>::from_slice(&[2, 3]).unwrap();
    let b = Vector::<i32, 2>::from_slice(&[5, 6]).unwrap();
    assert_eq!((a + b).as_slice(), &[7, 9]);
}

#[test]
fn test_scenario_mat_vec() {
    let a = Mat::<i32, 4, 4>::from_slice(&(0..16).collect::<Vec<_>>()).unwrap();
    let v = Vector::<i32, 4>::from_slice(&[0, 1, 2, 3]).unwrap();
    assert_eq!((a * v).as_slice(), &[14, 38, 62, 86]);
}

#[test]
fn test_scenario_upper_square() {
    let u = Mat::<i32, 4, 4, kind::Upper>::from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();
    let square = u * u;
    let reference = Mat::<i32, 4, 4>::from_read(&u) * Mat::<i32, 4, 4>::from_read(&u);
    assert_eq!(square.kind(), MatType::Upper);
    assert_eq!(square, reference);
    for r in 0..4 {
        for c in 0..r {
            assert_eq!(square.get(r, c), 0);
        }
    }
}

#[test]
fn test_scenario_diagonal_square() {
    let d = Mat::<i32, 4, 4, kind::Diagonal>::from_slice(&[2, 3, 4, 5]).unwrap();
    let square = d * d;
    assert_eq!(square.kind(), MatType::Diagonal);
    assert_eq!(square.as_slice(), &[4, 9, 16, 25]);
}

#[test]
fn test_scenario_antisymmetric_reads() {
    let a = Mat::<i32, 4, 4, kind::ASym>::from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
    for i in 0..4 {
        assert_eq!(a.get(i, i), 0);
        for j in 0..4 {
            if i != j {
                assert_eq!(a.get(i, j), -a.get(j, i));
            }
        }
    }
    let mut b = a;
    assert!(matches!(b.try_set(2, 2, 1), Err(MatError::ReadOnlyCell { .. })));
}

fn sample_system() -> Mat<f64, 4, 4> {
    Mat::from_array([
        [10.0, -2.0, 1.0, 0.0],
        [1.0, -8.0, 2.0, 0.0],
        [0.0, 0.0, 11.0, -1.0],
        [0.0, 1.0, 2.0, 4.0],
    ])
}

fn exact_inverse() -> Mat<f64, 4, 4> {
    Mat::from_array([
        [0.10257831993346271, -0.025783199334627114, -0.004435819240365955, -0.0011089548100914888],
        [0.01275298031605212, -0.1275298031605212, 0.021070141391738288, 0.005267535347934572],
        [-0.0002772387025228722, 0.0027723870252287217, 0.08649847518713612, 0.02162461879678403],
        [-0.003049625727751594, 0.03049625727751594, -0.04851677294150263, 0.23787080676462435],
    ])
}

#[test]
fn test_scenario_newton_schulz_fixed_point() {
    let system = sample_system();
    let values: Vec<FxP<8, 8>> = system
        .as_slice()
        .iter()
        .map(|&v| FxP::<8, 8>::from_f64(v).unwrap())
        .collect();
    let fixed = Mat::<FxP<8, 8>, 4, 4>::from_slice(&values).unwrap();
    let inv = fixed.inv_nsa(4).unwrap();
    let exact = exact_inverse();
    for r in 0..4 {
        for c in 0..4 {
            let diff = (inv.get(r, c).to_f64() - exact.get(r, c)).abs();
            assert!(diff < 0.01, "({}, {}) differs by {}", r, c, diff);
        }
    }
}

#[test]
fn test_newton_schulz_error_decreases() {
    let system = sample_system();
    let identity = Mat::<f64, 4, 4>::identity();
    let mut previous = f64::INFINITY;
    for iter in 1..=6 {
        let inv = system.inv_nsa(iter).unwrap();
        let residual = system * inv - identity;
        let norm = (0..4)
            .map(|c| (0..4).map(|r| residual.get(r, c).abs()).sum::<f64>())
            .fold(0.0f64, f64::max);
        assert!(norm < previous, "iteration {}: {} >= {}", iter, norm, previous);
        previous = norm;
    }
    assert!(previous < 1e-4);
}

#[test]
fn test_transpose_involution() {
    let n = sample::<kind::Normal, 5>(1);
    assert_eq!(n.t().t(), n);
    let s = sample::<kind::Sym, 5>(2);
    assert_eq!(s.t().t(), s);
    let d = sample::<kind::Diagonal, 5>(3);
    assert_eq!(d.t().t(), d);
    let k = sample::<kind::Scalar, 5>(4);
    assert_eq!(k.t().t(), k);
    let u = sample::<kind::Upper, 5>(5);
    let l: Mat<i64, 5, 5, kind::Lower> = u.t();
    assert_eq!(l.t(), u);
    let su = sample::<kind::SUpper, 5>(6);
    let sl: Mat<i64, 5, 5, kind::SLower> = su.t();
    assert_eq!(sl.t(), su);
    let a = sample::<kind::ASym, 5>(7);
    assert_eq!(a.t().t(), a);
    assert_eq!(a.t(), -a);
}

/// Normal matrix whose cell `(r, c)` is `f(r, c)`
fn logical<const R: usize, const C: usize>(f: impl Fn(usize, usize) -> i64) -> Mat<i64, R, C> {
    Mat::from_array(std::array::from_fn(|r| std::array::from_fn(|c| f(r, c))))
}

#[test]
fn test_view_materialization() {
    fn check<S: Compact<4, 4>>() {
        let m = sample::<S, 4>(1);
        let at = |r: usize, c: usize| m.get(r, c);
        let kind = S::KIND;

        let same = logical::<4, 4>(at);
        assert_eq!(m.view().as_mat(), same, "view of {}", kind);

        let negated = logical::<4, 4>(|r, c| -at(r, c));
        assert_eq!(m.opp_().as_mat(), negated, "opp_ of {}", kind);
        assert_eq!(m.negated(), negated, "negated {}", kind);

        let transposed = logical::<4, 4>(|r, c| at(c, r));
        assert_eq!(m.t_().as_mat(), transposed, "t_ of {}", kind);
        assert_eq!(m.t(), transposed, "t of {}", kind);

        let diagonal = logical::<4, 4>(|r, c| if r == c { at(r, r) } else { 0 });
        assert_eq!(m.diag_mat_().as_mat(), diagonal, "diag_mat_ of {}", kind);
        assert_eq!(m.diag_mat(), diagonal, "diag_mat of {}", kind);

        let diag_col = logical::<4, 1>(|r, _| at(r, r));
        assert_eq!(m.diag_vec_().as_mat(), diag_col, "diag_vec_ of {}", kind);
        assert_eq!(m.diag_vec(), diag_col, "diag_vec of {}", kind);
        let diag_row = logical::<1, 4>(|_, c| at(c, c));
        assert_eq!(m.diag_row_vec_().as_mat(), diag_row, "diag_row_vec_ of {}", kind);
        assert_eq!(m.diag_row_vec(), diag_row, "diag_row_vec of {}", kind);

        let off = logical::<4, 4>(|r, c| if r == c { 0 } else { at(r, c) });
        assert_eq!(m.off_diag_().as_mat(), off, "off_diag_ of {}", kind);
        assert_eq!(m.off_diag(), off, "off_diag of {}", kind);

        let row = logical::<1, 4>(|_, c| at(2, c));
        assert_eq!(m.row_(2).as_mat(), row, "row_ of {}", kind);
        assert_eq!(m.row(2), row, "row of {}", kind);
        let col = logical::<4, 1>(|r, _| at(r, 3));
        assert_eq!(m.col_(3).as_mat(), col, "col_ of {}", kind);
        assert_eq!(m.col(3), col, "col of {}", kind);

        let rows = logical::<2, 4>(|r, c| at(1 + r, c));
        assert_eq!(m.rows_::<2>(1).as_mat(), rows, "rows_ of {}", kind);
        assert_eq!(m.rows::<2>(1), rows, "rows of {}", kind);
        let cols = logical::<4, 3>(|r, c| at(r, 1 + c));
        assert_eq!(m.cols_::<3>(1).as_mat(), cols, "cols_ of {}", kind);
        assert_eq!(m.cols::<3>(1), cols, "cols of {}", kind);

        let picked_rows = [3, 0];
        let rows_idx = logical::<2, 4>(|r, c| at(picked_rows[r], c));
        assert_eq!(m.rows_idx_(&picked_rows).as_mat(), rows_idx, "rows_idx_ of {}", kind);
        assert_eq!(m.rows_idx(&picked_rows), rows_idx, "rows_idx of {}", kind);
        let picked_cols = [2, 2, 1];
        let cols_idx = logical::<4, 3>(|r, c| at(r, picked_cols[c]));
        assert_eq!(m.cols_idx_(&picked_cols).as_mat(), cols_idx, "cols_idx_ of {}", kind);
        assert_eq!(m.cols_idx(&picked_cols), cols_idx, "cols_idx of {}", kind);
    }
    macro_rules! views {
        ($s:ty) => {
            check::<$s>()
        };
    }
    for_each_kind!(views!());
}

#[test]
fn test_layout_round_trip_all_kinds() {
    fn check<S: Compact<N, N>, const N: usize>() {
        let m = sample::<S, N>(9);
        let copy = Mat::<i64, N, N, S>::from_read(&dense(&m));
        assert_eq!(copy.as_slice(), m.as_slice(), "{} at n = {}", S::KIND, N);
    }
    macro_rules! sizes {
        ($s:ty) => {{
            check::<$s, 1>();
            check::<$s, 2>();
            check::<$s, 5>();
            check::<$s, 8>();
        }};
    }
    for_each_kind!(sizes!());
}
