//! Integration tests for fixmat-kernels with fixmat-core
//!
//! These tests run the kernels on matrices, views and tensors built with
//! fixmat-core and check them against the core operations.

use fixmat_core::{kind, Compact, FxP, Mat, Tensor, Vector};
use fixmat_kernels::{argmax_4_2, merge_sort, merge_sort_into, sort, systolic_cycles, systolic_mul};

#[test]
fn test_sort_rows_of_a_matrix() {
    let mut m = Mat::<i32, 3, 4>::from_slice(&[9, 2, 7, 4, 0, 11, -3, 8, 5, 5, 1, 6]).unwrap();
    for r in 0..3 {
        let mut row = m.row(r);
        sort(&mut row);
        m.set_row(r, &row);
    }
    assert_eq!(m.as_slice(), &[2, 4, 7, 9, -3, 0, 8, 11, 1, 5, 5, 6]);
}

#[test]
fn test_sort_column_view_into_vector() {
    let m = Mat::<i32, 4, 2>::from_slice(&[4, 0, 1, 0, 3, 0, 2, 0]).unwrap();
    let mut col = Vector::<i32, 4>::zeros();
    merge_sort_into(&m.col_(0), &mut col);
    assert_eq!(col.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn test_sort_tensor_slices() {
    let mut t = Tensor::<i32, 3, 1, 2>::zeros();
    t[0] = Vector::from_slice(&[3, 2, 1]).unwrap();
    t[1] = Vector::from_slice(&[-1, 5, 0]).unwrap();
    for i in 0..2 {
        merge_sort(&mut t[i]);
    }
    assert_eq!(t[0].as_slice(), &[1, 2, 3]);
    assert_eq!(t[1].as_slice(), &[-1, 0, 5]);
}

#[test]
fn test_top_two_of_a_vector() {
    let scores = Vector::<f64, 4>::from_slice(&[0.12, 0.57, 0.08, 0.23]).unwrap();
    let values = [scores.get(0, 0), scores.get(1, 0), scores.get(2, 0), scores.get(3, 0)];
    let top = argmax_4_2(values, [0u8, 1, 2, 3], false);
    assert_eq!((top.first_index, top.second_index), (1, 3));
    assert_eq!(top.first, 0.57);
}

#[test]
fn test_systolic_matches_every_kind_pair_at_four() {
    fn check<L: Compact<4, 4>, R: Compact<4, 4>>() {
        let lhs: Vec<i32> = (0..Mat::<i32, 4, 4, L>::SIZE).map(|i| (i as i32 * 5) % 7 - 3).collect();
        let rhs: Vec<i32> = (0..Mat::<i32, 4, 4, R>::SIZE).map(|i| (i as i32 * 3) % 5 - 2).collect();
        let a = Mat::<i32, 4, 4, L>::from_slice(&lhs).unwrap();
        let b = Mat::<i32, 4, 4, R>::from_slice(&rhs).unwrap();
        let mut reference = Mat::<i32, 4, 4>::zeros();
        reference.mul(&a, &b);
        assert_eq!(systolic_mul(&a, &b), reference, "{} x {}", L::KIND, R::KIND);
    }
    check::<kind::Normal, kind::Upper>();
    check::<kind::Lower, kind::SUpper>();
    check::<kind::Sym, kind::ASym>();
    check::<kind::ASym, kind::Diagonal>();
    check::<kind::Scalar, kind::SLower>();
    check::<kind::Upper, kind::Sym>();
}

#[test]
fn test_systolic_fixed_point_matrix_vector() {
    let a = Mat::<FxP<8, 8>, 4, 4>::from_array([
        [10.0, -2.0, 1.0, 0.0],
        [1.0, -8.0, 2.0, 0.0],
        [0.0, 0.0, 11.0, -1.0],
        [0.0, 1.0, 2.0, 4.0],
    ]
    .map(|row| row.map(|v| FxP::<8, 8>::from_f64(v).unwrap())));
    let b = Vector::<FxP<8, 8>, 4>::from_slice(&[FxP::from_int(1), FxP::from_int(0), FxP::from_int(-1), FxP::from_int(2)])
        .unwrap();
    let c = systolic_mul(&a, &b);
    let got: Vec<f64> = c.as_slice().iter().map(|v| v.to_f64()).collect();
    assert_eq!(got, vec![9.0, -1.0, -13.0, 6.0]);
    assert_eq!(c, a * b);
}

#[test]
fn test_systolic_cycle_count() {
    assert_eq!(systolic_cycles(8, 8, 8), 22);
    assert_eq!(systolic_cycles(4, 4, 1), 7);
    assert_eq!(systolic_cycles(1, 1, 1), 1);
}
