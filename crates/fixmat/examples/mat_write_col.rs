//! Overwrite every column of a matrix with the same vector
//!
//! Run with: cargo run -p fixmat --example mat_write_col

use fixmat::prelude::*;

type M = Mat<i8, 4, 4>;
type V = Vector<i8, 4>;

fn write_cols(a: &mut M, b: &V) {
    for i in 0..4 {
        a.set_col(i, b);
    }
}

fn main() -> anyhow::Result<()> {
    let mut a = M::from_slice(&(0..16).collect::<Vec<i8>>())?;
    let b = V::from_slice(&[0, 1, 2, 3])?;

    a.print("A before = ");
    write_cols(&mut a, &b);
    a.print("A after = ");

    for c in 0..4 {
        anyhow::ensure!(a.col_(c) == b, "column {} was not written", c);
    }
    Ok(())
}
