//! Matrix-vector product with 8-bit integers
//!
//! Run with: cargo run -p fixmat --example mat_vec_multiplication

use fixmat::prelude::*;

type M = Mat<i8, 4, 4>;
type V = Vector<i8, 4>;

fn mat_vec(a: &M, b: &V) -> V {
    a * b
}

fn main() -> anyhow::Result<()> {
    let a = M::from_slice(&(0..16).collect::<Vec<i8>>())?;
    let b = V::from_slice(&[0, 1, 2, 3])?;
    let c = mat_vec(&a, &b);

    a.print("A = ");
    b.print("b = ");
    c.print("A * b = ");
    anyhow::ensure!(c.as_slice() == [14, 38, 62, 86], "unexpected product {}", c);
    Ok(())
}
