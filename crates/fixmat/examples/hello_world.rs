//! Sum of two integer vectors
//!
//! Run with: cargo run -p fixmat --example hello_world

use fixmat::prelude::*;

type V = Vector<i32, 2>;

fn hello_world(a: &V, b: &V) -> V {
    a + b
}

fn main() -> anyhow::Result<()> {
    let a = V::from_slice(&[2, 3])?;
    let b = V::from_slice(&[5, 6])?;
    let sum = hello_world(&a, &b);

    a.print("a = ");
    b.print("b = ");
    sum.print("a + b = ");
    Ok(())
}
