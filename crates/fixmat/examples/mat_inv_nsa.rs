//! Approximate inverse of a diagonally dominant matrix in fixed point
//!
//! The first half calls `inv_nsa` directly. The second half spells out the
//! same series with views and operators: split `A` into its diagonal `D` and
//! off-diagonal part `E`, form `P = -D^-1 E`, sum its powers and scale.
//!
//! Run with: cargo run -p fixmat --example mat_inv_nsa

use fixmat::prelude::*;

type Dtype = FxP<8, 8>;
type M = Mat<Dtype, 4, 4>;

const ITERATIONS: usize = 4;

fn inv_nsa_expanded(a: &M, iter: usize) -> MatResult<M> {
    let d = a.diag_mat_();
    let e = a.off_diag_();
    let d_inv = d.as_mat().inv_diag()?;

    let product: M = -&d_inv * e;
    let mut a_inv = product;
    let mut sum = product;
    let mut tmp = M::zeros();
    for _ in 1..iter {
        tmp.mul(&a_inv, &product);
        a_inv = tmp;
        sum += tmp;
    }
    a_inv.mul(&sum, &d_inv);
    a_inv += d_inv;
    Ok(a_inv)
}

fn main() -> anyhow::Result<()> {
    let values = [10.0, -2.0, 1.0, 0.0, 1.0, -8.0, 2.0, 0.0, 0.0, 0.0, 11.0, -1.0, 0.0, 1.0, 2.0, 4.0];
    let fixed = values
        .iter()
        .map(|&v| Dtype::from_f64(v).ok_or_else(|| anyhow::anyhow!("{} is out of range", v)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let a = M::from_slice(&fixed)?;
    a.print("A = ");

    let a_inv = a.inv_nsa(ITERATIONS)?;
    a_inv.print("A_inv = ");

    let expanded = inv_nsa_expanded(&a, ITERATIONS)?;
    expanded.print("A_inv (expanded) = ");
    anyhow::ensure!(expanded == a_inv, "expanded series differs from inv_nsa");

    let mut check = M::zeros();
    check.mul(&a, &a_inv);
    println!("max |A * A_inv - I| = {:.4}", check.max_abs_diff(&M::identity()));
    Ok(())
}
