//! Three-stage pipeline of matrix tasks
//!
//! Each stage owns one matrix and computes `c = (A * A * b) % (A * A * b)`
//! for every vector it receives, handing the result to the next stage over a
//! channel. The stages run on scoped threads, so consecutive inputs overlap
//! in time the way pipelined hardware tasks do.
//!
//! Run with: cargo run -p fixmat --example task_level_pipelining

use std::sync::mpsc;
use std::thread;

use fixmat::prelude::*;

type Dtype = FxP<6, 2>;
type M = Mat<Dtype, 4, 4>;
type V = Vector<Dtype, 4>;

fn main_task(a: &M, b: &V) -> V {
    let tmp1: M = a * a;
    let tmp2: V = tmp1 * b;
    tmp2 % tmp2
}

fn fixed(values: [f64; 4]) -> anyhow::Result<V> {
    let mut v = V::zeros();
    for (i, x) in values.into_iter().enumerate() {
        let x = Dtype::from_f64(x).ok_or_else(|| anyhow::anyhow!("{} is out of range", x))?;
        v.set(i, 0, x);
    }
    Ok(v)
}

fn main() -> anyhow::Result<()> {
    let half = Dtype::from_f64(0.5).ok_or_else(|| anyhow::anyhow!("0.5 is out of range"))?;
    let stages = [M::identity(), M::identity().scale(half), M::filled(half)];
    let inputs = vec![
        fixed([1.0, 2.0, -1.0, 0.5])?,
        fixed([0.25, 0.0, 1.5, -2.0])?,
        fixed([3.0, -0.75, 0.5, 1.0])?,
    ];

    let outputs = thread::scope(|scope| {
        let (first_tx, mut rx) = mpsc::channel::<V>();
        for (index, a) in stages.iter().enumerate() {
            let (tx, next_rx) = mpsc::channel::<V>();
            let stage_rx = std::mem::replace(&mut rx, next_rx);
            scope.spawn(move || {
                for b in stage_rx {
                    let c = main_task(a, &b);
                    println!("stage {}: {} -> {}", index, b.t(), c.t());
                    if tx.send(c).is_err() {
                        break;
                    }
                }
            });
        }
        for b in &inputs {
            if first_tx.send(*b).is_err() {
                break;
            }
        }
        drop(first_tx);
        rx.iter().collect::<Vec<_>>()
    });

    anyhow::ensure!(outputs.len() == inputs.len(), "pipeline dropped inputs");
    for (b, c) in inputs.iter().zip(&outputs) {
        let expected = stages.iter().fold(*b, |v, a| main_task(a, &v));
        anyhow::ensure!(*c == expected, "pipelined result differs for input {}", b.t());
        c.print("c = ");
    }
    Ok(())
}
