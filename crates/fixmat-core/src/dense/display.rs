//! Printing
//!
//! Matrices and views render their logical cells, one bracketed row per line:
//!
//! ```text
//! [[1, 2],
//! [0, 3]]
//! ```

use std::fmt;

use super::types::{Mat, MatRead};
use crate::element::Element;
use crate::structure::Compact;
use crate::view::{Mapping, MatViewMut, View};

/// Write the logical `R x C` cells of `src`
pub(crate) fn fmt_logical<T, const R: usize, const C: usize, A>(src: &A, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    T: Element,
    A: MatRead<T, R, C>,
{
    f.write_str("[")?;
    for r in 0..R {
        if r > 0 {
            f.write_str(",\n")?;
        }
        f.write_str("[")?;
        for c in 0..C {
            if c > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(&src.get(r, c), f)?;
        }
        f.write_str("]")?;
    }
    f.write_str("]")
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> fmt::Display for Mat<T, R, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_logical(self, f)
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Compact<R, C>, M: Mapping<T>> fmt::Display
    for View<'a, T, R, C, S, M>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_logical(self, f)
    }
}

impl<'a, T: Element, const R: usize, const C: usize, S: Compact<R, C>> fmt::Display for MatViewMut<'a, T, R, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_logical(self, f)
    }
}

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Mat<T, R, C, S> {
    /// Print to stdout, preceded by `prefix`
    pub fn print(&self, prefix: &str) {
        println!("{}{}", prefix, self);
    }
}
