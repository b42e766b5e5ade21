//! Index mapping between logical coordinates and compact storage
//!
//! Every structural type stores its independent cells in a canonical order:
//!
//! - `Normal`: row-major
//! - `Diagonal`: the diagonal top to bottom; `Scalar`: a single slot
//! - `Upper`, `Sym`: row-major walk of the upper triangle including the diagonal
//! - `SUpper`, `ASym`: row-major walk of the strict upper triangle
//! - `Lower`, `SLower`: row-major walk of the (strict) lower triangle
//!
//! [`cell`] resolves a logical coordinate to its storage meaning, [`coords`]
//! inverts the mapping, and [`Cells`] enumerates a whole compact domain.
//! Because the offsets are the exact inverse of the enumeration order, loops
//! over `0..size` and loops over `Cells` visit the same slots in the same
//! order.
//!
//! All integer mappings are `const fn` so that multiplication schedules can be
//! generated during constant evaluation.

use crate::element::Element;
use crate::structure::MatType;

/// Storage meaning of a logical cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Independently stored at the given compact offset
    Stored(usize),
    /// Symmetric mirror of the given offset
    Mirrored(usize),
    /// Antisymmetric mirror: reads as the negated slot
    Negated(usize),
    /// Structural zero
    Zero,
}

impl Cell {
    /// Compact offset backing this cell, if any
    pub const fn slot(self) -> Option<usize> {
        match self {
            Cell::Stored(i) | Cell::Mirrored(i) | Cell::Negated(i) => Some(i),
            Cell::Zero => None,
        }
    }
}

/// Compact storage size
pub const fn size(kind: MatType, rows: usize, cols: usize) -> usize {
    kind.compact_size(rows, cols)
}

/// Offset of `(r, c)` in the upper triangle (`r <= c`) of an `n x n` matrix
pub const fn upper_offset(n: usize, r: usize, c: usize) -> usize {
    (2 * n + 1 - r) * r / 2 + c - r
}

/// Offset of `(r, c)` in the lower triangle (`r >= c`)
pub const fn lower_offset(r: usize, c: usize) -> usize {
    r * (r + 1) / 2 + c
}

/// Offset of `(r, c)` in the strict upper triangle (`r < c`) of an `n x n` matrix
pub const fn strict_upper_offset(n: usize, r: usize, c: usize) -> usize {
    (2 * n - 1 - r) * r / 2 + c - r - 1
}

/// Offset of `(r, c)` in the strict lower triangle (`r > c`)
pub const fn strict_lower_offset(r: usize, c: usize) -> usize {
    r * (r - 1) / 2 + c
}

/// Resolve a logical coordinate
///
/// The coordinate must lie inside the `rows x cols` shape.
pub const fn cell(kind: MatType, rows: usize, cols: usize, r: usize, c: usize) -> Cell {
    let n = rows;
    match kind {
        MatType::Normal => Cell::Stored(r * cols + c),
        MatType::Diagonal => {
            if r == c {
                Cell::Stored(r)
            } else {
                Cell::Zero
            }
        }
        MatType::Scalar => {
            if r == c {
                Cell::Stored(0)
            } else {
                Cell::Zero
            }
        }
        MatType::Upper => {
            if r <= c {
                Cell::Stored(upper_offset(n, r, c))
            } else {
                Cell::Zero
            }
        }
        MatType::Lower => {
            if r >= c {
                Cell::Stored(lower_offset(r, c))
            } else {
                Cell::Zero
            }
        }
        MatType::SUpper => {
            if r < c {
                Cell::Stored(strict_upper_offset(n, r, c))
            } else {
                Cell::Zero
            }
        }
        MatType::SLower => {
            if r > c {
                Cell::Stored(strict_lower_offset(r, c))
            } else {
                Cell::Zero
            }
        }
        MatType::Sym => {
            if r <= c {
                Cell::Stored(upper_offset(n, r, c))
            } else {
                Cell::Mirrored(upper_offset(n, c, r))
            }
        }
        MatType::ASym => {
            if r < c {
                Cell::Stored(strict_upper_offset(n, r, c))
            } else if r > c {
                Cell::Negated(strict_upper_offset(n, c, r))
            } else {
                Cell::Zero
            }
        }
    }
}

/// Physical offset of an independently stored cell
pub const fn offset(kind: MatType, rows: usize, cols: usize, r: usize, c: usize) -> Option<usize> {
    match cell(kind, rows, cols, r, c) {
        Cell::Stored(i) => Some(i),
        _ => None,
    }
}

/// Whether a write to `(r, c)` has a storage slot to land in
///
/// Mirrored cells of `Sym` and `ASym` are writable through their canonical slot.
pub const fn is_writable(kind: MatType, rows: usize, cols: usize, r: usize, c: usize) -> bool {
    !matches!(cell(kind, rows, cols, r, c), Cell::Zero)
}

/// Logical value of `(r, c)` given the compact buffer
#[inline]
pub fn read<T: Element>(kind: MatType, rows: usize, cols: usize, data: &[T], r: usize, c: usize) -> T {
    match cell(kind, rows, cols, r, c) {
        Cell::Stored(i) | Cell::Mirrored(i) => data[i],
        Cell::Negated(i) => data[i].negate(),
        Cell::Zero => T::zero(),
    }
}

/// Store `value` at the logical cell `(r, c)`
///
/// Mirrored `Sym` cells write their canonical slot and mirrored `ASym` cells
/// write the negated value, so that reading `(r, c)` back yields `value`.
/// Returns `false`, leaving `data` untouched, for structural zeros.
#[inline]
pub fn write<T: Element>(
    kind: MatType,
    rows: usize,
    cols: usize,
    data: &mut [T],
    r: usize,
    c: usize,
    value: T,
) -> bool {
    match cell(kind, rows, cols, r, c) {
        Cell::Stored(i) | Cell::Mirrored(i) => {
            data[i] = value;
            true
        }
        Cell::Negated(i) => {
            data[i] = value.negate();
            true
        }
        Cell::Zero => false,
    }
}

/// Row of compact `index` in an upper-triangle walk
pub const fn upper_row(n: usize, index: usize) -> (usize, usize) {
    let mut row = 0;
    let mut rem = index;
    while rem >= n - row {
        rem -= n - row;
        row += 1;
    }
    (row, row + rem)
}

/// Row of compact `index` in a lower-triangle walk
pub const fn lower_row(index: usize) -> (usize, usize) {
    let mut row = 0;
    let mut rem = index;
    while rem > row {
        rem -= row + 1;
        row += 1;
    }
    (row, rem)
}

/// Row of compact `index` in a strict upper-triangle walk
pub const fn strict_upper_row(n: usize, index: usize) -> (usize, usize) {
    let mut row = 0;
    let mut rem = index;
    while rem >= n - row - 1 {
        rem -= n - row - 1;
        row += 1;
    }
    (row, row + 1 + rem)
}

/// Row of compact `index` in a strict lower-triangle walk
pub const fn strict_lower_row(index: usize) -> (usize, usize) {
    let mut row = 1;
    let mut rem = index;
    while rem >= row {
        rem -= row;
        row += 1;
    }
    (row, rem)
}

/// Logical coordinate of compact `index`
///
/// `index` must be below [`size`].
pub const fn coords(kind: MatType, rows: usize, cols: usize, index: usize) -> (usize, usize) {
    match kind {
        MatType::Normal => (index / cols, index % cols),
        MatType::Diagonal => (index, index),
        MatType::Scalar => (0, 0),
        MatType::Upper | MatType::Sym => upper_row(rows, index),
        MatType::Lower => lower_row(index),
        MatType::SUpper | MatType::ASym => strict_upper_row(rows, index),
        MatType::SLower => strict_lower_row(index),
    }
}

const fn first_cell(kind: MatType) -> (usize, usize) {
    match kind {
        MatType::SUpper | MatType::ASym => (0, 1),
        MatType::SLower => (1, 0),
        _ => (0, 0),
    }
}

const fn next_cell(kind: MatType, rows: usize, cols: usize, r: usize, c: usize) -> (usize, usize) {
    match kind {
        MatType::Normal => {
            if c + 1 < cols {
                (r, c + 1)
            } else {
                (r + 1, 0)
            }
        }
        MatType::Diagonal | MatType::Scalar => (r + 1, c + 1),
        MatType::Upper | MatType::Sym => {
            if c + 1 < rows {
                (r, c + 1)
            } else {
                (r + 1, r + 1)
            }
        }
        MatType::SUpper | MatType::ASym => {
            if c + 1 < rows {
                (r, c + 1)
            } else {
                (r + 1, r + 2)
            }
        }
        MatType::Lower => {
            if c < r {
                (r, c + 1)
            } else {
                (r + 1, 0)
            }
        }
        MatType::SLower => {
            if c + 1 < r {
                (r, c + 1)
            } else {
                (r + 1, 0)
            }
        }
    }
}

/// Iterator over a compact domain yielding `(index, row, col)`
#[derive(Debug, Clone)]
pub struct Cells {
    kind: MatType,
    rows: usize,
    cols: usize,
    index: usize,
    size: usize,
    at: (usize, usize),
}

impl Cells {
    /// Enumerate the stored cells of a `rows x cols` matrix of `kind`
    pub const fn new(kind: MatType, rows: usize, cols: usize) -> Self {
        Self {
            kind,
            rows,
            cols,
            index: 0,
            size: size(kind, rows, cols),
            at: first_cell(kind),
        }
    }
}

impl Iterator for Cells {
    type Item = (usize, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.size {
            return None;
        }
        let (r, c) = self.at;
        let item = (self.index, r, c);
        self.index += 1;
        self.at = next_cell(self.kind, self.rows, self.cols, r, c);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells {}
