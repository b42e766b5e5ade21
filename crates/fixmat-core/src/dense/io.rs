//! Text matrix files
//!
//! # Format
//!
//! - Size line: `rows cols`
//! - Kind line: `real <type>` where `<type>` is a [`MatType`] name
//! - Values: exactly `size()` elements in canonical compact order, separated
//!   by commas and/or whitespace
//!
//! ```text
//! 3 3
//! real upper
//! 1, 2, 3,
//! 4, 5,
//! 6
//! ```
//!
//! `complex` files are recognized but not supported. A failed read leaves
//! the destination untouched.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, warn};

use super::types::Mat;
use crate::element::Element;
use crate::error::{MatError, MatResult};
use crate::structure::{Compact, MatType};

const CONTEXT: &str = "matrix file";

impl<T: Element, const R: usize, const C: usize, S: Compact<R, C>> Mat<T, R, C, S> {
    /// Load from a reader in the text matrix format
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the size line or the value count disagrees
    ///   with the matrix shape
    /// - `TypeMismatch` if the file declares another structural type
    /// - `Unsupported` for `complex` files
    /// - `Parse` for malformed lines or values, `Io` for reader failures
    ///
    /// # Examples
    ///
    /// ```
    /// use fixmat_core::{kind, Mat};
    ///
    /// let text = "2 2\nreal lower\n1, 2,\n3\n";
    /// let mut m = Mat::<i32, 2, 2, kind::Lower>::zeros();
    /// m.read_from(text.as_bytes()).unwrap();
    /// assert_eq!(m.get(1, 0), 2);
    /// ```
    pub fn read_from<Rd: Read>(&mut self, reader: Rd) -> MatResult<()> {
        let mut text = String::new();
        BufReader::new(reader).read_to_string(&mut text)?;
        match Self::parse_text(&text) {
            Ok(parsed) => {
                *self = parsed;
                debug!("loaded {}x{} {} matrix ({} values)", R, C, S::KIND, Self::SIZE);
                Ok(())
            }
            Err(err) => {
                warn!("rejected {}x{} {} matrix input: {}", R, C, S::KIND, err);
                Err(err)
            }
        }
    }

    /// Load from a file; see [`Mat::read_from`]
    pub fn read(&mut self, path: impl AsRef<Path>) -> MatResult<()> {
        let file = File::open(path.as_ref())?;
        self.read_from(file)
    }

    /// Write in the text matrix format
    pub fn write_to<W: Write>(&self, writer: W) -> MatResult<()> {
        let mut out = BufWriter::new(writer);
        writeln!(out, "{} {}", R, C)?;
        writeln!(out, "real {}", S::KIND)?;
        let values: Vec<String> = self.as_slice().iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", values.join(", "))?;
        out.flush()?;
        Ok(())
    }

    /// Write to a file; see [`Mat::write_to`]
    pub fn write(&self, path: impl AsRef<Path>) -> MatResult<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(file)
    }

    fn parse_text(text: &str) -> MatResult<Self> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let size_line = lines
            .next()
            .ok_or_else(|| MatError::parse(CONTEXT, "missing size line"))?;
        let (rows, cols) = parse_size_line(size_line)?;
        if rows != R {
            return Err(MatError::dimension_mismatch("matrix file rows", R, rows));
        }
        if cols != C {
            return Err(MatError::dimension_mismatch("matrix file columns", C, cols));
        }

        let kind_line = lines
            .next()
            .ok_or_else(|| MatError::parse(CONTEXT, "missing type line"))?;
        let mut parts = kind_line.split_whitespace();
        let (number_kind, type_name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(number_kind), Some(type_name), None) => (number_kind, type_name),
            _ => {
                return Err(MatError::parse(
                    CONTEXT,
                    format!("expected `<real|complex> <type>`, got `{}`", kind_line),
                ))
            }
        };
        match number_kind {
            "real" => {}
            "complex" => return Err(MatError::unsupported("complex matrix files")),
            other => return Err(MatError::parse(CONTEXT, format!("unknown number kind `{}`", other))),
        }
        if type_name.parse::<MatType>().ok() != Some(S::KIND) {
            return Err(MatError::TypeMismatch {
                expected: S::KIND,
                found: type_name.to_string(),
            });
        }

        let mut values = Vec::with_capacity(Self::SIZE);
        for line in lines {
            for token in line.split(|ch: char| ch == ',' || ch.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                let value = T::parse_value(token).ok_or_else(|| {
                    MatError::parse(CONTEXT, format!("invalid value `{}` at position {}", token, values.len()))
                })?;
                values.push(value);
            }
        }
        if values.len() != Self::SIZE {
            return Err(MatError::dimension_mismatch("matrix file values", Self::SIZE, values.len()));
        }
        Self::from_slice(&values)
    }
}

fn parse_size_line(line: &str) -> MatResult<(usize, usize)> {
    let dims: Vec<usize> = line
        .split_whitespace()
        .map(|token| token.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|e| MatError::parse(CONTEXT, format!("invalid size line `{}`: {}", line, e)))?;
    match dims.as_slice() {
        [rows, cols] => Ok((*rows, *cols)),
        _ => Err(MatError::parse(
            CONTEXT,
            format!("size line needs two numbers, got `{}`", line),
        )),
    }
}
