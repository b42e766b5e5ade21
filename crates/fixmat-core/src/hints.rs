//! Synthesis hints
//!
//! Unroll and partition factors describe how a hardware backend should lay
//! out the loops of the elementwise and product kernels. In software they only
//! change how the flat loops are chunked; results never depend on them.

use crate::error::{MatError, MatResult};

/// Array partitioning strategy for compact buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Partition {
    /// Every element in its own register
    #[default]
    Complete,
    /// Contiguous blocks spread over `factor` banks
    Block(usize),
    /// Round-robin over `factor` banks
    Cyclic(usize),
}

impl Partition {
    /// Number of banks for a buffer of `size` elements
    pub fn banks(self, size: usize) -> usize {
        match self {
            Partition::Complete => size.max(1),
            Partition::Block(factor) | Partition::Cyclic(factor) => factor.min(size.max(1)),
        }
    }
}

/// Loop family an unroll factor applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOp {
    /// Buffer copies and conversions
    Copy,
    /// Addition, subtraction and elementwise products
    Add,
    /// Matrix products
    Mul,
}

/// Synthesis hints for the matrix kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynthHints {
    /// Unroll factor of copy loops
    pub copy_unroll: usize,
    /// Unroll factor of elementwise arithmetic loops
    pub add_unroll: usize,
    /// Unroll factor of the product accumulation loop
    pub mul_unroll: usize,
    /// Partitioning of compact buffers
    pub partition: Partition,
}

impl Default for SynthHints {
    fn default() -> Self {
        Self {
            copy_unroll: 32,
            add_unroll: 32,
            mul_unroll: 8,
            partition: Partition::Complete,
        }
    }
}

impl SynthHints {
    /// Create hints with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the copy unroll factor
    pub fn with_copy_unroll(mut self, factor: usize) -> Self {
        self.copy_unroll = factor;
        self
    }

    /// Set the elementwise unroll factor
    pub fn with_add_unroll(mut self, factor: usize) -> Self {
        self.add_unroll = factor;
        self
    }

    /// Set the product unroll factor
    pub fn with_mul_unroll(mut self, factor: usize) -> Self {
        self.mul_unroll = factor;
        self
    }

    /// Set the partitioning strategy
    pub fn with_partition(mut self, partition: Partition) -> Self {
        self.partition = partition;
        self
    }

    /// Unroll factor of a loop family, never zero
    pub fn unroll(&self, op: HintOp) -> usize {
        let factor = match op {
            HintOp::Copy => self.copy_unroll,
            HintOp::Add => self.add_unroll,
            HintOp::Mul => self.mul_unroll,
        };
        factor.max(1)
    }

    /// Reject zero factors
    pub fn validate(&self) -> MatResult<()> {
        let checks = [
            ("copy_unroll", self.copy_unroll),
            ("add_unroll", self.add_unroll),
            ("mul_unroll", self.mul_unroll),
        ];
        for (name, factor) in checks {
            if factor == 0 {
                return Err(MatError::InvalidHint(format!("{} must be non-zero", name)));
            }
        }
        match self.partition {
            Partition::Block(0) | Partition::Cyclic(0) => Err(MatError::InvalidHint(
                "partition factor must be non-zero".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
