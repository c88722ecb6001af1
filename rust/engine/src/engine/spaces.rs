// rust/engine/src/engine/spaces.rs
#![forbid(unsafe_code)]

use crate::engine::error::PlatformerError;

/// Action ids `0..n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    pub const fn new(n: usize) -> Self {
        Self { n }
    }

    #[inline]
    pub fn contains(&self, action: usize) -> bool {
        action < self.n
    }

    pub fn check(&self, action: usize) -> Result<usize, PlatformerError> {
        if self.contains(action) {
            Ok(action)
        } else {
            Err(PlatformerError::InvalidAction { action, n: self.n })
        }
    }
}

/// Per-field inclusive `[low, high]` bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpace<const N: usize> {
    pub low: [f64; N],
    pub high: [f64; N],
}

impl<const N: usize> BoxSpace<N> {
    pub const fn new(low: [f64; N], high: [f64; N]) -> Self {
        Self { low, high }
    }

    /// NaN fields are never contained.
    pub fn contains(&self, v: &[f64; N]) -> bool {
        v.iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .all(|(&x, (&lo, &hi))| x >= lo && x <= hi)
    }
}
