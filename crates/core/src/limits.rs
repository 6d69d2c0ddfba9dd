//! Traversal limits
//!
//! Encoding, decoding and search walk the element tree. The nesting depth
//! is bounded so a pathological document fails with `NestingTooDeep`
//! instead of exhausting the stack.

use crate::error::{Error, Result};

/// Default maximum element nesting depth (root = depth 1)
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Limits enforced by the encoder and decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth, root element counted as 1
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_nesting_depth: 4,
        }
    }

    /// Check that an element at `depth` is allowed
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_nesting_depth {
            return Err(Error::NestingTooDeep {
                max: self.max_nesting_depth,
            });
        }
        Ok(())
    }
}
