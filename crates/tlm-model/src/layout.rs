//! Storage layout parameters for one dataset.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest gzip level a store accepts.
pub const MAX_GZIP_LEVEL: u8 = 9;

/// Compression applied to a dataset's chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compression {
    /// Store chunks uncompressed.
    None,
    /// Gzip/deflate at the given level.
    Gzip { level: u8 },
}

impl Compression {
    /// Maximum gzip compression.
    pub const fn max() -> Self {
        Self::Gzip {
            level: MAX_GZIP_LEVEL,
        }
    }

    /// Gzip level, if compression is enabled.
    pub fn level(self) -> Option<u8> {
        match self {
            Self::None => None,
            Self::Gzip { level } => Some(level),
        }
    }
}

impl Default for Compression {
    fn default() -> Self {
        Self::max()
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Gzip { level } => write!(f, "gzip({level})"),
        }
    }
}

/// Shape, chunking and compression for one stored dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPlan {
    /// Dataset shape as `[rows, cols]`.
    pub shape: [u64; 2],
    /// Chunk shape as `[rows, cols]`.
    pub chunk_shape: [u64; 2],
    pub compression: Compression,
}

impl LayoutPlan {
    pub fn rows(&self) -> u64 {
        self.shape[0]
    }

    pub fn cols(&self) -> u64 {
        self.shape[1]
    }

    /// Number of elements the dataset holds.
    pub fn element_count(&self) -> u64 {
        self.shape[0] * self.shape[1]
    }

    /// True when the plan describes a dataset with no elements.
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }
}
