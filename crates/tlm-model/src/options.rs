//! Configuration options for a conversion run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::Compression;

/// How records are arranged in the output hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// One uniquely named, compressed dataset per record at the top level.
    #[default]
    Flat,
    /// One group per namespace, one subgroup per record holding a fixed-width
    /// uncompressed `values` dataset.
    Grouped,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Grouped => write!(f, "grouped"),
        }
    }
}

/// Options controlling a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Output hierarchy layout.
    pub layout: LayoutMode,

    /// Requested compression for flat-layout datasets.
    ///
    /// Grouped datasets are always written uncompressed.
    pub compression: Compression,

    /// Run every stage against an in-memory store and write nothing to disk.
    pub dry_run: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Flat,
            compression: Compression::max(),
            dry_run: false,
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
