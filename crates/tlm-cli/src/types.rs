use std::path::PathBuf;

/// Counts for one namespace of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceSummary {
    /// Position of the namespace in the input document.
    pub index: usize,
    pub records: usize,
    /// Records persisted as datasets.
    pub written: usize,
    /// Records dropped because their matrix was empty.
    pub skipped_empty: usize,
    /// Records stored under a suffixed name.
    pub renamed: usize,
    /// Matrix cells that could not be coerced and were stored as `0.0`.
    pub warnings: usize,
}

/// Counts for a whole conversion run, one entry per namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub namespaces: Vec<NamespaceSummary>,
}

impl ConversionSummary {
    pub fn total_records(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.records).sum()
    }

    pub fn total_written(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.written).sum()
    }

    pub fn total_skipped_empty(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.skipped_empty).sum()
    }

    pub fn total_renamed(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.renamed).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.warnings).sum()
    }
}

/// Outcome of one `tlm-convert` invocation.
#[derive(Debug)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dry_run: bool,
    pub summary: ConversionSummary,
}
