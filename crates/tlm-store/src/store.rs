//! The store interface used by the record writer.

use tlm_model::{AttributeValue, Compression, LayoutPlan, MAX_GZIP_LEVEL};
use tracing::warn;

use crate::error::{Result, StoreError};

/// Path of the hierarchy root.
pub const ROOT_PATH: &str = "/";

/// A hierarchical array store.
///
/// Calls are blocking and must be issued from one thread at a time. Any error
/// is fatal to the run.
pub trait Store {
    /// Handle to a created group or dataset.
    type Node;

    /// Creates a group at `path` (absolute, `/`-separated).
    fn create_group(&mut self, path: &str) -> Result<Self::Node>;

    /// Creates an `f64` dataset at `path` with the plan's shape, chunking
    /// and compression.
    ///
    /// Compression is best effort: if the requested level cannot be enabled
    /// the dataset is created uncompressed and a warning is logged.
    fn create_dataset(&mut self, path: &str, plan: &LayoutPlan) -> Result<Self::Node>;

    /// Writes one attribute on a group or dataset.
    fn write_attribute(
        &mut self,
        node: &mut Self::Node,
        key: &str,
        value: &AttributeValue,
    ) -> Result<()>;

    /// Writes the whole dataset from a row-major buffer of `rows * cols`
    /// values.
    fn write_matrix(&mut self, node: &mut Self::Node, values: &[f64]) -> Result<()>;
}

/// Checks that `name` can be used as a single hierarchy node name.
pub fn validate_node_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name is a relative path component")
    } else if name.contains('/') {
        Some("name contains '/'")
    } else if name.starts_with("__") {
        Some("names starting with '__' are reserved")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(StoreError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Joins a validated child name onto a parent path.
pub fn child_path(parent: &str, name: &str) -> Result<String> {
    validate_node_name(name)?;
    Ok(if parent == ROOT_PATH {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    })
}

/// Resolves the compression a backend can actually apply.
///
/// Levels above [`MAX_GZIP_LEVEL`] fall back to no compression with a
/// warning.
pub fn effective_compression(path: &str, requested: Compression) -> Compression {
    match requested {
        Compression::Gzip { level } if level > MAX_GZIP_LEVEL => {
            warn!(
                path,
                level, "gzip compression could not be enabled, writing uncompressed"
            );
            Compression::None
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_names() {
        assert!(validate_node_name("s3p.activity").is_ok());
        assert!(validate_node_name("x_1").is_ok());
        assert!(validate_node_name("").is_err());
        assert!(validate_node_name("..").is_err());
        assert!(validate_node_name("a/b").is_err());
        assert!(validate_node_name("__meta").is_err());
    }

    #[test]
    fn child_paths() {
        assert_eq!(child_path(ROOT_PATH, "x").unwrap(), "/x");
        assert_eq!(child_path("/dataset_0", "x").unwrap(), "/dataset_0/x");
        assert!(child_path(ROOT_PATH, "a/b").is_err());
    }

    #[test]
    fn out_of_range_level_disables_compression() {
        assert_eq!(
            effective_compression("/x", Compression::Gzip { level: 12 }),
            Compression::None
        );
        assert_eq!(
            effective_compression("/x", Compression::Gzip { level: 9 }),
            Compression::Gzip { level: 9 }
        );
        assert_eq!(effective_compression("/x", Compression::None), Compression::None);
    }
}
