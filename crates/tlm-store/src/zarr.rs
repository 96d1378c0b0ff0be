//! Zarr V3 backend on the local filesystem.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tlm_model::{AttributeValue, Compression, LayoutPlan};
use tracing::{debug, warn};
use zarrs::array::codec::GzipCodec;
use zarrs::array::{Array, ArrayBuilder, DataType, FillValue};
use zarrs::filesystem::FilesystemStore;
use zarrs::group::{Group, GroupBuilder};
use zarrs::storage::{ReadableWritableListableStorage, ReadableWritableListableStorageTraits};

use crate::error::{Result, StoreError};
use crate::store::{ROOT_PATH, Store, effective_compression};

/// Metadata document present at every Zarr V3 node.
const METADATA_FILE: &str = "zarr.json";

/// Handle to a node created by [`ZarrStore`].
pub enum ZarrNode {
    Group(Group<dyn ReadableWritableListableStorageTraits>),
    Array {
        array: Array<dyn ReadableWritableListableStorageTraits>,
        path: String,
        elements: u64,
    },
}

impl ZarrNode {
    fn path(&self) -> &str {
        match self {
            Self::Group(group) => group.path().as_str(),
            Self::Array { path, .. } => path,
        }
    }
}

/// Writes a Zarr V3 hierarchy rooted at a directory.
pub struct ZarrStore {
    root: PathBuf,
    storage: ReadableWritableListableStorage,
    created: HashSet<String>,
}

impl ZarrStore {
    /// Creates a new hierarchy at `path` and writes the root group.
    ///
    /// A file or a previous Zarr hierarchy at `path` is replaced. Any other
    /// existing, non-empty path is refused with [`StoreError::OutputExists`].
    pub fn create(path: &Path) -> Result<Self> {
        // node attributes carry only record metadata
        zarrs::config::global_config_mut().set_include_zarrs_metadata(false);
        prepare_output(path)?;
        let storage: ReadableWritableListableStorage = Arc::new(
            FilesystemStore::new(path)
                .map_err(|e| StoreError::backend("open store", path.display().to_string(), e))?,
        );
        GroupBuilder::new()
            .build(storage.clone(), ROOT_PATH)
            .map_err(|e| StoreError::backend("create group", ROOT_PATH, e))?
            .store_metadata()
            .map_err(|e| StoreError::backend("create group", ROOT_PATH, e))?;

        let mut created = HashSet::new();
        created.insert(ROOT_PATH.to_string());
        debug!(path = %path.display(), "created zarr hierarchy");
        Ok(Self {
            root: path.to_path_buf(),
            storage,
            created,
        })
    }

    /// Directory holding the hierarchy.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn claim(&mut self, path: &str) -> Result<()> {
        if !self.created.insert(path.to_string()) {
            return Err(StoreError::AlreadyExists {
                path: path.to_string(),
            });
        }
        Ok(())
    }
}

fn prepare_output(path: &Path) -> Result<()> {
    let io_error = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            if path.join(METADATA_FILE).is_file() {
                debug!(path = %path.display(), "replacing existing zarr hierarchy");
                fs::remove_dir_all(path).map_err(io_error)?;
            } else if fs::read_dir(path).map_err(io_error)?.next().is_some() {
                return Err(StoreError::OutputExists {
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(_) => {
            debug!(path = %path.display(), "replacing existing file");
            fs::remove_file(path).map_err(io_error)?;
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(io_error(err)),
    }
    fs::create_dir_all(path).map_err(io_error)
}

fn attribute_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Text(text) => Value::String(text.clone()),
        AttributeValue::Int(code) => Value::from(*code),
    }
}

impl Store for ZarrStore {
    type Node = ZarrNode;

    fn create_group(&mut self, path: &str) -> Result<ZarrNode> {
        self.claim(path)?;
        let group = GroupBuilder::new()
            .build(self.storage.clone(), path)
            .map_err(|e| StoreError::backend("create group", path, e))?;
        group
            .store_metadata()
            .map_err(|e| StoreError::backend("create group", path, e))?;
        Ok(ZarrNode::Group(group))
    }

    fn create_dataset(&mut self, path: &str, plan: &LayoutPlan) -> Result<ZarrNode> {
        self.claim(path)?;
        let mut builder = ArrayBuilder::new(
            plan.shape.to_vec(),
            plan.chunk_shape.to_vec(),
            DataType::Float64,
            FillValue::from(0.0f64),
        );
        if let Compression::Gzip { level } = effective_compression(path, plan.compression) {
            match GzipCodec::new(u32::from(level)) {
                Ok(codec) => {
                    builder.bytes_to_bytes_codecs(vec![Arc::new(codec)]);
                }
                Err(err) => warn!(
                    path,
                    level,
                    error = %err,
                    "gzip compression could not be enabled, writing uncompressed"
                ),
            }
        }
        let array = builder
            .build(self.storage.clone(), path)
            .map_err(|e| StoreError::backend("create dataset", path, e))?;
        array
            .store_metadata()
            .map_err(|e| StoreError::backend("create dataset", path, e))?;
        Ok(ZarrNode::Array {
            array,
            path: path.to_string(),
            elements: plan.element_count(),
        })
    }

    fn write_attribute(
        &mut self,
        node: &mut ZarrNode,
        key: &str,
        value: &AttributeValue,
    ) -> Result<()> {
        let stored = match node {
            ZarrNode::Group(group) => {
                group
                    .attributes_mut()
                    .insert(key.to_string(), attribute_json(value));
                group.store_metadata()
            }
            ZarrNode::Array { array, .. } => {
                array
                    .attributes_mut()
                    .insert(key.to_string(), attribute_json(value));
                array.store_metadata()
            }
        };
        stored.map_err(|e| {
            StoreError::backend("write attribute", format!("{}@{key}", node.path()), e)
        })
    }

    fn write_matrix(&mut self, node: &mut ZarrNode, values: &[f64]) -> Result<()> {
        match node {
            ZarrNode::Group(group) => Err(StoreError::NotADataset {
                path: group.path().as_str().to_string(),
            }),
            ZarrNode::Array {
                array,
                path,
                elements,
            } => {
                if *elements != values.len() as u64 {
                    return Err(StoreError::ShapeMismatch {
                        path: path.clone(),
                        expected: *elements,
                        actual: values.len(),
                    });
                }
                array
                    .store_array_subset_elements::<f64>(&array.subset_all(), values)
                    .map_err(|e| StoreError::backend("write matrix", path.as_str(), e))
            }
        }
    }
}
