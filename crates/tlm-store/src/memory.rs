//! In-memory store that records every call.

use std::collections::BTreeMap;
use std::fmt;

use tlm_model::{AttributeValue, LayoutPlan};

use crate::error::{Result, StoreError};
use crate::store::{ROOT_PATH, Store, effective_compression};

/// One call made against a [`RecordingStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    CreateGroup {
        path: String,
    },
    CreateDataset {
        path: String,
        plan: LayoutPlan,
    },
    WriteAttribute {
        path: String,
        key: String,
        value: AttributeValue,
    },
    WriteMatrix {
        path: String,
        values: Vec<f64>,
    },
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateGroup { path } => write!(f, "group {path}"),
            Self::CreateDataset { path, plan } => write!(
                f,
                "dataset {path} shape={:?} chunks={:?} {}",
                plan.shape, plan.chunk_shape, plan.compression
            ),
            Self::WriteAttribute { path, key, value } => write!(f, "attr {path} {key}={value}"),
            Self::WriteMatrix { path, values } => write!(f, "matrix {path} {values:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Group,
    Dataset { elements: u64 },
}

/// Store that keeps an ordered log of calls instead of writing anything.
#[derive(Debug)]
pub struct RecordingStore {
    ops: Vec<StoreOp>,
    nodes: BTreeMap<String, NodeKind>,
}

impl RecordingStore {
    /// Creates an empty store holding only the root group.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT_PATH.to_string(), NodeKind::Group);
        Self {
            ops: Vec::new(),
            nodes,
        }
    }

    pub fn ops(&self) -> &[StoreOp] {
        &self.ops
    }

    /// The call log, one line per call.
    pub fn log(&self) -> String {
        self.ops
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Paths of all datasets, in creation order.
    pub fn dataset_paths(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                StoreOp::CreateDataset { path, .. } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Attributes written on `path`, in write order.
    pub fn attributes(&self, path: &str) -> Vec<(&str, &AttributeValue)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                StoreOp::WriteAttribute {
                    path: p,
                    key,
                    value,
                } if p == path => Some((key.as_str(), value)),
                _ => None,
            })
            .collect()
    }

    /// Looks up the last value written for one attribute.
    pub fn attribute(&self, path: &str, key: &str) -> Option<&AttributeValue> {
        self.attributes(path)
            .into_iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Flat matrix written to `path`.
    pub fn matrix(&self, path: &str) -> Option<&[f64]> {
        self.ops.iter().find_map(|op| match op {
            StoreOp::WriteMatrix { path: p, values } if p == path => Some(values.as_slice()),
            _ => None,
        })
    }

    /// Layout plan the dataset at `path` was created with.
    pub fn plan(&self, path: &str) -> Option<&LayoutPlan> {
        self.ops.iter().find_map(|op| match op {
            StoreOp::CreateDataset { path: p, plan } if p == path => Some(plan),
            _ => None,
        })
    }

    fn claim(&mut self, path: &str, kind: NodeKind) -> Result<()> {
        if self.nodes.contains_key(path) {
            return Err(StoreError::AlreadyExists {
                path: path.to_string(),
            });
        }
        self.nodes.insert(path.to_string(), kind);
        Ok(())
    }
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for RecordingStore {
    type Node = String;

    fn create_group(&mut self, path: &str) -> Result<String> {
        self.claim(path, NodeKind::Group)?;
        self.ops.push(StoreOp::CreateGroup {
            path: path.to_string(),
        });
        Ok(path.to_string())
    }

    fn create_dataset(&mut self, path: &str, plan: &LayoutPlan) -> Result<String> {
        let plan = LayoutPlan {
            compression: effective_compression(path, plan.compression),
            ..*plan
        };
        self.claim(
            path,
            NodeKind::Dataset {
                elements: plan.element_count(),
            },
        )?;
        self.ops.push(StoreOp::CreateDataset {
            path: path.to_string(),
            plan,
        });
        Ok(path.to_string())
    }

    fn write_attribute(
        &mut self,
        node: &mut String,
        key: &str,
        value: &AttributeValue,
    ) -> Result<()> {
        self.ops.push(StoreOp::WriteAttribute {
            path: node.clone(),
            key: key.to_string(),
            value: value.clone(),
        });
        Ok(())
    }

    fn write_matrix(&mut self, node: &mut String, values: &[f64]) -> Result<()> {
        match self.nodes.get(node.as_str()) {
            Some(NodeKind::Dataset { elements }) => {
                if *elements != values.len() as u64 {
                    return Err(StoreError::ShapeMismatch {
                        path: node.clone(),
                        expected: *elements,
                        actual: values.len(),
                    });
                }
            }
            _ => {
                return Err(StoreError::NotADataset { path: node.clone() });
            }
        }
        self.ops.push(StoreOp::WriteMatrix {
            path: node.clone(),
            values: values.to_vec(),
        });
        Ok(())
    }
}
