//! Writes normalized records into a [`Store`] in layout order.
//!
//! Flat layout, per record:
//! create dataset, `original_name` (renamed records only), `l_<key>` labels,
//! `a_<key>` attributes, `la`, then the row-major matrix.
//!
//! Grouped layout, per record: create the record group, write the same
//! attributes on the group (with `a_*` rendered as text), then create and
//! fill the two-column `values` dataset.

use tlm_model::{AttributeValue, LayoutPlan, NormalizedRecord};
use tracing::debug;

use crate::error::Result;
use crate::store::{ROOT_PATH, Store, child_path};

/// Attribute holding the category of a renamed record.
pub const ORIGINAL_NAME_ATTRIBUTE: &str = "original_name";

/// Attribute holding the record's scalar flag.
pub const SCALAR_FLAG_ATTRIBUTE: &str = "la";

/// Name of the matrix dataset inside a grouped record.
pub const VALUES_DATASET: &str = "values";

const LABEL_PREFIX: &str = "l_";
const ATTRIBUTE_PREFIX: &str = "a_";

/// One record ready to be written under its resolved name.
#[derive(Debug, Clone, Copy)]
pub struct DatasetWrite<'a> {
    pub record: &'a NormalizedRecord,
    /// Unique node name within the namespace.
    pub name: &'a str,
    /// Category to persist when `name` was generated.
    pub original_name: Option<&'a str>,
    pub plan: &'a LayoutPlan,
}

impl<'a> DatasetWrite<'a> {
    pub fn new(record: &'a NormalizedRecord, name: &'a str, plan: &'a LayoutPlan) -> Self {
        Self {
            record,
            name,
            original_name: None,
            plan,
        }
    }

    /// Marks the record as renamed from `original`.
    pub fn with_original_name(mut self, original: &'a str) -> Self {
        self.original_name = Some(original);
        self
    }
}

/// Writes one record as a top-level dataset.
pub fn write_flat_record<S: Store>(store: &mut S, write: &DatasetWrite<'_>) -> Result<()> {
    let path = child_path(ROOT_PATH, write.name)?;
    let mut node = store.create_dataset(&path, write.plan)?;
    write_metadata(store, &mut node, write, AttributeValue::Int)?;
    store.write_matrix(&mut node, write.record.matrix.as_slice())?;
    debug!(
        path = %path,
        rows = write.plan.rows(),
        cols = write.plan.cols(),
        "wrote dataset"
    );
    Ok(())
}

/// Group name used for the namespace at `index` in the grouped layout.
pub fn namespace_group_name(index: usize) -> String {
    format!("dataset_{index}")
}

/// Creates the group holding one namespace's records and returns its path.
pub fn create_namespace_group<S: Store>(store: &mut S, index: usize) -> Result<String> {
    let path = child_path(ROOT_PATH, &namespace_group_name(index))?;
    store.create_group(&path)?;
    Ok(path)
}

/// Writes one record as a group with a `values` dataset under `parent`.
///
/// The plan must be the grouped plan; its column count decides how many
/// matrix columns are kept.
pub fn write_grouped_record<S: Store>(
    store: &mut S,
    parent: &str,
    write: &DatasetWrite<'_>,
) -> Result<()> {
    let group_path = child_path(parent, write.name)?;
    let mut group = store.create_group(&group_path)?;
    write_metadata(store, &mut group, write, |code| {
        AttributeValue::Text(code.to_string())
    })?;

    let values_path = child_path(&group_path, VALUES_DATASET)?;
    let values = write.record.matrix.project_columns(write.plan.cols() as usize);
    let mut dataset = store.create_dataset(&values_path, write.plan)?;
    store.write_matrix(&mut dataset, values.as_slice())?;
    debug!(
        path = %values_path,
        rows = write.plan.rows(),
        cols = write.plan.cols(),
        "wrote dataset"
    );
    Ok(())
}

fn write_metadata<S: Store>(
    store: &mut S,
    node: &mut S::Node,
    write: &DatasetWrite<'_>,
    attribute_value: impl Fn(u8) -> AttributeValue,
) -> Result<()> {
    let record = write.record;
    if let Some(original) = write.original_name {
        store.write_attribute(node, ORIGINAL_NAME_ATTRIBUTE, &AttributeValue::text(original))?;
    }
    for (key, value) in &record.labels {
        store.write_attribute(
            node,
            &format!("{LABEL_PREFIX}{key}"),
            &AttributeValue::text(value.as_str()),
        )?;
    }
    for (key, code) in &record.attributes {
        store.write_attribute(
            node,
            &format!("{ATTRIBUTE_PREFIX}{key}"),
            &attribute_value(*code),
        )?;
    }
    store.write_attribute(
        node,
        SCALAR_FLAG_ATTRIBUTE,
        &AttributeValue::Int(record.scalar_flag),
    )
}

#[cfg(test)]
mod tests {
    use tlm_model::{Compression, Matrix};

    use super::*;
    use crate::RecordingStore;

    fn record(rows: Vec<Vec<f64>>) -> NormalizedRecord {
        NormalizedRecord {
            category: "x".to_string(),
            labels: Default::default(),
            attributes: Default::default(),
            scalar_flag: 0,
            matrix: Matrix::from_rows(rows).unwrap(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn flat_record_is_stored_at_root() {
        let record = record(vec![vec![1.0, 2.0, 3.0]]);
        let plan = LayoutPlan {
            shape: [1, 3],
            chunk_shape: [1, 1],
            compression: Compression::max(),
        };
        let mut store = RecordingStore::new();
        write_flat_record(&mut store, &DatasetWrite::new(&record, "x", &plan)).unwrap();
        assert_eq!(store.dataset_paths(), vec!["/x"]);
        assert_eq!(store.matrix("/x"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(store.attribute("/x", "la"), Some(&AttributeValue::Int(0)));
        assert!(store.attribute("/x", ORIGINAL_NAME_ATTRIBUTE).is_none());
    }

    #[test]
    fn grouped_record_keeps_two_columns() {
        let record = record(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let plan = LayoutPlan {
            shape: [2, 2],
            chunk_shape: [2, 2],
            compression: Compression::None,
        };
        let mut store = RecordingStore::new();
        let parent = create_namespace_group(&mut store, 3).unwrap();
        assert_eq!(parent, "/dataset_3");
        write_grouped_record(&mut store, &parent, &DatasetWrite::new(&record, "x", &plan))
            .unwrap();
        assert_eq!(
            store.matrix("/dataset_3/x/values"),
            Some(&[1.0, 2.0, 4.0, 5.0][..])
        );
        assert_eq!(
            store.attribute("/dataset_3/x", "la"),
            Some(&AttributeValue::Int(0))
        );
    }

    #[test]
    fn node_names_with_slashes_are_rejected() {
        let record = record(vec![vec![1.0]]);
        let plan = LayoutPlan {
            shape: [1, 1],
            chunk_shape: [1, 1],
            compression: Compression::None,
        };
        let mut store = RecordingStore::new();
        let write = DatasetWrite::new(&record, "a/b", &plan);
        assert!(write_flat_record(&mut store, &write).is_err());
        assert!(store.ops().is_empty());
    }
}
