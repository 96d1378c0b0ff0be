//! Store writer adapter.
//!
//! The conversion core talks to the output hierarchy only through the
//! [`Store`] trait: create a group, create a typed dataset with a
//! [`LayoutPlan`](tlm_model::LayoutPlan), write attributes, write the flat
//! matrix. Two backends are provided:
//!
//! - [`ZarrStore`]: Zarr V3 hierarchy on the local filesystem
//! - [`RecordingStore`]: in-memory call log, used for dry runs and tests
//!
//! The [`writer`] module drives a store in the order the layouts require.
//!
//! # Example
//!
//! ```
//! use tlm_model::{Matrix, NormalizedRecord};
//! use tlm_store::{DatasetWrite, RecordingStore, write_flat_record};
//!
//! let record = NormalizedRecord {
//!     category: "s3p.speed".to_string(),
//!     labels: Default::default(),
//!     attributes: Default::default(),
//!     scalar_flag: 0,
//!     matrix: Matrix::from_rows(vec![vec![1.0, 42.0]]).unwrap(),
//!     warnings: Vec::new(),
//! };
//! let plan = tlm_model::LayoutPlan {
//!     shape: [1, 2],
//!     chunk_shape: [1, 1],
//!     compression: tlm_model::Compression::max(),
//! };
//! let mut store = RecordingStore::new();
//! write_flat_record(&mut store, &DatasetWrite::new(&record, "s3p.speed", &plan))?;
//! assert_eq!(store.matrix("/s3p.speed"), Some(&[1.0, 42.0][..]));
//! # Ok::<(), tlm_store::StoreError>(())
//! ```

mod error;
mod memory;
mod store;
pub mod writer;
mod zarr;

pub use error::{Result, StoreError};
pub use memory::{RecordingStore, StoreOp};
pub use store::{ROOT_PATH, Store, child_path, effective_compression, validate_node_name};
pub use writer::{
    DatasetWrite, ORIGINAL_NAME_ATTRIBUTE, SCALAR_FLAG_ATTRIBUTE, VALUES_DATASET,
    create_namespace_group, namespace_group_name, write_flat_record, write_grouped_record,
};
pub use zarr::{ZarrNode, ZarrStore};
