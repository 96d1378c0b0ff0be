//! Telemetry record model.
//!
//! Types shared by every stage of the conversion pipeline:
//!
//! - **scalar**: closed tagged variant for heterogeneous matrix cells
//! - **record**: raw input records, namespaces and normalized records
//! - **matrix**: dense row-major `f64` grid
//! - **layout**: storage shape, chunk shape and compression
//! - **attribute**: values written as store attributes
//! - **options**: conversion settings resolved from the command line

pub mod attribute;
pub mod layout;
pub mod matrix;
pub mod options;
pub mod record;
pub mod scalar;

pub use attribute::AttributeValue;
pub use layout::{Compression, LayoutPlan, MAX_GZIP_LEVEL};
pub use matrix::Matrix;
pub use options::{ConversionOptions, LayoutMode};
pub use record::{CoercionWarning, Namespace, NormalizedRecord, RawRecord, WarningKind};
pub use scalar::Scalar;
