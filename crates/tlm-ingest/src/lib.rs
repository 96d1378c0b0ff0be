//! Telemetry ingestion.
//!
//! Decodes the input document, a JSON array of namespaces where each namespace
//! is an array of records, into [`Namespace`](tlm_model::Namespace) values.
//!
//! # Example
//!
//! ```
//! use tlm_ingest::parse_namespaces;
//!
//! let namespaces = parse_namespaces(r#"[[{"c": "s3p.ignition", "v": [[1000, "ON"]]}]]"#)?;
//! assert_eq!(namespaces[0].records[0].category, "s3p.ignition");
//! # Ok::<(), tlm_ingest::IngestError>(())
//! ```

mod error;
mod json;

pub use error::{IngestError, Result};
pub use json::{parse_namespaces, read_namespaces, read_namespaces_from_reader};
