//! Library side of the `tlm-convert` command: logging setup and the
//! conversion pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
