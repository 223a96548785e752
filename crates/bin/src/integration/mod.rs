//! Glue between the command line and the edgarlink library.
//!
//! Locates and caches the ticker dataset, and renders pipeline output.

pub(crate) mod dataset;
pub(crate) mod render;
