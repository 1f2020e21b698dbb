//! High-level specdiff API.
//!
//! Ties the loader and the diff engine together: two document strings in,
//! one [`Comparison`] out. This is the entry point for the CLI, the HTTP
//! server, and applications embedding specdiff.

pub mod compare;
pub mod comparison;
pub mod config;
pub mod error;

pub use compare::{compare_documents, compare_trees};
pub use comparison::{Comparison, DocumentWarning, Side};
pub use config::CompareConfig;
pub use error::{CompareError, CompareResult};

// Re-export key types
pub use specdiff_loader as loader;
pub use specdiff_diff::{text_delta, ApiOverview, DiffKind, DiffMetrics, DiffNode, DiffOptions};
pub use specdiff_loader::{Format, ResolutionWarning, ResolveOptions};
pub use specdiff_types::TreeValue;
