//! Structural diff engine for specdiff.
//!
//! Compares two [`TreeValue`] documents position by position and produces a
//! tree of [`DiffNode`]s classified as added, removed, changed, or
//! unchanged. Everything here is pure and synchronous.
//!
//! # Key Types
//!
//! - [`diff`] / [`diff_with_options`] -- Keyed comparison of two trees
//! - [`DiffNode`] / [`DiffKind`] -- The annotated result tree
//! - [`DiffMetrics`] -- Leaf counts by kind
//! - [`ApiOverview`] -- Endpoint-level summary for OpenAPI documents
//! - [`TextDelta`] -- Line hunks for changed multi-line strings
//!
//! [`TreeValue`]: specdiff_types::TreeValue

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod node;
pub mod overview;
pub mod path;
pub mod text_delta;

pub use config::DiffOptions;
pub use engine::{diff, diff_optional, diff_serialize, diff_with_options};
pub use error::{DiffError, DiffResult};
pub use metrics::DiffMetrics;
pub use node::{DiffKind, DiffNode};
pub use overview::{ApiOverview, ChangedOperation, Endpoint};
pub use text_delta::{diff_text, DeltaHunk, DeltaLine, TextDelta};
