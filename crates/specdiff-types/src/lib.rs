//! Foundation types for specdiff.
//!
//! Every document, whatever its source format, is lowered into a
//! [`TreeValue`] before it reaches the resolver or the diff engine.
//!
//! # Key Types
//!
//! - [`TreeValue`] -- Closed sum type over null, boolean, number, string, mapping, sequence
//! - [`Mapping`] -- Ordered key table (order kept for display, ignored by equality)
//! - [`Shape`] -- Coarse kind of a value
//! - [`TypeError`] -- Values that cannot be represented as a tree

pub mod error;
pub mod number;
pub mod value;

pub use error::{TypeError, TypeResult};
pub use number::canonical_number;
pub use value::{Mapping, Shape, TreeValue};
