//! Builder capabilities for immutable records.
//!
//! Defines the contracts that let an immutable value be edited without ever
//! being mutated:
//! - [`ToBuilder`] — a value hands out a builder primed with its own fields
//! - [`Buildable`] — a builder produces the value back from its fields
//! - [`FieldMerge`] — a builder accepts a single field by name from any serde
//!   deserializer (field-level binding)
//! - [`record!`] — generates a record, its builder and all three impls
//! - [`deserialize_checked`] — deserializes a whole record through its
//!   builder, so validation also guards parsed values
//!
//! The two capabilities obey the round-trip law:
//!
//! ```text
//! value.to_builder().build() == Ok(value)
//! ```
//!
//! Format-specific updaters (such as `patchwork-json`) build on these traits
//! and never need to know the concrete record type.

mod buildable;
mod error;
mod merge;
mod record;

pub use buildable::{Buildable, ToBuilder};
pub use error::{BuildError, BuildResult};
pub use merge::{FieldMerge, deserialize_checked};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
