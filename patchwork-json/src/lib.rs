//! Partial JSON updates for immutable records.
//!
//! [`JsonUpdater`] applies a JSON object fragment to an existing record and
//! returns a new record that differs only in the fields the fragment names:
//!
//! 1. the record hands out its builder ([`ToBuilder`](patchwork_builder::ToBuilder))
//! 2. the fragment is deserialized straight onto that builder, one field at a
//!    time ([`FieldMerge`](patchwork_builder::FieldMerge))
//! 3. the builder produces the new record ([`Buildable`](patchwork_builder::Buildable))
//!
//! Fields absent from the fragment are never touched, so a patch does not
//! need to restate unchanged data. How unknown keys and explicit `null`s are
//! treated is fixed per updater by [`UpdaterConfig`].

mod config;
mod error;
mod merge;
mod updater;

pub use config::{NullFields, UnknownFields, UpdaterConfig};
pub use error::{UpdateError, UpdateResult};
pub use merge::MergeStats;
pub use updater::JsonUpdater;
