//! Sample record and helpers for the patchwork demo binary.

use anyhow::{Context, Result};
use patchwork_builder::{BuildError, BuildResult, Buildable, record};
use patchwork_json::{JsonUpdater, NullFields, UnknownFields, UpdaterConfig};
use serde::Serialize;
use std::io::Read;

fn has_name(contact: &Contact) -> BuildResult<()> {
    if contact.name().trim().is_empty() {
        return Err(BuildError::validation("has_name", "name must not be blank"));
    }
    Ok(())
}

record! {
    /// An address-book entry.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct Contact => ContactBuilder {
        id: u64,
        name: String,
        email: Option<String>,
        tags: Vec<String>,
        active: bool,
    }
    validate = has_name;
}

/// Parses a full contact and runs its validation rule.
///
/// `tags` and `active` may be omitted and default to empty and `false`.
pub fn parse_contact<R: Read>(mut reader: R) -> Result<Contact> {
    let mut builder = Contact::builder().tags(Vec::new()).active(false);
    JsonUpdater::default()
        .merge_reader(&mut builder, &mut reader)
        .context("failed to parse contact")?;
    builder.build().context("invalid contact")
}

/// Maps the command-line switches onto an updater configuration.
#[must_use]
pub fn updater_config(reject_unknown: bool, skip_nulls: bool) -> UpdaterConfig {
    let unknown = if reject_unknown {
        UnknownFields::Reject
    } else {
        UnknownFields::Ignore
    };
    let nulls = if skip_nulls {
        NullFields::Skip
    } else {
        NullFields::Assign
    };
    UpdaterConfig::default()
        .with_unknown_fields(unknown)
        .with_null_fields(nulls)
}

/// Applies the patch read from `patch` to `contact`.
pub fn apply_patch<R: Read + ?Sized>(
    updater: &JsonUpdater,
    contact: &Contact,
    patch: &mut R,
) -> Result<Contact> {
    updater
        .update_from_reader(contact, patch)
        .context("failed to apply patch")
}
