//! In-place merge of a JSON object onto a builder.
//!
//! The fragment is walked with a [`DeserializeSeed`] that owns a mutable
//! borrow of the builder. Each value's deserializer is handed straight to
//! [`FieldMerge::merge_field`], so no intermediate document or fresh record
//! is ever produced and absent keys keep the builder's seeded values.

use crate::{NullFields, UnknownFields, UpdaterConfig};
use patchwork_builder::FieldMerge;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, Visitor};
use std::fmt;
use tracing::{debug, trace};

/// Per-update counters of how the fragment's keys were applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Keys written into a builder field.
    pub merged: usize,
    /// Unknown keys that were skipped.
    pub ignored: usize,
    /// Explicit `null`s dropped under [`NullFields::Skip`].
    pub skipped_nulls: usize,
}

impl MergeStats {
    /// Total number of keys seen in the fragment.
    #[must_use]
    pub fn keys(&self) -> usize {
        self.merged + self.ignored + self.skipped_nulls
    }
}

/// Seed for the top-level fragment object.
///
/// On failure, `failed_field` holds the key whose value was being bound.
pub(crate) struct MergeSeed<'a, B> {
    builder: &'a mut B,
    failed_field: &'a mut Option<String>,
    config: UpdaterConfig,
}

impl<'a, B: FieldMerge> MergeSeed<'a, B> {
    pub(crate) fn new(
        builder: &'a mut B,
        failed_field: &'a mut Option<String>,
        config: UpdaterConfig,
    ) -> Self {
        Self {
            builder,
            failed_field,
            config,
        }
    }
}

impl<'de, B: FieldMerge> DeserializeSeed<'de> for MergeSeed<'_, B> {
    type Value = MergeStats;

    fn deserialize<D>(self, deserializer: D) -> Result<MergeStats, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, B: FieldMerge> Visitor<'de> for MergeSeed<'_, B> {
    type Value = MergeStats;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object of fields to update")
    }

    fn visit_map<A>(self, mut map: A) -> Result<MergeStats, A::Error>
    where
        A: MapAccess<'de>,
    {
        let MergeSeed {
            builder,
            failed_field,
            config,
        } = self;
        let mut stats = MergeStats::default();

        while let Some(key) = map.next_key::<String>()? {
            let seed = FieldSeed {
                builder: &mut *builder,
                name: &key,
                nulls: config.null_fields,
            };
            let outcome = match map.next_value_seed(seed) {
                Ok(outcome) => outcome,
                Err(err) => {
                    *failed_field = Some(key);
                    return Err(err);
                }
            };

            match outcome {
                FieldOutcome::Merged => {
                    trace!(field = %key, "merged field");
                    stats.merged += 1;
                }
                FieldOutcome::SkippedNull => {
                    trace!(field = %key, "skipped explicit null");
                    stats.skipped_nulls += 1;
                }
                FieldOutcome::Unknown => match config.unknown_fields {
                    UnknownFields::Ignore => {
                        debug!(field = %key, "ignoring unknown field");
                        stats.ignored += 1;
                    }
                    UnknownFields::Reject => {
                        let err = <A::Error as de::Error>::unknown_field(&key, B::FIELDS);
                        *failed_field = Some(key);
                        return Err(err);
                    }
                },
            }
        }

        Ok(stats)
    }
}

enum FieldOutcome {
    Merged,
    Unknown,
    SkippedNull,
}

impl FieldOutcome {
    fn from_known(known: bool) -> Self {
        if known { Self::Merged } else { Self::Unknown }
    }
}

/// Seed for a single value, bound to the key it belongs to.
struct FieldSeed<'a, B> {
    builder: &'a mut B,
    name: &'a str,
    nulls: NullFields,
}

impl<'de, B: FieldMerge> DeserializeSeed<'de> for FieldSeed<'_, B> {
    type Value = FieldOutcome;

    fn deserialize<D>(self, deserializer: D) -> Result<FieldOutcome, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self.nulls {
            NullFields::Skip if B::FIELDS.iter().any(|field| *field == self.name) => {
                deserializer.deserialize_option(self)
            }
            _ => self
                .builder
                .merge_field(self.name, deserializer)
                .map(FieldOutcome::from_known),
        }
    }
}

// Only reached for known fields under `NullFields::Skip`: `deserialize_option`
// splits an explicit null from every other value without consuming the latter.
impl<'de, B: FieldMerge> Visitor<'de> for FieldSeed<'_, B> {
    type Value = FieldOutcome;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a value for field `{}`", self.name)
    }

    fn visit_none<E: de::Error>(self) -> Result<FieldOutcome, E> {
        Ok(FieldOutcome::SkippedNull)
    }

    fn visit_unit<E: de::Error>(self) -> Result<FieldOutcome, E> {
        Ok(FieldOutcome::SkippedNull)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<FieldOutcome, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.builder
            .merge_field(self.name, deserializer)
            .map(FieldOutcome::from_known)
    }
}
