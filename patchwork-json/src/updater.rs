use crate::merge::MergeSeed;
use crate::{MergeStats, UpdateError, UpdateResult, UpdaterConfig};
use patchwork_builder::{Buildable, FieldMerge, ToBuilder};
use serde::de::DeserializeSeed;
use serde_json::de::Read;
use std::io;
use std::sync::OnceLock;
use tracing::debug;

static GLOBAL: OnceLock<JsonUpdater> = OnceLock::new();

/// Applies partial JSON fragments to immutable records.
///
/// Stateless apart from its [`UpdaterConfig`]; copy it freely or share one
/// process-wide instance through [`install`](JsonUpdater::install) and
/// [`global`](JsonUpdater::global). Every call allocates its own builder,
/// so concurrent updates never interact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonUpdater {
    config: UpdaterConfig,
}

impl JsonUpdater {
    #[must_use]
    pub const fn new(config: UpdaterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> UpdaterConfig {
        self.config
    }

    /// Installs the process-wide updater.
    ///
    /// Only the first installation (or first call to [`global`](Self::global))
    /// takes effect. Later attempts get `Err` holding the updater already in
    /// place.
    pub fn install(config: UpdaterConfig) -> Result<&'static Self, &'static Self> {
        let mut installed = false;
        let updater = GLOBAL.get_or_init(|| {
            installed = true;
            Self::new(config)
        });
        if installed { Ok(updater) } else { Err(updater) }
    }

    /// Returns the process-wide updater, installing the default one if none
    /// was installed yet.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::default)
    }

    /// Returns a copy of `value` with the fields named in `json` replaced.
    ///
    /// For a record `{id: 1, name: "1"}`, the fragment `{"id":44}` yields
    /// `{id: 44, name: "1"}`. `value` itself is never modified.
    ///
    /// # Errors
    ///
    /// - [`UpdateError::Malformed`] when `json` is not a single JSON object.
    /// - [`UpdateError::InvalidField`] when a value does not fit its field, or
    ///   a key is unknown and unknown keys are rejected.
    /// - [`UpdateError::Build`] when the merged builder fails to build.
    pub fn update_from_str<V>(&self, value: &V, json: &str) -> UpdateResult<V>
    where
        V: ToBuilder,
        V::Builder: FieldMerge,
    {
        self.update_with(value, serde_json::Deserializer::from_str(json))
    }

    /// Same as [`update_from_str`](Self::update_from_str) for UTF-8 bytes.
    pub fn update_from_slice<V>(&self, value: &V, json: &[u8]) -> UpdateResult<V>
    where
        V: ToBuilder,
        V::Builder: FieldMerge,
    {
        self.update_with(value, serde_json::Deserializer::from_slice(json))
    }

    /// Same as [`update_from_str`](Self::update_from_str), reading the
    /// fragment from a byte stream.
    ///
    /// The stream is only borrowed: it is read to the end of the fragment and
    /// stays open and usable by the caller afterwards. Reads are unbuffered,
    /// so wrap slow sources in a [`BufReader`](std::io::BufReader).
    ///
    /// # Errors
    ///
    /// As for `update_from_str`, plus [`UpdateError::Io`] carrying the
    /// original error when the stream cannot be read.
    pub fn update_from_reader<V, R>(&self, value: &V, reader: &mut R) -> UpdateResult<V>
    where
        V: ToBuilder,
        V::Builder: FieldMerge,
        R: io::Read + ?Sized,
    {
        self.update_with(value, serde_json::Deserializer::from_reader(reader))
    }

    /// Same as [`update_from_str`](Self::update_from_str) for a fragment that
    /// is already parsed. Errors carry no line/column information.
    pub fn update_from_value<V>(&self, value: &V, json: serde_json::Value) -> UpdateResult<V>
    where
        V: ToBuilder,
        V::Builder: FieldMerge,
    {
        let mut builder = value.to_builder();
        let mut failed_field = None;
        let stats = MergeSeed::new(&mut builder, &mut failed_field, self.config)
            .deserialize(json)
            .map_err(|source| UpdateError::from_json(source, failed_field))?;
        Self::finish(&builder, stats)
    }

    /// Merges `json` onto a caller-owned builder without building it.
    ///
    /// On error the builder may already hold the fields merged before the
    /// failing key; discard it rather than building from it.
    pub fn merge_str<B: FieldMerge>(&self, builder: &mut B, json: &str) -> UpdateResult<MergeStats> {
        self.merge_with(builder, &mut serde_json::Deserializer::from_str(json))
    }

    /// Byte-slice variant of [`merge_str`](Self::merge_str).
    pub fn merge_slice<B: FieldMerge>(
        &self,
        builder: &mut B,
        json: &[u8],
    ) -> UpdateResult<MergeStats> {
        self.merge_with(builder, &mut serde_json::Deserializer::from_slice(json))
    }

    /// Stream variant of [`merge_str`](Self::merge_str); the stream is
    /// borrowed and left open.
    pub fn merge_reader<B: FieldMerge, R: io::Read + ?Sized>(
        &self,
        builder: &mut B,
        reader: &mut R,
    ) -> UpdateResult<MergeStats> {
        self.merge_with(builder, &mut serde_json::Deserializer::from_reader(reader))
    }

    fn update_with<'de, V, R>(
        &self,
        value: &V,
        mut deserializer: serde_json::Deserializer<R>,
    ) -> UpdateResult<V>
    where
        V: ToBuilder,
        V::Builder: FieldMerge,
        R: Read<'de>,
    {
        let mut builder = value.to_builder();
        let stats = self.merge_with(&mut builder, &mut deserializer)?;
        Self::finish(&builder, stats)
    }

    fn merge_with<'de, B, R>(
        &self,
        builder: &mut B,
        deserializer: &mut serde_json::Deserializer<R>,
    ) -> UpdateResult<MergeStats>
    where
        B: FieldMerge,
        R: Read<'de>,
    {
        let mut failed_field = None;
        let merged = MergeSeed::new(builder, &mut failed_field, self.config)
            .deserialize(&mut *deserializer)
            .and_then(|stats| deserializer.end().map(|()| stats));
        merged.map_err(|source| UpdateError::from_json(source, failed_field))
    }

    fn finish<B: Buildable>(builder: &B, stats: MergeStats) -> UpdateResult<B::Target> {
        let updated = builder.build()?;
        debug!(
            merged = stats.merged,
            ignored = stats.ignored,
            skipped_nulls = stats.skipped_nulls,
            "applied JSON update"
        );
        Ok(updated)
    }
}
