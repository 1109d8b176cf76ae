use serde::{Deserialize, Serialize};

/// Binding policy shared by every update an updater performs.
///
/// Loaded once (e.g. from a config file) and read-only afterwards:
///
/// ```json
/// {"unknown_fields": "reject", "null_fields": "skip"}
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    pub unknown_fields: UnknownFields,
    pub null_fields: NullFields,
}

impl UpdaterConfig {
    #[must_use]
    pub const fn with_unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }

    #[must_use]
    pub const fn with_null_fields(mut self, policy: NullFields) -> Self {
        self.null_fields = policy;
        self
    }
}

/// What happens to fragment keys that name no field of the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Skip the key and its value (patch semantics, default).
    #[default]
    Ignore,
    /// Fail the whole update with an "unknown field" error.
    Reject,
}

/// How an explicit JSON `null` for a known field is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullFields {
    /// Deserialize `null` into the field's type like any other value.
    /// Clears `Option` fields; a type error for everything else (default).
    #[default]
    Assign,
    /// Treat `null` as if the key were absent.
    Skip,
}
