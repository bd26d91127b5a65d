//! Workbook metadata decoded from the profile listing endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// One published workbook as reported by the listing endpoint.
///
/// Values are read-only once decoded; accessors hand out borrowed views.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Workbook {
    #[serde(
        rename = "workbookRepoUrl",
        default,
        deserialize_with = "null_as_default"
    )]
    repository_id: String,
    #[serde(rename = "size", default, deserialize_with = "null_as_default")]
    size_bytes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(
        rename = "showInProfile",
        default,
        deserialize_with = "null_as_default"
    )]
    show_in_profile: bool,
    #[serde(
        rename = "allowDataAccess",
        default,
        deserialize_with = "null_as_default"
    )]
    allow_data_access: bool,
}

impl Workbook {
    /// Repository identifier: lookup key for downloads and base filename on disk.
    #[must_use]
    pub fn repository_id(&self) -> &str {
        &self.repository_id
    }

    /// Artifact size reported by the platform. Not verified against downloads.
    #[must_use]
    pub fn size_bytes(&self) -> i64 {
        self.size_bytes
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn show_in_profile(&self) -> bool {
        self.show_in_profile
    }

    #[must_use]
    pub fn allow_data_access(&self) -> bool {
        self.allow_data_access
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
