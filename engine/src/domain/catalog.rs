//! Catalog collaborator shapes.
//!
//! The catalog is a passive, read-only input: the engine looks records up by
//! id and snapshots denormalized fields into usage history, but never
//! mutates or owns them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation error for [`AppId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("app id must be a non-empty trimmed string")]
pub struct AppIdValidationError;

/// Opaque catalog record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppId(String);

impl AppId {
    /// Validate and construct an [`AppId`].
    pub fn new(id: impl Into<String>) -> Result<Self, AppIdValidationError> {
        let raw = id.into();
        if raw.is_empty() || raw.trim() != raw {
            return Err(AppIdValidationError);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AppId> for String {
    fn from(value: AppId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AppId {
    type Error = AppIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Catalog browsing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Social and messaging apps.
    Social,
    /// Games.
    Games,
    /// Education and learning.
    Education,
    /// General-purpose utilities.
    Utilities,
    /// Productivity and office tools.
    Productivity,
    /// Media and entertainment.
    Entertainment,
    /// Banking and finance.
    Finance,
}

/// A catalog app record as supplied by the catalog store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    /// Opaque identifier.
    pub id: AppId,
    /// Display name.
    pub name: String,
    /// Short marketing description.
    pub description: String,
    /// Icon image reference.
    pub icon: String,
    /// Browsing category.
    pub category: Category,
    /// Primary launch URL.
    #[serde(rename = "url1")]
    pub primary_url: String,
    /// Failover launch URL.
    #[serde(rename = "url2")]
    pub failover_url: String,
    /// Whether launching requires the paid tier.
    pub is_premium: bool,
    /// Aggregate star rating.
    pub rating: f32,
    /// Total recorded launches.
    pub plays: u64,
}
