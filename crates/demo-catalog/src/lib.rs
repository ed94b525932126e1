//! Bundled demonstration app catalog.
//!
//! The engine treats the catalog as a passive collaborator, so a fresh
//! deployment starts empty. This crate ships a small, fixed catalog for
//! demos and tests. Its types mirror the engine's catalog wire format
//! (camelCase keys, `url1`/`url2` launch links) without depending on the
//! engine crate, so either side can evolve independently; records cross the
//! boundary as JSON.
//!
//! # Example
//!
//! ```
//! let apps = demo_catalog::load_demo_catalog().expect("bundled catalog parses");
//! assert!(apps.iter().any(|app| app.name == "CloudCalc"));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUNDLED_CATALOG: &str = include_str!("../data/demo_catalog.json");

/// Errors raised while loading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid catalog JSON.
    #[error("catalog document malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The document parsed but violates a catalog constraint.
    #[error("catalog document invalid: {0}")]
    Invalid(String),
}

/// Browsing category, matching the engine's wire labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemoCategory {
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

/// One catalog record in the engine's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoApp {
    /// Opaque identifier, unique within the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short marketing description.
    pub description: String,
    /// Icon reference.
    pub icon: String,
    /// Browsing category.
    pub category: DemoCategory,
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

/// Parse a catalog document from JSON.
///
/// # Errors
///
/// Returns [`CatalogError::Malformed`] for unparseable JSON and
/// [`CatalogError::Invalid`] for duplicate or empty record ids.
pub fn parse_catalog(json: &str) -> Result<Vec<DemoApp>, CatalogError> {
    let apps: Vec<DemoApp> = serde_json::from_str(json)?;
    let mut seen = std::collections::HashSet::new();
    for app in &apps {
        if app.id.trim().is_empty() {
            return Err(CatalogError::Invalid(format!(
                "record {:?} has an empty id",
                app.name
            )));
        }
        if !seen.insert(app.id.as_str()) {
            return Err(CatalogError::Invalid(format!(
                "duplicate record id {:?}",
                app.id
            )));
        }
    }
    Ok(apps)
}

/// Load the catalog bundled with this crate.
///
/// # Errors
///
/// Returns [`CatalogError`] if the bundled document fails to parse; the
/// crate's tests keep this from happening in a release.
pub fn load_demo_catalog() -> Result<Vec<DemoApp>, CatalogError> {
    parse_catalog(BUNDLED_CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn bundled_catalog_parses_and_has_unique_ids() {
        let apps = load_demo_catalog().expect("bundled catalog parses");
        assert!(!apps.is_empty());
        let ids: std::collections::HashSet<&str> =
            apps.iter().map(|app| app.id.as_str()).collect();
        assert_eq!(ids.len(), apps.len());
    }

    #[rstest]
    fn bundled_catalog_covers_both_tiers() {
        let apps = load_demo_catalog().expect("bundled catalog parses");
        assert!(apps.iter().any(|app| app.is_premium));
        assert!(apps.iter().any(|app| !app.is_premium));
    }

    #[rstest]
    fn records_serialize_launch_urls_under_legacy_keys() {
        let apps = load_demo_catalog().expect("bundled catalog parses");
        let json = serde_json::to_string(apps.first().expect("at least one app"))
            .expect("serialize");
        assert!(json.contains("\"url1\""));
        assert!(json.contains("\"url2\""));
    }

    #[rstest]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id":"a","name":"A","description":"","icon":"","category":"Games",
             "url1":"https://x/a","url2":"https://y/a","isPremium":false,"rating":4.0,"plays":1},
            {"id":"a","name":"A2","description":"","icon":"","category":"Games",
             "url1":"https://x/a","url2":"https://y/a","isPremium":false,"rating":4.0,"plays":1}
        ]"#;
        let err = parse_catalog(json).expect_err("duplicate id rejected");
        assert!(err.to_string().contains("duplicate"));
    }

    #[rstest]
    fn empty_ids_are_rejected() {
        let json = r#"[
            {"id":"  ","name":"A","description":"","icon":"","category":"Games",
             "url1":"https://x/a","url2":"https://y/a","isPremium":false,"rating":4.0,"plays":1}
        ]"#;
        let err = parse_catalog(json).expect_err("empty id rejected");
        assert!(err.to_string().contains("empty id"));
    }
}
