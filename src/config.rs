//! # Browser configuration
//!
//! [`BrowserConfig`](crate::config::BrowserConfig) holds every user-visible string and fixed name
//! used by the tree builder: the home star looked up for the solar-system root, the titles
//! of roots and star branches, and the **label tables** resolving classifier bucket keys to
//! display names.
//!
//! The defaults are the English strings. Localization stays outside this crate: an
//! application deserializes a translated configuration (any `serde` format) and hands it to
//! the [`BrowserCache`](crate::browser::BrowserCache). Missing fields fall back to the
//! defaults through `#[serde(default)]`.
//!
//! Label tables must cover every key the matching rule table can produce, including
//! [`UNKNOWN_GROUP`](crate::constants::UNKNOWN_GROUP). A missing label is reported when the
//! affected root is built, as [`BrowserError::MissingGroupLabel`](crate::browser_errors::BrowserError::MissingGroupLabel).
//! Labels of one table must also be distinct when their buckets are populated together.
use std::collections::HashMap;

use serde::Deserialize;

use crate::browser_errors::BrowserError;
use crate::catalog::star_browser_kind::StarBrowserKind;
use crate::constants::{GroupKey, HOME_STAR_NAME, UNKNOWN_GROUP};

/// Titles of the browser roots and star branches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserTitles {
    pub solar_system_tab: String,
    pub stars: String,
    pub nearest_stars: String,
    pub brighter_stars: String,
    pub brightest_stars: String,
    pub stars_with_planets: String,
    pub deep_sky: String,
    pub deep_sky_tab: String,
}

impl Default for BrowserTitles {
    fn default() -> Self {
        BrowserTitles {
            solar_system_tab: "Solar System".into(),
            stars: "Stars".into(),
            nearest_stars: "Nearest Stars".into(),
            brighter_stars: "Brightest Stars".into(),
            brightest_stars: "Brightest Stars (Absolute Magnitude)".into(),
            stars_with_planets: "Stars with Planets".into(),
            deep_sky: "Deep Sky Objects".into(),
            deep_sky_tab: "DSOs".into(),
        }
    }
}

impl BrowserTitles {
    /// Title of the star branch listing `kind`.
    pub fn star_kind(&self, kind: StarBrowserKind) -> &str {
        match kind {
            StarBrowserKind::Nearest => &self.nearest_stars,
            StarBrowserKind::Brighter => &self.brighter_stars,
            StarBrowserKind::Brightest => &self.brightest_stars,
            StarBrowserKind::WithPlanets => &self.stars_with_planets,
        }
    }
}

/// Configuration of the browser tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Name of the star looked up for the solar-system root
    pub home_star: String,
    pub titles: BrowserTitles,
    /// Deep-sky bucket key → group label
    pub deep_sky_labels: HashMap<GroupKey, String>,
    /// Solar-system body bucket key → group label
    pub body_labels: HashMap<GroupKey, String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        BrowserConfig {
            home_star: HOME_STAR_NAME.to_string(),
            titles: BrowserTitles::default(),
            deep_sky_labels: label_table(&[
                ("SB", "Galaxies (Barred Spiral)"),
                ("S", "Galaxies (Spiral)"),
                ("E", "Galaxies (Elliptical)"),
                ("Irr", "Galaxies (Irregular)"),
                ("Neb", "Nebulae"),
                ("Glob", "Globulars"),
                ("Open cluster", "Open Clusters"),
                (UNKNOWN_GROUP, "Unknown"),
            ]),
            body_labels: label_table(&[
                ("planet", "Planets"),
                ("dwarfplanet", "Dwarf Planets"),
                ("moon", "Moons"),
                ("minormoon", "Minor Moons"),
                ("asteroid", "Asteroids"),
                ("comet", "Comets"),
                ("spacecraft", "Spacecraft"),
                (UNKNOWN_GROUP, "Other Objects"),
            ]),
        }
    }
}

impl BrowserConfig {
    pub fn with_home_star(mut self, home_star: impl Into<String>) -> Self {
        self.home_star = home_star.into();
        self
    }

    pub fn with_titles(mut self, titles: BrowserTitles) -> Self {
        self.titles = titles;
        self
    }

    /// Replace (or add) the label of one deep-sky bucket.
    pub fn with_deep_sky_label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.deep_sky_labels.insert(key.into(), label.into());
        self
    }

    /// Label of a deep-sky bucket.
    ///
    /// Errors
    /// ----------
    /// * [`BrowserError::MissingGroupLabel`] if the label table has no entry for `key`.
    pub fn deep_sky_label(&self, key: &str) -> Result<&str, BrowserError> {
        resolve_label(&self.deep_sky_labels, key)
    }

    /// Label of a solar-system body bucket.
    ///
    /// Errors
    /// ----------
    /// * [`BrowserError::MissingGroupLabel`] if the label table has no entry for `key`.
    pub fn body_label(&self, key: &str) -> Result<&str, BrowserError> {
        resolve_label(&self.body_labels, key)
    }
}

fn resolve_label<'a>(
    table: &'a HashMap<GroupKey, String>,
    key: &str,
) -> Result<&'a str, BrowserError> {
    table
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| BrowserError::MissingGroupLabel(key.to_string()))
}

fn label_table(pairs: &[(&str, &str)]) -> HashMap<GroupKey, String> {
    pairs
        .iter()
        .map(|(key, label)| (key.to_string(), label.to_string()))
        .collect()
}

#[cfg(test)]
mod test_config {
    use super::*;
    use crate::classifier::{body_rules, deep_sky_rules};

    #[test]
    fn test_default_labels_cover_rule_tables() {
        let config = BrowserConfig::default();
        for key in deep_sky_rules().unwrap().keys() {
            assert!(config.deep_sky_label(key).is_ok(), "missing label for {key}");
        }
        for key in body_rules().unwrap().keys() {
            assert!(config.body_label(key).is_ok(), "missing label for {key}");
        }
    }

    #[test]
    fn test_missing_label() {
        let mut config = BrowserConfig::default();
        config.deep_sky_labels.remove("Glob");
        assert_eq!(
            config.deep_sky_label("Glob"),
            Err(BrowserError::MissingGroupLabel("Glob".into()))
        );
    }

    #[test]
    fn test_builders() {
        let config = BrowserConfig::default()
            .with_home_star("Alpha Centauri A")
            .with_deep_sky_label("Neb", "Nébuleuses");
        assert_eq!(config.home_star, "Alpha Centauri A");
        assert_eq!(config.deep_sky_label("Neb"), Ok("Nébuleuses"));
        assert_eq!(
            config.titles.star_kind(StarBrowserKind::Brightest),
            "Brightest Stars (Absolute Magnitude)"
        );
    }
}
