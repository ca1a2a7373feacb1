//! Bidding zone registry for the dayahead price client.
//!
//! This crate maps short aliases of common bidding zones to the EIC codes the
//! ENTSO-E API expects, along with each market's local time zone.
//!
//! # Example
//!
//! ```
//! use dayahead_areas::AreaRegistry;
//!
//! let registry = AreaRegistry::global();
//!
//! if let Some(area) = registry.get("de-lu") {
//!     println!("{}: {}", area.name(), area.code());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dayahead/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use dayahead_types::{Area, DayaheadError};

/// The area metadata JSON embedded at compile time.
const AREAS_JSON: &str = include_str!("../data/areas.json");

/// Global area registry instance.
static REGISTRY: OnceLock<AreaRegistry> = OnceLock::new();

/// Registry of well-known bidding zones.
#[derive(Debug)]
pub struct AreaRegistry {
    areas: HashMap<String, Area>,
}

impl AreaRegistry {
    /// Returns the global area registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    /// Loads areas from the embedded JSON data.
    fn load() -> Self {
        let areas: HashMap<String, Area> =
            serde_json::from_str(AREAS_JSON).expect("Invalid areas.json");
        Self { areas }
    }

    /// Looks up an area by alias (case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Area> {
        self.areas.get(&id.to_lowercase())
    }

    /// Looks up an area by its EIC code.
    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&Area> {
        self.areas.values().find(|a| a.code() == code)
    }

    /// Resolves user input to an EIC code.
    ///
    /// Accepts a known alias or anything shaped like an EIC code; unlisted codes
    /// are passed through so zones missing from the registry stay reachable.
    ///
    /// # Errors
    ///
    /// Returns [`DayaheadError::UnknownArea`] if the input is neither.
    pub fn resolve<'a>(&'a self, input: &'a str) -> Result<&'a str, DayaheadError> {
        if let Some(area) = self.get(input) {
            return Ok(area.code());
        }
        if Area::looks_like_code(input) {
            return Ok(input);
        }
        Err(DayaheadError::UnknownArea(input.to_string()))
    }

    /// Returns all areas as an iterator.
    pub fn all(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    /// Returns the total number of areas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Returns areas in the given country (ISO 3166 code, case-insensitive).
    pub fn by_country<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a Area> + 'a {
        self.areas
            .values()
            .filter(move |a| a.country().eq_ignore_ascii_case(country))
    }

    /// Searches areas by alias, name or code (case-insensitive).
    pub fn search(&self, pattern: &str) -> Vec<&Area> {
        let pattern = pattern.to_lowercase();
        let mut found: Vec<&Area> = self
            .areas
            .values()
            .filter(|a| {
                a.id().contains(&pattern)
                    || a.name().to_lowercase().contains(&pattern)
                    || a.code().to_lowercase().contains(&pattern)
            })
            .collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        found
    }

    /// Returns all area aliases sorted alphabetically.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.areas.keys().map(String::as_str).collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads() {
        let registry = AreaRegistry::global();
        assert!(!registry.is_empty());
        assert_eq!(registry.ids().len(), registry.len());
    }

    #[test]
    fn test_get_case_insensitive() {
        let registry = AreaRegistry::global();
        let area = registry.get("DE-LU").expect("de-lu should exist");
        assert_eq!(area.code(), "10Y1001A1001A82H");
        assert!(registry.get("se3").is_some());
    }

    #[test]
    fn test_keys_match_ids() {
        let registry = AreaRegistry::global();
        for id in registry.ids() {
            assert_eq!(registry.get(id).map(Area::id), Some(id));
        }
    }

    #[test]
    fn test_codes_well_formed() {
        let registry = AreaRegistry::global();
        for area in registry.all() {
            assert!(Area::looks_like_code(area.code()), "{}", area.code());
        }
    }

    #[test]
    fn test_time_zones_parse() {
        let registry = AreaRegistry::global();
        for area in registry.all() {
            assert!(
                area.time_zone().parse::<chrono_tz::Tz>().is_ok(),
                "{}",
                area.time_zone()
            );
        }
    }

    #[test]
    fn test_resolve() {
        let registry = AreaRegistry::global();
        assert_eq!(registry.resolve("cz").unwrap(), "10YCZ-CEPS-----N");
        assert_eq!(registry.resolve("10YDOM-1001A082L").unwrap(), "10YDOM-1001A082L");
        assert!(matches!(
            registry.resolve("atlantis"),
            Err(DayaheadError::UnknownArea(_))
        ));
    }

    #[test]
    fn test_by_code_and_country() {
        let registry = AreaRegistry::global();
        assert_eq!(registry.by_code("10YFR-RTE------C").map(Area::id), Some("fr"));
        assert_eq!(registry.by_country("no").count(), 5);
    }

    #[test]
    fn test_search() {
        let registry = AreaRegistry::global();
        let results = registry.search("sweden");
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].id(), "se1");
    }
}
