//! Gazetteer location dictionary.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::loader;
use super::traits::LocationsDictionary;
use crate::types::Location;
use crate::{MimirError, Result};

/// Serialized locations file.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsModel {
    pub locations: Vec<Location>,
}

/// Case-insensitive lookup over names and aliases.
///
/// An ambiguous name resolves to the most populous location, then the
/// smallest id.
pub struct GazetteerLocations {
    locations: Vec<Location>,
    index: HashMap<String, Vec<usize>>,
}

impl GazetteerLocations {
    pub fn new(model: LocationsModel) -> Result<Self> {
        if model.locations.is_empty() {
            return Err(MimirError::Configuration(
                "locations file has no entries".to_string(),
            ));
        }

        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, location) in model.locations.iter().enumerate() {
            for name in std::iter::once(&location.name).chain(&location.aliases) {
                let entry = index.entry(normalize(name)).or_default();
                if !entry.contains(&i) {
                    entry.push(i);
                }
            }
        }

        Ok(Self {
            locations: model.locations,
            index,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(loader::read_json(path)?)
    }
}

impl LocationsDictionary for GazetteerLocations {
    fn resolve(&self, candidate: &str) -> Option<Location> {
        self.index
            .get(&normalize(candidate))?
            .iter()
            .map(|&i| &self.locations[i])
            .max_by(|a, b| {
                a.population
                    .cmp(&b.population)
                    .then_with(|| b.id.cmp(&a.id))
            })
            .cloned()
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, name: &str, population: u64, aliases: &[&str]) -> Location {
        Location {
            id: id.into(),
            name: name.into(),
            country: None,
            latitude: 0.0,
            longitude: 0.0,
            population,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn resolves_names_and_aliases() {
        let gazetteer = GazetteerLocations::new(LocationsModel {
            locations: vec![place("1", "München", 1_500_000, &["Munich"])],
        })
        .unwrap();
        assert_eq!(gazetteer.resolve("munich").map(|l| l.id), Some("1".into()));
        assert_eq!(gazetteer.resolve("  MÜNCHEN ").map(|l| l.id), Some("1".into()));
        assert!(gazetteer.resolve("Berlin").is_none());
    }

    #[test]
    fn ambiguity_prefers_population_then_id() {
        let gazetteer = GazetteerLocations::new(LocationsModel {
            locations: vec![
                place("b", "Paris", 25_000, &[]),
                place("a", "Paris", 2_100_000, &[]),
                place("c", "Springfield", 100, &[]),
                place("d", "Springfield", 100, &[]),
            ],
        })
        .unwrap();
        assert_eq!(gazetteer.resolve("paris").map(|l| l.id), Some("a".into()));
        assert_eq!(gazetteer.resolve("springfield").map(|l| l.id), Some("c".into()));
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(GazetteerLocations::new(LocationsModel { locations: vec![] }).is_err());
    }
}
