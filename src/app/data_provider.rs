//! Referenzdaten der Karte: Organisationen, Länder, Kooperationen, Konferenzen.
//!
//! Die Daten werden einmal beim Start geladen und danach nur noch gelesen;
//! Komponenten bekommen sie als `Arc` übergeben.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{EdgeKey, GroupKey, MarkerId};

/// Kooperations-Gewichte je ungeordnetem Paar.
pub type CooperationWeights = IndexMap<EdgeKey, u32>;

/// Lesender Zugriff auf Entitäten, Gruppen und Kooperationen.
pub trait DataProvider: Send + Sync {
    /// Alle Entitäten (Organisationen), sortiert.
    fn all_entities(&self) -> Vec<MarkerId>;

    /// Position einer Entität.
    fn location_of(&self, id: &MarkerId) -> Option<Vec2>;

    /// Gruppe (Land) einer Entität.
    fn group_key_of(&self, id: &MarkerId) -> Option<GroupKey>;

    /// Position einer Gruppe.
    fn group_location(&self, group: &GroupKey) -> Option<Vec2>;

    /// Alle Entitäten einer Gruppe, sortiert.
    fn group_members(&self, group: &GroupKey) -> Vec<MarkerId>;

    /// Kooperations-Gewichte über den gesamten Datenbestand.
    fn cooperation_weights(&self) -> CooperationWeights;

    /// Kooperations-Gewichte einer Teilsammlung (Konferenz-Kürzel, z.B. `LAK2013`).
    fn cooperation_weights_for(&self, collection: &str) -> CooperationWeights;

    /// Entitäten einer Teilsammlung.
    fn entities_for(&self, collection: &str) -> Vec<MarkerId>;

    /// Alle Entitäts-Kooperationen zwischen zwei Gruppen (Reihenfolge egal).
    fn cooperations_between_groups(&self, a: &GroupKey, b: &GroupKey) -> Vec<EdgeKey>;
}

/// Konferenz-Katalog für die Konferenz/Jahr-Auswahl.
pub trait ConferenceCatalog: Send + Sync {
    /// Alle Konferenznamen, sortiert.
    fn conferences(&self) -> Vec<String>;

    fn has_taken_place(&self, conference: &str, year: i32) -> bool;

    fn min_year(&self) -> Option<i32>;

    fn max_year(&self) -> Option<i32>;
}

/// Kürzel einer Konferenz in einem Jahr (`LAK` + `2013` → `LAK2013`).
pub fn conference_acronym(conference: &str, year: i32) -> String {
    format!("{conference}{year}")
}

/// Organisation im Datensatz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub location: Option<[f32; 2]>,
}

/// Land im Datensatz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub location: [f32; 2],
}

/// Kooperation zweier Organisationen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooperationRecord {
    pub a: String,
    pub b: String,
    pub weight: u32,
}

/// Eine Konferenz in einem Jahr mit ihren Teilnehmern und Kooperationen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceRecord {
    pub conference: String,
    pub year: i32,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub cooperations: Vec<CooperationRecord>,
}

/// Serialisierbarer Rohdatensatz.
///
/// Ist `cooperations` leer, ergeben sich die Gesamtgewichte aus der Summe
/// aller Konferenz-Kooperationen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub organizations: Vec<OrganizationRecord>,
    #[serde(default)]
    pub countries: Vec<CountryRecord>,
    #[serde(default)]
    pub cooperations: Vec<CooperationRecord>,
    #[serde(default)]
    pub conferences: Vec<ConferenceRecord>,
}

impl Dataset {
    /// Parst einen Datensatz aus JSON.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Datensatz ist kein gültiges JSON")
    }

    /// Lädt einen Datensatz aus einer JSON-Datei.
    pub fn load_json(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Datensatz nicht lesbar: {}", path.display()))?;
        let dataset = Self::from_json(&text)?;
        log::info!(
            "Datensatz geladen aus {}: {} Organisationen, {} Länder, {} Konferenzen",
            path.display(),
            dataset.organizations.len(),
            dataset.countries.len(),
            dataset.conferences.len()
        );
        Ok(dataset)
    }
}

/// Summiert Kooperationen in `weights`; Selbst-Kooperationen werden verworfen.
fn merge_cooperations<'a>(
    weights: &mut CooperationWeights,
    records: impl IntoIterator<Item = &'a CooperationRecord>,
) {
    for record in records {
        let key = EdgeKey::new(record.a.as_str(), record.b.as_str());
        if key.is_loop() {
            log::debug!("Selbst-Kooperation von {} ignoriert", record.a);
            continue;
        }
        let weight = weights.entry(key).or_insert(0);
        *weight = weight.saturating_add(record.weight);
    }
}

/// Summiert `source` in `target` (gleiche Paare addieren sich).
pub fn merge_weights(target: &mut CooperationWeights, source: &CooperationWeights) {
    for (key, weight) in source {
        let sum = target.entry(key.clone()).or_insert(0);
        *sum = sum.saturating_add(*weight);
    }
}

/// Ungeordnetes Gruppenpaar als Map-Schlüssel.
fn group_pair(a: &GroupKey, b: &GroupKey) -> (GroupKey, GroupKey) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Eager aufgebauter, unveränderlicher Datenbestand im Speicher.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataProvider {
    entities: BTreeSet<MarkerId>,
    entity_locations: HashMap<MarkerId, Vec2>,
    entity_groups: HashMap<MarkerId, GroupKey>,
    group_locations: HashMap<GroupKey, Vec2>,
    group_members: HashMap<GroupKey, Vec<MarkerId>>,
    weights: CooperationWeights,
    group_cooperations: HashMap<(GroupKey, GroupKey), Vec<EdgeKey>>,
    collection_weights: HashMap<String, CooperationWeights>,
    collection_entities: HashMap<String, Vec<MarkerId>>,
    conferences: BTreeMap<String, BTreeSet<i32>>,
}

impl InMemoryDataProvider {
    /// Baut alle Indizes aus einem Rohdatensatz.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut provider = Self::default();

        for org in &dataset.organizations {
            let id = MarkerId::new(org.name.clone());
            provider.entities.insert(id.clone());
            if let Some([x, y]) = org.location {
                provider.entity_locations.insert(id.clone(), Vec2::new(x, y));
            }
            if let Some(country) = &org.country {
                let group = GroupKey::new(country.clone());
                provider
                    .group_members
                    .entry(group.clone())
                    .or_default()
                    .push(id.clone());
                provider.entity_groups.insert(id, group);
            }
        }
        for members in provider.group_members.values_mut() {
            members.sort();
            members.dedup();
        }

        for country in &dataset.countries {
            let [x, y] = country.location;
            provider
                .group_locations
                .insert(GroupKey::new(country.name.clone()), Vec2::new(x, y));
        }

        for record in &dataset.conferences {
            let acronym = conference_acronym(&record.conference, record.year);
            provider
                .conferences
                .entry(record.conference.clone())
                .or_default()
                .insert(record.year);

            let weights = provider.collection_weights.entry(acronym.clone()).or_default();
            merge_cooperations(weights, &record.cooperations);

            let entities = provider.collection_entities.entry(acronym).or_default();
            entities.extend(record.organizations.iter().map(|name| MarkerId::new(name.clone())));
            entities.sort();
            entities.dedup();
        }

        if dataset.cooperations.is_empty() {
            let mut weights = CooperationWeights::new();
            for record in &dataset.conferences {
                merge_cooperations(&mut weights, &record.cooperations);
            }
            provider.weights = weights;
        } else {
            merge_cooperations(&mut provider.weights, &dataset.cooperations);
        }

        let mut group_cooperations: HashMap<(GroupKey, GroupKey), Vec<EdgeKey>> = HashMap::new();
        for key in provider.weights.keys() {
            let groups = (
                provider.entity_groups.get(key.first()),
                provider.entity_groups.get(key.second()),
            );
            match groups {
                (Some(a), Some(b)) => group_cooperations
                    .entry(group_pair(a, b))
                    .or_default()
                    .push(key.clone()),
                _ => log::error!("Kein Land für Kooperation {} bekannt", key),
            }
        }
        provider.group_cooperations = group_cooperations;

        log::debug!(
            "Datenbestand aufgebaut: {} Entitäten, {} Gruppen, {} Kooperationen, {} Teilsammlungen",
            provider.entities.len(),
            provider.group_locations.len(),
            provider.weights.len(),
            provider.collection_weights.len()
        );

        provider
    }
}

impl DataProvider for InMemoryDataProvider {
    fn all_entities(&self) -> Vec<MarkerId> {
        self.entities.iter().cloned().collect()
    }

    fn location_of(&self, id: &MarkerId) -> Option<Vec2> {
        self.entity_locations.get(id).copied()
    }

    fn group_key_of(&self, id: &MarkerId) -> Option<GroupKey> {
        self.entity_groups.get(id).cloned()
    }

    fn group_location(&self, group: &GroupKey) -> Option<Vec2> {
        self.group_locations.get(group).copied()
    }

    fn group_members(&self, group: &GroupKey) -> Vec<MarkerId> {
        self.group_members.get(group).cloned().unwrap_or_default()
    }

    fn cooperation_weights(&self) -> CooperationWeights {
        self.weights.clone()
    }

    fn cooperation_weights_for(&self, collection: &str) -> CooperationWeights {
        match self.collection_weights.get(collection) {
            Some(weights) => weights.clone(),
            None => {
                log::warn!("Unbekannte Teilsammlung {}", collection);
                CooperationWeights::new()
            }
        }
    }

    fn entities_for(&self, collection: &str) -> Vec<MarkerId> {
        self.collection_entities
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn cooperations_between_groups(&self, a: &GroupKey, b: &GroupKey) -> Vec<EdgeKey> {
        self.group_cooperations
            .get(&group_pair(a, b))
            .cloned()
            .unwrap_or_default()
    }
}

impl ConferenceCatalog for InMemoryDataProvider {
    fn conferences(&self) -> Vec<String> {
        self.conferences.keys().cloned().collect()
    }

    fn has_taken_place(&self, conference: &str, year: i32) -> bool {
        self.conferences
            .get(conference)
            .is_some_and(|years| years.contains(&year))
    }

    fn min_year(&self) -> Option<i32> {
        self.conferences
            .values()
            .filter_map(|years| years.first().copied())
            .min()
    }

    fn max_year(&self) -> Option<i32> {
        self.conferences
            .values()
            .filter_map(|years| years.last().copied())
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_json(
            r#"{
                "organizations": [
                    {"name": "Org1", "country": "CountryX", "location": [0.0, 0.0]},
                    {"name": "Org2", "country": "CountryX", "location": [1.0, 0.0]},
                    {"name": "Org3", "country": "CountryY", "location": [5.0, 5.0]}
                ],
                "countries": [
                    {"name": "CountryX", "location": [0.5, 0.5]},
                    {"name": "CountryY", "location": [5.0, 6.0]}
                ],
                "conferences": [
                    {"conference": "LAK", "year": 2012,
                     "organizations": ["Org1", "Org3"],
                     "cooperations": [{"a": "Org3", "b": "Org1", "weight": 2}]},
                    {"conference": "LAK", "year": 2013,
                     "organizations": ["Org1", "Org2", "Org3"],
                     "cooperations": [{"a": "Org1", "b": "Org3", "weight": 1},
                                      {"a": "Org1", "b": "Org2", "weight": 4}]},
                    {"conference": "EDM", "year": 2013,
                     "organizations": ["Org2"],
                     "cooperations": []}
                ]
            }"#,
        )
        .expect("gültiges JSON")
    }

    #[test]
    fn test_global_weights_sum_conference_cooperations() {
        let provider = InMemoryDataProvider::from_dataset(&dataset());
        let weights = provider.cooperation_weights();

        assert_eq!(weights.get(&EdgeKey::new("Org1", "Org3")), Some(&3));
        assert_eq!(weights.get(&EdgeKey::new("Org2", "Org1")), Some(&4));
        assert_eq!(weights.len(), 2);
    }

    #[test]
    fn test_explicit_cooperations_take_precedence() {
        let mut data = dataset();
        data.cooperations = vec![
            CooperationRecord {
                a: "Org2".into(),
                b: "Org3".into(),
                weight: 7,
            },
            CooperationRecord {
                a: "Org3".into(),
                b: "Org3".into(),
                weight: 1,
            },
        ];
        let provider = InMemoryDataProvider::from_dataset(&data);

        let weights = provider.cooperation_weights();
        assert_eq!(weights.len(), 1);
        assert_eq!(weights.get(&EdgeKey::new("Org3", "Org2")), Some(&7));
    }

    #[test]
    fn test_large_weights_saturate() {
        let mut data = dataset();
        data.cooperations = vec![
            CooperationRecord {
                a: "Org1".into(),
                b: "Org2".into(),
                weight: u32::MAX,
            },
            CooperationRecord {
                a: "Org2".into(),
                b: "Org1".into(),
                weight: 10,
            },
        ];
        let provider = InMemoryDataProvider::from_dataset(&data);
        let key = EdgeKey::new("Org1", "Org2");
        assert_eq!(provider.cooperation_weights().get(&key), Some(&u32::MAX));

        let mut merged = provider.cooperation_weights();
        merge_weights(&mut merged, &provider.cooperation_weights());
        assert_eq!(merged.get(&key), Some(&u32::MAX));
    }

    #[test]
    fn test_group_queries() {
        let provider = InMemoryDataProvider::from_dataset(&dataset());
        let x = GroupKey::from("CountryX");
        let y = GroupKey::from("CountryY");

        assert_eq!(provider.group_key_of(&MarkerId::from("Org2")), Some(x.clone()));
        assert_eq!(
            provider.group_members(&x),
            vec![MarkerId::from("Org1"), MarkerId::from("Org2")]
        );
        assert_eq!(provider.group_location(&y), Some(Vec2::new(5.0, 6.0)));
        assert_eq!(
            provider.cooperations_between_groups(&y, &x),
            vec![EdgeKey::new("Org1", "Org3")]
        );
        assert_eq!(
            provider.cooperations_between_groups(&x, &x),
            vec![EdgeKey::new("Org1", "Org2")]
        );
        assert!(provider.group_members(&GroupKey::from("Nowhere")).is_empty());
    }

    #[test]
    fn test_collection_scoped_queries() {
        let provider = InMemoryDataProvider::from_dataset(&dataset());

        assert_eq!(
            provider.cooperation_weights_for("LAK2012").get(&EdgeKey::new("Org1", "Org3")),
            Some(&2)
        );
        assert_eq!(provider.entities_for("EDM2013"), vec![MarkerId::from("Org2")]);
        assert!(provider.cooperation_weights_for("LAK1999").is_empty());
        assert!(provider.entities_for("LAK1999").is_empty());
    }

    #[test]
    fn test_conference_catalog() {
        let provider = InMemoryDataProvider::from_dataset(&dataset());

        assert_eq!(provider.conferences(), vec!["EDM".to_string(), "LAK".to_string()]);
        assert!(provider.has_taken_place("LAK", 2012));
        assert!(!provider.has_taken_place("EDM", 2012));
        assert_eq!(provider.min_year(), Some(2012));
        assert_eq!(provider.max_year(), Some(2013));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = Dataset::from_json("{ kaputt").unwrap_err();
        assert!(format!("{err:#}").contains("kein gültiges JSON"));
    }
}
