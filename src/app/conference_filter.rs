//! Konferenz/Jahr-Auswahl und die daraus folgenden sichtbaren Konferenz-Kürzel.

use std::collections::BTreeSet;

use indexmap::IndexSet;

use super::data_provider::{conference_acronym, ConferenceCatalog};

/// Was die Karte zeigen soll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterScope {
    /// Gesamter Datenbestand
    All,
    /// Nur die angegebenen Konferenz-Kürzel (z.B. `LAK2013`)
    Acronyms(Vec<String>),
}

/// Aktuelle Auswahl von Konferenzen und Jahren.
#[derive(Debug, Clone, Default)]
pub struct ConferenceSelection {
    conferences: BTreeSet<String>,
    years: BTreeSet<i32>,
    /// Kombinationen aus ausgewählten Konferenzen und Jahren, die stattfanden
    combinations: IndexSet<String>,
}

impl ConferenceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_conferences(&self) -> impl Iterator<Item = &str> {
        self.conferences.iter().map(String::as_str)
    }

    pub fn selected_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    pub fn conference_selected(&mut self, conference: &str, catalog: &dyn ConferenceCatalog) {
        self.conferences.insert(conference.to_string());
        for year in &self.years {
            if catalog.has_taken_place(conference, *year) {
                self.combinations.insert(conference_acronym(conference, *year));
            }
        }
    }

    pub fn conference_unselected(&mut self, conference: &str) {
        self.conferences.remove(conference);
        for year in &self.years {
            self.combinations
                .shift_remove(&conference_acronym(conference, *year));
        }
    }

    pub fn year_selected(&mut self, year: i32, catalog: &dyn ConferenceCatalog) {
        self.years.insert(year);
        for conference in &self.conferences {
            if catalog.has_taken_place(conference, year) {
                self.combinations.insert(conference_acronym(conference, year));
            }
        }
    }

    pub fn year_unselected(&mut self, year: i32) {
        self.years.remove(&year);
        for conference in &self.conferences {
            self.combinations
                .shift_remove(&conference_acronym(conference, year));
        }
    }

    /// Leitet die sichtbaren Kürzel aus der Auswahl ab.
    ///
    /// - nichts ausgewählt: alles
    /// - nur Konferenzen: alle Jahre, in denen sie stattfanden
    /// - nur Jahre: alle Konferenzen dieser Jahre
    /// - beides: die stattgefundenen Kombinationen
    pub fn scope(&self, catalog: &dyn ConferenceCatalog) -> FilterScope {
        if self.conferences.is_empty() && self.years.is_empty() {
            log::debug!("Keine Konferenzen oder Jahre ausgewählt, zeige alles");
            return FilterScope::All;
        }

        if self.years.is_empty() {
            log::debug!(
                "Keine Jahre ausgewählt, zeige {} Konferenz(en) über alle Jahre",
                self.conferences.len()
            );
            let mut acronyms = Vec::new();
            if let (Some(min), Some(max)) = (catalog.min_year(), catalog.max_year()) {
                for year in min..=max {
                    for conference in &self.conferences {
                        if catalog.has_taken_place(conference, year) {
                            acronyms.push(conference_acronym(conference, year));
                        }
                    }
                }
            }
            return FilterScope::Acronyms(acronyms);
        }

        if self.conferences.is_empty() {
            log::debug!(
                "Keine Konferenzen ausgewählt, zeige {} Jahr(e) über alle Konferenzen",
                self.years.len()
            );
            let conferences = catalog.conferences();
            let mut acronyms = Vec::new();
            for year in &self.years {
                for conference in &conferences {
                    if catalog.has_taken_place(conference, *year) {
                        acronyms.push(conference_acronym(conference, *year));
                    }
                }
            }
            return FilterScope::Acronyms(acronyms);
        }

        log::debug!("Zeige {} Konferenz/Jahr-Kombinationen", self.combinations.len());
        FilterScope::Acronyms(self.combinations.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Catalog;

    impl ConferenceCatalog for Catalog {
        fn conferences(&self) -> Vec<String> {
            vec!["EDM".to_string(), "LAK".to_string()]
        }

        fn has_taken_place(&self, conference: &str, year: i32) -> bool {
            matches!((conference, year), ("LAK", 2011..=2013) | ("EDM", 2012))
        }

        fn min_year(&self) -> Option<i32> {
            Some(2011)
        }

        fn max_year(&self) -> Option<i32> {
            Some(2013)
        }
    }

    fn acronyms(scope: FilterScope) -> Vec<String> {
        match scope {
            FilterScope::Acronyms(list) => list,
            FilterScope::All => panic!("Konferenz-Filter erwartet"),
        }
    }

    #[test]
    fn test_nothing_selected_shows_all() {
        assert_eq!(ConferenceSelection::new().scope(&Catalog), FilterScope::All);
    }

    #[test]
    fn test_only_conferences_selected_spans_all_years() {
        let mut selection = ConferenceSelection::new();
        selection.conference_selected("LAK", &Catalog);

        assert_eq!(
            acronyms(selection.scope(&Catalog)),
            vec!["LAK2011", "LAK2012", "LAK2013"]
        );
    }

    #[test]
    fn test_only_years_selected_spans_all_conferences() {
        let mut selection = ConferenceSelection::new();
        selection.year_selected(2012, &Catalog);

        assert_eq!(acronyms(selection.scope(&Catalog)), vec!["EDM2012", "LAK2012"]);
    }

    #[test]
    fn test_conferences_and_years_use_combinations_that_took_place() {
        let mut selection = ConferenceSelection::new();
        selection.year_selected(2011, &Catalog);
        selection.conference_selected("EDM", &Catalog);
        selection.conference_selected("LAK", &Catalog);
        selection.year_selected(2012, &Catalog);

        assert_eq!(
            acronyms(selection.scope(&Catalog)),
            vec!["LAK2011", "EDM2012", "LAK2012"]
        );

        selection.conference_unselected("LAK");
        assert_eq!(acronyms(selection.scope(&Catalog)), vec!["EDM2012"]);

        selection.year_unselected(2012);
        assert!(acronyms(selection.scope(&Catalog)).is_empty());

        selection.conference_unselected("EDM");
        selection.year_unselected(2011);
        assert_eq!(selection.scope(&Catalog), FilterScope::All);
    }
}
