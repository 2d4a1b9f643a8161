use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ProfileConfig;
use crate::ir::{FamilyId, PartyResult};
use crate::mappings::{Mappings, MappingIncompleteError};
use crate::profile::PartyProfile;

/// Elections held per year for one country, over the full year range of
/// the dataset with empty years filled with zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectionCounts {
    pub country: String,
    pub first_year: i32,
    pub values: Vec<usize>,
}

/// The immutable record set plus everything derived from it once at load.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<PartyResult>,
    profiles: Vec<PartyProfile>,
    countries: Vec<String>,
    counts: Vec<ElectionCounts>,
    mappings: Mappings,
}

impl Dataset {
    pub fn prepare(
        records: Vec<PartyResult>,
        profile: &ProfileConfig,
    ) -> Result<Self, MappingIncompleteError> {
        let mappings = Mappings::build(&records);
        mappings.verify(&records)?;

        let profiles = records
            .iter()
            .map(|record| PartyProfile::build(record, profile.threshold))
            .collect();

        let mut countries: Vec<String> = records.iter().map(|r| r.country.clone()).collect();
        countries.sort();
        countries.dedup();

        let counts = election_counts(&records);

        Ok(Self {
            records,
            profiles,
            countries,
            counts,
            mappings,
        })
    }

    pub fn records(&self) -> &[PartyResult] {
        &self.records
    }

    pub fn record(&self, idx: usize) -> &PartyResult {
        &self.records[idx]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lane order of the chart. Every family gets a lane, populated or not.
    pub fn families(&self) -> &'static [FamilyId] {
        &FamilyId::ALL
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    pub fn election_counts(&self) -> &[ElectionCounts] {
        &self.counts
    }

    pub fn profile(&self, idx: usize) -> &PartyProfile {
        &self.profiles[idx]
    }

    /// Vote share as a percentage with one decimal, e.g. `"40.0%"`.
    pub fn share_label(&self, idx: usize) -> String {
        format!("{:.1}%", self.records[idx].share)
    }

    /// Original-language name when it differs from the display name.
    pub fn original_name(&self, idx: usize) -> Option<&str> {
        let record = &self.records[idx];
        (record.party != record.party_original).then_some(record.party_original.as_str())
    }
}

fn election_counts(records: &[PartyResult]) -> Vec<ElectionCounts> {
    let Some(first_year) = records.iter().map(PartyResult::election_year).min() else {
        return Vec::new();
    };
    let last_year = records
        .iter()
        .map(PartyResult::election_year)
        .max()
        .unwrap_or(first_year);
    let span = (last_year - first_year + 1) as usize;

    let mut by_country: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for record in records {
        let values = by_country
            .entry(record.country.as_str())
            .or_insert_with(|| vec![0; span]);
        values[(record.election_year() - first_year) as usize] += 1;
    }

    by_country
        .into_iter()
        .map(|(country, values)| ElectionCounts {
            country: country.to_string(),
            first_year,
            values,
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{PartySpec, party, sample};
    use super::*;

    #[test]
    fn prepare_sorts_countries_and_counts_elections() {
        let dataset = Dataset::prepare(sample(), &ProfileConfig::default()).unwrap();
        assert_eq!(
            dataset.countries(),
            ["Denmark", "France", "Germany", "Spain", "Sweden"]
        );

        let counts = dataset.election_counts();
        assert_eq!(counts.len(), 5);
        let france = counts.iter().find(|c| c.country == "France").unwrap();
        assert_eq!(france.first_year, 1973);
        assert_eq!(france.values.len(), (2019 - 1973 + 1) as usize);
        assert_eq!(france.values[(1981 - 1973) as usize], 2);
        assert_eq!(france.values[(2017 - 1973) as usize], 1);
        assert_eq!(france.values.iter().sum::<usize>(), 3);
    }

    #[test]
    fn share_label_and_original_name() {
        let mut record = party(PartySpec {
            id: 1,
            country: "Austria",
            group: "west",
            family: FamilyId::Right,
            date: (1999, 10, 3),
            share: 40.0,
            current: 16.2,
        });
        record.party = "Freedom Party".to_string();
        record.party_original = "Freiheitliche Partei".to_string();
        let dataset = Dataset::prepare(vec![record], &ProfileConfig::default()).unwrap();
        assert_eq!(dataset.share_label(0), "40.0%");
        assert_eq!(dataset.original_name(0), Some("Freiheitliche Partei"));
    }

    #[test]
    fn empty_dataset_is_fine() {
        let dataset = Dataset::prepare(Vec::new(), &ProfileConfig::default()).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.election_counts().is_empty());
        assert_eq!(dataset.families().len(), 10);
    }
}
