use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::ir::{FamilyId, PartyResult};

/// A lookup that should be total over the loaded records came back empty.
/// This is a defect in loading, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingIncompleteError {
    #[error("no display name for family {0:?}")]
    Family(FamilyId),
    #[error("no country group for country {0:?}")]
    CountryGroup(String),
    #[error("no country code for country {0:?}")]
    CountryCode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    pub country: String,
    pub country_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryGroup {
    pub group: String,
    pub countries: Vec<CountryEntry>,
}

/// Lookup tables derived from the record set. Built once, read-only after.
#[derive(Debug, Clone, Default)]
pub struct Mappings {
    family: BTreeMap<FamilyId, String>,
    country_group: BTreeMap<String, String>,
    country_code: BTreeMap<String, String>,
    groups: Vec<CountryGroup>,
}

impl Mappings {
    pub fn build(records: &[PartyResult]) -> Self {
        let mut family = BTreeMap::new();
        let mut country_group = BTreeMap::new();
        let mut country_code = BTreeMap::new();
        let mut group_order: Vec<String> = Vec::new();
        let mut members: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for record in records {
            family
                .entry(record.family_id)
                .or_insert_with(|| record.family.clone());
            country_group
                .entry(record.country.clone())
                .or_insert_with(|| record.country_group.clone());
            country_code
                .entry(record.country.clone())
                .or_insert_with(|| record.country_code.clone());

            let countries = members.entry(record.country_group.clone()).or_insert_with(|| {
                group_order.push(record.country_group.clone());
                Vec::new()
            });
            countries.push(record.country.clone());
        }

        let groups = group_order
            .into_iter()
            .map(|group| {
                let mut countries = members.remove(&group).unwrap_or_default();
                countries.sort();
                countries.dedup();
                let countries = countries
                    .into_iter()
                    .map(|country| CountryEntry {
                        country_code: country_code.get(&country).cloned().unwrap_or_default(),
                        country,
                    })
                    .collect();
                CountryGroup { group, countries }
            })
            .collect();

        tracing::debug!(
            families = family.len(),
            countries = country_group.len(),
            "built lookup tables"
        );

        Self {
            family,
            country_group,
            country_code,
            groups,
        }
    }

    pub fn family_name(&self, family: FamilyId) -> Result<&str, MappingIncompleteError> {
        self.family
            .get(&family)
            .map(String::as_str)
            .ok_or(MappingIncompleteError::Family(family))
    }

    pub fn group_of(&self, country: &str) -> Result<&str, MappingIncompleteError> {
        self.country_group
            .get(country)
            .map(String::as_str)
            .ok_or_else(|| MappingIncompleteError::CountryGroup(country.to_string()))
    }

    pub fn code_of(&self, country: &str) -> Result<&str, MappingIncompleteError> {
        self.country_code
            .get(country)
            .map(String::as_str)
            .ok_or_else(|| MappingIncompleteError::CountryCode(country.to_string()))
    }

    /// Groups in first-seen order with their member countries sorted.
    pub fn country_groups(&self) -> &[CountryGroup] {
        &self.groups
    }

    pub fn families(&self) -> impl Iterator<Item = (FamilyId, &str)> {
        self.family.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Checks that every record resolves through every table.
    pub fn verify(&self, records: &[PartyResult]) -> Result<(), MappingIncompleteError> {
        for record in records {
            self.family_name(record.family_id)?;
            self.group_of(&record.country)?;
            self.code_of(&record.country)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Position, PositionKey};
    use chrono::NaiveDate;

    fn party(country: &str, code: &str, group: &str, family: FamilyId, name: &str) -> PartyResult {
        PartyResult {
            country_id: 1,
            country: country.to_string(),
            country_code: code.to_string(),
            country_group: group.to_string(),
            party_id: 1,
            party: "P".to_string(),
            party_original: "P".to_string(),
            party_abbr: "P".to_string(),
            election_id: 1,
            election_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            family_id: family,
            family: name.to_string(),
            share: 10.0,
            current_share: 10.0,
            positions: PositionKey::ALL.map(|key| Position { key, value: None }),
        }
    }

    #[test]
    fn groups_collect_sorted_unique_countries() {
        let records = vec![
            party("Sweden", "SWE", "north", FamilyId::Soc, "Social democracy"),
            party("Denmark", "DNK", "north", FamilyId::Soc, "Social democracy"),
            party("Sweden", "SWE", "north", FamilyId::Other, "Other"),
            party("Spain", "ESP", "south", FamilyId::Con, "Conservative"),
        ];
        let mappings = Mappings::build(&records);
        let groups = mappings.country_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group, "north");
        let names: Vec<&str> = groups[0].countries.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(names, vec!["Denmark", "Sweden"]);
        assert_eq!(groups[0].countries[0].country_code, "DNK");
        assert_eq!(groups[1].group, "south");
    }

    #[test]
    fn lookups_are_total_over_records() {
        let records = vec![
            party("Sweden", "SWE", "north", FamilyId::Soc, "Social democracy"),
            party("Spain", "ESP", "south", FamilyId::Other, "Other"),
        ];
        let mappings = Mappings::build(&records);
        mappings.verify(&records).unwrap();
        assert_eq!(mappings.family_name(FamilyId::Other).unwrap(), "Other");
        assert_eq!(mappings.group_of("Spain").unwrap(), "south");
        assert_eq!(mappings.code_of("Sweden").unwrap(), "SWE");
    }

    #[test]
    fn unknown_lookup_is_loud() {
        let mappings = Mappings::build(&[]);
        assert_eq!(
            mappings.family_name(FamilyId::Eco),
            Err(MappingIncompleteError::Family(FamilyId::Eco))
        );
        assert!(matches!(
            mappings.group_of("Atlantis"),
            Err(MappingIncompleteError::CountryGroup(_))
        ));
    }
}
