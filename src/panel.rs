use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::ir::FamilyId;
use crate::profile::ProfileSummary;
use crate::state::ChartState;

/// Parties of one country at one election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelGroup {
    pub country: String,
    pub year: i32,
    /// Dataset indices, in lane order.
    pub entries: Vec<usize>,
}

/// What the side panel shows for a party.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelEntry<'a> {
    pub index: usize,
    pub party_id: i64,
    pub party: &'a str,
    pub party_abbr: &'a str,
    pub original_name: Option<&'a str>,
    pub family_id: FamilyId,
    pub family: &'a str,
    pub share: String,
    pub info: &'a ProfileSummary,
}

#[derive(Debug, Clone, Default)]
pub struct PanelModel {
    groups: Vec<PanelGroup>,
}

impl PanelModel {
    /// Groups by (country, election year), newest year first and countries
    /// alphabetically within a year.
    pub fn build(dataset: &Dataset) -> Self {
        let mut keyed: BTreeMap<(Reverse<i32>, &str), Vec<usize>> = BTreeMap::new();
        for (idx, record) in dataset.records().iter().enumerate() {
            keyed
                .entry((Reverse(record.election_year()), record.country.as_str()))
                .or_default()
                .push(idx);
        }

        let groups = keyed
            .into_iter()
            .map(|((Reverse(year), country), mut entries)| {
                entries.sort_by_key(|&idx| dataset.record(idx).family_id.lane_index());
                PanelGroup {
                    country: country.to_string(),
                    year,
                    entries,
                }
            })
            .collect();

        Self { groups }
    }

    pub fn groups(&self) -> &[PanelGroup] {
        &self.groups
    }

    /// Groups restricted to active parties; groups left empty are dropped.
    pub fn visible_parties(&self, state: &ChartState) -> Vec<PanelGroup> {
        self.groups
            .iter()
            .filter_map(|group| {
                let entries: Vec<usize> = group
                    .entries
                    .iter()
                    .copied()
                    .filter(|&idx| state.is_active(idx))
                    .collect();
                (!entries.is_empty()).then(|| PanelGroup {
                    country: group.country.clone(),
                    year: group.year,
                    entries,
                })
            })
            .collect()
    }

    pub fn entry<'a>(dataset: &'a Dataset, idx: usize) -> PanelEntry<'a> {
        let record = dataset.record(idx);
        PanelEntry {
            index: idx,
            party_id: record.party_id,
            party: &record.party,
            party_abbr: &record.party_abbr,
            original_name: dataset.original_name(idx),
            family_id: record.family_id,
            family: &record.family,
            share: dataset.share_label(idx),
            info: &dataset.profile(idx).summary,
        }
    }
}
