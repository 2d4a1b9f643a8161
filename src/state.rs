//! Filter state and its transitions.
//!
//! [`ChartState`] is an owned value: every interaction consumes the current
//! state and returns the next one together with the [`Recompute`] the
//! renderer has to perform. Subset changes (group, country, minimum share)
//! re-run the packer; a year change only re-flags records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{Config, ViewDefaults};
use crate::dataset::Dataset;
use crate::ir::{FamilyId, PartyResult, Side};
use crate::layout::{ChartLayout, Scales, compute_layout};

/// Value the group selector sends when no group is picked.
pub const ALL_GROUPS: &str = "all";

/// Blank selections and `"all"` mean no selection.
pub fn normalize_selection(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !v.eq_ignore_ascii_case(ALL_GROUPS)
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Records dated before this are inactive and drawn faded.
    pub year: NaiveDate,
    /// Fraction in 0..=1; compared against `share / 100`.
    pub min_vote_share: f64,
    pub country_group: Option<String>,
    pub country: Option<String>,
}

impl ViewState {
    pub fn from_defaults(defaults: &ViewDefaults) -> Self {
        Self {
            year: defaults.year,
            min_vote_share: defaults.min_vote_share,
            country_group: normalize_selection(defaults.country_group.clone()),
            country: normalize_selection(defaults.country.clone()),
        }
    }

    fn group_matches(&self, record: &PartyResult) -> bool {
        self.country_group
            .as_deref()
            .is_none_or(|group| record.country_group == group)
    }

    fn country_matches(&self, record: &PartyResult) -> bool {
        self.country
            .as_deref()
            .is_none_or(|country| record.country == country)
    }

    fn share_passes(&self, record: &PartyResult) -> bool {
        record.share >= self.min_vote_share * 100.0
    }

    /// Membership in the laid-out subset.
    pub fn in_subset(&self, record: &PartyResult) -> bool {
        self.group_matches(record) && self.country_matches(record) && self.share_passes(record)
    }

    pub fn is_faded(&self, record: &PartyResult) -> bool {
        record.election_date < self.year
    }

    pub fn is_active(&self, record: &PartyResult) -> bool {
        self.country_matches(record)
            && record.election_date >= self.year
            && self.share_passes(record)
            && self.group_matches(record)
    }
}

/// A set of filter mutations applied together.
///
/// `None` leaves a dimension untouched. For the two selections,
/// `Some(None)` clears the selection, as do a blank value and `"all"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub country_group: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub min_vote_share: Option<f64>,
    pub year: Option<NaiveDate>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country_group(mut self, group: Option<&str>) -> Self {
        self.country_group = Some(group.map(str::to_string));
        self
    }

    pub fn with_country(mut self, country: Option<&str>) -> Self {
        self.country = Some(country.map(str::to_string));
        self
    }

    pub fn with_min_vote_share(mut self, share: f64) -> Self {
        self.min_vote_share = Some(share);
        self
    }

    pub fn with_year(mut self, year: NaiveDate) -> Self {
        self.year = Some(year);
        self
    }
}

/// Work the renderer has to do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Recompute {
    None,
    /// Active/faded flags changed; positions are unchanged.
    Visibility,
    /// The laid-out subset changed and every lane was re-packed.
    Layout,
}

/// Everything the renderer needs for one circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeeFrame {
    pub index: usize,
    pub party_id: i64,
    pub family_id: FamilyId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub side: Side,
    pub is_active: bool,
    pub faded: bool,
}

#[derive(Debug, Clone)]
pub struct ChartState {
    view: ViewState,
    subset: Vec<usize>,
    active: Vec<bool>,
    layout: ChartLayout,
    scales: Scales,
}

impl ChartState {
    pub fn new(dataset: &Dataset, config: &Config) -> Self {
        let view = ViewState::from_defaults(&config.view);
        let subset = compute_subset(dataset, &view);
        let layout = compute_layout(dataset, &subset, config);
        let active = compute_active(dataset, &view);
        tracing::debug!(
            records = dataset.len(),
            subset = subset.len(),
            "initial chart state"
        );
        Self {
            view,
            subset,
            active,
            layout,
            scales: Scales::new(&config.chart),
        }
    }

    /// Applies `update` and reports what has to be redrawn.
    ///
    /// Mutations apply in the order group, year, share, country. Setting a
    /// group always clears the country selection; a country given in the
    /// same update is applied after the reset.
    pub fn update(
        mut self,
        dataset: &Dataset,
        config: &Config,
        update: StateUpdate,
    ) -> (Self, Recompute) {
        let mut membership = false;
        let mut year_changed = false;

        if let Some(group) = update.country_group.map(normalize_selection) {
            if self.view.country.take().is_some() {
                membership = true;
            }
            if group != self.view.country_group {
                self.view.country_group = group;
                membership = true;
            }
        }

        if let Some(year) = update.year {
            if year != self.view.year {
                self.view.year = year;
                year_changed = true;
            }
        }

        if let Some(share) = update.min_vote_share {
            if share != self.view.min_vote_share {
                self.view.min_vote_share = share;
                membership = true;
            }
        }

        if let Some(country) = update.country.map(normalize_selection) {
            if country != self.view.country {
                self.view.country = country;
                membership = true;
            }
        }

        if !membership && !year_changed {
            return (self, Recompute::None);
        }

        self.active = compute_active(dataset, &self.view);

        let mut recompute = Recompute::Visibility;
        if membership {
            let subset = compute_subset(dataset, &self.view);
            if subset != self.subset {
                self.layout = compute_layout(dataset, &subset, config);
                self.subset = subset;
                recompute = Recompute::Layout;
            }
        }

        tracing::debug!(
            ?recompute,
            year = %self.view.year,
            min_vote_share = self.view.min_vote_share,
            country_group = self.view.country_group.as_deref().unwrap_or("all"),
            country = self.view.country.as_deref().unwrap_or("-"),
            active = self.active_count(),
            "chart state updated"
        );
        (self, recompute)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Dataset indices of the laid-out records, in dataset order.
    pub fn subset(&self) -> &[usize] {
        &self.subset
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn is_active(&self, idx: usize) -> bool {
        self.active.get(idx).copied().unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(idx, &a)| a.then_some(idx))
    }

    pub fn brush_y(&self) -> f64 {
        self.scales.brush_y(self.view.year)
    }

    /// Positioned, flagged circles in lane order.
    pub fn frame(&self, dataset: &Dataset) -> Vec<BeeFrame> {
        self.layout
            .lanes
            .iter()
            .flat_map(|lane| {
                lane.bees.iter().map(move |bee| {
                    let record = dataset.record(bee.index);
                    BeeFrame {
                        index: bee.index,
                        party_id: bee.party_id,
                        family_id: lane.family_id,
                        x: bee.x,
                        y: bee.y,
                        radius: bee.radius,
                        side: bee.side,
                        is_active: self.is_active(bee.index),
                        faded: self.view.is_faded(record),
                    }
                })
            })
            .collect()
    }
}

fn compute_subset(dataset: &Dataset, view: &ViewState) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| view.in_subset(record))
        .map(|(idx, _)| idx)
        .collect()
}

fn compute_active(dataset: &Dataset, view: &ViewState) -> Vec<bool> {
    dataset
        .records()
        .iter()
        .map(|record| view.is_active(record))
        .collect()
}
