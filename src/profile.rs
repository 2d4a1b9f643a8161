//! Party profile: the ideological positions of a party folded around the
//! scale midpoint, with the label and prose that go with each side.

use serde::Serialize;

use crate::ir::{PartyResult, PositionKey};

const MIDPOINT: f64 = 4.5;

struct AxisText {
    labels: [&'static str; 2],
    text: [&'static str; 2],
}

fn axis_text(key: PositionKey) -> AxisText {
    match key {
        PositionKey::LeftRight => AxisText {
            labels: ["left", "right"],
            text: ["on the political left", "on the political right"],
        },
        PositionKey::LibertyAuthority => AxisText {
            labels: ["liberty", "authority"],
            text: ["libertarian", "authoritarian"],
        },
        PositionKey::StateMarket => AxisText {
            labels: ["state", "market"],
            text: [
                "state-led regulation of the economy",
                "market-led regulation of the economy",
            ],
        },
        PositionKey::EuProAnti => AxisText {
            labels: ["pro-EU", "anti-EU"],
            text: ["pro-EU", "EU-sceptic"],
        },
    }
}

/// A recorded position relative to the scale midpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPosition {
    pub key: PositionKey,
    pub original: f64,
    /// Distance from the midpoint, 0..=4.5.
    pub magnitude: f64,
    pub is_upper: bool,
    pub label: &'static str,
    pub text: &'static str,
}

impl NormalizedPosition {
    pub fn new(key: PositionKey, original: f64) -> Self {
        let shifted = original - 1.0;
        let is_upper = shifted >= MIDPOINT;
        let magnitude = if is_upper {
            shifted - MIDPOINT
        } else {
            (shifted - MIDPOINT).abs()
        };
        let axis = axis_text(key);
        let side = usize::from(is_upper);
        Self {
            key,
            original,
            magnitude,
            is_upper,
            label: axis.labels[side],
            text: axis.text[side],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum ProfileSummary {
    DataMissing,
    NoStrongPositions,
    Strong(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyProfile {
    /// One slot per axis in `PositionKey::ALL` order; `None` when absent.
    pub positions: [Option<NormalizedPosition>; 4],
    pub summary: ProfileSummary,
}

impl PartyProfile {
    pub fn build(party: &PartyResult, threshold: f64) -> Self {
        let positions = PositionKey::ALL
            .map(|key| party.position(key).map(|v| NormalizedPosition::new(key, v)));

        let summary = if positions.iter().all(Option::is_none) {
            ProfileSummary::DataMissing
        } else {
            let strong: Vec<&str> = positions
                .iter()
                .flatten()
                .filter(|p| p.magnitude > threshold)
                .map(|p| p.text)
                .collect();
            if strong.is_empty() {
                ProfileSummary::NoStrongPositions
            } else {
                ProfileSummary::Strong(strong.join(", "))
            }
        };

        Self { positions, summary }
    }

    /// Labels of the positions that clear the threshold.
    pub fn strong_labels(&self, threshold: f64) -> Vec<&'static str> {
        self.positions
            .iter()
            .flatten()
            .filter(|p| p.magnitude > threshold)
            .map(|p| p.label)
            .collect()
    }
}
