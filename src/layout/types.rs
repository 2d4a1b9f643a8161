use serde::Serialize;

use crate::ir::{FamilyId, Side};

/// One packed circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeeLayout {
    /// Index of the record in the dataset.
    pub index: usize,
    pub party_id: i64,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Offset from the lane centerline as computed by the packer.
    pub offset: f64,
    pub side: Side,
}

/// One lane: a family's centerline and its packed circles, largest share
/// first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwarmLayout {
    pub family_id: FamilyId,
    pub family: String,
    pub x: f64,
    pub bees: Vec<BeeLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub lanes: Vec<SwarmLayout>,
}

impl ChartLayout {
    pub fn bees(&self) -> impl Iterator<Item = &BeeLayout> {
        self.lanes.iter().flat_map(|lane| lane.bees.iter())
    }

    pub fn bee(&self, index: usize) -> Option<&BeeLayout> {
        self.bees().find(|bee| bee.index == index)
    }

    pub fn lane(&self, family: FamilyId) -> Option<&SwarmLayout> {
        self.lanes.iter().find(|lane| lane.family_id == family)
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(|lane| lane.bees.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(|lane| lane.bees.is_empty())
    }
}
