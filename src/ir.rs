use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Ideological family of a party. Doubles as the lane a party is packed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyId {
    Right,
    Con,
    Lib,
    Chr,
    Agr,
    Eco,
    Soc,
    Com,
    Spec,
    Other,
}

impl FamilyId {
    /// Lane order, left to right.
    pub const ALL: [FamilyId; 10] = [
        FamilyId::Right,
        FamilyId::Con,
        FamilyId::Lib,
        FamilyId::Chr,
        FamilyId::Agr,
        FamilyId::Eco,
        FamilyId::Soc,
        FamilyId::Com,
        FamilyId::Spec,
        FamilyId::Other,
    ];

    pub const OTHER_NAME: &'static str = "Other";

    /// Maps a source family code to a family. Blank, `none`, `code` and
    /// anything outside the closed set collapse to [`FamilyId::Other`].
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "right" => Self::Right,
            "con" => Self::Con,
            "lib" => Self::Lib,
            "chr" => Self::Chr,
            "agr" => Self::Agr,
            "eco" => Self::Eco,
            "soc" => Self::Soc,
            "com" => Self::Com,
            "spec" => Self::Spec,
            _ => Self::Other,
        }
    }

    /// True when the code is one of the sentinels the source uses for
    /// "unclassified".
    pub fn is_sentinel_code(code: &str) -> bool {
        matches!(code.trim(), "" | "none" | "code")
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Con => "con",
            Self::Lib => "lib",
            Self::Chr => "chr",
            Self::Agr => "agr",
            Self::Eco => "eco",
            Self::Soc => "soc",
            Self::Com => "com",
            Self::Spec => "spec",
            Self::Other => "other",
        }
    }

    /// Display name used when a row carries a family code but no name.
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Right => "Right-wing",
            Self::Con => "Conservative",
            Self::Lib => "Liberal",
            Self::Chr => "Christian democracy",
            Self::Agr => "Agrarian",
            Self::Eco => "Green/Ecologist",
            Self::Soc => "Social democracy",
            Self::Com => "Communist/Socialist",
            Self::Spec => "Special issue",
            Self::Other => Self::OTHER_NAME,
        }
    }

    /// Position in the lane order.
    pub fn lane_index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionKey {
    StateMarket,
    LibertyAuthority,
    LeftRight,
    EuProAnti,
}

impl PositionKey {
    pub const ALL: [PositionKey; 4] = [
        PositionKey::StateMarket,
        PositionKey::LibertyAuthority,
        PositionKey::LeftRight,
        PositionKey::EuProAnti,
    ];

    /// Upper bound of the source scale. The EU axis is stored as
    /// `SCALE_MAX - raw` so that higher always reads as more anti-EU.
    pub const SCALE_MAX: f64 = 10.0;
}

/// One ideological position. `None` means no position was recorded and
/// the axis must be skipped, never treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub key: PositionKey,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Alive,
    Dead,
}

/// One party at one election.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResult {
    pub country_id: i64,
    pub country: String,
    pub country_code: String,
    pub country_group: String,

    pub party_id: i64,
    pub party: String,
    pub party_original: String,
    pub party_abbr: String,

    pub election_id: i64,
    pub election_date: NaiveDate,

    pub family_id: FamilyId,
    pub family: String,

    pub share: f64,
    pub current_share: f64,

    pub positions: [Position; 4],
}

impl PartyResult {
    pub fn election_year(&self) -> i32 {
        self.election_date.year()
    }

    /// A party is alive while its most recent vote share is positive.
    pub fn is_alive(&self) -> bool {
        self.current_share > 0.0
    }

    pub fn side(&self) -> Side {
        if self.is_alive() { Side::Alive } else { Side::Dead }
    }

    pub fn position(&self, key: PositionKey) -> Option<f64> {
        self.positions
            .iter()
            .find(|p| p.key == key)
            .and_then(|p| p.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_codes_map_to_other() {
        for code in ["", "none", "code", "  ", "unknown"] {
            assert_eq!(FamilyId::from_code(code), FamilyId::Other, "code {code:?}");
        }
        assert_eq!(FamilyId::from_code("soc"), FamilyId::Soc);
    }

    #[test]
    fn lane_index_follows_declaration_order() {
        for (idx, family) in FamilyId::ALL.iter().enumerate() {
            assert_eq!(family.lane_index(), idx);
            assert_eq!(FamilyId::from_code(family.as_str()), *family);
        }
    }
}
