//! CSV loading for election results.
//!
//! Every row becomes one [`PartyResult`]. Rows that cannot be placed on the
//! chart (bad date, bad number) are skipped and reported; only structural
//! problems with the file itself abort the load.

use std::io;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::ir::{FamilyId, PartyResult, Position, PositionKey};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const REQUIRED_COLUMNS: [&str; 14] = [
    "country_id",
    "country_name",
    "country_code",
    "country_group",
    "party_id",
    "party_name_english",
    "party_name_ascii",
    "party_name_short",
    "election_id",
    "election_date",
    "family_name_short",
    "family_name",
    "vote_share",
    "most_recent_vote_share",
];

/// One row as it appears in the source file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    pub country_id: String,
    pub country_name: String,
    pub country_code: String,
    pub country_group: String,
    pub party_id: String,
    pub party_name_english: String,
    pub party_name_ascii: String,
    pub party_name_short: String,
    pub election_id: String,
    pub election_date: String,
    pub family_name_short: String,
    pub family_name: String,
    pub vote_share: String,
    pub most_recent_vote_share: String,
    #[serde(default)]
    pub state_market: Option<String>,
    #[serde(default)]
    pub liberty_authority: Option<String>,
    #[serde(default)]
    pub left_right: Option<String>,
    #[serde(default)]
    pub eu_anti_pro: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("malformed election date {value:?} (expected YYYY-MM-DD)")]
    MalformedDate { value: String },
    #[error("malformed number {value:?} in column {field}")]
    MalformedNumber { field: &'static str, value: String },
    #[error("{field} {value} outside 0..=100")]
    ShareOutOfRange { field: &'static str, value: f64 },
    #[error("row shape: {0}")]
    Shape(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read election data: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line in the source file.
    pub line: u64,
    pub error: RowError,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<PartyResult>,
    pub skipped: Vec<SkippedRow>,
}

pub fn load_path(path: &Path) -> Result<LoadReport, LoadError> {
    let file = std::fs::File::open(path)?;
    load_csv(io::BufReader::new(file))
}

pub fn load_csv<R: io::Read>(reader: R) -> Result<LoadReport, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut report = LoadReport::default();
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or(0);
                skip(&mut report, line, RowError::Shape(err.to_string()));
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let parsed = record
            .deserialize::<RawRow>(Some(&headers))
            .map_err(|err| RowError::Shape(err.to_string()))
            .and_then(|raw| parse_row(&raw));
        match parsed {
            Ok(party) => report.records.push(party),
            Err(error) => skip(&mut report, line, error),
        }
    }

    tracing::info!(
        loaded = report.records.len(),
        skipped = report.skipped.len(),
        "loaded election results"
    );
    Ok(report)
}

fn skip(report: &mut LoadReport, line: u64, error: RowError) {
    tracing::warn!(line, %error, "skipping election row");
    report.skipped.push(SkippedRow { line, error });
}

pub fn parse_row(raw: &RawRow) -> Result<PartyResult, RowError> {
    let election_date = NaiveDate::parse_from_str(raw.election_date.trim(), DATE_FORMAT)
        .map_err(|_| RowError::MalformedDate {
            value: raw.election_date.clone(),
        })?;

    let (family_id, family) = canonical_family(&raw.family_name_short, &raw.family_name);

    let share = parse_share("vote_share", &raw.vote_share)?;
    let current_share = parse_share("most_recent_vote_share", &raw.most_recent_vote_share)?;

    let positions = [
        Position {
            key: PositionKey::StateMarket,
            value: parse_position("state_market", raw.state_market.as_deref())?,
        },
        Position {
            key: PositionKey::LibertyAuthority,
            value: parse_position("liberty_authority", raw.liberty_authority.as_deref())?,
        },
        Position {
            key: PositionKey::LeftRight,
            value: parse_position("left_right", raw.left_right.as_deref())?,
        },
        Position {
            key: PositionKey::EuProAnti,
            value: parse_position("eu_anti_pro", raw.eu_anti_pro.as_deref())?
                .map(|v| PositionKey::SCALE_MAX - v),
        },
    ];

    Ok(PartyResult {
        country_id: parse_id("country_id", &raw.country_id)?,
        country: raw.country_name.trim().to_string(),
        country_code: raw.country_code.trim().to_string(),
        country_group: raw.country_group.trim().to_string(),
        party_id: parse_id("party_id", &raw.party_id)?,
        party: raw.party_name_english.trim().to_string(),
        party_original: raw.party_name_ascii.trim().to_string(),
        party_abbr: raw.party_name_short.trim().to_string(),
        election_id: parse_id("election_id", &raw.election_id)?,
        election_date,
        family_id,
        family,
        share,
        current_share,
        positions,
    })
}

/// Resolves the family code and display name of a row.
pub fn canonical_family(code: &str, name: &str) -> (FamilyId, String) {
    if FamilyId::is_sentinel_code(code) {
        return (FamilyId::Other, FamilyId::OTHER_NAME.to_string());
    }
    let family = FamilyId::from_code(code);
    if family == FamilyId::Other {
        if code.trim() != FamilyId::Other.as_str() {
            tracing::debug!(code, "unknown family code, filing under other");
        }
        return (FamilyId::Other, FamilyId::OTHER_NAME.to_string());
    }
    let name = name.trim();
    if name.is_empty() {
        (family, family.default_name().to_string())
    } else {
        (family, name.to_string())
    }
}

fn parse_id(field: &'static str, raw: &str) -> Result<i64, RowError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| RowError::MalformedNumber {
        field,
        value: raw.to_string(),
    })
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, RowError> {
    let value: f64 = raw.trim().parse().map_err(|_| RowError::MalformedNumber {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(RowError::MalformedNumber {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn parse_share(field: &'static str, raw: &str) -> Result<f64, RowError> {
    if raw.trim().is_empty() {
        return Ok(0.0);
    }
    let value = parse_number(field, raw)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(RowError::ShareOutOfRange { field, value });
    }
    Ok(value)
}

fn parse_position(field: &'static str, raw: Option<&str>) -> Result<Option<f64>, RowError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_number(field, value).map(Some),
    }
}
