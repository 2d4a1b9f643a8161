use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::state::normalize_selection;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 60.0,
            bottom: 60.0,
            left: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub time_domain_start: NaiveDate,
    pub time_domain_end: NaiveDate,
    pub lane_padding_inner: f64,
    pub lane_padding_outer: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 760.0,
            margin: Margin::default(),
            time_domain_start: ymd(1945, 1, 1),
            time_domain_end: ymd(2025, 1, 1),
            lane_padding_inner: 1.0,
            lane_padding_outer: 0.5,
        }
    }
}

/// How a vote share becomes a circle radius for packing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SizeScale {
    /// Every circle packs with the same radius.
    Fixed { radius: f64 },
    /// Area proportional to share: `max_radius * sqrt(share / 100)`.
    #[serde(rename_all = "camelCase")]
    Sqrt { max_radius: f64 },
}

impl SizeScale {
    pub fn radius(&self, share: f64) -> f64 {
        match *self {
            SizeScale::Fixed { radius } => radius,
            SizeScale::Sqrt { max_radius } => max_radius * (share.max(0.0) / 100.0).sqrt(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmConfig {
    pub padding: f64,
    pub epsilon: f64,
    pub size: SizeScale,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            padding: 1.5,
            epsilon: 1e-3,
            size: SizeScale::Fixed { radius: 3.25 },
        }
    }
}

/// Initial filter values applied when a chart state is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDefaults {
    pub year: NaiveDate,
    pub min_vote_share: f64,
    pub country_group: Option<String>,
    pub country: Option<String>,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            year: ymd(1980, 1, 1),
            min_vote_share: 0.0,
            country_group: None,
            country: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub threshold: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { threshold: 1.5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub year_min: i32,
    pub year_max: i32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            year_min: 1945,
            year_max: 2020,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub chart: ChartConfig,
    pub swarm: SwarmConfig,
    pub view: ViewDefaults,
    pub profile: ProfileConfig,
    pub input: InputConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MarginFile {
    top: Option<f64>,
    right: Option<f64>,
    bottom: Option<f64>,
    left: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ChartConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    margin: Option<MarginFile>,
    time_domain_start: Option<NaiveDate>,
    time_domain_end: Option<NaiveDate>,
    lane_padding_inner: Option<f64>,
    lane_padding_outer: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SwarmConfigFile {
    padding: Option<f64>,
    epsilon: Option<f64>,
    size: Option<SizeScale>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ViewDefaultsFile {
    year: Option<NaiveDate>,
    min_vote_share: Option<f64>,
    country_group: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct InputConfigFile {
    year_min: Option<i32>,
    year_max: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    chart: Option<ChartConfigFile>,
    swarm: Option<SwarmConfigFile>,
    view: Option<ViewDefaultsFile>,
    profile_threshold: Option<f64>,
    input: Option<InputConfigFile>,
}

/// Loads overrides from a JSON (or JSON5) file on top of the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "loaded chart config");
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid config: {json_err} (json5: {json5_err})")
        })?,
    };
    Ok(merge_config(Config::default(), parsed))
}

fn merge_config(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(chart) = parsed.chart {
        if let Some(v) = chart.width {
            config.chart.width = v;
        }
        if let Some(v) = chart.height {
            config.chart.height = v;
        }
        if let Some(margin) = chart.margin {
            if let Some(v) = margin.top {
                config.chart.margin.top = v;
            }
            if let Some(v) = margin.right {
                config.chart.margin.right = v;
            }
            if let Some(v) = margin.bottom {
                config.chart.margin.bottom = v;
            }
            if let Some(v) = margin.left {
                config.chart.margin.left = v;
            }
        }
        if let Some(v) = chart.time_domain_start {
            config.chart.time_domain_start = v;
        }
        if let Some(v) = chart.time_domain_end {
            config.chart.time_domain_end = v;
        }
        if let Some(v) = chart.lane_padding_inner {
            config.chart.lane_padding_inner = v;
        }
        if let Some(v) = chart.lane_padding_outer {
            config.chart.lane_padding_outer = v;
        }
    }

    if let Some(swarm) = parsed.swarm {
        if let Some(v) = swarm.padding {
            config.swarm.padding = v;
        }
        if let Some(v) = swarm.epsilon {
            config.swarm.epsilon = v;
        }
        if let Some(v) = swarm.size {
            config.swarm.size = v;
        }
    }

    if let Some(view) = parsed.view {
        if let Some(v) = view.year {
            config.view.year = v;
        }
        if let Some(v) = view.min_vote_share {
            config.view.min_vote_share = v;
        }
        // Empty and "all" mean no filter, same as omitting the key.
        if let Some(v) = view.country_group {
            config.view.country_group = normalize_selection(Some(v));
        }
        if let Some(v) = view.country {
            config.view.country = normalize_selection(Some(v));
        }
    }

    if let Some(v) = parsed.profile_threshold {
        config.profile.threshold = v;
    }

    if let Some(input) = parsed.input {
        if let Some(v) = input.year_min {
            config.input.year_min = v;
        }
        if let Some(v) = input.year_max {
            config.input.year_max = v;
        }
    }

    config
}

pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
