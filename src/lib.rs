//! Data preparation, beeswarm packing and filter state for charts of
//! European election results.
//!
//! ```no_run
//! use party_beeswarm::{Config, StateUpdate, prepare_chart};
//!
//! let config = Config::default();
//! let file = std::fs::File::open("elections.csv").unwrap();
//! let chart = prepare_chart(file, &config).unwrap();
//! let (state, _recompute) = chart.state.update(
//!     &chart.dataset,
//!     &config,
//!     StateUpdate::new().with_min_vote_share(0.05),
//! );
//! for bee in state.frame(&chart.dataset) {
//!     println!("{} at ({:.1}, {:.1})", bee.party_id, bee.x, bee.y);
//! }
//! ```

pub mod config;
pub mod dataset;
pub mod input;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod loader;
pub mod mappings;
pub mod panel;
pub mod profile;
pub mod state;

pub use config::{Config, load_config};
pub use dataset::Dataset;
pub use ir::{FamilyId, PartyResult, PositionKey, Side};
pub use layout::{ChartLayout, compute_layout, dodge};
pub use loader::{LoadError, LoadReport, SkippedRow, load_csv, load_path};
pub use mappings::{MappingIncompleteError, Mappings};
pub use panel::PanelModel;
pub use state::{BeeFrame, ChartState, Recompute, StateUpdate, ViewState};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("mapping error: {0}")]
    Mapping(#[from] MappingIncompleteError),
}

/// A loaded chart ready for interaction.
#[derive(Debug, Clone)]
pub struct PreparedChart {
    pub dataset: Dataset,
    pub state: ChartState,
    pub panel: PanelModel,
    /// Rows left out of the dataset and why.
    pub skipped: Vec<SkippedRow>,
}

/// Loads CSV data and builds the initial chart state from `config`.
pub fn prepare_chart<R: std::io::Read>(
    reader: R,
    config: &Config,
) -> Result<PreparedChart, ChartError> {
    let report = load_csv(reader)?;
    let dataset = Dataset::prepare(report.records, &config.profile)?;
    let state = ChartState::new(&dataset, config);
    let panel = PanelModel::build(&dataset);
    Ok(PreparedChart {
        dataset,
        state,
        panel,
        skipped: report.skipped,
    })
}
