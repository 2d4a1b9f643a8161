use crate::dataset::Dataset;
use crate::ir::{FamilyId, Side};
use crate::state::{ChartState, ViewState};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDump {
    pub width: f64,
    pub height: f64,
    pub brush_y: f64,
    pub view: ViewState,
    pub lanes: Vec<LaneDump>,
    pub bees: Vec<BeeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneDump {
    pub family_id: FamilyId,
    pub family: String,
    pub x: f64,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeeDump {
    pub party_id: i64,
    pub party: String,
    pub country: String,
    pub family_id: FamilyId,
    pub election_date: String,
    pub share: f64,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub side: Side,
    pub active: bool,
    pub faded: bool,
}

impl FrameDump {
    pub fn from_state(state: &ChartState, dataset: &Dataset) -> Self {
        let layout = state.layout();
        let lanes = layout
            .lanes
            .iter()
            .map(|lane| LaneDump {
                family_id: lane.family_id,
                family: lane.family.clone(),
                x: lane.x,
                count: lane.bees.len(),
            })
            .collect();

        let bees = state
            .frame(dataset)
            .into_iter()
            .map(|bee| {
                let record = dataset.record(bee.index);
                BeeDump {
                    party_id: bee.party_id,
                    party: record.party.clone(),
                    country: record.country.clone(),
                    family_id: bee.family_id,
                    election_date: record.election_date.to_string(),
                    share: record.share,
                    x: bee.x,
                    y: bee.y,
                    radius: bee.radius,
                    side: bee.side,
                    active: bee.is_active,
                    faded: bee.faded,
                }
            })
            .collect();

        FrameDump {
            width: layout.width,
            height: layout.height,
            brush_y: state.brush_y(),
            view: state.view().clone(),
            lanes,
            bees,
        }
    }
}

pub fn write_frame_dump(path: &Path, state: &ChartState, dataset: &Dataset) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = FrameDump::from_state(state, dataset);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
