mod dodge;
mod scale;
pub(crate) mod types;
pub use dodge::{Circle, Placed, dodge};
pub use scale::{BandScale, TimeScale, round_to_year};
pub use types::*;

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::config::{ChartConfig, Config};
use crate::dataset::Dataset;
use crate::ir::{FamilyId, Side};

/// Lane (x) and time (y) scales of the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: BandScale,
    pub y: TimeScale,
}

impl Scales {
    pub fn new(chart: &ChartConfig) -> Self {
        let margin = chart.margin;
        let x = BandScale::new(
            FamilyId::ALL.len(),
            (margin.left, chart.width - margin.right),
            chart.lane_padding_inner,
            chart.lane_padding_outer,
        );
        let y = TimeScale::new(
            (chart.time_domain_start, chart.time_domain_end),
            (chart.height - margin.bottom, margin.top),
        );
        Self { x, y }
    }

    pub fn lane_x(&self, family: FamilyId) -> f64 {
        self.x.position(family.lane_index())
    }

    /// Vertical position of the brush edge for a threshold date.
    pub fn brush_y(&self, year: NaiveDate) -> f64 {
        self.y.apply(year)
    }
}

/// Packs the records in `subset` lane by lane.
///
/// Alive and defunct parties are packed independently and pushed to
/// opposite sides of the lane centerline (alive to the left).
pub fn compute_layout(dataset: &Dataset, subset: &[usize], config: &Config) -> ChartLayout {
    let scales = Scales::new(&config.chart);
    let swarm = &config.swarm;

    let mut by_lane: Vec<Vec<usize>> = vec![Vec::new(); FamilyId::ALL.len()];
    for &idx in subset {
        by_lane[dataset.record(idx).family_id.lane_index()].push(idx);
    }

    let lanes = FamilyId::ALL
        .iter()
        .zip(by_lane)
        .map(|(&family_id, members)| {
            let lane_x = scales.lane_x(family_id);
            let pack_side = |side: Side| -> Vec<BeeLayout> {
                let circles: Vec<Circle> = members
                    .iter()
                    .map(|&idx| (idx, dataset.record(idx)))
                    .filter(|(_, record)| record.side() == side)
                    .map(|(idx, record)| Circle {
                        index: idx,
                        y: scales.y.apply(record.election_date),
                        r: swarm.size.radius(record.share),
                        size: record.share,
                    })
                    .collect();
                dodge(&circles, swarm.padding, swarm.epsilon)
                    .into_iter()
                    .map(|placed| {
                        let x = match side {
                            Side::Alive => lane_x - swarm.padding - placed.offset,
                            Side::Dead => lane_x + swarm.padding + placed.offset,
                        };
                        BeeLayout {
                            index: placed.index,
                            party_id: dataset.record(placed.index).party_id,
                            x,
                            y: placed.y,
                            radius: placed.r,
                            offset: placed.offset,
                            side,
                        }
                    })
                    .collect()
            };

            let mut bees = pack_side(Side::Alive);
            bees.extend(pack_side(Side::Dead));
            bees.sort_by(|a, b| {
                let share_a = dataset.record(a.index).share;
                let share_b = dataset.record(b.index).share;
                share_b.partial_cmp(&share_a).unwrap_or(Ordering::Equal)
            });

            tracing::trace!(family = family_id.as_str(), bees = bees.len(), "packed lane");

            SwarmLayout {
                family_id,
                family: dataset
                    .mappings()
                    .family_name(family_id)
                    .unwrap_or(family_id.default_name())
                    .to_string(),
                x: lane_x,
                bees,
            }
        })
        .collect();

    ChartLayout {
        width: config.chart.width,
        height: config.chart.height,
        lanes,
    }
}
