use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use party_beeswarm::config::{Config, SizeScale};
use party_beeswarm::layout::{Circle, compute_layout, dodge};
use party_beeswarm::loader::load_csv;
use party_beeswarm::{ChartState, Dataset, StateUpdate};
use std::hint::black_box;

const COUNTRIES: [(&str, &str, &str); 6] = [
    ("France", "FRA", "west"),
    ("Germany", "DEU", "west"),
    ("Sweden", "SWE", "north"),
    ("Denmark", "DNK", "north"),
    ("Spain", "ESP", "south"),
    ("Italy", "ITA", "south"),
];

const FAMILIES: [&str; 10] = [
    "right", "con", "lib", "chr", "agr", "eco", "soc", "com", "spec", "",
];

/// Synthetic election file with `rows` parties spread over countries,
/// families and years.
fn dense_elections_csv(rows: usize) -> String {
    let mut out = String::from(
        "country_id,country_name,country_code,country_group,party_id,party_name_english,\
         party_name_ascii,party_name_short,election_id,election_date,family_name_short,\
         family_name,vote_share,most_recent_vote_share,state_market,liberty_authority,\
         left_right,eu_anti_pro\n",
    );
    for i in 0..rows {
        let (country, code, group) = COUNTRIES[i % COUNTRIES.len()];
        let family = FAMILIES[(i / 3) % FAMILIES.len()];
        let year = 1946 + (i * 7) % 75;
        let share = ((i * 37) % 450) as f64 / 10.0;
        let current = if i % 4 == 0 { 0.0 } else { share / 2.0 };
        let position = (i % 10) as f64 + 0.5;
        out.push_str(&format!(
            "{},{},{},{},{},Party {},Party {},P{},{},{}-06-01,{},,{:.1},{:.1},{:.1},,{:.1},{:.1}\n",
            i % COUNTRIES.len(),
            country,
            code,
            group,
            i,
            i,
            i,
            i,
            year * 10 + i % COUNTRIES.len(),
            year,
            family,
            share,
            current,
            position,
            position,
            position,
        ));
    }
    out
}

fn dense_circles(count: usize) -> Vec<Circle> {
    let scale = SizeScale::Sqrt { max_radius: 20.0 };
    (0..count)
        .map(|i| {
            let size = ((i * 37) % 450) as f64 / 10.0;
            Circle {
                index: i,
                y: ((i * 13) % 600) as f64,
                r: scale.radius(size),
                size,
            }
        })
        .collect()
}

fn dataset(rows: usize) -> Dataset {
    let config = Config::default();
    let report = load_csv(dense_elections_csv(rows).as_bytes()).expect("bench csv loads");
    Dataset::prepare(report.records, &config.profile).expect("bench mappings complete")
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for rows in [100usize, 1_000, 5_000] {
        let input = dense_elections_csv(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, data| {
            b.iter(|| {
                let report = load_csv(black_box(data.as_bytes())).expect("load failed");
                black_box(report.records.len());
            });
        });
    }
    group.finish();
}

fn bench_dodge(c: &mut Criterion) {
    let mut group = c.benchmark_group("dodge");
    for count in [50usize, 200, 800] {
        let circles = dense_circles(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &circles, |b, data| {
            b.iter(|| {
                let placed = dodge(black_box(data), 1.5, 1e-3);
                black_box(placed.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let mut config = Config::default();
    config.swarm.size = SizeScale::Sqrt { max_radius: 12.0 };
    for rows in [100usize, 1_000, 5_000] {
        let dataset = dataset(rows);
        let subset: Vec<usize> = (0..dataset.len()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(rows), &subset, |b, data| {
            b.iter(|| {
                let layout = compute_layout(&dataset, black_box(data), &config);
                black_box(layout.len());
            });
        });
    }
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_update");
    let config = Config::default();
    let dataset = dataset(2_000);
    let state = ChartState::new(&dataset, &config);
    let year = chrono::NaiveDate::from_ymd_opt(1995, 1, 1).expect("valid date");

    group.bench_function("year", |b| {
        b.iter(|| {
            let (next, recompute) = state.clone().update(
                &dataset,
                &config,
                StateUpdate::new().with_year(black_box(year)),
            );
            black_box((next.active_count(), recompute));
        });
    });
    group.bench_function("min_vote_share", |b| {
        b.iter(|| {
            let (next, recompute) = state.clone().update(
                &dataset,
                &config,
                StateUpdate::new().with_min_vote_share(black_box(0.05)),
            );
            black_box((next.layout().len(), recompute));
        });
    });
    group.bench_function("country_group", |b| {
        b.iter(|| {
            let (next, recompute) = state.clone().update(
                &dataset,
                &config,
                StateUpdate::new().with_country_group(black_box(Some("north"))),
            );
            black_box((next.layout().len(), recompute));
        });
    });
    group.finish();
}

criterion_group!(benches, bench_load, bench_dodge, bench_layout, bench_update);
criterion_main!(benches);
