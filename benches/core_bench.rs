use coop_map_viewer::app::data_provider::{CooperationRecord, CountryRecord, OrganizationRecord};
use coop_map_viewer::app::HitPublisher;
use coop_map_viewer::{
    Dataset, EdgeKey, GroupKey, InMemoryDataProvider, MapView, MarkerId, ViewerOptions,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use std::hint::black_box;
use std::sync::Arc;

const COUNTRY_COUNT: usize = 50;

fn org_name(index: usize) -> String {
    format!("Org{index}")
}

fn country_name(index: usize) -> String {
    format!("Country{}", index % COUNTRY_COUNT)
}

fn build_synthetic_dataset(org_count: usize) -> Dataset {
    let organizations = (0..org_count)
        .map(|index| {
            let column = (index % 100) as f32;
            let row = (index / 100) as f32;
            OrganizationRecord {
                name: org_name(index),
                country: Some(country_name(index)),
                location: Some([column * 30.0, row * 30.0]),
            }
        })
        .collect();

    let countries = (0..COUNTRY_COUNT)
        .map(|index| CountryRecord {
            name: country_name(index),
            location: [index as f32 * 60.0, -500.0],
        })
        .collect();

    let cooperations = (0..org_count)
        .flat_map(|index| {
            [1usize, 7, 31].into_iter().map(move |step| CooperationRecord {
                a: org_name(index),
                b: org_name((index + step) % org_count),
                weight: (index % 5 + 1) as u32,
            })
        })
        .collect();

    Dataset {
        organizations,
        countries,
        cooperations,
        conferences: Vec::new(),
    }
}

fn build_view(org_count: usize) -> MapView {
    let provider = InMemoryDataProvider::from_dataset(&build_synthetic_dataset(org_count));
    let mut view = MapView::new(
        Arc::new(provider),
        ViewerOptions::instant(),
        HitPublisher::new(),
    );
    view.populate();
    view
}

fn build_query_points(count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let x = ((i * 13) % 3000) as f32 + 0.37;
            let y = ((i * 7) % 3000) as f32 + 0.63;
            Vec2::new(x, y)
        })
        .collect()
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    let query_points = build_query_points(1024);

    for &org_count in &[1_000usize, 10_000usize] {
        let view = build_view(org_count);
        let snapshot = coop_map_viewer::HitSnapshot::build(view.nodes(), view.edges());

        group.bench_with_input(
            BenchmarkId::new("fine_batch", org_count),
            &snapshot,
            |b, snapshot| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for point in &query_points {
                        hits += snapshot.hit_test(black_box(*point)).nodes.len();
                    }
                    black_box(hits)
                })
            },
        );
    }

    group.finish();
}

fn bench_selection_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_cascade");

    for coarse in [false, true] {
        let mut view = build_view(10_000);
        view.set_granularity(coarse);
        let key = EdgeKey::new(org_name(0).as_str(), org_name(1).as_str());
        let label = if coarse { "coarse" } else { "fine" };

        group.bench_function(BenchmarkId::new("toggle_edge", label), |b| {
            b.iter(|| {
                let on = view.set_edge_selected(black_box(&key), true);
                let off = view.set_edge_selected(black_box(&key), false);
                black_box(on + off)
            })
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut view = build_view(10_000);
    view.set_granularity(true);
    let group_key = GroupKey::from(country_name(0));
    let member = MarkerId::from(org_name(0));

    c.bench_function("lookup_group_200_members", |b| {
        b.iter(|| black_box(view.lookup_group(black_box(&group_key)).member_count()))
    });

    c.bench_function("lookup_coarse_by_member", |b| {
        b.iter(|| black_box(view.lookup(black_box(&member)).member_count()))
    });
}

fn bench_granularity_switch(c: &mut Criterion) {
    let mut view = build_view(10_000);

    c.bench_function("granularity_round_trip_10k", |b| {
        b.iter(|| {
            view.set_granularity(true);
            view.set_granularity(false);
            black_box(view.is_coarse())
        })
    });
}

criterion_group!(
    benches,
    bench_hit_test,
    bench_selection_cascade,
    bench_lookup,
    bench_granularity_switch
);
criterion_main!(benches);
