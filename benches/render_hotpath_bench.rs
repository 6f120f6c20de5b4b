//! Benchmark für den Render-Hotpath der Kartenansicht.
//!
//! Misst pro Orientierung:
//! - Vollständigen Frame (alle Layer, Spezial-Layer, Grid, Koordinaten)
//! - Teil-Neuzeichnen eines kleinen Bereichs
//! - Rücktransformation Screen → Tile für ein dichtes Punktraster

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use tile_map_view::{
    create_view, demo, ClipRect, MapView, Orientation, Surface, ViewMode, ViewResources,
};

fn build_view(orientation: Orientation) -> MapView {
    let map = Arc::new(demo::demo_map(orientation));
    let mut view = create_view(map, Arc::new(ViewResources::builtin()))
        .expect("Beispielkarte hat eine bekannte Orientierung");
    view.set_show_grid(true);
    view.set_mode(ViewMode::Coordinates, true);
    view.set_mode(ViewMode::PropertyFlags, true);
    view.set_current_layer(Some(0));
    view.set_view_center(0.5, 0.5);
    view
}

/// Misst: kompletter Frame in voller Größe
fn bench_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");

    for orientation in Orientation::ALL {
        let view = build_view(orientation);
        let size = view.preferred_size();
        let mut surface = Surface::new(size.x as u32, size.y as u32);

        group.bench_with_input(
            BenchmarkId::new("render", orientation.name()),
            &view,
            |b, view| {
                b.iter(|| {
                    view.render(black_box(&mut surface));
                    black_box(surface.pixel(0, 0))
                })
            },
        );
    }

    group.finish();
}

/// Misst: Neuzeichnen eines 64×64-Ausschnitts (typische Mausbewegung mit Pinsel)
fn bench_region_repaint(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_repaint");

    for orientation in Orientation::ALL {
        let view = build_view(orientation);
        let size = view.preferred_size();
        let mut surface = Surface::new(size.x as u32, size.y as u32);
        let region = ClipRect::new(size.x / 3, size.y / 3, 64, 64);

        group.bench_with_input(
            BenchmarkId::new("render_region", orientation.name()),
            &region,
            |b, &region| {
                b.iter(|| {
                    view.render_region(&mut surface, black_box(region));
                })
            },
        );
    }

    group.finish();
}

/// Misst: Screen → Tile für jeden vierten Pixel der Ansicht
fn bench_screen_to_tile(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen_to_tile");

    for orientation in Orientation::ALL {
        let view = build_view(orientation);
        let size = view.preferred_size();

        group.bench_function(BenchmarkId::new("locate", orientation.name()), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for y in (0..size.y).step_by(4) {
                    for x in (0..size.x).step_by(4) {
                        let tile = view.screen_to_tile_coords(None, x, y);
                        sum += (tile.x + tile.y) as i64;
                    }
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}

criterion_group!(
    render_hotpath_benches,
    bench_full_frame,
    bench_region_repaint,
    bench_screen_to_tile,
);
criterion_main!(render_hotpath_benches);
