//! Integrationstests für die Tile↔Screen-Transformationen aller Orientierungen:
//! - Hin- und Rücktransformation über alle Zoom-Stufen und alle Tiles
//! - Parallax-Layer mit verschobenem View-Zentrum
//! - Zellumriss enthält den Zellmittelpunkt

use std::sync::Arc;

use glam::{DVec2, IVec2};
use tile_map_view::view::ZOOM_LEVELS;
use tile_map_view::{create_view, demo, MapView, Orientation, TileMap, ViewResources};

fn view_for(map: TileMap) -> MapView {
    create_view(Arc::new(map), Arc::new(ViewResources::empty()))
        .expect("Orientierung muss unterstützt sein")
}

fn assert_roundtrip_all_tiles(view: &MapView, layer_index: Option<usize>) {
    let layer = layer_index.and_then(|index| view.map().layer(index));
    let props = layer
        .map(|l| l.props)
        .unwrap_or_else(|| view.map().full_layer_props());
    for ty in 0..props.height as i32 {
        for tx in 0..props.width as i32 {
            let screen = view.layer_tile_to_screen_coords(layer, tx, ty);
            let back = view.screen_to_tile_coords(layer, screen.x, screen.y);
            assert_eq!(
                back,
                IVec2::new(tx, ty),
                "{} Zoom {}: Tile ({}, {}) → Screen {:?}",
                view.orientation(),
                view.zoom(),
                tx,
                ty,
                screen
            );
        }
    }
}

#[test]
fn test_roundtrip_every_orientation_and_zoom_level() {
    for orientation in Orientation::ALL {
        let mut view = view_for(demo::demo_map(orientation));
        for level in 0..ZOOM_LEVELS.len() {
            view.set_zoom_level(level);
            assert_roundtrip_all_tiles(&view, None);
        }
    }
}

#[test]
fn test_roundtrip_with_odd_tile_sizes() {
    let sizes = [(31, 17), (45, 45), (33, 20)];
    for orientation in Orientation::ALL {
        for (tw, th) in sizes {
            let mut view = view_for(TileMap::new(9, 7, tw, th, orientation));
            for level in 0..ZOOM_LEVELS.len() {
                view.set_zoom_level(level);
                assert_roundtrip_all_tiles(&view, None);
            }
        }
    }
}

#[test]
fn test_roundtrip_with_free_zoom_factor() {
    for orientation in Orientation::ALL {
        let mut view = view_for(demo::demo_map(orientation));
        for factor in [0.33, 0.9, 1.37, 2.5] {
            view.set_zoom(factor);
            assert_roundtrip_all_tiles(&view, None);
        }
    }
}

#[test]
fn test_roundtrip_on_parallax_layer() {
    for orientation in Orientation::ALL {
        let mut view = view_for(demo::demo_map(orientation));
        view.set_view_center(0.3, 0.7);
        for level in [2, 5, 8] {
            view.set_zoom_level(level);
            assert_roundtrip_all_tiles(&view, Some(1));
        }
    }
}

#[test]
fn test_hex_roundtrip_large_tiles() {
    let mut view = view_for(TileMap::new(8, 8, 64, 64, Orientation::Hexagonal));
    for level in 0..ZOOM_LEVELS.len() {
        view.set_zoom_level(level);
        assert_roundtrip_all_tiles(&view, None);
    }
}

#[test]
fn test_tile_polygon_contains_cell_center() {
    for orientation in Orientation::ALL {
        let view = view_for(demo::demo_map(orientation));
        let ctx = view.context();
        let props = view.map().full_layer_props();
        let tile_size = ctx.zoomed_tile_size(&props);
        let (delta, cell) = view.projection().cell_bounds(tile_size);
        for (tx, ty) in [(0, 0), (3, 4), (11, 9)] {
            let anchor = view.layer_tile_to_screen_coords(None, tx, ty);
            let center = (anchor + delta).as_dvec2() + cell.as_dvec2() / 2.0;
            let polygon = view.tile_polygon(tx, ty, 0);
            assert!(
                polygon.contains(center + DVec2::splat(0.25)),
                "{}: Mittelpunkt von ({}, {}) außerhalb des Umrisses",
                orientation,
                tx,
                ty
            );
        }
    }
}

#[test]
fn test_ortho_scenario_from_screen_point() {
    let view = view_for(TileMap::new(10, 10, 32, 32, Orientation::Orthogonal));
    assert_eq!(view.screen_to_tile_coords(None, 35, 70), IVec2::new(1, 2));
    assert_eq!(view.layer_tile_to_screen_coords(None, 1, 2), IVec2::new(32, 64));
    assert_eq!(view.screen_to_pixel_coords(35, 70), IVec2::new(35, 70));
}

#[test]
fn test_pixel_coords_follow_zoom() {
    let mut view = view_for(TileMap::new(10, 10, 32, 32, Orientation::Isometric));
    view.set_zoom(2.0);
    assert_eq!(view.screen_to_pixel_coords(35, 71), IVec2::new(17, 35));
    view.set_zoom(0.5);
    assert_eq!(view.screen_to_pixel_coords(-3, 7), IVec2::new(-6, 14));
}

#[test]
fn test_extreme_screen_points_on_parallax_layer() {
    for orientation in Orientation::ALL {
        let mut view = view_for(demo::demo_map(orientation));
        view.set_view_center(1.0, 1.0);
        let layer = view.map().layer(1);
        let props = layer.map(|l| l.props).expect("Parallax-Layer fehlt");
        for corner in [i32::MIN, i32::MAX] {
            let tile = view.screen_to_tile_coords(layer, corner, corner);
            assert!(
                !props.contains(tile.x, tile.y),
                "{orientation}: Screen ({corner}, {corner}) trifft Tile {tile:?}"
            );
        }
    }
}
