use super::*;
use crate::core::{Tile, Tileset};

fn map(orientation: Orientation) -> TileMap {
    TileMap::new(10, 10, 32, 32, orientation)
}

fn ctx<'a>(map: &'a TileMap, zoom: f64, current_layer: Option<&'a MapLayer>) -> ViewContext<'a> {
    ViewContext {
        map,
        zoom,
        view_center: Vec2::ZERO,
        current_layer,
    }
}

#[test]
fn test_tile_range_iterates_row_major() {
    let range = TileRange {
        start: IVec2::new(1, 2),
        end: IVec2::new(3, 4),
    };
    let tiles: Vec<IVec2> = range.iter().collect();
    assert_eq!(
        tiles,
        vec![
            IVec2::new(1, 2),
            IVec2::new(2, 2),
            IVec2::new(1, 3),
            IVec2::new(2, 3)
        ]
    );
    assert_eq!(range.len(), 4);
    assert!(range.contains(IVec2::new(2, 3)));
    assert!(!range.contains(IVec2::new(3, 3)));
    assert!(TileRange::EMPTY.is_empty());
    assert_eq!(TileRange::EMPTY.iter().count(), 0);
}

#[test]
fn test_visible_tiles_follow_clip() {
    let map = map(Orientation::Orthogonal);
    let ctx = ctx(&map, 1.0, None);
    let props = map.full_layer_props();

    let range = OrthoProjection.visible_tiles(&ctx, &props, ClipRect::new(0, 0, 64, 64), 0);
    assert_eq!(range.start, IVec2::ZERO);
    assert_eq!(range.end, IVec2::new(3, 3));

    let middle = OrthoProjection.visible_tiles(&ctx, &props, ClipRect::new(128, 128, 32, 32), 0);
    assert_eq!(middle.start, IVec2::new(3, 3));
    assert_eq!(middle.end, IVec2::new(6, 6));
}

#[test]
fn test_visible_tiles_outside_layer_is_empty() {
    let map = map(Orientation::Orthogonal);
    let ctx = ctx(&map, 1.0, None);
    let props = map.full_layer_props();

    assert!(OrthoProjection
        .visible_tiles(&ctx, &props, ClipRect::new(1000, 1000, 10, 10), 0)
        .is_empty());
    assert!(OrthoProjection
        .visible_tiles(&ctx, &props, ClipRect::EMPTY, 0)
        .is_empty());
}

#[test]
fn test_visible_tiles_include_tall_image_overhang() {
    let mut map = map(Orientation::Orthogonal);
    let mut tileset = Tileset::new("hoch");
    tileset.add(Tile::solid(1, 32, 96, [255, 255, 255, 255]));
    map.tilesets.push(tileset);
    let ctx = ctx(&map, 1.0, None);
    let props = map.full_layer_props();

    let clip = ClipRect::new(0, 0, 64, 64);
    let range = OrthoProjection.visible_tiles(&ctx, &props, clip, map.max_tile_image_height());
    // zwei zusätzliche Zeilen für 96 px hohe Bilder auf 32 px Zellen
    assert_eq!(range.end, IVec2::new(5, 5));
    // halbe Zoomstufe: Bild 48 px, Zelle 16 px
    let half = ViewContext { zoom: 0.5, ..ctx };
    assert_eq!(OrthoProjection.visible_tiles(&half, &props, clip, 96).end, IVec2::new(7, 7));
}

#[test]
fn test_grid_props_fall_back_to_map() {
    let map = map(Orientation::Orthogonal);
    let layer = MapLayer::tiles("klein", LayerProps::new(4, 4, 16, 16));

    assert_eq!(ctx(&map, 1.0, None).grid_props(), map.full_layer_props());
    assert_eq!(ctx(&map, 1.0, Some(&layer)).grid_props(), layer.props);
}

#[test]
fn test_screen_to_tile_applies_layer_parallax() {
    let map = map(Orientation::Orthogonal);
    let mut props = LayerProps::new(5, 5, 32, 32);
    props.parallax = true;
    let ctx = ViewContext {
        map: &map,
        zoom: 1.0,
        view_center: Vec2::new(0.5, 0.5),
        current_layer: None,
    };

    // Versatz (80, 80): Screen (80, 80) ist der Ursprung des Layers
    assert_eq!(
        OrthoProjection.screen_to_tile(&ctx, Some(&props), IVec2::new(80, 80)),
        IVec2::ZERO
    );
    assert_eq!(
        OrthoProjection.screen_to_tile(&ctx, None, IVec2::new(80, 80)),
        IVec2::new(2, 2)
    );
}

#[test]
fn test_zoomed_tile_size_never_collapses() {
    let map = map(Orientation::Orthogonal);
    let tiny = ctx(&map, 0.01, None);
    assert_eq!(tiny.map_tile_size(), IVec2::ONE);
    let half = ctx(&map, 0.5, None);
    assert_eq!(half.map_tile_size(), IVec2::splat(16));
}

#[test]
fn test_projection_for_matches_orientation() {
    for orientation in Orientation::ALL {
        assert_eq!(projection_for(orientation).orientation(), orientation);
    }
}

#[test]
fn test_grid_polygon_contains_own_anchor_cell() {
    let map = map(Orientation::Orthogonal);
    for orientation in Orientation::ALL {
        let projection = projection_for(orientation);
        let ctx = ctx(&map, 1.0, None);
        let size = IVec2::new(64, 32);
        let anchor = projection.tile_to_screen(&ctx, IVec2::ZERO, size, 3, 2);
        let (delta, cell) = projection.cell_bounds(size);
        let center = (anchor + delta + cell / 2).as_dvec2();
        let polygon = projection.grid_polygon(size, anchor, 0);
        assert!(polygon.contains(center), "{orientation}: Zellmitte liegt außerhalb");
        assert_eq!(
            projection.locate_tile(&ctx, IVec2::ZERO, size, center.as_ivec2()),
            IVec2::new(3, 2),
            "{orientation}"
        );
    }
}

#[test]
fn test_scroll_unit_increment_per_orientation() {
    let map = map(Orientation::Orthogonal);
    let ctx = ctx(&map, 1.0, None);
    assert_eq!(OrthoProjection.scroll_unit_increment(&ctx, ScrollAxis::Horizontal), 32);
    assert_eq!(IsoProjection.scroll_unit_increment(&ctx, ScrollAxis::Vertical), 16);
    assert_eq!(HexProjection.scroll_unit_increment(&ctx, ScrollAxis::Horizontal), 24);
    assert_eq!(ShiftedProjection.scroll_unit_increment(&ctx, ScrollAxis::Vertical), 32);
}
