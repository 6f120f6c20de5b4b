//! Hexagonale Projektion: Sechsecke mit flacher Oberkante, ungerade Spalten
//! um eine halbe Zellhöhe nach unten versetzt.
//!
//! Spaltenabstand ist `tile_width - tile_width / 4`; benachbarte Spalten
//! überlappen im Bereich der schrägen Kanten. Der Anker einer Zelle ist
//! die linke Ecke ihrer Oberkante.

use glam::{DVec2, IVec2};
use tile_raster::Polygon;

use super::{Projection, ViewContext};
use crate::core::Orientation;

/// Hexagonale Projektion.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexProjection;

/// Ganzzahlige Zellmaße: (Viertelbreite, Spaltenabstand, halbe Höhe).
fn metrics(tile_size: IVec2) -> (i32, i32, i32) {
    let quarter = tile_size.x / 4;
    let column = (tile_size.x - quarter).max(1);
    (quarter, column, tile_size.y / 2)
}

fn is_odd(column: i32) -> bool {
    column.rem_euclid(2) == 1
}

impl Projection for HexProjection {
    fn orientation(&self) -> Orientation {
        Orientation::Hexagonal
    }

    fn project(&self, _ctx: &ViewContext, offset: IVec2, tile_size: IVec2, tile: DVec2) -> DVec2 {
        let (quarter, column, half_h) = metrics(tile_size);
        let shift = if is_odd(tile.x.floor() as i32) { half_h } else { 0 };
        DVec2::new(
            tile.x * column as f64 + (quarter + offset.x) as f64,
            tile.y * tile_size.y as f64 + (shift + offset.y) as f64,
        )
    }

    /// Ohne Spaltenversatz: alle Punkte eines Objekts teilen die Parität seines Ankers.
    fn project_linear(&self, _ctx: &ViewContext, offset: IVec2, tile_size: IVec2, tile: DVec2) -> DVec2 {
        let (quarter, column, _) = metrics(tile_size);
        DVec2::new(
            tile.x * column as f64 + (quarter + offset.x) as f64,
            tile.y * tile_size.y as f64 + offset.y as f64,
        )
    }

    fn locate_tile(&self, _ctx: &ViewContext, offset: IVec2, tile_size: IVec2, screen: IVec2) -> IVec2 {
        let (quarter, column, half_h) = metrics(tile_size);
        let height = tile_size.y as f64;
        let local = screen.as_dvec2() - offset.as_dvec2();

        let col = (local.x / column as f64).floor() as i32;
        let wx = local.x - col as f64 * column as f64;
        let odd = is_odd(col);
        let py = if odd { local.y - half_h as f64 } else { local.y };
        let row = (py / height).floor() as i32;
        let wy = py - row as f64 * height;

        if wx < quarter as f64 {
            // Dreieck links der Zelle: gehört evtl. zur linken Nachbarspalte
            let t = wx / quarter as f64;
            let upper_edge = half_h as f64 * (1.0 - t);
            let lower_edge = half_h as f64 * (1.0 + t);
            let left = col.saturating_sub(1);
            if wy <= upper_edge {
                return IVec2::new(left, if odd { row } else { row.saturating_sub(1) });
            }
            if wy >= lower_edge {
                return IVec2::new(left, if odd { row.saturating_add(1) } else { row });
            }
        }
        IVec2::new(col, row)
    }

    fn cell_bounds(&self, tile_size: IVec2) -> (IVec2, IVec2) {
        let (quarter, _, _) = metrics(tile_size);
        (IVec2::new(-quarter, 0), tile_size)
    }

    fn grid_polygon(&self, tile_size: IVec2, anchor: IVec2, border: i32) -> Polygon {
        let (quarter, column, half_h) = metrics(tile_size);
        let left = anchor.x - quarter;
        let top_right = left + column;
        let right = left + tile_size.x;
        let bottom = anchor.y + tile_size.y;
        Polygon::new(vec![
            IVec2::new(anchor.x, anchor.y - border),
            IVec2::new(top_right, anchor.y - border),
            IVec2::new(right + border, anchor.y + half_h),
            IVec2::new(top_right, bottom + border),
            IVec2::new(anchor.x, bottom + border),
            IVec2::new(left - border, anchor.y + half_h),
        ])
    }

    fn preferred_size(&self, ctx: &ViewContext) -> IVec2 {
        let tile_size = ctx.map_tile_size();
        let (quarter, column, half_h) = metrics(tile_size);
        IVec2::new(
            ctx.map.width as i32 * column + quarter,
            ctx.map.height as i32 * tile_size.y + half_h,
        )
    }

    fn scroll_step(&self, tile_size: IVec2) -> IVec2 {
        let (_, column, _) = metrics(tile_size);
        IVec2::new(column, tile_size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MapObject, ObjectGroup, TileMap};
    use glam::Vec2;
    use image::Rgba;
    use tile_raster::Surface;

    const SIZE: IVec2 = IVec2::new(64, 64);

    fn ctx(map: &TileMap) -> ViewContext<'_> {
        ViewContext {
            map,
            zoom: 1.0,
            view_center: Vec2::ZERO,
            current_layer: None,
        }
    }

    #[test]
    fn test_odd_columns_are_shifted_down() {
        let map = TileMap::new(4, 4, 64, 64, Orientation::Hexagonal);
        let ctx = ctx(&map);
        assert_eq!(HexProjection.tile_to_screen(&ctx, IVec2::ZERO, SIZE, 0, 0), IVec2::new(16, 0));
        assert_eq!(HexProjection.tile_to_screen(&ctx, IVec2::ZERO, SIZE, 1, 0), IVec2::new(64, 32));
        assert_eq!(HexProjection.tile_to_screen(&ctx, IVec2::ZERO, SIZE, 2, 1), IVec2::new(112, 64));
    }

    #[test]
    fn test_slanted_edge_resolves_to_left_neighbour() {
        let map = TileMap::new(4, 4, 64, 64, Orientation::Hexagonal);
        let ctx = ctx(&map);
        // Spalte 1 beginnt bei x = 48; oben links im Dreieck liegt (0, 0)
        assert_eq!(
            HexProjection.locate_tile(&ctx, IVec2::ZERO, SIZE, IVec2::new(50, 34)),
            IVec2::new(0, 0)
        );
        // unten links im Dreieck liegt (0, 1)
        assert_eq!(
            HexProjection.locate_tile(&ctx, IVec2::ZERO, SIZE, IVec2::new(50, 94)),
            IVec2::new(0, 1)
        );
        // Mitte der linken Ecke gehört zur Zelle selbst
        assert_eq!(
            HexProjection.locate_tile(&ctx, IVec2::ZERO, SIZE, IVec2::new(60, 64)),
            IVec2::new(1, 0)
        );
    }

    #[test]
    fn test_even_column_neighbours() {
        let map = TileMap::new(4, 4, 64, 64, Orientation::Hexagonal);
        let ctx = ctx(&map);
        // Spalte 2 beginnt bei x = 96, Zeile 1 bei y = 64
        assert_eq!(
            HexProjection.locate_tile(&ctx, IVec2::ZERO, SIZE, IVec2::new(98, 66)),
            IVec2::new(1, 0)
        );
        assert_eq!(
            HexProjection.locate_tile(&ctx, IVec2::ZERO, SIZE, IVec2::new(98, 126)),
            IVec2::new(1, 1)
        );
    }

    #[test]
    fn test_object_outline_keeps_anchor_parity() {
        let map = TileMap::new(4, 4, 32, 32, Orientation::Hexagonal);
        let ctx = ctx(&map);
        let size = IVec2::splat(32);
        let props = map.full_layer_props();
        let group = ObjectGroup {
            objects: vec![MapObject {
                name: "kiste".to_string(),
                position: IVec2::ZERO,
                size: IVec2::new(48, 16),
            }],
            color: Rgba([255, 0, 0, 255]),
        };

        // Oberkante über die Spaltengrenze hinweg waagerecht
        let start = HexProjection.project_linear(&ctx, IVec2::ZERO, size, DVec2::ZERO);
        let end = HexProjection.project_linear(&ctx, IVec2::ZERO, size, DVec2::new(1.5, 0.0));
        assert_eq!(start, DVec2::new(8.0, 0.0));
        assert_eq!(end, DVec2::new(44.0, 0.0));

        let mut surface = Surface::new(64, 64);
        HexProjection.paint_object_group(&mut surface, &ctx, &props, &group);
        assert_eq!(surface.pixel(30, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(surface.pixel(44, 8), Rgba([255, 0, 0, 255]));
        assert_eq!(surface.pixel(30, 10), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_locate_tile_survives_extreme_screen_points() {
        let map = TileMap::new(4, 4, 4, 4, Orientation::Hexagonal);
        let ctx = ctx(&map);
        let tiny = IVec2::new(1, 4);
        let offset = IVec2::new(80, 80);
        let far_left = HexProjection.locate_tile(&ctx, offset, tiny, IVec2::splat(i32::MIN));
        assert!(far_left.x < 0 && far_left.y < 0);
        let far_right = HexProjection.locate_tile(&ctx, -offset, tiny, IVec2::splat(i32::MAX));
        assert!(far_right.x > 0 && far_right.y > 0);
    }

    #[test]
    fn test_grid_polygon_hexagon() {
        let polygon = HexProjection.grid_polygon(SIZE, IVec2::new(16, 0), 0);
        assert_eq!(
            polygon.points(),
            &[
                IVec2::new(16, 0),
                IVec2::new(48, 0),
                IVec2::new(64, 32),
                IVec2::new(48, 64),
                IVec2::new(16, 64),
                IVec2::new(0, 32)
            ]
        );
    }

    #[test]
    fn test_preferred_size() {
        let map = TileMap::new(4, 3, 64, 64, Orientation::Hexagonal);
        assert_eq!(HexProjection.preferred_size(&ctx(&map)), IVec2::new(208, 224));
    }
}
