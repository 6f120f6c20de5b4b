//! Verschobene Projektion: Rechteck-Zellen, jede Zeile um eine halbe
//! Tile-Breite weiter nach rechts gerückt (affine Scherung).

use glam::{DVec2, IVec2};
use tile_raster::Polygon;

use super::{Projection, ViewContext};
use crate::core::Orientation;

/// Verschobene Projektion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftedProjection;

fn row_shift(tile_size: IVec2) -> i32 {
    tile_size.x / 2
}

impl Projection for ShiftedProjection {
    fn orientation(&self) -> Orientation {
        Orientation::Shifted
    }

    fn project(&self, _ctx: &ViewContext, offset: IVec2, tile_size: IVec2, tile: DVec2) -> DVec2 {
        DVec2::new(
            tile.x * tile_size.x as f64 + tile.y * row_shift(tile_size) as f64 + offset.x as f64,
            tile.y * tile_size.y as f64 + offset.y as f64,
        )
    }

    fn locate_tile(&self, _ctx: &ViewContext, offset: IVec2, tile_size: IVec2, screen: IVec2) -> IVec2 {
        let local = screen.as_dvec2() - offset.as_dvec2();
        let ty = (local.y / tile_size.y as f64).floor();
        let tx = ((local.x - ty * row_shift(tile_size) as f64) / tile_size.x as f64).floor();
        IVec2::new(tx as i32, ty as i32)
    }

    fn cell_bounds(&self, tile_size: IVec2) -> (IVec2, IVec2) {
        (IVec2::ZERO, tile_size)
    }

    fn grid_polygon(&self, tile_size: IVec2, anchor: IVec2, border: i32) -> Polygon {
        Polygon::rect(
            anchor.x - border,
            anchor.y - border,
            tile_size.x + 2 * border,
            tile_size.y + 2 * border,
        )
    }

    fn preferred_size(&self, ctx: &ViewContext) -> IVec2 {
        let tile_size = ctx.map_tile_size();
        let rows = ctx.map.height as i32;
        IVec2::new(
            ctx.map.width as i32 * tile_size.x + (rows - 1).max(0) * row_shift(tile_size),
            rows * tile_size.y,
        )
    }

    fn scroll_step(&self, tile_size: IVec2) -> IVec2 {
        tile_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TileMap;
    use glam::Vec2;

    fn ctx(map: &TileMap) -> ViewContext<'_> {
        ViewContext {
            map,
            zoom: 1.0,
            view_center: Vec2::ZERO,
            current_layer: None,
        }
    }

    #[test]
    fn test_rows_shift_by_half_tile() {
        let map = TileMap::new(4, 4, 32, 32, Orientation::Shifted);
        let ctx = ctx(&map);
        let size = IVec2::splat(32);
        assert_eq!(ShiftedProjection.tile_to_screen(&ctx, IVec2::ZERO, size, 0, 1), IVec2::new(16, 32));
        assert_eq!(ShiftedProjection.tile_to_screen(&ctx, IVec2::ZERO, size, 2, 2), IVec2::new(96, 64));
    }

    #[test]
    fn test_inverse_uses_row_shift() {
        let map = TileMap::new(4, 4, 32, 32, Orientation::Shifted);
        let ctx = ctx(&map);
        let size = IVec2::splat(32);
        // Zeile 1 beginnt bei x = 16: x = 10 liegt links davon (Spalte -1)
        assert_eq!(
            ShiftedProjection.locate_tile(&ctx, IVec2::ZERO, size, IVec2::new(10, 40)),
            IVec2::new(-1, 1)
        );
        assert_eq!(
            ShiftedProjection.locate_tile(&ctx, IVec2::ZERO, size, IVec2::new(47, 40)),
            IVec2::new(0, 1)
        );
    }

    #[test]
    fn test_preferred_size() {
        let map = TileMap::new(5, 3, 32, 32, Orientation::Shifted);
        assert_eq!(ShiftedProjection.preferred_size(&ctx(&map)), IVec2::new(192, 96));
    }
}
