//! Isometrische Projektion (Rauten-Layout).
//!
//! Die Tile-Achsen laufen diagonal: x nach rechts unten, y nach links unten.
//! Der Anker einer Zelle ist die obere Spitze ihrer Raute; Tile (0, 0)
//! liegt horizontal um `map.height * tile_width / 2` eingerückt, damit
//! die linke Kartenecke bei x = 0 beginnt.

use glam::{DVec2, IVec2};
use tile_raster::{Polygon, Surface};

use super::{paint_lattice_lines, Projection, ViewContext};
use crate::core::{LayerProps, Orientation};

/// Isometrische Projektion.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoProjection;

/// Halbe Tile-Größe (ganzzahlig, mindestens 1) als Schrittweite des Rautengitters.
fn half_size(tile_size: IVec2) -> IVec2 {
    (tile_size / 2).max(IVec2::ONE)
}

fn origin_x(ctx: &ViewContext, half: IVec2) -> i32 {
    ctx.map.height as i32 * half.x
}

impl Projection for IsoProjection {
    fn orientation(&self) -> Orientation {
        Orientation::Isometric
    }

    fn project(&self, ctx: &ViewContext, offset: IVec2, tile_size: IVec2, tile: DVec2) -> DVec2 {
        let half = half_size(tile_size).as_dvec2();
        let origin = origin_x(ctx, half_size(tile_size)) as f64;
        DVec2::new(
            (tile.x - tile.y) * half.x + origin + offset.x as f64,
            (tile.x + tile.y) * half.y + offset.y as f64,
        )
    }

    fn locate_tile(&self, ctx: &ViewContext, offset: IVec2, tile_size: IVec2, screen: IVec2) -> IVec2 {
        let half = half_size(tile_size);
        let local = screen.as_dvec2() - offset.as_dvec2();
        let px = (local.x - origin_x(ctx, half) as f64) / half.x as f64;
        let py = local.y / half.y as f64;
        IVec2::new(
            ((py + px) / 2.0).floor() as i32,
            ((py - px) / 2.0).floor() as i32,
        )
    }

    fn cell_bounds(&self, tile_size: IVec2) -> (IVec2, IVec2) {
        let half = half_size(tile_size);
        (IVec2::new(-half.x, 0), half * 2)
    }

    fn grid_polygon(&self, tile_size: IVec2, anchor: IVec2, border: i32) -> Polygon {
        let half = half_size(tile_size);
        Polygon::new(vec![
            IVec2::new(anchor.x, anchor.y - border),
            IVec2::new(anchor.x + half.x + border, anchor.y + half.y),
            IVec2::new(anchor.x, anchor.y + 2 * half.y + border),
            IVec2::new(anchor.x - half.x - border, anchor.y + half.y),
        ])
    }

    fn preferred_size(&self, ctx: &ViewContext) -> IVec2 {
        let half = half_size(ctx.map_tile_size());
        let diagonal = (ctx.map.width + ctx.map.height) as i32;
        half * diagonal
    }

    fn scroll_step(&self, tile_size: IVec2) -> IVec2 {
        half_size(tile_size)
    }

    /// Objekt-Pixel sind auf isometrischen Karten in Einheiten der Tile-Höhe angegeben.
    fn object_tile_space(&self, props: &LayerProps, pixel: DVec2) -> DVec2 {
        pixel / props.tile_height.max(1) as f64
    }

    fn paint_grid(&self, surface: &mut Surface, ctx: &ViewContext) {
        paint_lattice_lines(self, surface, ctx);
    }
}
