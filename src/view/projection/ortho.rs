//! Orthogonale Projektion: achsenparallele Rechteck-Zellen.

use glam::{DVec2, IVec2};
use tile_raster::{Polygon, Surface};

use super::{paint_lattice_lines, Projection, ViewContext};
use crate::core::Orientation;

/// Orthogonale Projektion.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrthoProjection;

impl Projection for OrthoProjection {
    fn orientation(&self) -> Orientation {
        Orientation::Orthogonal
    }

    fn project(&self, _ctx: &ViewContext, offset: IVec2, tile_size: IVec2, tile: DVec2) -> DVec2 {
        tile * tile_size.as_dvec2() + offset.as_dvec2()
    }

    fn locate_tile(&self, _ctx: &ViewContext, offset: IVec2, tile_size: IVec2, screen: IVec2) -> IVec2 {
        ((screen.as_dvec2() - offset.as_dvec2()) / tile_size.as_dvec2())
            .floor()
            .as_ivec2()
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
        IVec2::new(
            ctx.map.width as i32 * tile_size.x,
            ctx.map.height as i32 * tile_size.y,
        )
    }

    fn scroll_step(&self, tile_size: IVec2) -> IVec2 {
        tile_size
    }

    fn paint_grid(&self, surface: &mut Surface, ctx: &ViewContext) {
        paint_lattice_lines(self, surface, ctx);
    }
}
