//! Pinsel-Vorschau: was ein Pinsel an der Mausposition malen würde.
//!
//! Die Ansicht hält den Pinsel nur geteilt (`Rc<dyn Brush>`); Position und
//! Form setzt das Editier-Werkzeug, die Ansicht ruft nur `draw_preview` auf.

use std::cell::Cell;

use glam::IVec2;
use image::Rgba;
use tile_raster::{Composite, Surface};

use super::projection::draw_tile_image;
use super::MapView;
use crate::core::TileGrid;

/// Deckkraft der Flächenfüllung einer Form-Vorschau.
const SHAPE_FILL_ALPHA: f32 = 0.25;

/// Deckkraft der Tiles einer Stempel-Vorschau.
const STAMP_ALPHA: f32 = 0.5;

/// Schnittstelle für Pinsel, deren Vorschau in der Ansicht gezeichnet wird.
pub trait Brush: std::fmt::Debug {
    /// Zeichnet die Vorschau des Pinsels über alle Layer.
    fn draw_preview(&self, surface: &mut Surface, view: &MapView);
}

/// Grundform eines Form-Pinsels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushShape {
    /// Quadrat mit Kantenlänge `size`
    Rect,
    /// Kreis mit Durchmesser `size`
    Circle,
}

/// Pinsel mit einfacher Form um eine Tile-Position.
#[derive(Debug)]
pub struct ShapeBrush {
    shape: BrushShape,
    size: u32,
    color: Rgba<u8>,
    position: Cell<IVec2>,
}

impl ShapeBrush {
    /// Erstellt einen Form-Pinsel an Position (0, 0).
    pub fn new(shape: BrushShape, size: u32) -> Self {
        Self {
            shape,
            size: size.max(1),
            color: Rgba([255, 255, 255, 255]),
            position: Cell::new(IVec2::ZERO),
        }
    }

    /// Setzt die Vorschau-Farbe.
    pub fn with_color(mut self, color: Rgba<u8>) -> Self {
        self.color = color;
        self
    }

    /// Setzt die Tile-Position unter dem Mauszeiger.
    pub fn set_position(&self, tile: IVec2) {
        self.position.set(tile);
    }

    /// Aktuelle Tile-Position.
    pub fn position(&self) -> IVec2 {
        self.position.get()
    }

    /// Alle Tiles, die der Pinsel an der aktuellen Position abdeckt.
    pub fn footprint(&self) -> Vec<IVec2> {
        let size = self.size as i32;
        let origin = self.position.get() - IVec2::splat(size / 2);
        // Abstände in halben Tiles, damit gerade Größen symmetrisch bleiben
        let radius_sq = size * size;
        let mut tiles = Vec::with_capacity((size * size) as usize);
        for dy in 0..size {
            for dx in 0..size {
                let covered = match self.shape {
                    BrushShape::Rect => true,
                    BrushShape::Circle => {
                        let cx = 2 * dx + 1 - size;
                        let cy = 2 * dy + 1 - size;
                        cx * cx + cy * cy <= radius_sq
                    }
                };
                if covered {
                    tiles.push(origin + IVec2::new(dx, dy));
                }
            }
        }
        tiles
    }
}

impl Brush for ShapeBrush {
    fn draw_preview(&self, surface: &mut Surface, view: &MapView) {
        let footprint = self.footprint();
        surface.set_color(self.color);

        surface.set_composite(Composite::SrcAtop(SHAPE_FILL_ALPHA));
        for tile in &footprint {
            surface.fill_polygon(&view.tile_polygon(tile.x, tile.y, 0));
        }

        surface.set_composite(Composite::SrcOver);
        for tile in &footprint {
            surface.stroke_polygon(&view.tile_polygon(tile.x, tile.y, 0));
        }
    }
}

/// Pinsel aus kopierten Tile-Rastern (Stempel), zentriert auf die Mausposition.
#[derive(Debug)]
pub struct CustomBrush {
    layers: Vec<TileGrid>,
    position: Cell<IVec2>,
}

impl CustomBrush {
    /// Erstellt einen Stempel aus einem oder mehreren Tile-Rastern.
    pub fn new(layers: Vec<TileGrid>) -> Self {
        Self {
            layers,
            position: Cell::new(IVec2::ZERO),
        }
    }

    /// Setzt die Tile-Position unter dem Mauszeiger.
    pub fn set_position(&self, tile: IVec2) {
        self.position.set(tile);
    }

    /// Ausdehnung des Stempels in Tiles (größtes Raster).
    pub fn bounds(&self) -> IVec2 {
        self.layers.iter().fold(IVec2::ZERO, |acc, grid| {
            acc.max(IVec2::new(grid.width() as i32, grid.height() as i32))
        })
    }

    /// Tile-Position der linken oberen Stempel-Ecke.
    pub fn origin(&self) -> IVec2 {
        self.position.get() - self.bounds() / 2
    }
}

impl Brush for CustomBrush {
    fn draw_preview(&self, surface: &mut Surface, view: &MapView) {
        let ctx = view.context();
        let projection = view.projection();
        let props = ctx.grid_props();
        let tile_size = ctx.zoomed_tile_size(&props);
        let offset = ctx.layer_offset(&props);
        let (delta, cell) = projection.cell_bounds(tile_size);
        let origin = self.origin();

        surface.set_composite(Composite::SrcAtop(STAMP_ALPHA));
        for grid in &self.layers {
            for y in 0..grid.height() as i32 {
                for x in 0..grid.width() as i32 {
                    let Some(image) = grid.tile_at(x, y).and_then(|tile| tile.image.as_deref())
                    else {
                        continue;
                    };
                    let target = origin + IVec2::new(x, y);
                    let anchor = projection.tile_to_screen(&ctx, offset, tile_size, target.x, target.y);
                    draw_tile_image(surface, image, anchor + delta, cell, ctx.zoom);
                }
            }
        }
        surface.set_composite(Composite::SrcOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tile;
    use std::sync::Arc;

    #[test]
    fn test_rect_footprint_is_centered() {
        let brush = ShapeBrush::new(BrushShape::Rect, 3);
        brush.set_position(IVec2::new(5, 5));
        let footprint = brush.footprint();
        assert_eq!(footprint.len(), 9);
        assert_eq!(footprint.first(), Some(&IVec2::new(4, 4)));
        assert_eq!(footprint.last(), Some(&IVec2::new(6, 6)));
    }

    #[test]
    fn test_circle_footprint_drops_corners() {
        let brush = ShapeBrush::new(BrushShape::Circle, 4);
        let footprint = brush.footprint();
        assert_eq!(footprint.len(), 12);
        assert!(!footprint.contains(&IVec2::new(-2, -2)));
        assert!(footprint.contains(&IVec2::new(0, 0)));
    }

    #[test]
    fn test_single_tile_brush() {
        let brush = ShapeBrush::new(BrushShape::Circle, 0);
        brush.set_position(IVec2::new(2, 3));
        assert_eq!(brush.footprint(), vec![IVec2::new(2, 3)]);
    }

    #[test]
    fn test_custom_brush_centers_on_position() {
        let mut grid = TileGrid::new(3, 2);
        grid.fill(&Arc::new(Tile::solid(1, 8, 8, [255, 0, 0, 255])));
        let brush = CustomBrush::new(vec![grid, TileGrid::new(1, 4)]);
        brush.set_position(IVec2::new(10, 10));
        assert_eq!(brush.bounds(), IVec2::new(3, 4));
        assert_eq!(brush.origin(), IVec2::new(9, 8));
    }
}
