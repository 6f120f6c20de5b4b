//! Parallax-Versatz eines Layers relativ zum View-Zentrum.
//!
//! Steht das View-Zentrum am linken Kartenrand (x = 0.0), sind alle Layer
//! linksbündig zur Karte. Wandert es nach rechts (x = 1.0), verschieben sich
//! Layer mit abweichender Breite, bis ihr rechter Rand mit dem Kartenrand
//! abschließt. Vertikal entsprechend.

use glam::{IVec2, Vec2};

use crate::core::{LayerProps, TileMap};

/// Versatz eines Layers in Karten-Pixeln (ohne Zoom).
///
/// Ohne aktiviertes Parallax immer `(0, 0)`; gebrochene Werte werden abgerundet.
pub fn parallax_offset(map: &TileMap, layer: &LayerProps, view_center: Vec2) -> IVec2 {
    if !layer.parallax {
        return IVec2::ZERO;
    }
    let dx = (map.pixel_width() - layer.pixel_width()) as f64;
    let dy = (map.pixel_height() - layer.pixel_height()) as f64;
    IVec2::new(
        (view_center.x as f64 * dx).floor() as i32,
        (view_center.y as f64 * dy).floor() as i32,
    )
}

/// Versatz in Screen-Pixeln: erst in voller Größe berechnet, dann mit dem Zoom
/// skaliert und Richtung 0 abgeschnitten (negative Versätze also aufgerundet).
pub fn parallax_offset_zoomed(
    map: &TileMap,
    layer: &LayerProps,
    view_center: Vec2,
    zoom: f64,
) -> IVec2 {
    let offset = parallax_offset(map, layer, view_center);
    IVec2::new(
        (offset.x as f64 * zoom).trunc() as i32,
        (offset.y as f64 * zoom).trunc() as i32,
    )
}
