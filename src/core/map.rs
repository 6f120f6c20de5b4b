//! Die Tile-Map: Layer-Stapel, Tile-Größe, Orientierung.

use super::layer::{LayerProps, MapLayer};
use super::orientation::Orientation;
use super::tile::Tileset;

/// Mehrschichtige Tile-Map.
///
/// Die Reihenfolge der Layer ist die Zeichenreihenfolge (hinten nach vorne).
/// Spezial-Layer (z.B. Selektion) werden in einem separaten Durchgang
/// nach allen regulären Layern gezeichnet.
#[derive(Debug, Clone)]
pub struct TileMap {
    /// Breite in Tiles
    pub width: u32,
    /// Höhe in Tiles
    pub height: u32,
    /// Tile-Breite in Pixeln
    pub tile_width: u32,
    /// Tile-Höhe in Pixeln
    pub tile_height: u32,
    /// Roh-Orientierungs-Code (siehe `Orientation::from_code`)
    pub orientation: i32,
    /// Reguläre Layer in Zeichenreihenfolge
    pub layers: Vec<MapLayer>,
    /// Spezial-Layer (eigener Durchgang)
    pub special_layers: Vec<MapLayer>,
    /// Tilesets der Karte
    pub tilesets: Vec<Tileset>,
}

impl TileMap {
    /// Erstellt eine leere Karte mit bekannter Orientierung.
    pub fn new(
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
        orientation: Orientation,
    ) -> Self {
        Self::with_orientation_code(width, height, tile_width, tile_height, orientation.code())
    }

    /// Erstellt eine leere Karte mit beliebigem Roh-Orientierungs-Code.
    pub fn with_orientation_code(
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
        orientation: i32,
    ) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
            orientation,
            layers: Vec::new(),
            special_layers: Vec::new(),
            tilesets: Vec::new(),
        }
    }

    /// Aufgelöste Orientierung (`None` bei unbekanntem Code).
    pub fn orientation(&self) -> Option<Orientation> {
        Orientation::from_code(self.orientation)
    }

    /// Layer-Eigenschaften in Kartengröße (Ausgangspunkt für neue Layer).
    pub fn full_layer_props(&self) -> LayerProps {
        LayerProps::new(self.width, self.height, self.tile_width, self.tile_height)
    }

    /// Kartenbreite in Pixeln.
    pub fn pixel_width(&self) -> i64 {
        self.width as i64 * self.tile_width as i64
    }

    /// Kartenhöhe in Pixeln.
    pub fn pixel_height(&self) -> i64 {
        self.height as i64 * self.tile_height as i64
    }

    /// Fügt einen regulären Layer oben auf den Stapel und gibt seinen Index zurück.
    pub fn add_layer(&mut self, layer: MapLayer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    /// Fügt einen Spezial-Layer hinzu.
    pub fn add_special_layer(&mut self, layer: MapLayer) -> usize {
        self.special_layers.push(layer);
        self.special_layers.len() - 1
    }

    /// Regulärer Layer per Index.
    pub fn layer(&self, index: usize) -> Option<&MapLayer> {
        self.layers.get(index)
    }

    /// Hat mindestens ein Layer (regulär oder speziell) Parallax aktiviert?
    pub fn has_parallax_layers(&self) -> bool {
        self.layers
            .iter()
            .chain(self.special_layers.iter())
            .any(MapLayer::uses_parallax)
    }

    /// Größte Tile-Bildhöhe aller Tilesets in Pixeln.
    pub fn max_tile_image_height(&self) -> u32 {
        self.tilesets
            .iter()
            .map(Tileset::max_image_height)
            .max()
            .unwrap_or(0)
    }
}
