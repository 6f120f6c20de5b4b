//! Tiles und Tilesets (read-only aus Sicht der Ansicht).

use image::RgbaImage;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Geteilte Referenz auf ein Tile.
pub type TileRef = Arc<Tile>;

/// Ein einzelnes Tile mit optionalem Bild und Eigenschaften.
#[derive(Debug, Clone, Default)]
pub struct Tile {
    /// Tile-ID innerhalb des Tilesets
    pub id: u32,
    /// Bilddaten (ohne Bild wird das Tile nicht gezeichnet)
    pub image: Option<Arc<RgbaImage>>,
    /// Benutzerdefinierte Eigenschaften (Schlüssel → Wert)
    pub properties: BTreeMap<String, String>,
}

impl Tile {
    /// Erstellt ein Tile mit Bild.
    pub fn new(id: u32, image: RgbaImage) -> Self {
        Self {
            id,
            image: Some(Arc::new(image)),
            properties: BTreeMap::new(),
        }
    }

    /// Erstellt ein einfarbiges Tile der angegebenen Größe.
    pub fn solid(id: u32, width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::new(id, RgbaImage::from_pixel(width, height, image::Rgba(color)))
    }

    /// Fügt eine Eigenschaft hinzu (Builder-Stil).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Hat das Tile mindestens eine Eigenschaft?
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Bildgröße in Pixeln (0×0 ohne Bild).
    pub fn image_size(&self) -> (u32, u32) {
        self.image
            .as_ref()
            .map(|img| img.dimensions())
            .unwrap_or((0, 0))
    }
}

/// Sammlung von Tiles mit gemeinsamer Basisgröße.
#[derive(Debug, Clone, Default)]
pub struct Tileset {
    /// Anzeigename
    pub name: String,
    /// Tiles in ID-Reihenfolge
    pub tiles: Vec<TileRef>,
}

impl Tileset {
    /// Erstellt ein leeres Tileset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tiles: Vec::new(),
        }
    }

    /// Fügt ein Tile hinzu und gibt die geteilte Referenz zurück.
    pub fn add(&mut self, tile: Tile) -> TileRef {
        let tile = Arc::new(tile);
        self.tiles.push(Arc::clone(&tile));
        tile
    }

    /// Sucht ein Tile per ID.
    pub fn get(&self, id: u32) -> Option<&TileRef> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Größte Bildhöhe aller Tiles (für Überhang beim Clipping).
    pub fn max_image_height(&self) -> u32 {
        self.tiles
            .iter()
            .map(|t| t.image_size().1)
            .max()
            .unwrap_or(0)
    }
}
