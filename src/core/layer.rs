//! Layer-Typen: Tile-Layer, Objekt-Gruppen, Selektion und verschachtelte Gruppen.

use glam::IVec2;
use image::Rgba;

use super::tile::TileRef;

/// Gemeinsame Eigenschaften aller Layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerProps {
    /// Breite in Tiles (darf von der Karte abweichen)
    pub width: u32,
    /// Höhe in Tiles
    pub height: u32,
    /// Tile-Breite in Pixeln (darf von der Karte abweichen)
    pub tile_width: u32,
    /// Tile-Höhe in Pixeln
    pub tile_height: u32,
    /// Deckkraft 0.0–1.0
    pub opacity: f32,
    /// Sichtbarkeit
    pub visible: bool,
    /// Parallax-Verschiebung relativ zum View-Zentrum aktiv
    pub parallax: bool,
}

impl LayerProps {
    /// Erstellt sichtbare, deckende Eigenschaften ohne Parallax.
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
            opacity: 1.0,
            visible: true,
            parallax: false,
        }
    }

    /// Layer-Breite in Pixeln.
    pub fn pixel_width(&self) -> i64 {
        self.width as i64 * self.tile_width as i64
    }

    /// Layer-Höhe in Pixeln.
    pub fn pixel_height(&self) -> i64 {
        self.height as i64 * self.tile_height as i64
    }

    /// Prüft ob eine Tile-Koordinate innerhalb des Layers liegt.
    pub fn contains(&self, tx: i32, ty: i32) -> bool {
        tx >= 0 && ty >= 0 && (tx as u32) < self.width && (ty as u32) < self.height
    }
}

/// Tile-Raster eines Tile-Layers (zeilenweise, `None` = leer).
#[derive(Debug, Clone, Default)]
pub struct TileGrid {
    width: u32,
    height: u32,
    cells: Vec<Option<TileRef>>,
}

impl TileGrid {
    /// Erstellt ein leeres Raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Breite in Tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Höhe in Tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 || tx as u32 >= self.width || ty as u32 >= self.height {
            return None;
        }
        Some(ty as usize * self.width as usize + tx as usize)
    }

    /// Tile an einer Position (außerhalb oder leer: `None`).
    pub fn tile_at(&self, tx: i32, ty: i32) -> Option<&TileRef> {
        self.index(tx, ty).and_then(|i| self.cells[i].as_ref())
    }

    /// Setzt ein Tile; Positionen außerhalb werden ignoriert.
    pub fn set_tile(&mut self, tx: i32, ty: i32, tile: Option<TileRef>) {
        if let Some(i) = self.index(tx, ty) {
            self.cells[i] = tile;
        }
    }

    /// Höhe des höchsten Tile-Bildes im Raster (0 ohne Bilder).
    pub fn max_image_height(&self) -> u32 {
        self.cells
            .iter()
            .flatten()
            .map(|tile| tile.image_size().1)
            .max()
            .unwrap_or(0)
    }

    /// Füllt das komplette Raster mit einem Tile.
    pub fn fill(&mut self, tile: &TileRef) {
        for cell in &mut self.cells {
            *cell = Some(tile.clone());
        }
    }
}

/// Objekt mit Pixel-Bounds in Kartenkoordinaten.
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    /// Anzeigename
    pub name: String,
    /// Position (obere linke Ecke) in Karten-Pixeln
    pub position: IVec2,
    /// Ausdehnung in Karten-Pixeln (0×0 = Punkt-Objekt)
    pub size: IVec2,
}

/// Gruppe frei platzierter Objekte.
#[derive(Debug, Clone)]
pub struct ObjectGroup {
    /// Objekte in Zeichenreihenfolge
    pub objects: Vec<MapObject>,
    /// Zeichenfarbe der Umrisse
    pub color: Rgba<u8>,
}

impl Default for ObjectGroup {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            color: Rgba([160, 160, 164, 255]),
        }
    }
}

/// Selektions-Maske mit Hervorhebungsfarbe.
#[derive(Debug, Clone)]
pub struct SelectionArea {
    width: u32,
    height: u32,
    selected: Vec<bool>,
    /// Hervorhebungsfarbe (wird mit fester Alpha geblendet)
    pub highlight: Rgba<u8>,
}

impl SelectionArea {
    /// Standard-Hervorhebungsfarbe (Blau).
    pub const DEFAULT_HIGHLIGHT: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// Erstellt eine leere Selektion.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            selected: vec![false; width as usize * height as usize],
            highlight: Self::DEFAULT_HIGHLIGHT,
        }
    }

    /// Ist die Zelle selektiert?
    pub fn is_selected(&self, tx: i32, ty: i32) -> bool {
        if tx < 0 || ty < 0 || tx as u32 >= self.width || ty as u32 >= self.height {
            return false;
        }
        self.selected[ty as usize * self.width as usize + tx as usize]
    }

    /// Selektiert ein Rechteck in Tile-Koordinaten (außerhalb wird beschnitten).
    pub fn select_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        for ty in y.max(0)..(y + height).min(self.height as i32) {
            for tx in x.max(0)..(x + width).min(self.width as i32) {
                self.selected[ty as usize * self.width as usize + tx as usize] = true;
            }
        }
    }

    /// Hebt die komplette Selektion auf.
    pub fn clear(&mut self) {
        self.selected.iter_mut().for_each(|s| *s = false);
    }
}

/// Inhalt eines Layers (konkreter Layer-Typ).
#[derive(Debug, Clone)]
pub enum LayerContent {
    /// Tile-Layer
    Tiles(TileGrid),
    /// Objekt-Gruppe
    Objects(ObjectGroup),
    /// Selektions-Layer (Spezial-Layer)
    Selection(SelectionArea),
    /// Verschachtelte Unterkarte; ihre Deckkraft vererbt sich auf die Kinder
    Group(Vec<MapLayer>),
    /// Layer-Typ, den die Ansicht nicht zeichnen kann
    Unsupported {
        /// Typbezeichnung aus dem Datenmodell
        kind: String,
    },
}

impl LayerContent {
    /// Kurzbezeichnung des Typs (für Logs).
    pub fn kind_name(&self) -> &str {
        match self {
            LayerContent::Tiles(_) => "tiles",
            LayerContent::Objects(_) => "objects",
            LayerContent::Selection(_) => "selection",
            LayerContent::Group(_) => "group",
            LayerContent::Unsupported { kind } => kind,
        }
    }
}

/// Ein Layer der Karte.
#[derive(Debug, Clone)]
pub struct MapLayer {
    /// Anzeigename
    pub name: String,
    /// Gemeinsame Eigenschaften
    pub props: LayerProps,
    /// Konkreter Inhalt
    pub content: LayerContent,
}

impl MapLayer {
    /// Erstellt einen Tile-Layer mit leerem Raster.
    pub fn tiles(name: impl Into<String>, props: LayerProps) -> Self {
        let grid = TileGrid::new(props.width, props.height);
        Self {
            name: name.into(),
            props,
            content: LayerContent::Tiles(grid),
        }
    }

    /// Erstellt eine Objekt-Gruppe.
    pub fn objects(name: impl Into<String>, props: LayerProps, group: ObjectGroup) -> Self {
        Self {
            name: name.into(),
            props,
            content: LayerContent::Objects(group),
        }
    }

    /// Erstellt einen Selektions-Layer.
    pub fn selection(name: impl Into<String>, props: LayerProps) -> Self {
        let area = SelectionArea::new(props.width, props.height);
        Self {
            name: name.into(),
            props,
            content: LayerContent::Selection(area),
        }
    }

    /// Erstellt eine Gruppe aus Kind-Layern.
    pub fn group(name: impl Into<String>, props: LayerProps, children: Vec<MapLayer>) -> Self {
        Self {
            name: name.into(),
            props,
            content: LayerContent::Group(children),
        }
    }

    /// Setzt die Deckkraft (auf 0.0–1.0 begrenzt).
    pub fn set_opacity(&mut self, opacity: f32) {
        self.props.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Veränderbares Tile-Raster, falls Tile-Layer.
    pub fn tile_grid_mut(&mut self) -> Option<&mut TileGrid> {
        match &mut self.content {
            LayerContent::Tiles(grid) => Some(grid),
            _ => None,
        }
    }

    /// Selektions-Maske, falls Selektions-Layer.
    pub fn selection_mut(&mut self) -> Option<&mut SelectionArea> {
        match &mut self.content {
            LayerContent::Selection(area) => Some(area),
            _ => None,
        }
    }

    /// Hat dieser Layer (oder ein Kind) Parallax aktiviert?
    pub fn uses_parallax(&self) -> bool {
        self.props.parallax
            || matches!(&self.content, LayerContent::Group(children) if children.iter().any(MapLayer::uses_parallax))
    }
}
