//! Datenmodell der Karte: Layer, Tiles, Tilesets, Orientierung.
//!
//! Aus Sicht der Ansicht ist das Modell reine Lese-Eingabe; die Ansicht
//! hält nur eine geteilte Referenz (`Arc<TileMap>`) und verändert nichts.

pub mod layer;
pub mod map;
pub mod orientation;
pub mod tile;

pub use layer::{
    LayerContent, LayerProps, MapLayer, MapObject, ObjectGroup, SelectionArea, TileGrid,
};
pub use map::TileMap;
pub use orientation::Orientation;
pub use tile::{Tile, TileRef, Tileset};
