//! Tile-Map-View Library.
//! Ansicht für mehrschichtige Tile-Maps in orthogonaler, isometrischer,
//! hexagonaler und verschobener Projektion, als Library für Editoren und Tests.

pub mod core;
pub mod demo;
pub mod shared;
pub mod view;

pub use core::{
    LayerContent, LayerProps, MapLayer, MapObject, ObjectGroup, Orientation, SelectionArea, Tile,
    TileGrid, TileMap, TileRef, Tileset,
};
pub use shared::ViewOptions;
pub use view::{
    create_view, create_view_with_options, Brush, BrushShape, CustomBrush, GridSettings,
    Invalidation, MapView, ModeFlags, Projection, ScrollAxis, ShapeBrush, TileRange, ViewContext,
    ViewMode, ViewResources, ViewState,
};

pub use tile_raster::{ClipRect, Composite, Polygon, Surface};
