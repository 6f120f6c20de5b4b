//! Beispielkarte für Binary, Benchmarks und Tests.
//!
//! Enthält alle Layer-Arten: Tile-Layer mit Properties, einen kleineren
//! Parallax-Layer, eine Objekt-Gruppe, einen nicht zeichenbaren Layer und
//! eine Selektion als Spezial-Layer.

use glam::IVec2;
use image::{Rgba, RgbaImage};

use crate::core::{
    LayerContent, LayerProps, MapLayer, MapObject, ObjectGroup, Orientation, Tile, TileMap,
    Tileset,
};

/// Breite der Beispielkarte in Tiles.
pub const DEMO_WIDTH: u32 = 12;
/// Höhe der Beispielkarte in Tiles.
pub const DEMO_HEIGHT: u32 = 10;

const GRASS: [u8; 4] = [76, 153, 58, 255];
const WATER: [u8; 4] = [52, 101, 164, 255];
const SAND: [u8; 4] = [222, 200, 140, 255];
const ROCK: [u8; 4] = [120, 110, 100, 255];

/// Übliche Tile-Größe einer Orientierung.
pub fn demo_tile_size(orientation: Orientation) -> (u32, u32) {
    match orientation {
        Orientation::Orthogonal | Orientation::Shifted => (32, 32),
        Orientation::Isometric => (64, 32),
        Orientation::Hexagonal => (32, 32),
    }
}

/// Erstellt ein einfarbiges Tile-Bild in der Zellform der Orientierung.
pub fn demo_tile_image(orientation: Orientation, width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    let (w, h) = (width as f32, height as f32);
    RgbaImage::from_fn(width, height, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let inside = match orientation {
            Orientation::Orthogonal | Orientation::Shifted => true,
            Orientation::Isometric => {
                (px - w / 2.0).abs() / (w / 2.0) + (py - h / 2.0).abs() / (h / 2.0) <= 1.0
            }
            Orientation::Hexagonal => {
                let quarter = w / 4.0;
                let dx = if px < quarter {
                    quarter - px
                } else if px > w - quarter {
                    px - (w - quarter)
                } else {
                    0.0
                };
                (py - h / 2.0).abs() <= h / 2.0 * (1.0 - dx / quarter)
            }
        };
        if inside { Rgba(color) } else { Rgba([0, 0, 0, 0]) }
    })
}

/// Baut die Beispielkarte für eine Orientierung.
pub fn demo_map(orientation: Orientation) -> TileMap {
    let (tw, th) = demo_tile_size(orientation);
    let mut map = TileMap::new(DEMO_WIDTH, DEMO_HEIGHT, tw, th, orientation);

    let mut tileset = Tileset::new("gelände");
    let image = |color| demo_tile_image(orientation, tw, th, color);
    let grass = tileset.add(Tile::new(1, image(GRASS)));
    let water = tileset.add(Tile::new(2, image(WATER)).with_property("typ", "wasser"));
    let sand = tileset.add(Tile::new(3, image(SAND)));
    let rock = tileset.add(Tile::new(4, image(ROCK)).with_property("begehbar", "nein"));

    let mut ground = MapLayer::tiles("Boden", map.full_layer_props());
    if let Some(grid) = ground.tile_grid_mut() {
        grid.fill(&grass);
        for y in 0..DEMO_HEIGHT as i32 {
            for x in 0..DEMO_WIDTH as i32 {
                let tile = match (x + 2 * y) % 7 {
                    0 => Some(water.clone()),
                    3 => Some(sand.clone()),
                    _ => None,
                };
                if tile.is_some() {
                    grid.set_tile(x, y, tile);
                }
            }
        }
    }
    map.add_layer(ground);

    let mut parallax_props = LayerProps::new(DEMO_WIDTH / 2, DEMO_HEIGHT / 2, tw, th);
    parallax_props.parallax = true;
    let mut clouds = MapLayer::tiles("Felsen (Parallax)", parallax_props);
    clouds.set_opacity(0.6);
    if let Some(grid) = clouds.tile_grid_mut() {
        for i in 0..(DEMO_WIDTH / 2).min(DEMO_HEIGHT / 2) as i32 {
            grid.set_tile(i, i, Some(rock.clone()));
        }
    }
    map.add_layer(clouds);

    let objects = ObjectGroup {
        objects: vec![
            MapObject {
                name: "Haus".into(),
                position: IVec2::new(2 * th as i32, 2 * th as i32),
                size: IVec2::new(3 * th as i32, 2 * th as i32),
            },
            MapObject {
                name: "Startpunkt".into(),
                position: IVec2::new(6 * th as i32, 5 * th as i32),
                size: IVec2::ZERO,
            },
        ],
        ..ObjectGroup::default()
    };
    map.add_layer(MapLayer::objects("Objekte", map.full_layer_props(), objects));

    map.add_layer(MapLayer {
        name: "Hintergrundbild".into(),
        props: map.full_layer_props(),
        content: LayerContent::Unsupported {
            kind: "image".into(),
        },
    });

    let mut selection = MapLayer::selection("Auswahl", map.full_layer_props());
    if let Some(area) = selection.selection_mut() {
        area.select_rect(7, 1, 3, 2);
    }
    map.add_special_layer(selection);

    map.tilesets.push(tileset);
    map
}
