//! `tile_raster` — Software-Rasterizer für die Tile-Map-Ansicht.
//!
//! Stellt eine Zeichenfläche (`Surface`) auf Basis von `image::RgbaImage` bereit:
//! - Clip-Rechteck (nur sichtbar schneidende Pixel werden berührt)
//! - Composite-Modi `SrcOver` und `SrcAtop(alpha)`
//! - Linien (mit/ohne Kantenglättung), Polygone, skalierte Bild-Blits
//! - Eingebetteter Bitmap-Font für Koordinaten-Labels
//!
//! # Beispiel
//! ```no_run
//! use tile_raster::{ClipRect, Composite, Surface};
//!
//! let mut surface = Surface::new(64, 64);
//! surface.set_color(image::Rgba([64, 64, 64, 255]));
//! surface.fill_rect(0, 0, 64, 64);
//! surface.set_clip(ClipRect::new(0, 0, 32, 32));
//! surface.set_composite(Composite::SrcAtop(0.5));
//! surface.set_color(image::Rgba([255, 255, 255, 255]));
//! surface.fill_rect(0, 0, 64, 64);
//! surface.save_png("frame.png")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod blend;
pub mod polygon;
pub mod surface;
pub mod text;

pub use blend::Composite;
pub use polygon::Polygon;
pub use surface::{ClipRect, Surface};
