//! Tile-Map-View.
//!
//! Rendert die Beispielkarte in einer Orientierung und speichert das Bild als PNG.
//!
//! Aufruf: `tile-map-view [orientierung] [ausgabe.png]`

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::IVec2;
use image::Rgba;
use tile_map_view::{
    create_view_with_options, demo, BrushShape, Orientation, ShapeBrush, Surface, ViewMode,
    ViewOptions, ViewResources,
};

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Tile-Map-View v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let orientation: Orientation = match args.next() {
        Some(arg) => arg.parse()?,
        None => Orientation::Orthogonal,
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("tile_map_{}.png", orientation)));

    // Optionen aus TOML laden (oder Standardwerte)
    let options = ViewOptions::load_from_file(&ViewOptions::config_path());

    // Ressourcen einmalig beim Start laden und an die Ansicht übergeben
    let resources = match &options.property_flag_icon {
        Some(path) => ViewResources::load(path),
        None => ViewResources::builtin(),
    };

    let map = Arc::new(demo::demo_map(orientation));
    let mut view = create_view_with_options(map, Arc::new(resources), options)
        .with_context(|| format!("Keine Ansicht für Orientierung {}", orientation))?;

    view.set_current_layer(Some(0));
    view.set_show_grid(true);
    view.set_mode(ViewMode::Coordinates, true);
    view.set_mode(ViewMode::PropertyFlags, true);
    view.set_view_center(0.5, 0.5);

    let brush = ShapeBrush::new(BrushShape::Circle, 3).with_color(Rgba([255, 230, 90, 255]));
    brush.set_position(IVec2::new(3, 6));
    view.set_brush(Some(Rc::new(brush)));

    let invalidation = view.take_invalidation();
    log::debug!("Ausstehende Aktualisierungen: {:?}", invalidation);

    let size = view.preferred_size().max(IVec2::ONE);
    let mut surface = Surface::new(size.x as u32, size.y as u32);
    view.render(&mut surface);

    surface
        .save_png(&output)
        .with_context(|| format!("Frame konnte nicht exportiert werden: {}", output.display()))?;

    log::info!(
        "{} ({}x{} px) gespeichert: {}",
        orientation,
        size.x,
        size.y,
        output.display()
    );
    Ok(())
}
