//! Die Karten-Ansicht: gemeinsamer Zustand, Koordinaten-API und Rendering.
//!
//! `MapView` hält den gesamten orientierungsunabhängigen Zustand (Zoom,
//! View-Zentrum, Mode-Flags, Grid, Pinsel, aktueller Layer) und delegiert
//! die Geometrie an eine `Projection`. Erzeugt wird sie über `create_view`.
//!
//! Jede Änderung, die das Bild beeinflusst, wird als `Invalidation`
//! protokolliert; der Host holt sie mit `take_invalidation()` ab und
//! entscheidet selbst, wann er neu zeichnet.

pub mod brush;
pub mod compositor;
pub mod parallax;
pub mod projection;
pub mod resources;
pub mod state;
pub mod zoom;

use std::rc::Rc;
use std::sync::Arc;

use glam::{IVec2, Vec2};
use image::Rgba;
use tile_raster::{ClipRect, Polygon, Surface};

pub use brush::{Brush, BrushShape, CustomBrush, ShapeBrush};
pub use projection::{
    projection_for, HexProjection, IsoProjection, OrthoProjection, Projection, ScrollAxis,
    ShiftedProjection, TileRange, ViewContext,
};
pub use resources::ViewResources;
pub use state::{GridSettings, Invalidation, ModeFlags, ViewMode, ViewState};
pub use zoom::{ZoomState, ZOOM_LEVELS, ZOOM_NORMAL_SIZE};

use crate::core::{MapLayer, Orientation, TileMap};
use crate::shared::ViewOptions;

/// Breite des Rands um die Karte, wenn das Grid sichtbar ist.
const GRID_BORDER: i32 = 1;

/// Erstellt die passende Ansicht für die Orientierung der Karte.
///
/// Gibt `None` zurück, wenn die Orientierung unbekannt ist; der Aufrufer
/// muss das dem Benutzer melden.
pub fn create_view(map: Arc<TileMap>, resources: Arc<ViewResources>) -> Option<MapView> {
    create_view_with_options(map, resources, ViewOptions::default())
}

/// Wie `create_view`, mit expliziten Optionen.
pub fn create_view_with_options(
    map: Arc<TileMap>,
    resources: Arc<ViewResources>,
    options: ViewOptions,
) -> Option<MapView> {
    let Some(orientation) = map.orientation() else {
        log::warn!(
            "Keine Ansicht für Orientierung {}: unbekannter Code",
            map.orientation
        );
        return None;
    };
    log::info!(
        "Ansicht erstellt: {} ({}x{} Tiles à {}x{} px, {} Layer)",
        orientation,
        map.width,
        map.height,
        map.tile_width,
        map.tile_height,
        map.layers.len()
    );
    Some(MapView::new(map, projection_for(orientation), resources, options))
}

/// Ansicht einer Tile-Map mit austauschbarer Projektion.
#[derive(Debug)]
pub struct MapView {
    map: Arc<TileMap>,
    projection: Box<dyn Projection>,
    state: ViewState,
    brush: Option<Rc<dyn Brush>>,
    resources: Arc<ViewResources>,
    options: ViewOptions,
    invalidation: Invalidation,
}

impl MapView {
    /// Erstellt eine Ansicht mit einer bestimmten Projektion.
    pub fn new(
        map: Arc<TileMap>,
        projection: Box<dyn Projection>,
        resources: Arc<ViewResources>,
        options: ViewOptions,
    ) -> Self {
        Self {
            state: ViewState::from_options(&options),
            map,
            projection,
            brush: None,
            resources,
            options,
            invalidation: Invalidation::default(),
        }
    }

    // ── Zugriff ─────────────────────────────────────────────────────

    /// Die angezeigte Karte.
    pub fn map(&self) -> &Arc<TileMap> {
        &self.map
    }

    /// Die aktive Projektion.
    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }

    /// Orientierung der Projektion.
    pub fn orientation(&self) -> Orientation {
        self.projection.orientation()
    }

    /// Aktueller Zustand (Zoom, Zentrum, Modes, Grid, aktueller Layer).
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Optionen, mit denen die Ansicht erstellt wurde.
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Injizierte Ressourcen.
    pub fn resources(&self) -> &ViewResources {
        &self.resources
    }

    /// Kontext für Projektions-Aufrufe mit dem aktuellen Zustand.
    pub fn context(&self) -> ViewContext<'_> {
        ViewContext {
            map: &self.map,
            zoom: self.state.zoom.factor(),
            view_center: self.state.view_center,
            current_layer: self.current_layer(),
        }
    }

    /// Gibt die seit dem letzten Aufruf gesammelten Anforderungen zurück und setzt sie zurück.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.invalidation)
    }

    fn repaint(&mut self) {
        self.invalidation.request_repaint();
    }

    fn revalidate_and_repaint(&mut self) {
        self.invalidation.request_relayout();
        self.invalidation.request_repaint();
    }

    // ── Zoom ────────────────────────────────────────────────────────

    /// Aktueller Zoom-Faktor.
    pub fn zoom(&self) -> f64 {
        self.state.zoom.factor()
    }

    /// Aktuelle Zoom-Stufe.
    pub fn zoom_level(&self) -> usize {
        self.state.zoom.level()
    }

    /// Eine Stufe hineinzoomen. Gibt zurück, ob weiteres Hineinzoomen möglich ist.
    pub fn zoom_in(&mut self) -> bool {
        let stepped = self.state.zoom.can_zoom_in();
        let more = self.state.zoom.step_in();
        if stepped {
            self.apply_zoom_resize();
        }
        more
    }

    /// Eine Stufe herauszoomen. Gibt zurück, ob weiteres Herauszoomen möglich ist.
    pub fn zoom_out(&mut self) -> bool {
        let stepped = self.state.zoom.can_zoom_out();
        let more = self.state.zoom.step_out();
        if stepped {
            self.apply_zoom_resize();
        }
        more
    }

    /// Setzt die Zoom-Stufe; ungültige Indizes werden ignoriert.
    pub fn set_zoom_level(&mut self, level: usize) {
        if self.state.zoom.set_level(level) {
            self.apply_zoom_resize();
        }
    }

    /// Setzt einen freien Zoom-Faktor (unabhängig von der Tabelle); Werte `<= 0` werden ignoriert.
    pub fn set_zoom(&mut self, factor: f64) {
        if self.state.zoom.set_factor(factor) {
            self.apply_zoom_resize();
        }
    }

    fn apply_zoom_resize(&mut self) {
        let size = self.preferred_size();
        log::debug!("Zoom {} → Größe {}x{}", self.zoom(), size.x, size.y);
        self.invalidation.resize_to = Some(size);
        self.revalidate_and_repaint();
    }

    // ── View-Zentrum ────────────────────────────────────────────────

    /// View-Zentrum als Bruchteil der Karte.
    pub fn view_center(&self) -> Vec2 {
        self.state.view_center
    }

    /// Setzt das View-Zentrum (je Achse auf 0.0–1.0 begrenzt).
    ///
    /// Neu gezeichnet wird nur, wenn ein Layer Parallax nutzt.
    pub fn set_view_center(&mut self, x: f32, y: f32) {
        let center = Vec2::new(x, y).clamp(Vec2::ZERO, Vec2::ONE);
        if center == self.state.view_center {
            return;
        }
        self.state.view_center = center;
        if self.map.has_parallax_layers() {
            self.repaint();
        }
    }

    // ── Modes ───────────────────────────────────────────────────────

    /// Liest ein Mode-Flag.
    pub fn mode(&self, mode: ViewMode) -> bool {
        self.state.modes.get(mode)
    }

    /// Setzt ein Mode-Flag.
    pub fn set_mode(&mut self, mode: ViewMode, value: bool) {
        self.state.modes.set(mode, value);
        self.revalidate_and_repaint();
    }

    /// Kehrt ein Mode-Flag um.
    pub fn toggle_mode(&mut self, mode: ViewMode) {
        self.state.modes.toggle(mode);
        self.revalidate_and_repaint();
    }

    // ── Grid ────────────────────────────────────────────────────────

    /// Aktuelle Grid-Einstellungen.
    pub fn grid(&self) -> &GridSettings {
        &self.state.grid
    }

    /// Grid ein-/ausblenden (ändert auch die bevorzugte Größe).
    pub fn set_show_grid(&mut self, visible: bool) {
        self.state.grid.visible = visible;
        self.revalidate_and_repaint();
    }

    /// Setzt die Grid-Farbe (auch für Koordinaten).
    pub fn set_grid_color(&mut self, color: Rgba<u8>) {
        self.state.grid.color = color;
        self.repaint();
    }

    /// Setzt die Grid-Deckkraft (0–255).
    pub fn set_grid_opacity(&mut self, opacity: u8) {
        self.state.grid.opacity = opacity;
        self.repaint();
    }

    /// Schaltet die Kantenglättung des Grids.
    pub fn set_grid_antialias(&mut self, antialias: bool) {
        self.state.grid.antialias = antialias;
        self.repaint();
    }

    // ── Pinsel & aktueller Layer ────────────────────────────────────

    /// Aktueller Pinsel.
    pub fn brush(&self) -> Option<&Rc<dyn Brush>> {
        self.brush.as_ref()
    }

    /// Setzt den Pinsel, dessen Vorschau gezeichnet wird.
    pub fn set_brush(&mut self, brush: Option<Rc<dyn Brush>>) {
        self.brush = brush;
        self.repaint();
    }

    /// Index des aktuellen Layers.
    pub fn current_layer_index(&self) -> Option<usize> {
        self.state.current_layer
    }

    /// Aktueller Layer.
    pub fn current_layer(&self) -> Option<&MapLayer> {
        self.state.current_layer.and_then(|index| self.map.layer(index))
    }

    /// Setzt den aktuellen Layer (Index in `TileMap::layers`).
    ///
    /// Grid und Koordinaten richten sich nach diesem Layer; nur wenn eines
    /// davon sichtbar ist, wird neu gezeichnet.
    pub fn set_current_layer(&mut self, layer: Option<usize>) {
        if layer == self.state.current_layer {
            return;
        }
        if let Some(index) = layer {
            if self.map.layer(index).is_none() {
                log::warn!(
                    "Layer-Index {} außerhalb der Karte ({} Layer), ignoriert",
                    index,
                    self.map.layers.len()
                );
                return;
            }
        }
        self.state.current_layer = layer;
        if self.state.grid.visible || self.state.modes.show_coordinates {
            self.repaint();
        }
    }

    /// Meldet, dass sich ein Bereich eines Layers geändert hat (Tile-Koordinaten).
    pub fn repaint_region(&mut self, layer: usize, region: TileRange) {
        log::trace!("Repaint Layer {} Bereich {:?}", layer, region);
        self.repaint();
    }

    // ── Koordinaten ─────────────────────────────────────────────────

    /// Tile unter einem Screen-Punkt, bezogen auf einen Layer (oder die Karte).
    pub fn screen_to_tile_coords(&self, layer: Option<&MapLayer>, x: i32, y: i32) -> IVec2 {
        let ctx = self.context();
        self.projection
            .screen_to_tile(&ctx, layer.map(|l| &l.props), IVec2::new(x, y))
    }

    /// Map-Pixel unter einem Screen-Punkt (nur Zoom entfernt, keine Projektion).
    pub fn screen_to_pixel_coords(&self, x: i32, y: i32) -> IVec2 {
        let zoom = self.zoom();
        IVec2::new(
            (x as f64 / zoom).floor() as i32,
            (y as f64 / zoom).floor() as i32,
        )
    }

    /// Screen-Anker eines Tiles mit explizitem Parallax-Versatz und Tile-Größe.
    pub fn tile_to_screen_coords(&self, offset: IVec2, tile_size: IVec2, tx: i32, ty: i32) -> IVec2 {
        let ctx = self.context();
        self.projection.tile_to_screen(&ctx, offset, tile_size, tx, ty)
    }

    /// Screen-Anker eines Tiles auf einem Layer (oder der Karte).
    pub fn layer_tile_to_screen_coords(&self, layer: Option<&MapLayer>, tx: i32, ty: i32) -> IVec2 {
        let ctx = self.context();
        let props = layer
            .map(|l| l.props)
            .unwrap_or_else(|| self.map.full_layer_props());
        let tile_size = ctx.zoomed_tile_size(&props);
        let offset = ctx.layer_offset(&props);
        self.projection.tile_to_screen(&ctx, offset, tile_size, tx, ty)
    }

    /// Zellumriss eines Tiles im Raster des aktuellen Layers (oder der Karte).
    pub fn tile_polygon(&self, tx: i32, ty: i32, border: i32) -> Polygon {
        let ctx = self.context();
        let props = ctx.grid_props();
        let tile_size = ctx.zoomed_tile_size(&props);
        let offset = ctx.layer_offset(&props);
        let anchor = self.projection.tile_to_screen(&ctx, offset, tile_size, tx, ty);
        self.projection.grid_polygon(tile_size, anchor, border)
    }

    // ── Layout & Scrollen ───────────────────────────────────────────

    /// Inhaltsgröße in Screen-Pixeln beim aktuellen Zoom, plus Rand bei sichtbarem Grid.
    pub fn preferred_size(&self) -> IVec2 {
        let border = if self.state.grid.visible { GRID_BORDER } else { 0 };
        self.projection.preferred_size(&self.context()) + IVec2::splat(border)
    }

    /// Scroll-Schritt für eine Zeile/Spalte.
    pub fn scroll_unit_increment(&self, axis: ScrollAxis) -> i32 {
        self.projection.scroll_unit_increment(&self.context(), axis)
    }

    /// Scroll-Schritt für eine Seite: sichtbare Ausdehnung minus ein Zeilenschritt.
    pub fn scroll_block_increment(&self, visible: ClipRect, axis: ScrollAxis) -> i32 {
        let unit = self.scroll_unit_increment(axis);
        let extent = match axis {
            ScrollAxis::Horizontal => visible.width,
            ScrollAxis::Vertical => visible.height,
        };
        (extent - unit).max(unit)
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Zeichnet einen Frame in den aktuellen Clip der Fläche.
    pub fn render(&self, surface: &mut Surface) {
        compositor::render(self, surface);
    }

    /// Zeichnet nur den angegebenen Bereich neu.
    pub fn render_region(&self, surface: &mut Surface, region: ClipRect) {
        let previous = surface.clip();
        surface.set_clip(region);
        compositor::render(self, surface);
        surface.set_clip(previous);
    }
}
