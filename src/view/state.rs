//! Mode-Flags, Grid-Einstellungen und Invalidierungs-Protokoll der Ansicht.

use glam::Vec2;
use image::Rgba;

use super::zoom::ZoomState;
use crate::shared::ViewOptions;

/// Benannte Mode-Flags der Ansicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Grenzmodus für Editier-Werkzeuge
    BoundaryMode,
    /// Koordinaten-Labels auf jedem Tile
    Coordinates,
    /// Spezial-Layer und Pinsel-Vorschau unterdrücken
    NoSpecialLayers,
    /// Property-Flags auf Tiles des aktuellen Layers
    PropertyFlags,
}

/// Zustand aller Mode-Flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeFlags {
    /// Grenzmodus (von Werkzeugen ausgewertet, kein eigener Zeicheneffekt)
    pub boundary_mode: bool,
    /// Koordinaten-Labels anzeigen
    pub show_coordinates: bool,
    /// Spezial-Layer unterdrücken
    pub no_special_layers: bool,
    /// Property-Flags anzeigen
    pub show_property_flags: bool,
}

impl ModeFlags {
    /// Liest ein Flag.
    pub fn get(&self, mode: ViewMode) -> bool {
        match mode {
            ViewMode::BoundaryMode => self.boundary_mode,
            ViewMode::Coordinates => self.show_coordinates,
            ViewMode::NoSpecialLayers => self.no_special_layers,
            ViewMode::PropertyFlags => self.show_property_flags,
        }
    }

    /// Setzt ein Flag.
    pub fn set(&mut self, mode: ViewMode, value: bool) {
        let flag = match mode {
            ViewMode::BoundaryMode => &mut self.boundary_mode,
            ViewMode::Coordinates => &mut self.show_coordinates,
            ViewMode::NoSpecialLayers => &mut self.no_special_layers,
            ViewMode::PropertyFlags => &mut self.show_property_flags,
        };
        *flag = value;
    }

    /// Kehrt ein Flag um.
    pub fn toggle(&mut self, mode: ViewMode) {
        self.set(mode, !self.get(mode));
    }
}

/// Darstellung des Grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Grid sichtbar
    pub visible: bool,
    /// Kantenglättung
    pub antialias: bool,
    /// Farbe (auch für Koordinaten-Labels)
    pub color: Rgba<u8>,
    /// Deckkraft 0–255 (linear)
    pub opacity: u8,
}

impl GridSettings {
    /// Übernimmt die Grid-Werte aus den Optionen.
    pub fn from_options(options: &ViewOptions) -> Self {
        Self {
            visible: options.show_grid,
            antialias: options.grid_antialias,
            color: Rgba(options.grid_color),
            opacity: options.grid_opacity,
        }
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self::from_options(&ViewOptions::default())
    }
}

/// Gesammelte Neuzeichnen-/Layout-Anforderungen an den Host.
///
/// Der Host holt sie mit `MapView::take_invalidation()` ab und darf sie
/// zusammenfassen oder verzögern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidation {
    /// Layout (bevorzugte Größe) muss neu berechnet werden
    pub relayout: bool,
    /// Anzahl der Neuzeichnen-Anforderungen seit dem letzten Abholen
    pub repaint_requests: u32,
    /// Neue Größe, auf die die Ansicht gesetzt werden soll
    pub resize_to: Option<glam::IVec2>,
}

impl Invalidation {
    /// Wurde mindestens ein Neuzeichnen angefordert?
    pub fn needs_repaint(&self) -> bool {
        self.repaint_requests > 0
    }

    /// Gibt `true` zurück, wenn nichts angefordert wurde.
    pub fn is_clean(&self) -> bool {
        *self == Invalidation::default()
    }

    pub(crate) fn request_repaint(&mut self) {
        self.repaint_requests = self.repaint_requests.saturating_add(1);
    }

    pub(crate) fn request_relayout(&mut self) {
        self.relayout = true;
    }
}

/// Veränderlicher Zustand einer Ansicht.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Zoom-Stufe und -Faktor
    pub zoom: ZoomState,
    /// View-Zentrum als Bruchteil der Karte, je Achse 0.0–1.0
    pub view_center: Vec2,
    /// Mode-Flags
    pub modes: ModeFlags,
    /// Grid-Darstellung
    pub grid: GridSettings,
    /// Index des aktuellen Layers in `TileMap::layers`
    pub current_layer: Option<usize>,
}

impl ViewState {
    /// Startzustand aus den Optionen (ungültige Zoom-Stufe fällt auf 1.0 zurück).
    pub fn from_options(options: &ViewOptions) -> Self {
        let mut zoom = ZoomState::new();
        if !zoom.set_level(options.initial_zoom_level) {
            log::warn!(
                "Ungültige Zoom-Stufe {} in den Optionen, verwende {}",
                options.initial_zoom_level,
                zoom.level()
            );
        }
        Self {
            zoom,
            view_center: Vec2::ZERO,
            modes: ModeFlags::default(),
            grid: GridSettings::from_options(options),
            current_layer: None,
        }
    }
}
