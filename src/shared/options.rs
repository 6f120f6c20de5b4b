//! Zentrale Konfiguration der Kartenansicht.
//!
//! `ViewOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Dateiname der Optionen neben der Binary.
pub const OPTIONS_FILE_NAME: &str = "tile_map_view.toml";

// ── Hintergrund ─────────────────────────────────────────────────────

/// Standard-Hintergrundfarbe (RGBA: Dunkelgrau).
pub const DEFAULT_BACKGROUND_COLOR: [u8; 4] = [64, 64, 64, 255];

// ── Grid ────────────────────────────────────────────────────────────

/// Standard-Grid-Farbe (RGBA: Schwarz), auch für Koordinaten-Labels.
pub const DEFAULT_GRID_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Standard-Grid-Deckkraft (0–255, 255 = deckend).
pub const DEFAULT_GRID_OPACITY: u8 = 255;

// ── Spezial-Layer ───────────────────────────────────────────────────

/// Feste Alpha für Selektions-Hervorhebungen.
pub const SELECTION_HIGHLIGHT_ALPHA: f32 = 0.3;

/// Alle zur Laufzeit änderbaren Optionen der Ansicht.
/// Wird als [`OPTIONS_FILE_NAME`] neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewOptions {
    /// Hintergrundfarbe (RGBA)
    pub background_color: [u8; 4],
    /// Grid beim Start anzeigen
    pub show_grid: bool,
    /// Grid-Farbe (RGBA)
    pub grid_color: [u8; 4],
    /// Grid-Deckkraft (0–255)
    pub grid_opacity: u8,
    /// Grid mit Kantenglättung zeichnen
    pub grid_antialias: bool,
    /// Zoom-Stufe beim Start (Index in die Zoom-Tabelle)
    #[serde(default = "default_zoom_level")]
    pub initial_zoom_level: usize,
    /// Nicht zeichenbare Layer-Typen als Warnung melden statt still zu überspringen
    #[serde(default = "default_strict_layer_types")]
    pub strict_layer_types: bool,
    /// Pfad zum Property-Flag-Icon (ohne Pfad: eingebautes Icon)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_flag_icon: Option<PathBuf>,
}

fn default_zoom_level() -> usize {
    crate::view::zoom::ZOOM_NORMAL_SIZE
}

/// Debug-Builds melden nicht zeichenbare Layer, Release-Builds überspringen still.
fn default_strict_layer_types() -> bool {
    cfg!(debug_assertions)
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR,
            show_grid: false,
            grid_color: DEFAULT_GRID_COLOR,
            grid_opacity: DEFAULT_GRID_OPACITY,
            grid_antialias: false,
            initial_zoom_level: default_zoom_level(),
            strict_layer_types: default_strict_layer_types(),
            property_flag_icon: None,
        }
    }
}

impl ViewOptions {
    /// Liest Optionen aus einer TOML-Datei; `Ok(None)` wenn die Datei fehlt.
    pub fn read_from_file(path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("{} nicht lesbar", path.display()));
            }
        };
        let options = toml::from_str(&content)
            .with_context(|| format!("{} ist kein gültiges Ansichts-TOML", path.display()))?;
        Ok(Some(options))
    }

    /// Wie [`ViewOptions::read_from_file`], aber jeder Fehler endet in den Standardwerten.
    pub fn load_from_file(path: &Path) -> Self {
        match Self::read_from_file(path) {
            Ok(Some(options)) => {
                log::info!("Ansichts-Optionen übernommen: {}", path.display());
                options
            }
            Ok(None) => {
                log::debug!("{} fehlt, Ansicht startet mit Standardwerten", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{:#}; Ansicht startet mit Standardwerten", e);
                Self::default()
            }
        }
    }

    /// Schreibt die Optionen als TOML; fehlende Verzeichnisse werden angelegt.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Verzeichnis {} nicht anlegbar", dir.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Ansichts-Optionen nicht serialisierbar")?;
        std::fs::write(path, content).with_context(|| format!("{} nicht schreibbar", path.display()))?;
        log::info!("Ansichts-Optionen geschrieben: {}", path.display());
        Ok(())
    }

    /// Pfad der Optionen-Datei im Verzeichnis der Binary (sonst im Arbeitsverzeichnis).
    pub fn config_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        exe_dir.unwrap_or_else(|| PathBuf::from(".")).join(OPTIONS_FILE_NAME)
    }
}
