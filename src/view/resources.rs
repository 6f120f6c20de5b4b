//! Prozessweite Ressourcen der Ansicht (Property-Flag-Icon).
//!
//! Werden einmal beim Start erzeugt und jeder Ansicht explizit übergeben.

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

/// Kantenlänge des eingebauten Property-Flags in Pixeln.
pub const BUILTIN_FLAG_SIZE: u32 = 12;

const FLAG_COLOR: Rgba<u8> = Rgba([255, 160, 0, 255]);
const POLE_COLOR: Rgba<u8> = Rgba([40, 40, 40, 255]);

/// Geteilte, unveränderliche Ressourcen aller Ansichten.
#[derive(Debug, Clone, Default)]
pub struct ViewResources {
    /// Icon für Tiles mit Properties (`None` = Feature deaktiviert)
    pub property_flag: Option<RgbaImage>,
}

impl ViewResources {
    /// Ressourcen ohne Icon.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ressourcen mit dem eingebauten Property-Flag.
    pub fn builtin() -> Self {
        Self {
            property_flag: Some(builtin_flag()),
        }
    }

    /// Lädt das Property-Flag aus einer Bilddatei.
    ///
    /// Ein Ladefehler deaktiviert nur das Flag-Feature, das Rendern läuft weiter.
    pub fn load(icon_path: &Path) -> Self {
        match Self::try_load_icon(icon_path) {
            Ok(icon) => {
                log::info!(
                    "Property-Flag geladen: {} ({}x{})",
                    icon_path.display(),
                    icon.width(),
                    icon.height()
                );
                Self {
                    property_flag: Some(icon),
                }
            }
            Err(e) => {
                log::warn!("Property-Flag nicht verfügbar: {:#}", e);
                Self::empty()
            }
        }
    }

    /// Lädt ein Icon als RGBA-Bild.
    pub fn try_load_icon(icon_path: &Path) -> Result<RgbaImage> {
        let image = image::open(icon_path).with_context(|| {
            format!("Fehler beim Laden des Icons: {}", icon_path.display())
        })?;
        Ok(image.to_rgba8())
    }
}

/// Erzeugt ein kleines Fähnchen: dunkler Mast links, dreieckiges Tuch oben.
fn builtin_flag() -> RgbaImage {
    let size = BUILTIN_FLAG_SIZE;
    RgbaImage::from_fn(size, size, |x, y| {
        if x <= 1 {
            return POLE_COLOR;
        }
        let cloth_height = size / 2;
        if y >= cloth_height {
            return Rgba([0, 0, 0, 0]);
        }
        // Tuch verjüngt sich nach außen
        let reach = size - (y as i32 - cloth_height as i32 / 2).unsigned_abs() * 2;
        if x < reach {
            FLAG_COLOR
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_flag_has_pole_and_cloth() {
        let resources = ViewResources::builtin();
        let Some(flag) = resources.property_flag.as_ref() else {
            panic!("eingebautes Flag fehlt");
        };
        assert_eq!(flag.dimensions(), (BUILTIN_FLAG_SIZE, BUILTIN_FLAG_SIZE));
        assert_eq!(*flag.get_pixel(0, 11), POLE_COLOR);
        assert_eq!(*flag.get_pixel(4, 3), FLAG_COLOR);
        assert_eq!(flag.get_pixel(8, 10)[3], 0);
    }

    #[test]
    fn test_missing_icon_degrades_to_empty() {
        let resources = ViewResources::load(Path::new("/nonexistent/flag.png"));
        assert!(resources.property_flag.is_none());
        assert!(ViewResources::try_load_icon(Path::new("/nonexistent/flag.png")).is_err());
    }

    #[test]
    fn test_icon_loads_from_png() {
        let path = std::env::temp_dir().join("tile_map_view_flag_test.png");
        let icon = builtin_flag();
        icon.save(&path).expect("Test-Icon speichern");

        let resources = ViewResources::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(resources.property_flag, Some(icon));
    }
}
