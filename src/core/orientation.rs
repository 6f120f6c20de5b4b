//! Orientierungs-Codes der Karte und ihre Zuordnung zu Projektionen.

use std::fmt;
use std::str::FromStr;

/// Roh-Code: orthogonale Karte.
pub const ORIENTATION_ORTHOGONAL: i32 = 1;
/// Roh-Code: isometrische Karte (Rauten-Layout).
pub const ORIENTATION_ISOMETRIC: i32 = 2;
/// Roh-Code: hexagonale Karte (flache Oberkante, versetzte Spalten).
pub const ORIENTATION_HEXAGONAL: i32 = 4;
/// Roh-Code: verschobene Karte (jede Zeile um eine halbe Tile-Breite versetzt).
pub const ORIENTATION_SHIFTED: i32 = 5;

/// Von der Ansicht unterstützte Projektionen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Rechteckiges Raster
    Orthogonal,
    /// Rauten-Raster
    Isometric,
    /// Sechseck-Raster
    Hexagonal,
    /// Zeilenversetztes Rechteck-Raster
    Shifted,
}

impl Orientation {
    /// Alle Orientierungen in Code-Reihenfolge.
    pub const ALL: [Orientation; 4] = [
        Orientation::Orthogonal,
        Orientation::Isometric,
        Orientation::Hexagonal,
        Orientation::Shifted,
    ];

    /// Übersetzt einen Roh-Code. Unbekannte Codes ergeben `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            ORIENTATION_ORTHOGONAL => Some(Orientation::Orthogonal),
            ORIENTATION_ISOMETRIC => Some(Orientation::Isometric),
            ORIENTATION_HEXAGONAL => Some(Orientation::Hexagonal),
            ORIENTATION_SHIFTED => Some(Orientation::Shifted),
            _ => None,
        }
    }

    /// Roh-Code dieser Orientierung.
    pub fn code(self) -> i32 {
        match self {
            Orientation::Orthogonal => ORIENTATION_ORTHOGONAL,
            Orientation::Isometric => ORIENTATION_ISOMETRIC,
            Orientation::Hexagonal => ORIENTATION_HEXAGONAL,
            Orientation::Shifted => ORIENTATION_SHIFTED,
        }
    }

    /// Kurzname (wie in Konfiguration und Kommandozeile).
    pub fn name(self) -> &'static str {
        match self {
            Orientation::Orthogonal => "orthogonal",
            Orientation::Isometric => "isometric",
            Orientation::Hexagonal => "hexagonal",
            Orientation::Shifted => "shifted",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Orientation::ALL
            .into_iter()
            .find(|o| o.name() == lower || (lower.len() >= 3 && o.name().starts_with(&lower)))
            .ok_or_else(|| anyhow::anyhow!("Unbekannte Orientierung: '{}'", s))
    }
}
