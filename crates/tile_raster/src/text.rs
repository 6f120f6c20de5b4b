//! Minimalistisches Bitmap-Text-Rendering für Koordinaten-Labels.
//!
//! Eingebetteter 3×5 Bitmap-Font (Ziffern und Trennzeichen), klein genug
//! für Beschriftungen innerhalb einzelner Tiles.

use crate::surface::Surface;

const CHAR_WIDTH: usize = 3;
const CHAR_HEIGHT: usize = 5;

/// Zeichnet einen Text-String in der aktuellen Farbe der Fläche.
///
/// Nicht unterstützte Zeichen werden als Leerraum übersprungen.
///
/// # Parameter
/// - `surface`: Zielfläche (Clip und Composite werden beachtet)
/// - `x`, `y`: Startposition (obere linke Ecke)
/// - `text`: Zu zeichnender Text
/// - `scale`: Skalierungsfaktor (1 = 3×5 Pixel pro Zeichen)
pub fn draw_text(surface: &mut Surface, x: i32, y: i32, text: &str, scale: u32) {
    let scale = scale.max(1) as i32;
    let advance = CHAR_WIDTH as i32 * scale + scale;
    let color = surface.color();
    let mut cursor_x = x;

    for ch in text.chars() {
        if let Some(glyph) = glyph_for(ch) {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..CHAR_WIDTH {
                    if bits & (1 << (CHAR_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    for sy in 0..scale {
                        for sx in 0..scale {
                            let px = cursor_x + col as i32 * scale + sx;
                            let py = y + row as i32 * scale + sy;
                            surface.blend_pixel(px, py, color, 1.0);
                        }
                    }
                }
            }
        }
        cursor_x += advance;
    }
}

/// Berechnet die Pixelbreite eines Texts.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let scale = scale.max(1);
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    chars * CHAR_WIDTH as u32 * scale + (chars - 1) * scale
}

/// Berechnet die Pixelhöhe eines Texts.
pub fn text_height(scale: u32) -> u32 {
    CHAR_HEIGHT as u32 * scale.max(1)
}

/// Gibt das Glyph für ein Zeichen zurück.
fn glyph_for(ch: char) -> Option<&'static [u8; CHAR_HEIGHT]> {
    match ch {
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        ',' => Some(&COMMA),
        '-' => Some(&MINUS),
        '(' => Some(&PAREN_OPEN),
        ')' => Some(&PAREN_CLOSE),
        _ => None,
    }
}

// Jede Zeile ist ein Byte, Bits 2–0 repräsentieren die 3 Spalten.
#[rustfmt::skip]
static DIGITS: [[u8; CHAR_HEIGHT]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b011, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];
static COMMA: [u8; CHAR_HEIGHT] = [0b000, 0b000, 0b000, 0b010, 0b100];
static MINUS: [u8; CHAR_HEIGHT] = [0b000, 0b000, 0b111, 0b000, 0b000];
static PAREN_OPEN: [u8; CHAR_HEIGHT] = [0b010, 0b100, 0b100, 0b100, 0b010];
static PAREN_CLOSE: [u8; CHAR_HEIGHT] = [0b010, 0b001, 0b001, 0b001, 0b010];
