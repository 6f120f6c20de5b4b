//! Zeichenfläche mit Clip-Rechteck, Composite-Modus und aktueller Farbe.

use anyhow::{Context, Result};
use glam::{IVec2, Vec2};
use image::{Rgba, RgbaImage};

use crate::blend::Composite;
use crate::polygon::Polygon;
use crate::text;

/// Achsenparalleles Rechteck in Pixeln (Clip-Bereich, sichtbarer Ausschnitt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipRect {
    /// Linke Kante
    pub x: i32,
    /// Obere Kante
    pub y: i32,
    /// Breite (0 = leer)
    pub width: i32,
    /// Höhe (0 = leer)
    pub height: i32,
}

impl ClipRect {
    /// Leeres Rechteck.
    pub const EMPTY: ClipRect = ClipRect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Erstellt ein Rechteck; negative Ausdehnungen werden auf 0 gesetzt.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Rechte Kante (exklusiv).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Untere Kante (exklusiv).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Gibt `true` zurück wenn keine Fläche übrig ist.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Prüft ob ein Pixel im Rechteck liegt.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Schnittmenge zweier Rechtecke.
    pub fn intersect(&self, other: &ClipRect) -> ClipRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        ClipRect::new(x, y, right - x, bottom - y)
    }

    /// Prüft ob sich zwei Rechtecke überlappen.
    pub fn intersects(&self, other: &ClipRect) -> bool {
        !self.intersect(other).is_empty()
    }
}

/// RGBA-Zeichenfläche.
///
/// Alle Operationen respektieren Clip-Rechteck, Composite-Modus und die
/// aktuelle Farbe. Der Zustand wird wie bei einem Grafik-Kontext gesetzt
/// und gilt bis zur nächsten Änderung.
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
    clip: ClipRect,
    composite: Composite,
    color: Rgba<u8>,
    antialias: bool,
}

impl Surface {
    /// Erstellt eine transparente Fläche.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::new(width, height))
    }

    /// Übernimmt ein vorhandenes Bild als Zeichenfläche.
    pub fn from_image(image: RgbaImage) -> Self {
        let clip = ClipRect::new(0, 0, image.width() as i32, image.height() as i32);
        Self {
            image,
            clip,
            composite: Composite::SrcOver,
            color: Rgba([0, 0, 0, 255]),
            antialias: false,
        }
    }

    /// Breite in Pixeln.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Höhe in Pixeln.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Gesamtfläche als Rechteck.
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.image.width() as i32, self.image.height() as i32)
    }

    /// Zugriff auf die Bilddaten.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Gibt die Bilddaten zurück und verbraucht die Fläche.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Liest einen Pixel (außerhalb: transparent).
    pub fn pixel(&self, x: i32, y: i32) -> Rgba<u8> {
        if self.bounds().contains(x, y) {
            *self.image.get_pixel(x as u32, y as u32)
        } else {
            Rgba([0, 0, 0, 0])
        }
    }

    /// Aktuelles Clip-Rechteck.
    pub fn clip(&self) -> ClipRect {
        self.clip
    }

    /// Setzt das Clip-Rechteck (immer auf die Flächengrenzen beschnitten).
    pub fn set_clip(&mut self, clip: ClipRect) {
        self.clip = clip.intersect(&self.bounds());
    }

    /// Setzt den Clip auf die gesamte Fläche zurück.
    pub fn reset_clip(&mut self) {
        self.clip = self.bounds();
    }

    /// Aktueller Composite-Modus.
    pub fn composite(&self) -> Composite {
        self.composite
    }

    /// Setzt den Composite-Modus.
    pub fn set_composite(&mut self, composite: Composite) {
        self.composite = composite;
    }

    /// Aktuelle Zeichenfarbe.
    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    /// Setzt die Zeichenfarbe.
    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    /// Kantenglättung für Linien aktiv?
    pub fn antialias(&self) -> bool {
        self.antialias
    }

    /// Schaltet die Kantenglättung für Linien.
    pub fn set_antialias(&mut self, antialias: bool) {
        self.antialias = antialias;
    }

    /// Verrechnet einen einzelnen Pixel gemäß Clip und Composite.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
        if coverage <= 0.0 || !self.clip.contains(x, y) {
            return;
        }
        let dst = *self.image.get_pixel(x as u32, y as u32);
        let out = self.composite.apply(dst, color, coverage.min(1.0));
        self.image.put_pixel(x as u32, y as u32, out);
    }

    /// Füllt ein Rechteck mit der aktuellen Farbe.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let area = ClipRect::new(x, y, width, height).intersect(&self.clip);
        let color = self.color;
        for py in area.y..area.bottom() {
            for px in area.x..area.right() {
                self.blend_pixel(px, py, color, 1.0);
            }
        }
    }

    /// Zeichnet ein Bild skaliert (Nearest-Neighbor) in das Zielrechteck.
    ///
    /// Die Pixel-Alpha des Bilds wird mit dem Composite-Modus verrechnet.
    pub fn draw_image(&mut self, source: &RgbaImage, x: i32, y: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 || source.width() == 0 || source.height() == 0 {
            return;
        }
        let area = ClipRect::new(x, y, width, height).intersect(&self.clip);
        let (src_w, src_h) = (source.width() as i64, source.height() as i64);
        for py in area.y..area.bottom() {
            let sy = ((py - y) as i64 * src_h / height as i64).clamp(0, src_h - 1) as u32;
            for px in area.x..area.right() {
                let sx = ((px - x) as i64 * src_w / width as i64).clamp(0, src_w - 1) as u32;
                let color = *source.get_pixel(sx, sy);
                self.blend_pixel(px, py, color, 1.0);
            }
        }
    }

    /// Zeichnet eine Linie in der aktuellen Farbe.
    ///
    /// Mit Kantenglättung nach Xiaolin Wu, sonst Bresenham.
    pub fn draw_line(&mut self, from: IVec2, to: IVec2) {
        if self.antialias {
            self.draw_line_smooth(from.as_vec2(), to.as_vec2());
        } else {
            self.draw_line_hard(from, to);
        }
    }

    fn draw_line_hard(&mut self, from: IVec2, to: IVec2) {
        let color = self.color;
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);

        loop {
            self.blend_pixel(x, y, color, 1.0);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_line_smooth(&mut self, from: Vec2, to: Vec2) {
        let color = self.color;
        let steep = (to.y - from.y).abs() > (to.x - from.x).abs();
        let (mut a, mut b) = if steep {
            (Vec2::new(from.y, from.x), Vec2::new(to.y, to.x))
        } else {
            (from, to)
        };
        if a.x > b.x {
            std::mem::swap(&mut a, &mut b);
        }

        let dx = b.x - a.x;
        let gradient = if dx == 0.0 { 1.0 } else { (b.y - a.y) / dx };
        let start = a.x.round() as i32;
        let end = b.x.round() as i32;
        let mut y = a.y + gradient * (start as f32 - a.x);

        for x in start..=end {
            let base = y.floor();
            let frac = y - base;
            let (p1, p2) = (base as i32, base as i32 + 1);
            if steep {
                self.blend_pixel(p1, x, color, 1.0 - frac);
                self.blend_pixel(p2, x, color, frac);
            } else {
                self.blend_pixel(x, p1, color, 1.0 - frac);
                self.blend_pixel(x, p2, color, frac);
            }
            y += gradient;
        }
    }

    /// Füllt ein Polygon (Even-Odd, Abtastung in Pixelmitte).
    pub fn fill_polygon(&mut self, polygon: &Polygon) {
        if polygon.len() < 3 {
            return;
        }
        let area = polygon.bounds().intersect(&self.clip);
        let color = self.color;
        let mut crossings = Vec::with_capacity(polygon.len());

        for py in area.y..area.bottom() {
            polygon.scanline_crossings(py as f64 + 0.5, &mut crossings);
            for span in crossings.chunks_exact(2) {
                let first = (span[0] - 0.5).ceil() as i32;
                let last = (span[1] - 0.5).ceil() as i32 - 1;
                for px in first.max(area.x)..=last.min(area.right() - 1) {
                    self.blend_pixel(px, py, color, 1.0);
                }
            }
        }
    }

    /// Zeichnet die Umrisslinie eines Polygons.
    pub fn stroke_polygon(&mut self, polygon: &Polygon) {
        if polygon.len() < 2 {
            return;
        }
        // Nur Polygone zeichnen, die den Clip berühren
        let bounds = polygon.bounds();
        let grown = ClipRect::new(bounds.x - 1, bounds.y - 1, bounds.width + 2, bounds.height + 2);
        if !grown.intersects(&self.clip) {
            return;
        }
        for (a, b) in polygon.edges() {
            self.draw_line(a, b);
        }
    }

    /// Zeichnet Text mit dem eingebetteten Bitmap-Font in der aktuellen Farbe.
    pub fn draw_text(&mut self, x: i32, y: i32, label: &str, scale: u32) {
        text::draw_text(self, x, y, label, scale);
    }

    /// Speichert die Fläche als PNG.
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("PNG konnte nicht geschrieben werden: {}", path.display()))?;
        log::info!(
            "Frame gespeichert: {} ({}x{})",
            path.display(),
            self.width(),
            self.height()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GRAY: Rgba<u8> = Rgba([64, 64, 64, 255]);

    fn gray_surface(size: u32) -> Surface {
        let mut surface = Surface::new(size, size);
        surface.set_color(GRAY);
        surface.fill_rect(0, 0, size as i32, size as i32);
        surface
    }

    #[test]
    fn test_clip_intersection() {
        let a = ClipRect::new(0, 0, 10, 10);
        let b = ClipRect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), ClipRect::new(5, 5, 5, 5));
        assert!(a.intersect(&ClipRect::new(20, 20, 1, 1)).is_empty());
    }

    #[test]
    fn test_fill_rect_honors_clip() {
        let mut surface = gray_surface(8);
        surface.set_clip(ClipRect::new(0, 0, 4, 4));
        surface.set_color(RED);
        surface.fill_rect(0, 0, 8, 8);

        assert_eq!(surface.pixel(3, 3), RED);
        assert_eq!(surface.pixel(4, 4), GRAY);
    }

    #[test]
    fn test_set_clip_is_limited_to_bounds() {
        let mut surface = Surface::new(8, 8);
        surface.set_clip(ClipRect::new(-5, -5, 100, 100));
        assert_eq!(surface.clip(), ClipRect::new(0, 0, 8, 8));
    }

    #[test]
    fn test_src_atop_fill_blends_linear() {
        let mut surface = Surface::new(2, 2);
        surface.set_color(Rgba([0, 0, 0, 255]));
        surface.fill_rect(0, 0, 2, 2);
        surface.set_composite(Composite::SrcAtop(0.5));
        surface.set_color(Rgba([255, 255, 255, 255]));
        surface.fill_rect(0, 0, 2, 2);

        assert_eq!(surface.pixel(0, 0), Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_hard_line_hits_both_endpoints() {
        let mut surface = gray_surface(10);
        surface.set_color(RED);
        surface.draw_line(IVec2::new(1, 1), IVec2::new(8, 5));
        assert_eq!(surface.pixel(1, 1), RED);
        assert_eq!(surface.pixel(8, 5), RED);
    }

    #[test]
    fn test_smooth_horizontal_line_is_solid() {
        let mut surface = gray_surface(10);
        surface.set_antialias(true);
        surface.set_color(RED);
        surface.draw_line(IVec2::new(0, 4), IVec2::new(9, 4));
        assert_eq!(surface.pixel(5, 4), RED);
        assert_eq!(surface.pixel(5, 5), GRAY);
    }

    #[test]
    fn test_fill_polygon_covers_inner_pixels_only() {
        let mut surface = gray_surface(10);
        surface.set_color(RED);
        surface.fill_polygon(&Polygon::rect(2, 2, 4, 4));

        assert_eq!(surface.pixel(2, 2), RED);
        assert_eq!(surface.pixel(5, 5), RED);
        assert_eq!(surface.pixel(6, 6), GRAY);
        assert_eq!(surface.pixel(1, 2), GRAY);
    }

    #[test]
    fn test_draw_image_scales_nearest() {
        let mut tile = RgbaImage::new(2, 1);
        tile.put_pixel(0, 0, RED);
        tile.put_pixel(1, 0, Rgba([0, 0, 255, 255]));

        let mut surface = gray_surface(8);
        surface.draw_image(&tile, 0, 0, 4, 2);

        assert_eq!(surface.pixel(1, 1), RED);
        assert_eq!(surface.pixel(2, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(surface.pixel(4, 0), GRAY);
    }
}
