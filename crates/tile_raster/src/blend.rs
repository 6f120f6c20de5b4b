//! Pixel-Blending für die unterstützten Composite-Modi.
//!
//! Farben liegen nicht-premultipliziert als `Rgba<u8>` vor.

use image::Rgba;

/// Composite-Modus für alle Zeichenoperationen einer `Surface`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Composite {
    /// Quelle über Ziel, volle Deckkraft der Quelle
    #[default]
    SrcOver,
    /// Quelle nur auf bereits gedeckten Zielpixeln, skaliert mit der Alpha (0.0–1.0).
    /// Die Ziel-Alpha bleibt unverändert.
    SrcAtop(f32),
}

impl Composite {
    /// Zusätzlicher Alpha-Faktor des Modus.
    pub fn alpha(self) -> f32 {
        match self {
            Composite::SrcOver => 1.0,
            Composite::SrcAtop(alpha) => alpha.clamp(0.0, 1.0),
        }
    }

    /// Verrechnet einen Quellpixel mit einem Zielpixel.
    ///
    /// `coverage` ist der Abdeckungsgrad des Pixels (Kantenglättung), 1.0 = voll.
    pub fn apply(self, dst: Rgba<u8>, src: Rgba<u8>, coverage: f32) -> Rgba<u8> {
        match self {
            Composite::SrcOver => src_over(dst, src, coverage),
            Composite::SrcAtop(alpha) => src_atop(dst, src, alpha.clamp(0.0, 1.0) * coverage),
        }
    }
}

/// Blendet zwei Farbkanäle linear zusammen.
pub fn blend_channel(base: u8, overlay: u8, alpha: f32) -> u8 {
    let result = base as f32 * (1.0 - alpha) + overlay as f32 * alpha;
    result.round().clamp(0.0, 255.0) as u8
}

/// Porter-Duff "source over" mit zusätzlichem Alpha-Faktor.
pub fn src_over(dst: Rgba<u8>, src: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * alpha.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let value = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        out[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Porter-Duff "source atop": Farbe mischt nur dort, wo das Ziel gedeckt ist.
pub fn src_atop(dst: Rgba<u8>, src: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * alpha.clamp(0.0, 1.0);
    if sa <= 0.0 || dst[3] == 0 {
        return dst;
    }
    Rgba([
        blend_channel(dst[0], src[0], sa),
        blend_channel(dst[1], src[1], sa),
        blend_channel(dst[2], src[2], sa),
        dst[3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_src_over_opaque_replaces() {
        assert_eq!(src_over(BLACK, WHITE, 1.0), WHITE);
    }

    #[test]
    fn test_src_over_zero_alpha_keeps_destination() {
        assert_eq!(src_over(BLACK, WHITE, 0.0), BLACK);
    }

    #[test]
    fn test_src_over_onto_transparent_takes_source_alpha() {
        let out = src_over(Rgba([0, 0, 0, 0]), Rgba([200, 100, 50, 128]), 1.0);
        assert_eq!(out, Rgba([200, 100, 50, 128]));
    }

    #[test]
    fn test_src_atop_scales_linear() {
        let out = src_atop(BLACK, WHITE, 0.5);
        assert_eq!(out, Rgba([128, 128, 128, 255]));

        let out = src_atop(BLACK, WHITE, 0.25);
        assert_eq!(out[0], 64);
    }

    #[test]
    fn test_src_atop_leaves_transparent_destination() {
        let clear = Rgba([0, 0, 0, 0]);
        assert_eq!(src_atop(clear, WHITE, 1.0), clear);
    }

    #[test]
    fn test_composite_alpha_is_clamped() {
        assert_eq!(Composite::SrcAtop(1.7).alpha(), 1.0);
        assert_eq!(Composite::SrcAtop(-0.3).alpha(), 0.0);
        assert_eq!(Composite::SrcOver.alpha(), 1.0);
        assert_relative_eq!(Composite::SrcAtop(0.3).alpha(), 0.3);
    }

    #[test]
    fn test_coverage_scales_src_atop() {
        let full = Composite::SrcAtop(0.5).apply(BLACK, WHITE, 1.0);
        let half = Composite::SrcAtop(0.5).apply(BLACK, WHITE, 0.5);
        assert_eq!(full[0], 128);
        assert_eq!(half[0], 64);
    }
}
