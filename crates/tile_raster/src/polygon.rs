//! Geschlossene Polygone in Screen-Koordinaten (Grid-Zellen, Hit-Tests).

use glam::{DVec2, IVec2};

use crate::surface::ClipRect;

/// Geschlossenes Polygon; der letzte Punkt wird implizit mit dem ersten verbunden.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    points: Vec<IVec2>,
}

impl Polygon {
    /// Erstellt ein Polygon aus einer Punktliste.
    pub fn new(points: Vec<IVec2>) -> Self {
        Self { points }
    }

    /// Achsenparalleles Rechteck als Polygon (im Uhrzeigersinn ab oben links).
    pub fn rect(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(vec![
            IVec2::new(x, y),
            IVec2::new(x + width, y),
            IVec2::new(x + width, y + height),
            IVec2::new(x, y + height),
        ])
    }

    /// Eckpunkte des Polygons.
    pub fn points(&self) -> &[IVec2] {
        &self.points
    }

    /// Anzahl der Eckpunkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Gibt `true` zurück wenn das Polygon keine Eckpunkte hat.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iteriert über alle Kanten inklusive der schließenden Kante.
    pub fn edges(&self) -> impl Iterator<Item = (IVec2, IVec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Umschließendes Rechteck (inklusive der Kantenpixel).
    pub fn bounds(&self) -> ClipRect {
        let Some(first) = self.points.first() else {
            return ClipRect::EMPTY;
        };
        let (min, max) = self
            .points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        ClipRect::new(min.x, min.y, max.x - min.x + 1, max.y - min.y + 1)
    }

    /// Punkt-in-Polygon-Test (Even-Odd-Regel).
    pub fn contains(&self, point: DVec2) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            let (a, b) = (a.as_dvec2(), b.as_dvec2());
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Schnittpunkte der Kanten mit der horizontalen Linie `y` (aufsteigend sortiert).
    pub(crate) fn scanline_crossings(&self, y: f64, out: &mut Vec<f64>) {
        out.clear();
        for (a, b) in self.edges() {
            let (a, b) = (a.as_dvec2(), b.as_dvec2());
            if (a.y <= y) != (b.y <= y) {
                out.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        out.sort_by(|l, r| l.total_cmp(r));
    }
}
