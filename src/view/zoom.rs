//! Diskrete Zoom-Stufen plus stufenloser Zoom-Faktor.

/// Feste, aufsteigende Zoom-Tabelle.
pub const ZOOM_LEVELS: [f64; 10] = [0.0625, 0.125, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0];

/// Index der Stufe 1.0 (Originalgröße).
pub const ZOOM_NORMAL_SIZE: usize = 5;

/// Zoom-Zustand der Ansicht.
///
/// Stufe und Faktor werden vom Stufen-Setter immer gemeinsam gesetzt;
/// `set_factor` entkoppelt den Faktor für freie Zoom-Werte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    factor: f64,
    level: usize,
}

impl ZoomState {
    /// Erstellt den Zustand auf Originalgröße.
    pub fn new() -> Self {
        Self {
            factor: ZOOM_LEVELS[ZOOM_NORMAL_SIZE],
            level: ZOOM_NORMAL_SIZE,
        }
    }

    /// Aktueller Zoom-Faktor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Aktuelle Zoom-Stufe.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Setzt die Stufe und den passenden Faktor.
    /// Gibt `false` zurück (ohne Änderung), wenn der Index außerhalb der Tabelle liegt.
    pub fn set_level(&mut self, level: usize) -> bool {
        match ZOOM_LEVELS.get(level) {
            Some(&factor) => {
                self.level = level;
                self.factor = factor;
                true
            }
            None => false,
        }
    }

    /// Setzt einen freien Zoom-Faktor. Werte `<= 0` (und NaN) werden ignoriert.
    pub fn set_factor(&mut self, factor: f64) -> bool {
        if factor > 0.0 && factor.is_finite() {
            self.factor = factor;
            true
        } else {
            false
        }
    }

    /// Kann noch weiter hineingezoomt werden?
    pub fn can_zoom_in(&self) -> bool {
        self.level < ZOOM_LEVELS.len() - 1
    }

    /// Kann noch weiter herausgezoomt werden?
    pub fn can_zoom_out(&self) -> bool {
        self.level > 0
    }

    /// Eine Stufe hinein. Gibt `true` zurück, wenn danach weiteres Hineinzoomen möglich ist.
    pub fn step_in(&mut self) -> bool {
        if self.can_zoom_in() {
            self.set_level(self.level + 1);
        }
        self.can_zoom_in()
    }

    /// Eine Stufe heraus. Gibt `true` zurück, wenn danach weiteres Herauszoomen möglich ist.
    pub fn step_out(&mut self) -> bool {
        if self.can_zoom_out() {
            self.set_level(self.level - 1);
        }
        self.can_zoom_out()
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_normal_size() {
        let zoom = ZoomState::new();
        assert_eq!(zoom.level(), ZOOM_NORMAL_SIZE);
        assert_relative_eq!(zoom.factor(), 1.0);
    }

    #[test]
    fn test_step_in_until_top() {
        let mut zoom = ZoomState::new();
        assert!(zoom.step_in()); // 1.5
        assert!(zoom.step_in()); // 2.0
        assert!(zoom.step_in()); // 3.0
        assert!(!zoom.step_in()); // 4.0, Ende
        assert_eq!(zoom.level(), ZOOM_LEVELS.len() - 1);
        assert_relative_eq!(zoom.factor(), 4.0);

        assert!(!zoom.step_in());
        assert_eq!(zoom.level(), ZOOM_LEVELS.len() - 1);
    }

    #[test]
    fn test_step_out_until_bottom() {
        let mut zoom = ZoomState::new();
        zoom.set_level(1);
        assert!(!zoom.step_out());
        assert_eq!(zoom.level(), 0);
        assert!(!zoom.step_out());
        assert_eq!(zoom.level(), 0);
        assert_relative_eq!(zoom.factor(), 0.0625);
    }

    #[test]
    fn test_set_level_out_of_range_is_noop() {
        let mut zoom = ZoomState::new();
        assert!(!zoom.set_level(ZOOM_LEVELS.len()));
        assert_eq!(zoom, ZoomState::new());
    }

    #[test]
    fn test_set_factor_decouples_from_table() {
        let mut zoom = ZoomState::new();
        assert!(zoom.set_factor(0.33));
        assert_relative_eq!(zoom.factor(), 0.33);
        assert_eq!(zoom.level(), ZOOM_NORMAL_SIZE);

        assert!(!zoom.set_factor(0.0));
        assert!(!zoom.set_factor(-2.0));
        assert!(!zoom.set_factor(f64::NAN));
        assert_relative_eq!(zoom.factor(), 0.33);
    }
}
