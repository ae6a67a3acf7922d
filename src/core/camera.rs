//! 2D-Kamera für Pan und Zoom.

use glam::Vec2;

/// 2D-Kamera mit additivem Pan und exponentiellem Zoom.
///
/// Konvention: `screen = (world + pan) * zoom`. Y zeigt nach unten,
/// identisch zur Screen-Achse, es gibt also keinen Flip.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Verschiebung in Welt-Koordinaten
    pub pan: Vec2,
    /// Zoom-Exponent; der Faktor ist `ZOOM_BASE ^ zoom_exp`
    pub zoom_exp: f32,
    /// Abgeleiteter Zoom-Faktor (1.0 = normal)
    pub zoom: f32,
}

impl Camera {
    /// Basis der Zoom-Exponentialfunktion.
    pub const ZOOM_BASE: f32 = 1.1;
    /// Betragsgrenze des Zoom-Exponenten.
    pub const MAX_ZOOM_EXP: f32 = 20.0;
    /// Exponent-Schritt pro Scroll-Einheit.
    pub const SCROLL_EXP_STEP: f32 = 0.5;

    /// Erstellt eine Kamera im Ursprung mit Zoom 1.0
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom_exp: 0.0,
            zoom: 1.0,
        }
    }

    /// Welt → Screen
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world + self.pan) * self.zoom
    }

    /// Screen → Welt
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom - self.pan
    }

    /// Skaliert eine Screen-Strecke in Welt-Einheiten (ohne Translation).
    pub fn scale_screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.zoom
    }

    /// Verschiebt die Kamera (Delta in Welt-Einheiten)
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Scroll-Zoom um einen Screen-Ankerpunkt.
    ///
    /// Der Exponent wandert in 0.5er-Schritten und wird auf ±20 geklemmt;
    /// der Pan wird so korrigiert, dass der Welt-Punkt unter dem Anker
    /// stehen bleibt.
    pub fn zoom_around(&mut self, screen_anchor: Vec2, scroll_y: f32) {
        let old_zoom = self.zoom;
        self.zoom_exp = (self.zoom_exp + scroll_y * Self::SCROLL_EXP_STEP)
            .clamp(-Self::MAX_ZOOM_EXP, Self::MAX_ZOOM_EXP);
        self.zoom = Self::ZOOM_BASE.powf(self.zoom_exp);
        self.pan += screen_anchor / self.zoom - screen_anchor / old_zoom;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
