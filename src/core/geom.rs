//! Reine Geometrie-Funktionen für achsenparallele Boxen.
//!
//! Alle Boxen sind als Mittelpunkt + Halbgröße gespeichert. Layer-neutral:
//! wird von Layout, Hit-Tests und Render-Traversierung gemeinsam benutzt.

use glam::Vec2;

/// Achsenparallele Box als Mittelpunkt + Halbgröße.
///
/// Eine Halbgröße von (0, 0) bedeutet "keine Box" (z.B. inaktive
/// Selektions-Box) und schlägt bei allen Schnitt-Tests fehl.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Box2 {
    /// Mittelpunkt in Welt-Koordinaten
    pub center: Vec2,
    /// Halbe Ausdehnung pro Achse (immer ≥ 0)
    pub half_size: Vec2,
}

impl Box2 {
    /// Die leere Box (Mittelpunkt Ursprung, Halbgröße null).
    pub const ZERO: Self = Self {
        center: Vec2::ZERO,
        half_size: Vec2::ZERO,
    };

    /// Erstellt eine Box aus Mittelpunkt und Halbgröße.
    pub fn new(center: Vec2, half_size: Vec2) -> Self {
        Self { center, half_size }
    }

    /// Erstellt eine Box aus zwei beliebigen Eckpunkten.
    ///
    /// Die Punkte dürfen in beliebiger Reihenfolge übergeben werden
    /// (Drag von rechts-unten nach links-oben ergibt dieselbe Box).
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            half_size: (max - min) * 0.5,
        }
    }

    /// Quadratische Box mit gleicher Halbgröße auf beiden Achsen.
    pub fn square(center: Vec2, half_extent: f32) -> Self {
        Self {
            center,
            half_size: Vec2::splat(half_extent),
        }
    }

    /// Minimale Ecke (links oben bei y-abwärts).
    pub fn min(&self) -> Vec2 {
        self.center - self.half_size
    }

    /// Maximale Ecke.
    pub fn max(&self) -> Vec2 {
        self.center + self.half_size
    }

    /// Prüft ob ein Punkt innerhalb der Box liegt (inklusive Rand).
    pub fn contains_point(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_size.x && d.y <= self.half_size.y
    }

    /// Prüft ob sich zwei Boxen überlappen (inklusive Berührung).
    pub fn intersects(&self, other: &Box2) -> bool {
        let d = (other.center - self.center).abs();
        let reach = self.half_size + other.half_size;
        d.x <= reach.x && d.y <= reach.y
    }

    /// Verschiebt die Box um `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            half_size: self.half_size,
        }
    }

    /// Prüft ob die Box nennenswerte Fläche hat (beide Halbachsen > ε).
    ///
    /// Wird für die Selektions-Box benutzt: degenerierte Boxen werden
    /// weder gezeichnet noch in Deselect-Commands aufgelöst.
    pub fn has_area(&self, epsilon: f32) -> bool {
        self.half_size.x > epsilon && self.half_size.y > epsilon
    }
}
