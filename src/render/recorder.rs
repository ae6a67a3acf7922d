//! Aufzeichnendes Zeichen-Backend für Tests und Benchmarks.
//!
//! Statt zu zeichnen wird jeder Primitive-Aufruf als [`DrawCall`]
//! protokolliert. Die Text-Messung arbeitet mit fester Vorschubbreite,
//! damit Layout-Ergebnisse deterministisch und ohne Font-Stack prüfbar
//! sind.

use flagset::FlagSet;
use glam::Vec2;

use crate::core::{Box2, SymbolShape};

use super::{align_text_box, DrawFlag, HAlign, LabelKind, Renderer, VAlign};

/// Protokollierter Primitive-Aufruf.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    SelectionBox {
        bounds: Box2,
    },
    Symbol {
        bounds: Box2,
        shape: SymbolShape,
        flags: FlagSet<DrawFlag>,
    },
    Port {
        center: Vec2,
        flags: FlagSet<DrawFlag>,
    },
    Label {
        bounds: Box2,
        text: String,
        kind: LabelKind,
        flags: FlagSet<DrawFlag>,
    },
    Wire {
        vertices: Vec<Vec2>,
        flags: FlagSet<DrawFlag>,
    },
    Junction {
        pos: Vec2,
        flags: FlagSet<DrawFlag>,
    },
    Waypoint {
        pos: Vec2,
        flags: FlagSet<DrawFlag>,
    },
}

/// Zeichen-Backend, das nur aufzeichnet.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Alle Aufrufe in Reihenfolge
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    /// Vorschubbreite pro Zeichen als Anteil der Schriftgröße.
    pub const ADVANCE_FACTOR: f32 = 0.6;

    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministische Text-Größe: feste Vorschubbreite, Höhe = Schriftgröße.
    pub fn measured_size(text: &str, font_size: f32) -> Vec2 {
        let glyphs = text.chars().count() as f32;
        Vec2::new(glyphs * font_size * Self::ADVANCE_FACTOR, font_size)
    }

    /// Leert das Protokoll (für Benchmark-Schleifen).
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Anzahl der Aufrufe, die dem Filter entsprechen.
    pub fn count_matching(&self, filter: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|call| filter(call)).count()
    }
}

impl Renderer for RecordingRenderer {
    fn text_bounds(
        &self,
        pos: Vec2,
        text: &str,
        halign: HAlign,
        valign: VAlign,
        font_size: f32,
    ) -> Box2 {
        align_text_box(pos, Self::measured_size(text, font_size), halign, valign)
    }

    fn draw_selection_box(&mut self, bounds: Box2, _flags: FlagSet<DrawFlag>) {
        self.calls.push(DrawCall::SelectionBox { bounds });
    }

    fn draw_symbol(&mut self, bounds: Box2, shape: SymbolShape, flags: FlagSet<DrawFlag>) {
        self.calls.push(DrawCall::Symbol {
            bounds,
            shape,
            flags,
        });
    }

    fn draw_port(&mut self, center: Vec2, flags: FlagSet<DrawFlag>) {
        self.calls.push(DrawCall::Port { center, flags });
    }

    fn draw_label(&mut self, bounds: Box2, text: &str, kind: LabelKind, flags: FlagSet<DrawFlag>) {
        self.calls.push(DrawCall::Label {
            bounds,
            text: text.to_string(),
            kind,
            flags,
        });
    }

    fn draw_wire(&mut self, vertices: &[Vec2], flags: FlagSet<DrawFlag>) {
        self.calls.push(DrawCall::Wire {
            vertices: vertices.to_vec(),
            flags,
        });
    }

    fn draw_junction(&mut self, pos: Vec2, flags: FlagSet<DrawFlag>) {
        self.calls.push(DrawCall::Junction { pos, flags });
    }

    fn draw_waypoint(&mut self, pos: Vec2, flags: FlagSet<DrawFlag>) {
        self.calls.push(DrawCall::Waypoint { pos, flags });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_measured_size_scales_with_text_length() {
        let short = RecordingRenderer::measured_size("A", 12.0);
        let long = RecordingRenderer::measured_size("AND", 12.0);
        assert_relative_eq!(long.x, short.x * 3.0);
        assert_relative_eq!(short.y, 12.0);
    }

    #[test]
    fn test_calls_are_recorded_in_order() {
        let mut renderer = RecordingRenderer::new();
        renderer.draw_port(Vec2::ZERO, FlagSet::default());
        renderer.draw_junction(Vec2::new(1.0, 1.0), FlagSet::default());

        assert_eq!(renderer.calls.len(), 2);
        assert!(matches!(renderer.calls[0], DrawCall::Port { .. }));
        assert!(matches!(renderer.calls[1], DrawCall::Junction { .. }));

        renderer.clear();
        assert!(renderer.calls.is_empty());
    }
}
