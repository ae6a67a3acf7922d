//! egui-Zeichen-Backend.
//!
//! Übersetzt die Welt-Primitive der View in Painter-Aufrufe: Koordinaten
//! laufen durch die Kamera und den Viewport-Ursprung, Strichstärken und
//! Schriftgrößen skalieren mit dem Zoom. Gatter-Umrisse sind die
//! klassischen Schemalib-Formen, als Polylinien im Einheitsraum
//! `[-1, 1]²` hinterlegt und auf die Bauteil-Box gespannt.

use eframe::egui;
use flagset::FlagSet;
use glam::Vec2;

use crate::core::{Box2, Camera, SymbolShape};
use crate::shared::Theme;

use super::{align_text_box, DrawFlag, HAlign, LabelKind, Renderer, VAlign};

/// Zeichen-Backend über den egui-Painter eines Frames.
pub struct EguiRenderer<'a> {
    painter: &'a egui::Painter,
    /// Viewport-Ursprung in Screen-Punkten
    origin: egui::Pos2,
    camera: Camera,
    theme: Theme,
}

impl<'a> EguiRenderer<'a> {
    pub fn new(
        painter: &'a egui::Painter,
        viewport: egui::Rect,
        camera: &Camera,
        theme: &Theme,
    ) -> Self {
        Self {
            painter,
            origin: viewport.min,
            camera: camera.clone(),
            theme: theme.clone(),
        }
    }

    fn to_screen(&self, world: Vec2) -> egui::Pos2 {
        let screen = self.camera.world_to_screen(world);
        egui::pos2(self.origin.x + screen.x, self.origin.y + screen.y)
    }

    /// Welt-Strecke in Screen-Punkte.
    fn px(&self, world_units: f32) -> f32 {
        world_units * self.camera.zoom
    }

    fn screen_rect(&self, bounds: Box2) -> egui::Rect {
        egui::Rect::from_min_max(self.to_screen(bounds.min()), self.to_screen(bounds.max()))
    }

    /// Grundfarbe, von Debug/Selektion/Hover in dieser Rangfolge übersteuert.
    fn accent(&self, base: [f32; 4], flags: FlagSet<DrawFlag>) -> egui::Color32 {
        let rgba = if flags.contains(DrawFlag::Debug) {
            self.theme.color_wire_debug
        } else if flags.contains(DrawFlag::Selected) {
            self.theme.color_selected
        } else if flags.contains(DrawFlag::Hovered) {
            self.theme.color_hovered
        } else {
            base
        };
        color32(rgba)
    }

    /// Geschlossener Gatter-Umriss aus dem Einheitsraum auf die Box gespannt.
    fn stroke_outline(&self, unit: &[Vec2], bounds: Box2, flags: FlagSet<DrawFlag>) {
        let points: Vec<egui::Pos2> = unit
            .iter()
            .map(|p| self.to_screen(bounds.center + *p * bounds.half_size))
            .collect();
        let stroke = egui::Stroke::new(
            self.px(self.theme.gate_thickness),
            self.accent(self.theme.color_component_border, flags),
        );
        self.painter.add(egui::Shape::closed_line(points, stroke));
    }

    /// Offener Linienzug (XOR-Rückenbogen).
    fn stroke_open(&self, unit: &[Vec2], bounds: Box2, flags: FlagSet<DrawFlag>) {
        let points: Vec<egui::Pos2> = unit
            .iter()
            .map(|p| self.to_screen(bounds.center + *p * bounds.half_size))
            .collect();
        let stroke = egui::Stroke::new(
            self.px(self.theme.gate_thickness),
            self.accent(self.theme.color_component_border, flags),
        );
        self.painter.add(egui::Shape::line(points, stroke));
    }
}

impl<'a> Renderer for EguiRenderer<'a> {
    fn text_bounds(
        &self,
        pos: Vec2,
        text: &str,
        halign: HAlign,
        valign: VAlign,
        font_size: f32,
    ) -> Box2 {
        // Messung in Welteinheiten, der Zoom kommt erst beim Zeichnen dazu
        let galley = self.painter.layout_no_wrap(
            text.to_owned(),
            egui::FontId::proportional(font_size),
            egui::Color32::PLACEHOLDER,
        );
        let size = Vec2::new(galley.size().x, galley.size().y);
        align_text_box(pos, size, halign, valign)
    }

    fn draw_selection_box(&mut self, bounds: Box2, _flags: FlagSet<DrawFlag>) {
        let rect = self.screen_rect(bounds);
        self.painter
            .rect_filled(rect, 0.0, color32(self.theme.color_select_fill));
        self.painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(
                self.px(self.theme.border_width),
                color32(self.theme.color_selected),
            ),
            egui::StrokeKind::Inside,
        );
    }

    fn draw_symbol(&mut self, bounds: Box2, shape: SymbolShape, flags: FlagSet<DrawFlag>) {
        match shape {
            SymbolShape::Default => {
                let rect = self.screen_rect(bounds);
                let radius =
                    egui::CornerRadius::same(self.px(self.theme.component_radius).round() as u8);
                self.painter
                    .rect_filled(rect, radius, color32(self.theme.color_component));
                self.painter.rect_stroke(
                    rect,
                    radius,
                    egui::Stroke::new(
                        self.px(self.theme.border_width),
                        self.accent(self.theme.color_component_border, flags),
                    ),
                    egui::StrokeKind::Inside,
                );
            }
            SymbolShape::And => self.stroke_outline(&and_outline(), bounds, flags),
            SymbolShape::Or => self.stroke_outline(&or_outline(), bounds, flags),
            SymbolShape::Xor => {
                self.stroke_outline(&or_outline(), bounds, flags);
                self.stroke_open(&xor_back(), bounds, flags);
            }
            SymbolShape::Not => {
                self.stroke_outline(&not_triangle(), bounds, flags);
                let bubble = bounds.center + NOT_BUBBLE_CENTER * bounds.half_size;
                self.painter.circle_stroke(
                    self.to_screen(bubble),
                    self.px(NOT_BUBBLE_RADIUS * bounds.half_size.x),
                    egui::Stroke::new(
                        self.px(self.theme.gate_thickness),
                        self.accent(self.theme.color_component_border, flags),
                    ),
                );
            }
        }
    }

    fn draw_port(&mut self, center: Vec2, flags: FlagSet<DrawFlag>) {
        let half = Vec2::splat(self.theme.port_width / 2.0);
        let rect = self.screen_rect(Box2::new(center, half));
        self.painter
            .rect_filled(rect, 0.0, color32(self.theme.color_port));
        self.painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(
                self.px(self.theme.border_width),
                self.accent(self.theme.color_port_border, flags),
            ),
            egui::StrokeKind::Inside,
        );
    }

    fn draw_label(&mut self, bounds: Box2, text: &str, kind: LabelKind, flags: FlagSet<DrawFlag>) {
        let base = match kind {
            LabelKind::Type | LabelKind::Port => self.theme.color_label,
            LabelKind::Name => self.theme.color_name,
        };
        let color = if flags.contains(DrawFlag::Hovered) {
            color32(self.theme.color_hovered)
        } else {
            color32(base)
        };
        self.painter.text(
            self.to_screen(bounds.min()),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::proportional(self.px(self.theme.label_font_size)),
            color,
        );
    }

    fn draw_wire(&mut self, vertices: &[Vec2], flags: FlagSet<DrawFlag>) {
        if vertices.len() < 2 {
            return;
        }
        let points: Vec<egui::Pos2> = vertices.iter().map(|v| self.to_screen(*v)).collect();
        let stroke = egui::Stroke::new(
            self.px(self.theme.wire_thickness),
            self.accent(self.theme.color_wire, flags),
        );
        self.painter.add(egui::Shape::line(points, stroke));
    }

    fn draw_junction(&mut self, pos: Vec2, flags: FlagSet<DrawFlag>) {
        self.painter.circle_filled(
            self.to_screen(pos),
            self.px(self.theme.wire_thickness * 1.5),
            self.accent(self.theme.color_wire, flags),
        );
    }

    fn draw_waypoint(&mut self, pos: Vec2, flags: FlagSet<DrawFlag>) {
        self.painter.circle_filled(
            self.to_screen(pos),
            self.px(self.theme.port_width / 2.0),
            self.accent(self.theme.color_wire, flags),
        );
    }
}

/// RGBA `0..1` → `Color32`, Kanäle geklemmt.
fn color32(rgba: [f32; 4]) -> egui::Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(rgba[0]),
        channel(rgba[1]),
        channel(rgba[2]),
        channel(rgba[3]),
    )
}

/// Mittelpunkt der NOT-Blase im Einheitsraum (x-Anteil der Halbbreite).
const NOT_BUBBLE_CENTER: Vec2 = Vec2::new(0.6818, 0.0);
/// Blasen-Radius als Anteil der halben Box-Breite.
const NOT_BUBBLE_RADIUS: f32 = 0.3182;

/// Kubisches Segment als Geradenstücke an `points` angehängt (ohne `from`).
fn sample_cubic(points: &mut Vec<Vec2>, from: Vec2, c1: Vec2, c2: Vec2, to: Vec2) {
    const STEPS: usize = 12;
    for i in 1..=STEPS {
        let t = i as f32 / STEPS as f32;
        let u = 1.0 - t;
        let p = from * (u * u * u)
            + c1 * (3.0 * u * u * t)
            + c2 * (3.0 * u * t * t)
            + to * (t * t * t);
        points.push(p);
    }
}

/// AND-Umriss (schemalib-and2): flacher Rücken, halbrunde Front.
fn and_outline() -> Vec<Vec2> {
    let mut p = vec![
        Vec2::new(-0.0333, 1.0),
        Vec2::new(-1.0, 1.0),
        Vec2::new(-1.0, -1.0),
        Vec2::new(-0.0333, -1.0),
    ];
    sample_cubic(
        &mut p,
        Vec2::new(-0.0333, -1.0),
        Vec2::new(0.5667, -1.0),
        Vec2::new(1.0, -0.6),
        Vec2::new(1.0, 0.0),
    );
    sample_cubic(
        &mut p,
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 0.6),
        Vec2::new(0.4667, 1.0),
        Vec2::new(-0.0333, 1.0),
    );
    // Endpunkt doppelt zum Start, closed_line schließt selbst
    p.pop();
    p
}

/// OR-Umriss (schemalib-or2): konkaver Rücken, spitze Front.
fn or_outline() -> Vec<Vec2> {
    let mut p = vec![Vec2::new(-1.0, 1.0), Vec2::new(-0.5333, 1.0)];
    sample_cubic(
        &mut p,
        Vec2::new(-0.5333, 1.0),
        Vec2::new(0.2333, 1.0),
        Vec2::new(0.5667, 0.9667),
        Vec2::new(1.0, 0.0),
    );
    sample_cubic(
        &mut p,
        Vec2::new(1.0, 0.0),
        Vec2::new(0.5667, -0.9667),
        Vec2::new(0.2333, -1.0),
        Vec2::new(-0.5333, -1.0),
    );
    p.push(Vec2::new(-1.0, -1.0));
    sample_cubic(
        &mut p,
        Vec2::new(-1.0, -1.0),
        Vec2::new(-0.5333, -0.3),
        Vec2::new(-0.5333, 0.3),
        Vec2::new(-1.0, 1.0),
    );
    p.pop();
    p
}

/// XOR-Rückenbogen, leicht hinter die Box versetzt.
fn xor_back() -> Vec<Vec2> {
    let mut p = vec![Vec2::new(-1.2667, -1.0)];
    sample_cubic(
        &mut p,
        Vec2::new(-1.2667, -1.0),
        Vec2::new(-0.8, -0.3),
        Vec2::new(-0.8, 0.3),
        Vec2::new(-1.2667, 1.0),
    );
    p
}

/// NOT-Dreieck; die Blase kommt separat als Kreis.
fn not_triangle() -> Vec<Vec2> {
    vec![
        Vec2::new(0.3636, 0.0),
        Vec2::new(-1.0, -1.0),
        Vec2::new(-1.0, 1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion_clamps_channels() {
        let c = color32([1.5, -0.2, 0.5, 1.0]);
        assert_eq!(c.r(), 255);
        assert_eq!(c.g(), 0);
        assert_eq!(c.b(), 128);
        assert_eq!(c.a(), 255);
    }

    #[test]
    fn test_closed_outlines_stay_in_unit_box() {
        for outline in [and_outline(), or_outline(), not_triangle()] {
            for p in outline {
                assert!(p.x.abs() <= 1.0 + 1e-4, "x außerhalb: {p:?}");
                assert!(p.y.abs() <= 1.0 + 1e-4, "y außerhalb: {p:?}");
            }
        }
    }

    #[test]
    fn test_xor_back_sits_behind_the_box() {
        for p in xor_back() {
            assert!(p.x < -0.75, "Bogen gehört hinter den Rücken: {p:?}");
        }
    }

    #[test]
    fn test_text_bounds_measures_via_galley() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let camera = Camera::new();
                let theme = Theme::default();
                let renderer = EguiRenderer::new(ui.painter(), ui.max_rect(), &camera, &theme);

                let bounds =
                    renderer.text_bounds(Vec2::ZERO, "AND", HAlign::Left, VAlign::Middle, 12.0);
                assert!(bounds.half_size.x > 0.0);
                assert!(bounds.half_size.y > 0.0);
                // Left wächst vom Anker nach rechts
                assert!(bounds.min().x >= -1e-3);

                let wider =
                    renderer.text_bounds(Vec2::ZERO, "ANDAND", HAlign::Left, VAlign::Middle, 12.0);
                assert!(wider.half_size.x > bounds.half_size.x);
            });
        });
    }
}
