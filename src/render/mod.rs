//! Zeichen-Abstraktion für die View-Traversierung.
//!
//! Die View ruft ausschließlich [`Renderer`]-Primitive auf; das konkrete
//! Backend ist austauschbar: [`painter::EguiRenderer`] zeichnet über den
//! egui-Painter, [`recorder::RecordingRenderer`] protokolliert Aufrufe für
//! Tests und Benchmarks. `text_bounds` ist zugleich die Mess-Schnittstelle
//! des Layouts, damit Bauteil-Größen ohne Fenster berechenbar bleiben.

pub mod painter;
pub mod recorder;

use flagset::{flags, FlagSet};
use glam::Vec2;

use crate::core::{Box2, SymbolShape};

pub use painter::EguiRenderer;
pub use recorder::{DrawCall, RecordingRenderer};

flags! {
    /// Zustands-Flags eines Zeichen-Primitivs.
    pub enum DrawFlag: u8 {
        /// Unter dem Mauszeiger
        Hovered,
        /// Teil der aktuellen Selektion
        Selected,
        /// Debug-Hervorhebung (Wurzel-Leitungen)
        Debug,
    }
}

/// Horizontale Ausrichtung eines Text-Ankers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertikale Ausrichtung eines Text-Ankers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// Label-Art; steuert Farbe und Sichtbarkeits-Regeln.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Typ-Label ("AND", "NOT", ...)
    Type,
    /// Namens-Label ("U1", ...)
    Name,
    /// Port-Label ("A", "Y", ...)
    Port,
}

/// Zeichen-Backend. Alle Koordinaten sind Welt-Koordinaten; die
/// Kamera-Transformation ist Sache des Backends.
pub trait Renderer {
    /// Misst die Box eines Textes relativ zum Ankerpunkt `pos`.
    fn text_bounds(
        &self,
        pos: Vec2,
        text: &str,
        halign: HAlign,
        valign: VAlign,
        font_size: f32,
    ) -> Box2;

    /// Auswahlrechteck (Füllung + Rand).
    fn draw_selection_box(&mut self, bounds: Box2, flags: FlagSet<DrawFlag>);

    /// Bauteil-Symbol: Gatter-Form oder gerundetes Rechteck.
    fn draw_symbol(&mut self, bounds: Box2, shape: SymbolShape, flags: FlagSet<DrawFlag>);

    /// Port-Quadrat um seinen Welt-Mittelpunkt.
    fn draw_port(&mut self, center: Vec2, flags: FlagSet<DrawFlag>);

    /// Text-Label in seiner Welt-Box.
    fn draw_label(&mut self, bounds: Box2, text: &str, kind: LabelKind, flags: FlagSet<DrawFlag>);

    /// Leitungszug über seine Welt-Vertices.
    fn draw_wire(&mut self, vertices: &[Vec2], flags: FlagSet<DrawFlag>);

    /// Verzweigungspunkt (Junction-Dot).
    fn draw_junction(&mut self, pos: Vec2, flags: FlagSet<DrawFlag>);

    /// Wegpunkt-Markierung.
    fn draw_waypoint(&mut self, pos: Vec2, flags: FlagSet<DrawFlag>);
}

/// Legt eine Text-Box der Größe `size` gemäß Ausrichtung an den Anker.
///
/// `Left`/`Top` wachsen vom Anker nach rechts/unten, `Right`/`Bottom`
/// nach links/oben, `Center`/`Middle` zentrieren.
pub fn align_text_box(pos: Vec2, size: Vec2, halign: HAlign, valign: VAlign) -> Box2 {
    let half = size * 0.5;
    let center_x = match halign {
        HAlign::Left => pos.x + half.x,
        HAlign::Center => pos.x,
        HAlign::Right => pos.x - half.x,
    };
    let center_y = match valign {
        VAlign::Top => pos.y + half.y,
        VAlign::Middle => pos.y,
        VAlign::Bottom => pos.y - half.y,
    };
    Box2::new(Vec2::new(center_x, center_y), half)
}
