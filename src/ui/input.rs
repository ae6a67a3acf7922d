//! Frame-Input: Schnappschuss der rohen Eingaben eines Frames.
//!
//! Der Editor-Kern arbeitet ausschließlich auf [`FrameInput`]; nur das
//! Einsammeln aus dem egui-Zustand kennt die Shell. Integrations-Tests
//! bauen die Schnappschüsse direkt und treiben den Editor Frame für Frame.

use glam::Vec2;

/// egui liefert Scroll in Punkten; eine Rad-Raste entspricht etwa dieser
/// Punktzahl. Der Zoom rechnet in Rasten.
const SCROLL_POINTS_PER_LINE: f32 = 50.0;

/// Modifier-Tasten des Frames.
///
/// `command` ist der Shortcut-Modifier (Ctrl, auf macOS Cmd); `ctrl` die
/// rohe Ctrl-Taste, die den Raster-Fang beim Verschieben unterdrückt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub shift: bool,
    pub ctrl: bool,
    pub command: bool,
}

/// Gehaltene Tasten (kontinuierliches Panning).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
}

/// In diesem Frame gedrückte Tasten (Flanken).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressedKeys {
    pub z: bool,
    pub y: bool,
    pub space: bool,
    pub escape: bool,
    pub delete: bool,
}

/// Rohe Eingaben eines Frames in Bildschirm-Koordinaten.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Zeiger-Position relativ zur linken oberen Viewport-Ecke
    pub pointer_screen: Vec2,
    /// Scroll-Delta in Rad-Rasten (y zoomt)
    pub scroll: Vec2,
    /// Linke Maustaste gehalten
    pub left_down: bool,
    /// Linke Maustaste in diesem Frame gedrückt
    pub left_pressed: bool,
    /// Rechte Maustaste gehalten
    pub right_down: bool,
    pub modifiers: ModifierState,
    pub held: HeldKeys,
    pub pressed: PressedKeys,
}

/// Sammelt den Frame-Input aus dem egui-Zustand des Viewports ein.
///
/// Verlässt der Zeiger das Fenster, bleibt die zuletzt bekannte Position
/// stehen, damit laufende Gesten nicht springen.
pub fn collect_frame_input(
    ui: &egui::Ui,
    response: &egui::Response,
    last_pointer_screen: Vec2,
) -> FrameInput {
    ui.input(|i| {
        let pointer_screen = i
            .pointer
            .hover_pos()
            .map(|pos| {
                let local = pos - response.rect.min;
                Vec2::new(local.x, local.y)
            })
            .unwrap_or(last_pointer_screen);

        FrameInput {
            pointer_screen,
            scroll: Vec2::new(i.raw_scroll_delta.x, i.raw_scroll_delta.y)
                / SCROLL_POINTS_PER_LINE,
            left_down: i.pointer.primary_down(),
            left_pressed: i.pointer.primary_pressed(),
            right_down: i.pointer.secondary_down(),
            modifiers: ModifierState {
                shift: i.modifiers.shift,
                ctrl: i.modifiers.ctrl,
                command: i.modifiers.command,
            },
            held: HeldKeys {
                w: i.key_down(egui::Key::W),
                a: i.key_down(egui::Key::A),
                s: i.key_down(egui::Key::S),
                d: i.key_down(egui::Key::D),
            },
            pressed: PressedKeys {
                z: i.key_pressed(egui::Key::Z),
                y: i.key_pressed(egui::Key::Y),
                space: i.key_pressed(egui::Key::Space),
                escape: i.key_pressed(egui::Key::Escape),
                delete: i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frame(raw_input: egui::RawInput, last_pointer: Vec2) -> FrameInput {
        let ctx = egui::Context::default();
        let mut collected = FrameInput::default();
        let _ = ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = ui.allocate_rect(ui.max_rect(), egui::Sense::click_and_drag());
                collected = collect_frame_input(ui, &response, last_pointer);
            });
        });
        collected
    }

    #[test]
    fn test_pointer_and_buttons_are_collected() {
        let mut raw_input = egui::RawInput::default();
        raw_input
            .events
            .push(egui::Event::PointerMoved(egui::pos2(120.0, 80.0)));
        raw_input.events.push(egui::Event::PointerButton {
            pos: egui::pos2(120.0, 80.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::default(),
        });

        let collected = run_frame(raw_input, Vec2::ZERO);
        assert!(collected.left_down);
        assert!(collected.left_pressed);
        assert!(!collected.right_down);
        // Position ist Viewport-relativ, nie größer als die globale
        assert!(collected.pointer_screen.x <= 120.0);
        assert!(collected.pointer_screen.y <= 80.0);
    }

    #[test]
    fn test_missing_pointer_keeps_last_position() {
        let collected = run_frame(egui::RawInput::default(), Vec2::new(33.0, 44.0));
        assert_eq!(collected.pointer_screen, Vec2::new(33.0, 44.0));
    }

    #[test]
    fn test_scroll_is_normalized_to_wheel_lines() {
        let mut raw_input = egui::RawInput::default();
        raw_input.events.push(egui::Event::MouseWheel {
            unit: egui::MouseWheelUnit::Point,
            delta: egui::vec2(0.0, 100.0),
            modifiers: egui::Modifiers::default(),
        });

        let collected = run_frame(raw_input, Vec2::ZERO);
        assert!((collected.scroll.y - 2.0).abs() < 0.01);
    }
}
