//! Editor-Fassade: bündelt Schaltplan, View, Kamera, Edit-Log und
//! Zeiger-Maschine zu einem Frame-Schritt.
//!
//! Reihenfolge pro Frame: Tastatur-Intents, Tastatur-Pan, Scroll-Zoom,
//! danach einmalig die Zeiger-Weltposition, Hover, Maschinen-Schritt,
//! Event-Abarbeitung und Neu-Verdrahtung. Die Weltposition wird nach
//! den Kamera-Änderungen berechnet, sonst greift die Maschine auf den
//! Stand des Vorframes zu.

use flagset::FlagSet;
use glam::Vec2;

use crate::core::{Camera, Circuit, DescriptorId, EntityId};
use crate::render::Renderer;
use crate::shared::Theme;
use crate::ui::keyboard::collect_intents;
use crate::ui::pointer::{self, PointerContext, PointerMachine, PointerState};
use crate::ui::FrameInput;
use crate::view::{draw_view, View};

use super::command::EditCommand;
use super::edit_log::EditLog;
use super::handlers::apply_command;
use super::intent::EditorIntent;

/// Tiefe des Edit-Logs.
const EDIT_LOG_DEPTH: usize = 200;

/// Der komplette Editor-Zustand hinter einem Frame-Interface.
pub struct Editor {
    pub circuit: Circuit,
    pub view: View,
    pub camera: Camera,
    pub theme: Theme,
    log: EditLog,
    machine: PointerMachine,
    /// Zeiger-Weltposition des letzten Frames (für das Verdrahtungs-Overlay)
    pointer_world: Vec2,
}

impl Editor {
    pub fn new(theme: Theme) -> Self {
        Self {
            circuit: Circuit::new(),
            view: View::new(),
            camera: Camera::new(),
            theme,
            log: EditLog::new_with_capacity(EDIT_LOG_DEPTH),
            machine: PointerMachine::new(),
            pointer_world: Vec2::ZERO,
        }
    }

    pub fn machine(&self) -> &PointerMachine {
        &self.machine
    }

    pub fn log(&self) -> &EditLog {
        &self.log
    }

    pub fn pointer_world(&self) -> Vec2 {
        self.pointer_world
    }

    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    // ── Frame-Schritt ───────────────────────────────────────────────────

    /// Verarbeitet einen Frame an Eingaben und bringt alle abgeleiteten
    /// Zustände auf Stand. `dt` in Sekunden, der Renderer misst Labels
    /// für das Layout neuer Bauteile.
    pub fn update(&mut self, input: &FrameInput, dt: f32, renderer: &dyn Renderer) {
        for intent in collect_intents(input) {
            self.handle_intent(intent);
        }

        self.pan_with_keys(input, dt);
        if input.scroll.y.abs() > 0.001 {
            self.camera.zoom_around(input.pointer_screen, input.scroll.y);
        }

        self.pointer_world = self.camera.screen_to_world(input.pointer_screen);
        self.view
            .update_hover(&self.circuit, &self.theme, self.pointer_world);

        let mut ctx = PointerContext {
            circuit: &mut self.circuit,
            view: &mut self.view,
            camera: &mut self.camera,
            theme: &self.theme,
            log: &mut self.log,
        };
        self.machine.update(input, self.pointer_world, &mut ctx);
        // Zurück in `Up` heißt Geste beendet: ab hier kein Zusammenfassen
        // mehr mit dem obersten Log-Eintrag
        if self.machine.state() == PointerState::Up && !self.machine.trace().is_empty() {
            self.log.seal();
        }

        self.view.sync(&mut self.circuit, &self.theme, renderer);
        self.view.route(&mut self.circuit);
    }

    /// WASD-Pan: Richtung in Screen-Pixeln pro Sekunde, in Welt-Einheiten
    /// umgerechnet, damit die gefühlte Geschwindigkeit zoomunabhängig ist.
    fn pan_with_keys(&mut self, input: &FrameInput, dt: f32) {
        let mut direction = Vec2::ZERO;
        if input.held.w {
            direction.y += 1.0;
        }
        if input.held.s {
            direction.y -= 1.0;
        }
        if input.held.a {
            direction.x += 1.0;
        }
        if input.held.d {
            direction.x -= 1.0;
        }
        if direction == Vec2::ZERO {
            return;
        }
        let step = direction * self.theme.pan_speed * dt;
        self.camera.pan_by(self.camera.scale_screen_to_world(step));
    }

    // ── Intents ─────────────────────────────────────────────────────────

    pub fn handle_intent(&mut self, intent: EditorIntent) {
        log::debug!("Intent: {intent:?}");
        match intent {
            EditorIntent::Undo => self.undo(),
            EditorIntent::Redo => self.redo(),
            EditorIntent::ToggleDebug => self.view.debug_mode = !self.view.debug_mode,
            EditorIntent::DeleteSelected => self.delete_selected(),
            EditorIntent::Cancel => self.cancel(),
            EditorIntent::StartPlacing { desc } => self.toggle_placing(desc),
        }
    }

    /// Macht den jüngsten Log-Eintrag rückgängig.
    ///
    /// Der Redo-Stapel bekommt das erneut invertierte Inverse: beim
    /// Anwenden kann `apply_command` verwaiste Schlüssel durch frische
    /// ersetzt haben, und nur so zeigen beide Stapel danach auf die
    /// lebenden Entities.
    pub fn undo(&mut self) {
        let Some(command) = self.log.pop_undo() else {
            return;
        };
        let mut inverse = command.inverted();
        apply_command(&mut self.circuit, &mut self.view, &mut inverse);
        self.log.push_redo(inverse.inverted());
    }

    /// Wendet den jüngsten Redo-Eintrag erneut an.
    pub fn redo(&mut self) {
        let Some(mut command) = self.log.pop_redo() else {
            return;
        };
        apply_command(&mut self.circuit, &mut self.view, &mut command);
        self.log.push_undo(command);
    }

    /// Löscht die Selektion: jedes Item wird erst deselektiert und dann
    /// gelöscht, beides als eigene Log-Einträge, vom jüngsten Eintrag her.
    fn delete_selected(&mut self) {
        while let Some(item) = self.view.selection.last().copied() {
            self.commit(EditCommand::DeselectItem { item: Some(item) });
            match item {
                EntityId::Component(key) => {
                    if let Some((desc, center)) = self
                        .circuit
                        .component(key)
                        .map(|c| (c.desc, c.bounds.center))
                    {
                        self.commit(EditCommand::DeleteComponent {
                            component: key,
                            desc,
                            center,
                        });
                    }
                }
                EntityId::Waypoint(key) => {
                    if let Some((net, position)) =
                        self.circuit.waypoint(key).map(|w| (w.net, w.position))
                    {
                        self.commit(EditCommand::DeleteWaypoint {
                            waypoint: key,
                            net,
                            position,
                        });
                    }
                }
                _ => {}
            }
        }
        self.log.seal();
    }

    /// Escape: bricht zuerst eine laufende Platzierung ab, sonst löst es
    /// die Selektion auf.
    fn cancel(&mut self) {
        if self.machine.placing().is_some() {
            self.machine.stop_placing(&mut self.circuit);
            return;
        }
        let mut ctx = PointerContext {
            circuit: &mut self.circuit,
            view: &mut self.view,
            camera: &mut self.camera,
            theme: &self.theme,
            log: &mut self.log,
        };
        pointer::clear_selection(&mut ctx);
        self.log.seal();
    }

    /// Palette-Klick: gleicher Typ nochmal beendet die Platzierung,
    /// alles andere armiert sie (neu).
    fn toggle_placing(&mut self, desc: DescriptorId) {
        if self.machine.placing().map(|p| p.desc) == Some(desc) {
            self.machine.stop_placing(&mut self.circuit);
        } else {
            self.machine.start_placing(&mut self.circuit, desc);
        }
    }

    fn commit(&mut self, command: EditCommand) {
        let mut command = command;
        apply_command(&mut self.circuit, &mut self.view, &mut command);
        self.log.record(command);
    }

    // ── Zeichnen ────────────────────────────────────────────────────────

    /// Zeichnet den Editor-Zustand samt Verdrahtungs-Overlay vom
    /// Quell-Port zum Zeiger.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        draw_view(&self.view, &self.circuit, &self.theme, renderer);
        if let Some(port) = self.machine.wiring_source() {
            if let Some(from) = self.circuit.port_world_position(port) {
                renderer.draw_wire(&[from, self.pointer_world], FlagSet::default());
            }
        }
    }
}
