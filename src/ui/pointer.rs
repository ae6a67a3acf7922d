//! Zeiger-Zustandsmaschine: rohe Maus-Eingaben → Editier-Kommandos.
//!
//! Pro Frame läuft die Übergangstabelle bis zum Fixpunkt; Prädikate
//! (bewegt, selektiert, in der Selektion) werden in jeder Iteration neu
//! berechnet. Aktionen passieren ausschließlich beim Verlassen oder
//! Betreten eines Zustands oder im Kontinuierlich-Schritt des
//! Endzustands. Eine Links-Druck-Flanke wird vom ersten Übergang
//! verbraucht, der sie benutzt; ohne das würde ein einzelner Klick etwa
//! `ClickPort` sofort in die Klick-Verdrahtung durchreichen.

use glam::Vec2;

use crate::app::command::EditCommand;
use crate::app::edit_log::EditLog;
use crate::app::handlers;
use crate::core::{Box2, Camera, Circuit, ComponentKey, DescriptorId, NetKey, PortKey};
use crate::shared::Theme;
use crate::ui::input::FrameInput;
use crate::view::View;

/// Benannte Zustände der Zeiger-Maschine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerState {
    /// Ruhezustand, keine Taste
    Up,
    /// Linke Taste unten über Leerem, Geste noch offen
    Down,
    /// Rechte Taste verschiebt die Kamera
    Pan,
    /// Klick über Leerem ohne bestehende Selektion
    Click,
    /// Klick über Leerem löst die bestehende Selektion auf
    Deselect,
    /// Auswahlrechteck wird aufgezogen
    SelectArea,
    /// Item unter dem Zeiger angeklickt
    SelectOne,
    /// Selektion folgt dem Zeiger
    MoveSelection,
    /// Port angeklickt; hält die Verdrahtungs-Geste offen
    ClickPort,
    /// Zug-Verdrahtung wird beim Loslassen aufgelöst
    DragWiring,
    /// Zweiter Druck auf den Port: Klick-Verdrahtung beginnt
    StartClickWiring,
    /// Klick-Verdrahtung: Leitung folgt dem Zeiger ohne gehaltene Taste
    ClickWiring,
    /// Verdrahtung endet auf einem Ziel-Port
    ConnectPort,
    /// Verdrahtung endet im Leeren als Wegpunkt
    FloatingWire,
    /// Platzhalter folgt dem Zeiger
    AddingComponent,
    /// Platzierung wird festgeschrieben
    AddComponent,
}

/// Laufende Platzierung: Descriptor und Platzhalter-Bauteil.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub desc: DescriptorId,
    pub component: ComponentKey,
}

/// Gebündelte Zugriffe für einen Maschinen-Schritt.
pub struct PointerContext<'a> {
    pub circuit: &'a mut Circuit,
    pub view: &'a mut View,
    pub camera: &'a mut Camera,
    pub theme: &'a Theme,
    pub log: &'a mut EditLog,
}

/// Wendet ein Kommando an und hält es im Edit-Log fest.
pub(crate) fn commit(ctx: &mut PointerContext, command: EditCommand) {
    let mut command = command;
    handlers::apply_command(ctx.circuit, ctx.view, &mut command);
    ctx.log.record(command);
}

/// Löst eine aktive Auswahlbox in ein Deselect-Area-Kommando auf.
fn resolve_selection_box(ctx: &mut PointerContext) -> bool {
    if ctx.view.selection_box.half_size.length_squared() > 0.001 {
        let area = ctx.view.selection_box;
        commit(ctx, EditCommand::DeselectArea { area });
        true
    } else {
        false
    }
}

/// Deselektiert Item für Item vom jüngsten Eintrag her, jeder Schritt als
/// eigener Log-Eintrag.
fn pop_selection(ctx: &mut PointerContext) {
    while let Some(last) = ctx.view.selection.last().copied() {
        commit(ctx, EditCommand::DeselectItem { item: Some(last) });
    }
}

/// Hebt die komplette Selektion invertierbar auf: erst die Auswahlbox,
/// sonst alle Items einzeln.
pub(crate) fn clear_selection(ctx: &mut PointerContext) {
    if !resolve_selection_box(ctx) {
        pop_selection(ctx);
    }
}

/// Die Zeiger-Zustandsmaschine.
pub struct PointerMachine {
    state: PointerState,
    /// Zeiger-Weltposition beim Verlassen von `Up` (Gesten-Anker)
    drag_origin: Vec2,
    /// Quell-Port der laufenden Verdrahtung
    wiring_from: Option<PortKey>,
    /// Laufende Platzierung
    placing: Option<Placement>,
    /// Im letzten `update` betretene Zustände
    trace: Vec<PointerState>,
}

impl Default for PointerMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerMachine {
    pub fn new() -> Self {
        Self {
            state: PointerState::Up,
            drag_origin: Vec2::ZERO,
            wiring_from: None,
            placing: None,
            trace: Vec::new(),
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Zustände, die dieser `update`-Aufruf betreten hat (in Reihenfolge).
    pub fn trace(&self) -> &[PointerState] {
        &self.trace
    }

    pub fn placing(&self) -> Option<Placement> {
        self.placing
    }

    /// Quell-Port der Verdrahtung, solange eine Verdrahtungs-Geste läuft
    /// (für das Overlay von Port zu Zeiger).
    pub fn wiring_source(&self) -> Option<PortKey> {
        match self.state {
            PointerState::ClickPort
            | PointerState::DragWiring
            | PointerState::StartClickWiring
            | PointerState::ClickWiring => self.wiring_from,
            _ => None,
        }
    }

    // ── Platzierungs-Lebenszyklus ───────────────────────────────────────

    /// Armiert die Platzierung: legt den Platzhalter an und springt nach
    /// `AddingComponent`. Eine laufende Platzierung wird ersetzt.
    pub fn start_placing(&mut self, circuit: &mut Circuit, desc: DescriptorId) {
        if let Some(placement) = self.placing.take() {
            circuit.delete_component(placement.component);
        }
        let component = circuit.add_component(desc, Vec2::ZERO);
        self.placing = Some(Placement { desc, component });
        log::debug!("Platzierung armiert: {desc:?}");
        self.state = PointerState::AddingComponent;
    }

    /// Bricht die Platzierung ab: löscht den Platzhalter und springt
    /// zurück nach `Up`.
    pub fn stop_placing(&mut self, circuit: &mut Circuit) {
        if let Some(placement) = self.placing.take() {
            circuit.delete_component(placement.component);
            log::debug!("Platzierung abgebrochen");
        }
        self.state = PointerState::Up;
    }

    // ── Frame-Schritt ───────────────────────────────────────────────────

    /// Ein Maschinen-Schritt: Übergänge bis zum Fixpunkt, danach der
    /// Kontinuierlich-Schritt des Endzustands.
    pub fn update(&mut self, input: &FrameInput, world_mouse: Vec2, ctx: &mut PointerContext) {
        self.trace.clear();
        let mut left_pressed = input.left_pressed;

        loop {
            let Some(next) = self.next_state(input, world_mouse, ctx, &mut left_pressed) else {
                break;
            };
            log::debug!("Zeiger: {:?} → {next:?}", self.state);
            self.exit_state(world_mouse, ctx);
            self.enter_state(next, input, world_mouse, ctx);
            self.state = next;
            self.trace.push(next);
        }

        self.continuous(input, world_mouse, ctx);
    }

    /// Übergangstabelle; Bedingungen in Zeilen-Reihenfolge, erster
    /// Treffer gewinnt. `None` heißt: Fixpunkt erreicht.
    fn next_state(
        &self,
        input: &FrameInput,
        world_mouse: Vec2,
        ctx: &PointerContext,
        left_pressed: &mut bool,
    ) -> Option<PointerState> {
        let threshold = ctx.theme.move_threshold_world(ctx.camera.zoom);
        let moved = world_mouse.distance_squared(self.drag_origin) > threshold * threshold;
        let selected = ctx.view.has_selection();
        let over_port = ctx.view.hovered_port.is_some();
        let over_item = ctx.view.hovered_item.is_some();
        let left = input.left_down;
        let right = input.right_down;

        match self.state {
            PointerState::Up => {
                if left {
                    *left_pressed = false;
                    if ctx.view.in_selection(ctx.circuit, ctx.theme, world_mouse) {
                        Some(PointerState::MoveSelection)
                    } else if over_port {
                        Some(PointerState::ClickPort)
                    } else if over_item {
                        Some(PointerState::SelectOne)
                    } else {
                        Some(PointerState::Down)
                    }
                } else if right {
                    Some(PointerState::Pan)
                } else {
                    None
                }
            }
            PointerState::Down => {
                if !left {
                    if selected {
                        Some(PointerState::Deselect)
                    } else {
                        Some(PointerState::Click)
                    }
                } else if moved && !selected {
                    Some(PointerState::SelectArea)
                } else {
                    None
                }
            }
            PointerState::Pan => (!right).then_some(PointerState::Up),
            PointerState::Click
            | PointerState::Deselect
            | PointerState::SelectArea
            | PointerState::MoveSelection
            | PointerState::ConnectPort
            | PointerState::FloatingWire => (!left).then_some(PointerState::Up),
            PointerState::SelectOne => {
                if !left {
                    Some(PointerState::Up)
                } else if moved {
                    Some(PointerState::MoveSelection)
                } else {
                    None
                }
            }
            PointerState::ClickPort => {
                if *left_pressed {
                    *left_pressed = false;
                    Some(PointerState::StartClickWiring)
                } else if !left && moved {
                    Some(PointerState::DragWiring)
                } else {
                    None
                }
            }
            PointerState::DragWiring => {
                if !left {
                    if over_port {
                        Some(PointerState::ConnectPort)
                    } else {
                        Some(PointerState::FloatingWire)
                    }
                } else {
                    None
                }
            }
            PointerState::StartClickWiring => (!left).then_some(PointerState::ClickWiring),
            PointerState::ClickWiring => {
                if *left_pressed {
                    *left_pressed = false;
                    if over_port {
                        Some(PointerState::ConnectPort)
                    } else {
                        Some(PointerState::FloatingWire)
                    }
                } else {
                    None
                }
            }
            PointerState::AddingComponent => {
                if *left_pressed {
                    *left_pressed = false;
                    Some(PointerState::AddComponent)
                } else {
                    None
                }
            }
            PointerState::AddComponent => (!left).then_some(PointerState::AddingComponent),
        }
    }

    fn exit_state(&mut self, world_mouse: Vec2, ctx: &mut PointerContext) {
        match self.state {
            PointerState::Up => {
                self.drag_origin = world_mouse;
            }
            PointerState::AddComponent => {
                self.commit_placement(world_mouse, ctx);
            }
            _ => {}
        }
    }

    fn enter_state(
        &mut self,
        next: PointerState,
        input: &FrameInput,
        world_mouse: Vec2,
        ctx: &mut PointerContext,
    ) {
        match next {
            PointerState::SelectOne => {
                if !resolve_selection_box(ctx) && !input.modifiers.shift {
                    pop_selection(ctx);
                }
                let item = ctx.view.hovered_item;
                commit(ctx, EditCommand::SelectItem { item });
                ctx.view.selection_center = ctx.view.selection_center_of(ctx.circuit);
            }
            PointerState::Deselect => {
                clear_selection(ctx);
            }
            PointerState::ClickPort => {
                self.wiring_from = ctx.view.hovered_port;
            }
            PointerState::ConnectPort => {
                self.connect_to_hovered_port(ctx);
            }
            PointerState::FloatingWire => {
                self.drop_floating_wire(world_mouse, ctx);
            }
            _ => {}
        }
    }

    /// Kontinuierliche Aktionen des Endzustands, einmal pro Frame.
    fn continuous(&mut self, input: &FrameInput, world_mouse: Vec2, ctx: &mut PointerContext) {
        match self.state {
            PointerState::Pan => {
                ctx.camera.pan_by(world_mouse - self.drag_origin);
            }
            PointerState::MoveSelection => {
                let delta = world_mouse - self.drag_origin;
                if delta.length_squared() > 0.01 {
                    let old_center = ctx.view.selection_center;
                    commit(
                        ctx,
                        EditCommand::MoveSelection {
                            old_center,
                            new_center: old_center + delta,
                            snap: !input.modifiers.ctrl,
                        },
                    );
                    // Anker nachziehen, damit die Emission inkrementell bleibt
                    self.drag_origin += delta;
                }
            }
            PointerState::SelectArea => {
                let area = Box2::from_corners(self.drag_origin, world_mouse);
                ctx.view.selection_center = if ctx.view.selection.is_empty() {
                    area.center
                } else {
                    ctx.view.selection_center_of(ctx.circuit)
                };
                commit(ctx, EditCommand::SelectArea { area });
            }
            PointerState::AddingComponent => {
                if let Some(placement) = self.placing {
                    ctx.circuit.move_component_to(placement.component, world_mouse);
                }
            }
            _ => {}
        }
    }

    // ── Gesten-Abschlüsse ───────────────────────────────────────────────

    /// Schreibt den Platzhalter als echtes Bauteil fest und armiert sofort
    /// einen neuen desselben Typs.
    fn commit_placement(&mut self, world_mouse: Vec2, ctx: &mut PointerContext) {
        let Some(placement) = self.placing else {
            return;
        };
        let center = ctx
            .circuit
            .component(placement.component)
            .map_or(world_mouse, |c| c.bounds.center);
        commit(
            ctx,
            EditCommand::AddComponent {
                component: placement.component,
                desc: placement.desc,
                center,
            },
        );
        let component = ctx.circuit.add_component(placement.desc, Vec2::ZERO);
        self.placing = Some(Placement {
            desc: placement.desc,
            component,
        });
    }

    /// Verbindet Quell- und Ziel-Port über ein gemeinsames Netz.
    fn connect_to_hovered_port(&mut self, ctx: &mut PointerContext) {
        let Some(source) = self.wiring_from.take() else {
            return;
        };
        let Some(target) = ctx.view.hovered_port else {
            return;
        };
        if source == target {
            return;
        }
        let net = match (ctx.circuit.port_net(source), ctx.circuit.port_net(target)) {
            (Some(net), _) => net,
            (None, Some(net)) => net,
            (None, None) => ctx.circuit.add_net(),
        };
        attach_port(ctx.circuit, net, source);
        attach_port(ctx.circuit, net, target);
        log::debug!("Ports über Netz {net:?} verbunden");
    }

    /// Lässt die Leitung im Leeren enden: Netz (falls nötig) anlegen,
    /// Quell-Endpunkt sichern, Wegpunkt an der Absetz-Position.
    fn drop_floating_wire(&mut self, drop_position: Vec2, ctx: &mut PointerContext) {
        let Some(source) = self.wiring_from.take() else {
            return;
        };
        let net = match ctx.circuit.port_net(source) {
            Some(net) => net,
            None => {
                let net = ctx.circuit.add_net();
                let _ = ctx.circuit.add_endpoint(net, source);
                net
            }
        };
        let _ = ctx.circuit.add_waypoint(net, drop_position);
    }
}

/// Hängt den Port als Endpunkt an das Netz, falls er dort noch fehlt.
fn attach_port(circuit: &mut Circuit, net: NetKey, port: PortKey) {
    let attached = circuit
        .endpoints_of(net)
        .any(|(_, endpoint)| endpoint.port == port);
    if !attached {
        let _ = circuit.add_endpoint(net, port);
    }
}
