//! View-Zustand: Selektion, Hover und abgeleitete Leitungs-Geometrie.
//!
//! Die View besitzt alles, was aus dem Schaltplan abgeleitet wird:
//! Selektions- und Hover-Mengen, das Auswahlrechteck, den
//! Selektions-Mittelpunkt und die Leitungs-Puffer. Struktur-Events des
//! Schaltplans werden synchron abgearbeitet, damit vor dem Zeichnen
//! keine veralteten Referenzen übrig bleiben.

pub mod draw;
pub mod layout;
pub mod wires;

pub use draw::draw_view;
pub use layout::layout_component;
pub use wires::{route_nets, Wire};

use glam::Vec2;
use indexmap::IndexSet;

use crate::core::{Box2, Circuit, CircuitEvent, EntityId, PortKey};
use crate::render::Renderer;
use crate::shared::Theme;

/// Abgeleiteter Anzeige-Zustand über dem Schaltplan.
#[derive(Default)]
pub struct View {
    /// Selektierte Entities in Selektions-Reihenfolge
    pub selection: IndexSet<EntityId>,
    /// Entities mit Hover-Markierung (inkl. Netz bei Wegpunkt-Hover)
    pub hovered: IndexSet<EntityId>,
    /// Getroffenes Item unter dem Zeiger (letzter Treffer gewinnt)
    pub hovered_item: Option<EntityId>,
    /// Getroffener Port unter dem Zeiger
    pub hovered_port: Option<PortKey>,
    /// Aktives Auswahlrechteck (Halbgröße null = keins)
    pub selection_box: Box2,
    /// Mittelpunkt der Selektion (Anker für Verschiebungen)
    pub selection_center: Vec2,
    /// Debug-Hervorhebung von Wurzel-Leitungen
    pub debug_mode: bool,
    /// Leitungszüge aller Netze (geteilter Puffer)
    pub wires: Vec<Wire>,
    /// Vertices aller Leitungszüge (geteilter Puffer)
    pub vertices: Vec<Vec2>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Hover ───────────────────────────────────────────────────────────

    /// Berechnet Hover-Zustand für die aktuelle Zeiger-Position neu.
    ///
    /// Der Zeiger wird zu einer kleinen Box aufgeblasen; Bauteile und
    /// Ports testen Box-gegen-Box, Wegpunkte mit größerer Toleranz.
    /// Bei Überlappung gewinnt der letzte Treffer in Arena-Reihenfolge,
    /// Wegpunkte überstimmen Bauteile. Zwei Aufrufe mit gleicher Lage
    /// liefern identische Mengen.
    pub fn update_hover(&mut self, circuit: &Circuit, theme: &Theme, world_mouse: Vec2) {
        self.hovered.clear();
        self.hovered_item = None;
        self.hovered_port = None;

        let mouse_box = Box2::new(world_mouse, Vec2::splat(theme.mouse_fudge));

        for (component_key, component) in circuit.components() {
            if component.bounds.intersects(&mouse_box) {
                self.hovered_item = Some(EntityId::Component(component_key));
            }
            for (port_key, port) in circuit.ports_of(component_key) {
                let port_box = Box2::new(
                    component.bounds.center + port.position,
                    Vec2::splat(theme.port_width / 2.0),
                );
                if port_box.intersects(&mouse_box) {
                    self.hovered_port = Some(port_key);
                }
            }
        }

        for (waypoint_key, waypoint) in circuit.waypoints() {
            let waypoint_box = Box2::new(waypoint.position, Vec2::splat(theme.waypoint_fudge));
            if waypoint_box.intersects(&mouse_box) {
                self.hovered_item = Some(EntityId::Waypoint(waypoint_key));
            }
        }

        if let Some(item) = self.hovered_item {
            self.hovered.insert(item);
            // Wegpunkt-Hover hebt auch sein Netz hervor
            if let EntityId::Waypoint(waypoint_key) = item {
                if let Some(waypoint) = circuit.waypoint(waypoint_key) {
                    self.hovered.insert(EntityId::Net(waypoint.net));
                }
            }
        }
        if let Some(port_key) = self.hovered_port {
            self.hovered.insert(EntityId::Port(port_key));
        }
    }

    pub fn is_hovered(&self, id: EntityId) -> bool {
        self.hovered.contains(&id)
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selection.contains(&id)
    }

    // ── Selektions-Prädikate ────────────────────────────────────────────

    /// Gibt es eine Selektion (Items oder ein Auswahlrechteck)?
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty() || self.selection_box.half_size.length_squared() > 0.0
    }

    /// Liegt der Punkt in der Selektion? Erst das Auswahlrechteck, dann
    /// jedes selektierte Item; bricht beim ersten Treffer ab. Wegpunkte
    /// vergleichen die quadrierte Distanz direkt gegen die Toleranz.
    pub fn in_selection(&self, circuit: &Circuit, theme: &Theme, point: Vec2) -> bool {
        if self.selection_box.contains_point(point) {
            return true;
        }
        for id in &self.selection {
            match id {
                EntityId::Component(key) => {
                    if let Some(component) = circuit.component(*key) {
                        if component.bounds.contains_point(point) {
                            return true;
                        }
                    }
                }
                EntityId::Waypoint(key) => {
                    if let Some(waypoint) = circuit.waypoint(*key) {
                        if waypoint.position.distance_squared(point) < theme.waypoint_fudge {
                            return true;
                        }
                    }
                }
                _ => {}
            }
        }
        false
    }

    /// Mittelwert der Mittelpunkte aller selektierten Items.
    pub fn selection_center_of(&self, circuit: &Circuit) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;
        for id in &self.selection {
            match id {
                EntityId::Component(key) => {
                    if let Some(component) = circuit.component(*key) {
                        sum += component.bounds.center;
                        count += 1;
                    }
                }
                EntityId::Waypoint(key) => {
                    if let Some(waypoint) = circuit.waypoint(*key) {
                        sum += waypoint.position;
                        count += 1;
                    }
                }
                _ => {}
            }
        }
        if count > 0 {
            sum / count as f32
        } else {
            Vec2::ZERO
        }
    }

    // ── Selektions-Mutationen (von den Command-Handlern gerufen) ────────

    pub fn select_item(&mut self, id: EntityId) {
        self.selection.insert(id);
    }

    pub fn deselect_item(&mut self, id: EntityId) {
        self.selection.shift_remove(&id);
    }

    /// Setzt das Auswahlrechteck und selektiert alles darin:
    /// Bauteile per Box-Schnitt, Wegpunkte per Punkt-Test.
    pub fn apply_select_area(&mut self, circuit: &Circuit, area: Box2) {
        self.selection_box = area;
        self.selection.clear();
        for (component_key, component) in circuit.components() {
            if area.intersects(&component.bounds) {
                self.selection.insert(EntityId::Component(component_key));
            }
        }
        for (waypoint_key, waypoint) in circuit.waypoints() {
            if area.contains_point(waypoint.position) {
                self.selection.insert(EntityId::Waypoint(waypoint_key));
            }
        }
    }

    /// Löscht das Auswahlrechteck und deselektiert alles darin.
    pub fn apply_deselect_area(&mut self, circuit: &Circuit, area: Box2) {
        self.selection_box = Box2::ZERO;
        let mut dropped: Vec<EntityId> = Vec::new();
        for id in &self.selection {
            match id {
                EntityId::Component(key) => {
                    if let Some(component) = circuit.component(*key) {
                        if area.intersects(&component.bounds) {
                            dropped.push(*id);
                        }
                    }
                }
                EntityId::Waypoint(key) => {
                    if let Some(waypoint) = circuit.waypoint(*key) {
                        if area.contains_point(waypoint.position) {
                            dropped.push(*id);
                        }
                    }
                }
                _ => {}
            }
        }
        for id in dropped {
            self.selection.shift_remove(&id);
        }
    }

    /// Verschiebt alle selektierten Items um `delta`.
    pub fn translate_selected(&self, circuit: &mut Circuit, delta: Vec2) {
        for id in &self.selection {
            match id {
                EntityId::Component(key) => {
                    if let Some(center) = circuit.component(*key).map(|c| c.bounds.center) {
                        circuit.move_component_to(*key, center + delta);
                    }
                }
                EntityId::Waypoint(key) => {
                    if let Some(waypoint) = circuit.waypoint_mut(*key) {
                        waypoint.position += delta;
                    }
                }
                _ => {}
            }
        }
    }

    // ── Leitungen ───────────────────────────────────────────────────────

    /// Verdrahtet alle Netze neu in die eigenen Puffer.
    pub fn route(&mut self, circuit: &mut Circuit) {
        route_nets(circuit, &mut self.wires, &mut self.vertices);
    }

    // ── Struktur-Events ─────────────────────────────────────────────────

    /// Arbeitet alle aufgelaufenen Schaltplan-Events ab: Layout für neue
    /// Bauteile, Bereinigung von Selektion und Hover bei Löschungen.
    pub fn sync(&mut self, circuit: &mut Circuit, theme: &Theme, renderer: &dyn Renderer) {
        for event in circuit.drain_events() {
            match event {
                CircuitEvent::ComponentAdded { component } => {
                    layout_component(circuit, theme, renderer, component);
                }
                CircuitEvent::ComponentRemoved { component, ports } => {
                    self.purge(EntityId::Component(component));
                    for port in ports {
                        self.purge(EntityId::Port(port));
                    }
                }
                CircuitEvent::WaypointAdded { .. } => {}
                CircuitEvent::WaypointRemoved { waypoint } => {
                    self.purge(EntityId::Waypoint(waypoint));
                }
                CircuitEvent::NetRemoved { net } => {
                    self.purge(EntityId::Net(net));
                }
            }
        }
    }

    /// Entfernt eine Entity aus Selektion und Hover.
    pub fn purge(&mut self, id: EntityId) {
        self.selection.shift_remove(&id);
        self.hovered.shift_remove(&id);
        if self.hovered_item == Some(id) {
            self.hovered_item = None;
        }
        if let EntityId::Port(port_key) = id {
            if self.hovered_port == Some(port_key) {
                self.hovered_port = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DESC_AND, DESC_IN, DESC_NOT};
    use crate::render::RecordingRenderer;
    use approx::assert_relative_eq;

    fn synced_view(circuit: &mut Circuit) -> View {
        let mut view = View::new();
        let theme = Theme::default();
        let renderer = RecordingRenderer::new();
        view.sync(circuit, &theme, &renderer);
        view
    }

    #[test]
    fn test_hover_finds_component_and_port() {
        let mut circuit = Circuit::new();
        let gate = circuit.add_component(DESC_AND, Vec2::ZERO);
        let view_theme = Theme::default();
        let mut view = synced_view(&mut circuit);

        // Mitte des Bauteils: Item getroffen, kein Port
        view.update_hover(&circuit, &view_theme, Vec2::ZERO);
        assert_eq!(view.hovered_item, Some(EntityId::Component(gate)));
        assert_eq!(view.hovered_port, None);
        assert!(view.is_hovered(EntityId::Component(gate)));

        // Direkt auf dem ersten Eingangs-Port (-27, -10)
        let port_key = circuit.ports_of(gate).map(|(k, _)| k).next().expect("Port");
        view.update_hover(&circuit, &view_theme, Vec2::new(-27.0, -10.0));
        assert_eq!(view.hovered_port, Some(port_key));
        assert!(view.is_hovered(EntityId::Port(port_key)));
    }

    #[test]
    fn test_hover_last_component_wins_on_overlap() {
        let mut circuit = Circuit::new();
        let first = circuit.add_component(DESC_IN, Vec2::ZERO);
        let second = circuit.add_component(DESC_NOT, Vec2::new(5.0, 0.0));
        let theme = Theme::default();
        let mut view = synced_view(&mut circuit);

        view.update_hover(&circuit, &theme, Vec2::new(2.0, 0.0));
        assert_eq!(view.hovered_item, Some(EntityId::Component(second)));
        assert_ne!(view.hovered_item, Some(EntityId::Component(first)));
    }

    #[test]
    fn test_waypoint_hover_overrides_component_and_marks_net() {
        let mut circuit = Circuit::new();
        let gate = circuit.add_component(DESC_AND, Vec2::ZERO);
        let net = circuit.add_net();
        let waypoint = circuit.add_waypoint(net, Vec2::new(1.0, 1.0)).expect("Wegpunkt");
        let theme = Theme::default();
        let mut view = synced_view(&mut circuit);

        view.update_hover(&circuit, &theme, Vec2::new(1.0, 1.0));
        assert_eq!(view.hovered_item, Some(EntityId::Waypoint(waypoint)));
        assert!(view.is_hovered(EntityId::Net(net)));
        assert!(!view.is_hovered(EntityId::Component(gate)));
    }

    #[test]
    fn test_hover_query_is_idempotent() {
        let mut circuit = Circuit::new();
        circuit.add_component(DESC_AND, Vec2::ZERO);
        let net = circuit.add_net();
        circuit.add_waypoint(net, Vec2::new(40.0, 0.0)).expect("Wegpunkt");
        let theme = Theme::default();
        let mut view = synced_view(&mut circuit);

        view.update_hover(&circuit, &theme, Vec2::new(1.0, 2.0));
        let first: Vec<EntityId> = view.hovered.iter().copied().collect();
        let item = view.hovered_item;
        view.update_hover(&circuit, &theme, Vec2::new(1.0, 2.0));
        let second: Vec<EntityId> = view.hovered.iter().copied().collect();

        assert_eq!(first, second);
        assert_eq!(view.hovered_item, item);
    }

    #[test]
    fn test_select_area_picks_components_and_waypoints() {
        let mut circuit = Circuit::new();
        let inside = circuit.add_component(DESC_IN, Vec2::new(10.0, 10.0));
        let outside = circuit.add_component(DESC_IN, Vec2::new(500.0, 500.0));
        let net = circuit.add_net();
        let waypoint_in = circuit.add_waypoint(net, Vec2::new(20.0, 20.0)).expect("Wegpunkt");
        let waypoint_out = circuit.add_waypoint(net, Vec2::new(400.0, 0.0)).expect("Wegpunkt");
        let mut view = synced_view(&mut circuit);

        let area = Box2::from_corners(Vec2::new(-50.0, -50.0), Vec2::new(60.0, 60.0));
        view.apply_select_area(&circuit, area);

        assert!(view.is_selected(EntityId::Component(inside)));
        assert!(!view.is_selected(EntityId::Component(outside)));
        assert!(view.is_selected(EntityId::Waypoint(waypoint_in)));
        assert!(!view.is_selected(EntityId::Waypoint(waypoint_out)));
        assert!(view.has_selection());

        view.apply_deselect_area(&circuit, area);
        assert!(view.selection.is_empty());
        assert_relative_eq!(view.selection_box.half_size.x, 0.0);
    }

    #[test]
    fn test_in_selection_uses_squared_waypoint_distance() {
        let mut circuit = Circuit::new();
        let net = circuit.add_net();
        let waypoint = circuit.add_waypoint(net, Vec2::ZERO).expect("Wegpunkt");
        let theme = Theme::default();
        let mut view = synced_view(&mut circuit);
        view.select_item(EntityId::Waypoint(waypoint));

        // Abstand 2.0 → Quadrat 4.0 < 5.0: drin
        assert!(view.in_selection(&circuit, &theme, Vec2::new(2.0, 0.0)));
        // Abstand 2.5 → Quadrat 6.25 > 5.0: draußen, obwohl 2.5 < 5.0
        assert!(!view.in_selection(&circuit, &theme, Vec2::new(2.5, 0.0)));
    }

    #[test]
    fn test_selection_center_is_mean_of_items() {
        let mut circuit = Circuit::new();
        let a = circuit.add_component(DESC_IN, Vec2::new(0.0, 0.0));
        let b = circuit.add_component(DESC_IN, Vec2::new(100.0, 40.0));
        let mut view = synced_view(&mut circuit);
        view.select_item(EntityId::Component(a));
        view.select_item(EntityId::Component(b));

        let center = view.selection_center_of(&circuit);
        assert_relative_eq!(center.x, 50.0);
        assert_relative_eq!(center.y, 20.0);
    }

    #[test]
    fn test_component_removal_purges_selection_and_hover() {
        let mut circuit = Circuit::new();
        let gate = circuit.add_component(DESC_AND, Vec2::ZERO);
        let theme = Theme::default();
        let renderer = RecordingRenderer::new();
        let mut view = View::new();
        view.sync(&mut circuit, &theme, &renderer);

        let port_key = circuit.ports_of(gate).map(|(k, _)| k).next().expect("Port");
        view.select_item(EntityId::Component(gate));
        view.update_hover(&circuit, &theme, Vec2::new(-27.0, -10.0));
        assert_eq!(view.hovered_port, Some(port_key));

        circuit.delete_component(gate);
        view.sync(&mut circuit, &theme, &renderer);

        assert!(view.selection.is_empty());
        assert_eq!(view.hovered_port, None);
        assert!(!view.is_hovered(EntityId::Port(port_key)));
    }

    #[test]
    fn test_translate_selected_moves_components_and_waypoints() {
        let mut circuit = Circuit::new();
        let gate = circuit.add_component(DESC_IN, Vec2::new(10.0, 0.0));
        let net = circuit.add_net();
        let waypoint = circuit.add_waypoint(net, Vec2::new(0.0, 5.0)).expect("Wegpunkt");
        let mut view = synced_view(&mut circuit);
        view.select_item(EntityId::Component(gate));
        view.select_item(EntityId::Waypoint(waypoint));

        view.translate_selected(&mut circuit, Vec2::new(3.0, -2.0));

        let center = circuit.component(gate).expect("Bauteil").bounds.center;
        assert_relative_eq!(center.x, 13.0);
        assert_relative_eq!(center.y, -2.0);
        let pos = circuit.waypoint(waypoint).expect("Wegpunkt").position;
        assert_relative_eq!(pos.x, 3.0);
        assert_relative_eq!(pos.y, 3.0);
    }
}
