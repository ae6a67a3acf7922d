//! Schaltplan-Graph: Bauteile, Ports, Netze, Endpunkte, Wegpunkte, Labels.
//!
//! Alle Entities liegen in Slotmap-Arenen mit Generations-Keys; Querverweise
//! sind Keys statt Zeiger. Geschwister-Ketten (Bauteil → Ports,
//! Netz → Endpunkte/Wegpunkte) sind intrusive Einfach-Listen in
//! Einfüge-Reihenfolge, der Listenkopf liegt im Besitzer.
//!
//! Mutationen benachrichtigen niemanden direkt: sie hängen ein
//! [`CircuitEvent`] an die interne Queue, die der View-Layer einmal pro
//! Frame synchron abarbeitet (Layout neu berechnen, Selektion/Hover
//! bereinigen). Ein veralteter oder fehlender Key ist bei jeder Operation
//! ein stilles No-op.

use std::collections::HashMap;

use glam::Vec2;
use slotmap::SlotMap;

use super::descriptor::{descriptor, DescriptorId, PortDirection};
use super::geom::Box2;
use super::id::{ComponentKey, EndpointKey, EntityId, LabelKey, NetKey, PortKey, WaypointKey};

/// Bauteil-Instanz.
#[derive(Debug, Clone)]
pub struct Component {
    /// Descriptor (Typ) des Bauteils
    pub desc: DescriptorId,
    /// Welt-Box; die Halbgröße wird vom Layout gesetzt
    pub bounds: Box2,
    /// Kopf der Port-Kette (Definitions-Reihenfolge)
    pub port_first: Option<PortKey>,
    /// Typ-Label ("AND", "NOT", ...)
    pub type_label: LabelKey,
    /// Namens-Label ("U1", "I3", ...)
    pub name_label: LabelKey,
}

/// Port eines Bauteils.
#[derive(Debug, Clone)]
pub struct Port {
    /// Besitzendes Bauteil
    pub component: ComponentKey,
    /// Position relativ zum Bauteil-Mittelpunkt (vom Layout gesetzt)
    pub position: Vec2,
    /// Ein- oder Ausgang
    pub direction: PortDirection,
    /// Port-Label ("A", "Y", ...)
    pub label: LabelKey,
    /// Pin-Nummer in Descriptor-Reihenfolge (0-basiert)
    pub pin: u32,
    /// Nächster Port desselben Bauteils
    pub next: Option<PortKey>,
}

/// Netz: logische Verbindung aus Endpunkten und Wegpunkten.
///
/// `wire_count`/`wire_offset`/`vertex_offset` zeigen in die vom View
/// abgeleiteten Leitungs-Puffer und werden bei jeder Verdrahtung neu
/// geschrieben.
#[derive(Debug, Clone, Default)]
pub struct Net {
    /// Kopf der Endpunkt-Kette
    pub endpoint_first: Option<EndpointKey>,
    /// Kopf der Wegpunkt-Kette
    pub waypoint_first: Option<WaypointKey>,
    /// Anzahl Leitungszüge dieses Netzes
    pub wire_count: u32,
    /// Erster Leitungszug im geteilten Wire-Puffer
    pub wire_offset: u32,
    /// Erster Vertex im geteilten Vertex-Puffer
    pub vertex_offset: u32,
}

/// Anschluss eines Netzes an einen konkreten Port.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Besitzendes Netz
    pub net: NetKey,
    /// Angeschlossener Port
    pub port: PortKey,
    /// Welt-Position; abgeleitet (Bauteil-Mitte + Port-Position),
    /// wird bei der Verdrahtung neu berechnet
    pub position: Vec2,
    /// Nächster Endpunkt desselben Netzes
    pub next: Option<EndpointKey>,
}

/// Vom Benutzer gesetzter Knick-Punkt eines Netzes.
#[derive(Debug, Clone)]
pub struct Waypoint {
    /// Besitzendes Netz
    pub net: NetKey,
    /// Welt-Position
    pub position: Vec2,
    /// Nächster Wegpunkt desselben Netzes
    pub next: Option<WaypointKey>,
}

/// Text-Label mit Box relativ zu seinem Besitzer.
#[derive(Debug, Clone)]
pub struct Label {
    /// Anzeigetext
    pub text: String,
    /// Bounds relativ zum Besitzer-Mittelpunkt (vom Layout gesetzt)
    pub bounds: Box2,
}

/// Struktur-Änderung, die der View-Layer synchron abarbeitet.
#[derive(Debug, Clone)]
pub enum CircuitEvent {
    /// Bauteil angelegt → Layout berechnen
    ComponentAdded { component: ComponentKey },
    /// Bauteil gelöscht (inkl. Ports) → Selektion/Hover bereinigen
    ComponentRemoved {
        component: ComponentKey,
        ports: Vec<PortKey>,
    },
    /// Wegpunkt angelegt
    WaypointAdded { waypoint: WaypointKey },
    /// Wegpunkt gelöscht → Selektion/Hover bereinigen
    WaypointRemoved { waypoint: WaypointKey },
    /// Netz verwaist und entfernt → Hover bereinigen
    NetRemoved { net: NetKey },
}

/// Der Schaltplan-Graph mit allen Entity-Arenen.
#[derive(Default)]
pub struct Circuit {
    components: SlotMap<ComponentKey, Component>,
    ports: SlotMap<PortKey, Port>,
    nets: SlotMap<NetKey, Net>,
    endpoints: SlotMap<EndpointKey, Endpoint>,
    waypoints: SlotMap<WaypointKey, Waypoint>,
    labels: SlotMap<LabelKey, Label>,
    /// Laufende Designator-Nummer pro Präfix ("U" → 3 heißt: nächster ist U4)
    designators: HashMap<&'static str, u32>,
    events: Vec<CircuitEvent>,
}

impl Circuit {
    /// Erstellt einen leeren Schaltplan.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Bauteile ────────────────────────────────────────────────────────

    /// Legt ein Bauteil an: Labels, Ports (in Descriptor-Reihenfolge) und
    /// Designator-Name werden miterzeugt. Die Box-Halbgröße bleibt null,
    /// bis das Layout den `ComponentAdded`-Event abgearbeitet hat.
    pub fn add_component(&mut self, desc_id: DescriptorId, center: Vec2) -> ComponentKey {
        let desc = descriptor(desc_id);

        let number = self.designators.entry(desc.prefix).or_insert(0);
        *number += 1;
        let name = format!("{}{}", desc.prefix, number);

        let type_label = self.labels.insert(Label {
            text: desc.type_name.to_string(),
            bounds: Box2::ZERO,
        });
        let name_label = self.labels.insert(Label {
            text: name,
            bounds: Box2::ZERO,
        });

        let component = self.components.insert(Component {
            desc: desc_id,
            bounds: Box2::new(center, Vec2::ZERO),
            port_first: None,
            type_label,
            name_label,
        });

        let mut prev: Option<PortKey> = None;
        for (pin, port_desc) in desc.ports.iter().enumerate() {
            let label = self.labels.insert(Label {
                text: port_desc.name.to_string(),
                bounds: Box2::ZERO,
            });
            let key = self.ports.insert(Port {
                component,
                position: Vec2::ZERO,
                direction: port_desc.direction,
                label,
                pin: pin as u32,
                next: None,
            });
            match prev {
                None => {
                    if let Some(c) = self.components.get_mut(component) {
                        c.port_first = Some(key);
                    }
                }
                Some(prev_key) => {
                    if let Some(p) = self.ports.get_mut(prev_key) {
                        p.next = Some(key);
                    }
                }
            }
            prev = Some(key);
        }

        log::debug!("Bauteil {} angelegt: {:?}", desc.type_name, component);
        self.events.push(CircuitEvent::ComponentAdded { component });
        component
    }

    /// Löscht ein Bauteil kaskadierend: Ports, Labels und alle Endpunkte,
    /// die einen seiner Ports referenzieren. Veralteter Key → No-op.
    pub fn delete_component(&mut self, key: ComponentKey) {
        let Some(component) = self.components.remove(key) else {
            return;
        };

        let mut port_keys = Vec::new();
        let mut cursor = component.port_first;
        while let Some(port_key) = cursor {
            cursor = self.ports.get(port_key).and_then(|p| p.next);
            port_keys.push(port_key);
        }

        let attached: Vec<EndpointKey> = self
            .endpoints
            .iter()
            .filter(|(_, endpoint)| port_keys.contains(&endpoint.port))
            .map(|(endpoint_key, _)| endpoint_key)
            .collect();
        for endpoint_key in attached {
            self.detach_endpoint(endpoint_key);
        }

        for port_key in &port_keys {
            if let Some(port) = self.ports.remove(*port_key) {
                self.labels.remove(port.label);
            }
        }
        self.labels.remove(component.type_label);
        self.labels.remove(component.name_label);

        log::debug!("Bauteil geloescht: {key:?}");
        self.events.push(CircuitEvent::ComponentRemoved {
            component: key,
            ports: port_keys,
        });
    }

    /// Verschiebt ein Bauteil auf einen neuen Mittelpunkt.
    /// Port-Positionen sind relativ und wandern mit.
    pub fn move_component_to(&mut self, key: ComponentKey, center: Vec2) {
        if let Some(component) = self.components.get_mut(key) {
            component.bounds.center = center;
        }
    }

    // ── Netze ───────────────────────────────────────────────────────────

    /// Legt ein leeres Netz an.
    pub fn add_net(&mut self) -> NetKey {
        self.nets.insert(Net::default())
    }

    /// Hängt einen Endpunkt ans Ende der Netz-Kette.
    /// Veraltetes Netz oder veralteter Port → `None`.
    pub fn add_endpoint(&mut self, net: NetKey, port: PortKey) -> Option<EndpointKey> {
        if !self.nets.contains_key(net) || !self.ports.contains_key(port) {
            return None;
        }
        let position = self.port_world_position(port).unwrap_or(Vec2::ZERO);
        let key = self.endpoints.insert(Endpoint {
            net,
            port,
            position,
            next: None,
        });

        let mut tail = self.nets.get(net).and_then(|n| n.endpoint_first);
        match tail {
            None => {
                if let Some(n) = self.nets.get_mut(net) {
                    n.endpoint_first = Some(key);
                }
            }
            Some(_) => {
                while let Some(current) = tail {
                    let next = self.endpoints.get(current).and_then(|e| e.next);
                    if next.is_none() {
                        if let Some(e) = self.endpoints.get_mut(current) {
                            e.next = Some(key);
                        }
                        break;
                    }
                    tail = next;
                }
            }
        }
        Some(key)
    }

    /// Hängt einen Wegpunkt ans Ende der Netz-Kette.
    /// Veraltetes Netz → `None`.
    pub fn add_waypoint(&mut self, net: NetKey, position: Vec2) -> Option<WaypointKey> {
        if !self.nets.contains_key(net) {
            return None;
        }
        let key = self.waypoints.insert(Waypoint {
            net,
            position,
            next: None,
        });

        let mut tail = self.nets.get(net).and_then(|n| n.waypoint_first);
        match tail {
            None => {
                if let Some(n) = self.nets.get_mut(net) {
                    n.waypoint_first = Some(key);
                }
            }
            Some(_) => {
                while let Some(current) = tail {
                    let next = self.waypoints.get(current).and_then(|w| w.next);
                    if next.is_none() {
                        if let Some(w) = self.waypoints.get_mut(current) {
                            w.next = Some(key);
                        }
                        break;
                    }
                    tail = next;
                }
            }
        }

        self.events.push(CircuitEvent::WaypointAdded { waypoint: key });
        Some(key)
    }

    /// Löscht einen Wegpunkt und entfernt das Netz, falls es dadurch
    /// verwaist. Veralteter Key → No-op.
    pub fn delete_waypoint(&mut self, key: WaypointKey) {
        let Some(waypoint) = self.waypoints.remove(key) else {
            return;
        };
        let net = waypoint.net;

        // Aus der Netz-Kette aushängen
        if let Some(n) = self.nets.get_mut(net) {
            if n.waypoint_first == Some(key) {
                n.waypoint_first = waypoint.next;
            } else {
                let mut cursor = n.waypoint_first;
                while let Some(current) = cursor {
                    let next = self.waypoints.get(current).and_then(|w| w.next);
                    if next == Some(key) {
                        if let Some(w) = self.waypoints.get_mut(current) {
                            w.next = waypoint.next;
                        }
                        break;
                    }
                    cursor = next;
                }
            }
        }

        self.events.push(CircuitEvent::WaypointRemoved { waypoint: key });
        self.prune_net_if_empty(net);
    }

    /// Entfernt einen Endpunkt aus seinem Netz (inkl. Netz-Prune).
    fn detach_endpoint(&mut self, key: EndpointKey) {
        let Some(endpoint) = self.endpoints.remove(key) else {
            return;
        };
        let net = endpoint.net;

        if let Some(n) = self.nets.get_mut(net) {
            if n.endpoint_first == Some(key) {
                n.endpoint_first = endpoint.next;
            } else {
                let mut cursor = n.endpoint_first;
                while let Some(current) = cursor {
                    let next = self.endpoints.get(current).and_then(|e| e.next);
                    if next == Some(key) {
                        if let Some(e) = self.endpoints.get_mut(current) {
                            e.next = endpoint.next;
                        }
                        break;
                    }
                    cursor = next;
                }
            }
        }

        self.prune_net_if_empty(net);
    }

    /// Entfernt ein Netz ohne Endpunkte und ohne Wegpunkte.
    fn prune_net_if_empty(&mut self, net: NetKey) {
        let orphaned = self
            .nets
            .get(net)
            .map(|n| n.endpoint_first.is_none() && n.waypoint_first.is_none())
            .unwrap_or(false);
        if orphaned {
            self.nets.remove(net);
            self.events.push(CircuitEvent::NetRemoved { net });
        }
    }

    /// Sucht das Netz, das über einen Endpunkt an diesem Port hängt.
    pub fn port_net(&self, port: PortKey) -> Option<NetKey> {
        self.endpoints
            .iter()
            .find(|(_, endpoint)| endpoint.port == port)
            .map(|(_, endpoint)| endpoint.net)
    }

    /// Welt-Position eines Ports (Bauteil-Mitte + relative Port-Position).
    pub fn port_world_position(&self, port: PortKey) -> Option<Vec2> {
        let port = self.ports.get(port)?;
        let component = self.components.get(port.component)?;
        Some(component.bounds.center + port.position)
    }

    // ── Existenz und Zugriff ────────────────────────────────────────────

    /// Existenz-Check über alle Entity-Arten.
    pub fn has(&self, id: EntityId) -> bool {
        match id {
            EntityId::Component(key) => self.components.contains_key(key),
            EntityId::Port(key) => self.ports.contains_key(key),
            EntityId::Net(key) => self.nets.contains_key(key),
            EntityId::Endpoint(key) => self.endpoints.contains_key(key),
            EntityId::Waypoint(key) => self.waypoints.contains_key(key),
            EntityId::Label(key) => self.labels.contains_key(key),
        }
    }

    pub fn component(&self, key: ComponentKey) -> Option<&Component> {
        self.components.get(key)
    }

    pub fn component_mut(&mut self, key: ComponentKey) -> Option<&mut Component> {
        self.components.get_mut(key)
    }

    pub fn port(&self, key: PortKey) -> Option<&Port> {
        self.ports.get(key)
    }

    pub fn port_mut(&mut self, key: PortKey) -> Option<&mut Port> {
        self.ports.get_mut(key)
    }

    pub fn net(&self, key: NetKey) -> Option<&Net> {
        self.nets.get(key)
    }

    pub fn net_mut(&mut self, key: NetKey) -> Option<&mut Net> {
        self.nets.get_mut(key)
    }

    pub fn endpoint(&self, key: EndpointKey) -> Option<&Endpoint> {
        self.endpoints.get(key)
    }

    pub fn endpoint_mut(&mut self, key: EndpointKey) -> Option<&mut Endpoint> {
        self.endpoints.get_mut(key)
    }

    pub fn waypoint(&self, key: WaypointKey) -> Option<&Waypoint> {
        self.waypoints.get(key)
    }

    pub fn waypoint_mut(&mut self, key: WaypointKey) -> Option<&mut Waypoint> {
        self.waypoints.get_mut(key)
    }

    pub fn label(&self, key: LabelKey) -> Option<&Label> {
        self.labels.get(key)
    }

    pub fn label_mut(&mut self, key: LabelKey) -> Option<&mut Label> {
        self.labels.get_mut(key)
    }

    /// Alle Bauteile in Arena-Reihenfolge (deterministisch; Hit-Tests
    /// nutzen "letzter Treffer gewinnt" über genau diese Reihenfolge).
    pub fn components(&self) -> slotmap::basic::Iter<'_, ComponentKey, Component> {
        self.components.iter()
    }

    pub fn nets(&self) -> slotmap::basic::Iter<'_, NetKey, Net> {
        self.nets.iter()
    }

    pub fn waypoints(&self) -> slotmap::basic::Iter<'_, WaypointKey, Waypoint> {
        self.waypoints.iter()
    }

    /// Ports eines Bauteils entlang der intrusiven Kette.
    pub fn ports_of(&self, component: ComponentKey) -> PortsOf<'_> {
        PortsOf {
            circuit: self,
            cursor: self
                .components
                .get(component)
                .and_then(|c| c.port_first),
        }
    }

    /// Endpunkte eines Netzes entlang der intrusiven Kette.
    pub fn endpoints_of(&self, net: NetKey) -> EndpointsOf<'_> {
        EndpointsOf {
            circuit: self,
            cursor: self.nets.get(net).and_then(|n| n.endpoint_first),
        }
    }

    /// Wegpunkte eines Netzes entlang der intrusiven Kette.
    pub fn waypoints_of(&self, net: NetKey) -> WaypointsOf<'_> {
        WaypointsOf {
            circuit: self,
            cursor: self.nets.get(net).and_then(|n| n.waypoint_first),
        }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Zieht alle aufgelaufenen Struktur-Events ab (FIFO).
    pub fn drain_events(&mut self) -> Vec<CircuitEvent> {
        std::mem::take(&mut self.events)
    }

    /// Anzahl noch nicht abgearbeiteter Events.
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }
}

/// Iterator über die Port-Kette eines Bauteils.
pub struct PortsOf<'a> {
    circuit: &'a Circuit,
    cursor: Option<PortKey>,
}

impl<'a> Iterator for PortsOf<'a> {
    type Item = (PortKey, &'a Port);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let port = self.circuit.ports.get(key)?;
        self.cursor = port.next;
        Some((key, port))
    }
}

/// Iterator über die Endpunkt-Kette eines Netzes.
pub struct EndpointsOf<'a> {
    circuit: &'a Circuit,
    cursor: Option<EndpointKey>,
}

impl<'a> Iterator for EndpointsOf<'a> {
    type Item = (EndpointKey, &'a Endpoint);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let endpoint = self.circuit.endpoints.get(key)?;
        self.cursor = endpoint.next;
        Some((key, endpoint))
    }
}

/// Iterator über die Wegpunkt-Kette eines Netzes.
pub struct WaypointsOf<'a> {
    circuit: &'a Circuit,
    cursor: Option<WaypointKey>,
}

impl<'a> Iterator for WaypointsOf<'a> {
    type Item = (WaypointKey, &'a Waypoint);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let waypoint = self.circuit.waypoints.get(key)?;
        self.cursor = waypoint.next;
        Some((key, waypoint))
    }
}
