//! Leitungs-Ableitung: Netze → Leitungszüge und Vertices.
//!
//! Direktverdrahtung ohne Hindernis-Routing: Wegpunkte werden der Reihe
//! nach verbunden, Endpunkte hängen am nächstgelegenen Wegpunkt. Die
//! Ergebnisse landen in zwei geteilten Puffern; jedes Netz merkt sich
//! seinen Abschnitt über `wire_offset`/`vertex_offset`.

use glam::Vec2;

use crate::core::Circuit;

/// Ein Leitungszug: Anzahl Vertices plus Status-Bits im selben u16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wire {
    bits: u16,
}

impl Wire {
    /// Wurzel-Leitung des Netzes (Debug-Hervorhebung).
    const ROOT_BIT: u16 = 0x8000;
    /// Leitungszug endet in einem Verzweigungspunkt.
    const JUNCTION_BIT: u16 = 0x4000;
    const COUNT_MASK: u16 = 0x3FFF;

    pub fn new(vertex_count: u16) -> Self {
        Self {
            bits: vertex_count & Self::COUNT_MASK,
        }
    }

    /// Anzahl Vertices dieses Zugs im geteilten Puffer.
    pub fn vertex_count(&self) -> usize {
        (self.bits & Self::COUNT_MASK) as usize
    }

    pub fn is_root(&self) -> bool {
        self.bits & Self::ROOT_BIT != 0
    }

    pub fn ends_in_junction(&self) -> bool {
        self.bits & Self::JUNCTION_BIT != 0
    }

    pub fn mark_root(&mut self) {
        self.bits |= Self::ROOT_BIT;
    }

    pub fn mark_junction(&mut self) {
        self.bits |= Self::JUNCTION_BIT;
    }
}

/// Verdrahtet alle Netze neu in die geteilten Puffer.
///
/// Pro Netz: Wegpunkte in Ketten-Reihenfolge einsammeln; hat ein Netz
/// mehr als zwei Endpunkte aber keinen Wegpunkt, wird der Schwerpunkt
/// der Endpunkte als Wegpunkt eingesetzt. Mehrere Wegpunkte bilden
/// einen gemeinsamen Zug; bis zu zwei Endpunkte werden direkt
/// verbunden, darüber bekommt jeder Endpunkt einen Zwei-Punkt-Zug zum
/// nächstgelegenen Wegpunkt. Endpunkt-Positionen werden dabei aus
/// Bauteil-Mitte + Port-Position aufgefrischt. Der erste Zug jedes
/// Netzes trägt das Wurzel-Bit.
pub fn route_nets(circuit: &mut Circuit, wires: &mut Vec<Wire>, vertices: &mut Vec<Vec2>) {
    wires.clear();
    vertices.clear();

    let net_keys: Vec<_> = circuit.nets().map(|(key, _)| key).collect();
    let mut waypoints: Vec<Vec2> = Vec::new();

    for net_key in net_keys {
        let net_first_wire = wires.len();
        if let Some(net) = circuit.net_mut(net_key) {
            net.wire_count = 0;
            net.wire_offset = net_first_wire as u32;
            net.vertex_offset = vertices.len() as u32;
        }

        waypoints.clear();
        waypoints.extend(circuit.waypoints_of(net_key).map(|(_, w)| w.position));

        let endpoint_keys: Vec<_> = circuit.endpoints_of(net_key).map(|(key, _)| key).collect();
        let endpoint_count = endpoint_keys.len();
        let mut centroid = Vec2::ZERO;
        for endpoint_key in &endpoint_keys {
            if let Some(endpoint) = circuit.endpoint(*endpoint_key) {
                centroid += endpoint.position;
            }
        }
        if endpoint_count > 0 {
            centroid /= endpoint_count as f32;
        }

        // Ohne Wegpunkt braucht ein Mehrfach-Netz einen künstlichen Treffpunkt
        if waypoints.is_empty() && endpoint_count > 2 {
            waypoints.push(centroid);
        }

        let mut net_wire_count: u32 = 0;

        if waypoints.len() > 1 {
            wires.push(Wire::new(waypoints.len() as u16));
            net_wire_count += 1;
            vertices.extend_from_slice(&waypoints);
        }

        if endpoint_count <= 2 && endpoint_count > 0 {
            wires.push(Wire::new(endpoint_count as u16));
            net_wire_count += 1;
        }

        for endpoint_key in endpoint_keys {
            let port = match circuit.endpoint(endpoint_key) {
                Some(endpoint) => endpoint.port,
                None => continue,
            };
            let Some(pos) = circuit.port_world_position(port) else {
                continue;
            };
            if let Some(endpoint) = circuit.endpoint_mut(endpoint_key) {
                endpoint.position = pos;
            }

            if endpoint_count > 2 {
                // Nächstgelegenen Wegpunkt suchen
                let mut best = match waypoints.first() {
                    Some(first) => *first,
                    None => continue,
                };
                let mut best_dist = pos.distance_squared(best);
                for waypoint in waypoints.iter().skip(1) {
                    let dist = pos.distance_squared(*waypoint);
                    if dist < best_dist {
                        best = *waypoint;
                        best_dist = dist;
                    }
                }

                wires.push(Wire::new(2));
                net_wire_count += 1;
                vertices.push(best);
            }

            vertices.push(pos);
        }

        if let Some(first) = wires.get_mut(net_first_wire) {
            first.mark_root();
        }
        if let Some(net) = circuit.net_mut(net_key) {
            net.wire_count = net_wire_count;
        }
    }
}
