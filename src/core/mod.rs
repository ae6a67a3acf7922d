//! Core-Domänentypen: Schaltplan-Graph, Descriptoren, Kamera, Geometrie.

pub mod camera;
/// Core-Datenmodell des Schaltplans
///
/// Dieses Modul definiert die Haupt-Datenstrukturen:
/// - Circuit: Arenen für Bauteile, Ports, Netze, Endpunkte, Wegpunkte, Labels
/// - Component/Port: Bauteil-Instanzen mit intrusiver Port-Kette
/// - Net/Endpoint/Waypoint: logische Verbindungen
pub mod circuit;
pub mod descriptor;
pub mod geom;
pub mod id;

pub use camera::Camera;
pub use circuit::{Circuit, CircuitEvent, Component, Endpoint, Label, Net, Port, Waypoint};
pub use descriptor::{
    descriptor, ComponentDesc, DescriptorId, PortDesc, PortDirection, SymbolShape, DESCRIPTORS,
    DESC_AND, DESC_IN, DESC_NOT, DESC_OR, DESC_OUT, DESC_XOR,
};
pub use geom::Box2;
pub use id::{
    ComponentKey, EndpointKey, EntityId, EntityKind, LabelKey, NetKey, PortKey, WaypointKey,
};
