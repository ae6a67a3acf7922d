//! Typisierte Entity-Keys und die kind-übergreifende [`EntityId`].
//!
//! Jede Entity-Art bekommt einen eigenen Slotmap-Key-Typ mit
//! Generationszähler: ein Key auf eine gelöschte Entity läuft bei jedem
//! Zugriff ins Leere statt auf fremde Daten. "Kein Ziel" wird überall als
//! `Option::None` ausgedrückt; veraltete Keys verhalten sich identisch.

use slotmap::new_key_type;

new_key_type! {
    /// Key für Bauteile (Komponenten-Instanzen).
    pub struct ComponentKey;
    /// Key für Ports.
    pub struct PortKey;
    /// Key für Netze.
    pub struct NetKey;
    /// Key für Endpunkte (Netz-Anschluss an einen Port).
    pub struct EndpointKey;
    /// Key für Wegpunkte.
    pub struct WaypointKey;
    /// Key für Text-Labels.
    pub struct LabelKey;
}

/// Art einer Entity, für Logging und Dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Component,
    Port,
    Net,
    Endpoint,
    Waypoint,
    Label,
}

/// Kind-übergreifende Entity-Referenz für Selektion, Hover und Commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    Component(ComponentKey),
    Port(PortKey),
    Net(NetKey),
    Endpoint(EndpointKey),
    Waypoint(WaypointKey),
    Label(LabelKey),
}

impl EntityId {
    /// Gibt die Entity-Art zurück.
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityId::Component(_) => EntityKind::Component,
            EntityId::Port(_) => EntityKind::Port,
            EntityId::Net(_) => EntityKind::Net,
            EntityId::Endpoint(_) => EntityKind::Endpoint,
            EntityId::Waypoint(_) => EntityKind::Waypoint,
            EntityId::Label(_) => EntityKind::Label,
        }
    }

    /// Komponenten-Key, falls die Id ein Bauteil referenziert.
    pub fn as_component(&self) -> Option<ComponentKey> {
        match self {
            EntityId::Component(key) => Some(*key),
            _ => None,
        }
    }

    /// Wegpunkt-Key, falls die Id einen Wegpunkt referenziert.
    pub fn as_waypoint(&self) -> Option<WaypointKey> {
        match self {
            EntityId::Waypoint(key) => Some(*key),
            _ => None,
        }
    }
}

impl From<ComponentKey> for EntityId {
    fn from(key: ComponentKey) -> Self {
        EntityId::Component(key)
    }
}

impl From<WaypointKey> for EntityId {
    fn from(key: WaypointKey) -> Self {
        EntityId::Waypoint(key)
    }
}

impl From<PortKey> for EntityId {
    fn from(key: PortKey) -> Self {
        EntityId::Port(key)
    }
}

impl From<NetKey> for EntityId {
    fn from(key: NetKey) -> Self {
        EntityId::Net(key)
    }
}
