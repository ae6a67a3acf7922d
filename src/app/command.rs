//! Invertierbare Editier-Kommandos.
//!
//! Jede Pointer-Geste, die Schaltplan oder Selektion verändert, läuft als
//! [`EditCommand`] durch das Edit-Log. `inverted` liefert das Gegen-Kommando
//! für Undo; doppelte Invertierung ergibt wieder das Original.

use glam::Vec2;

use crate::core::{Box2, ComponentKey, DescriptorId, EntityId, NetKey, WaypointKey};

/// Commands sind invertierbare Editier-Schritte, die zentral angewendet
/// und im Edit-Log festgehalten werden.
///
/// Keys in gespeicherten Commands können durch spätere Undo/Redo-Zyklen
/// veralten; das Anwenden behandelt veraltete Keys als No-op bzw. erzeugt
/// beim Wiederherstellen frische Entities (siehe `handlers`).
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Bauteil mit Descriptor an Weltposition anlegen
    AddComponent {
        component: ComponentKey,
        desc: DescriptorId,
        center: Vec2,
    },
    /// Bauteil entfernen (kaskadiert über Ports und Endpunkte)
    DeleteComponent {
        component: ComponentKey,
        desc: DescriptorId,
        center: Vec2,
    },
    /// Einzelnes Item zur Selektion hinzufügen (`None` ist ein No-op)
    SelectItem { item: Option<EntityId> },
    /// Einzelnes Item aus der Selektion entfernen
    DeselectItem { item: Option<EntityId> },
    /// Alle Items im Rechteck selektieren
    SelectArea { area: Box2 },
    /// Rechteck-Selektion auflösen
    DeselectArea { area: Box2 },
    /// Selektion vom alten zum neuen Zentrum verschieben
    MoveSelection {
        old_center: Vec2,
        new_center: Vec2,
        snap: bool,
    },
    /// Wegpunkt an ein Netz anhängen (entsteht nur als Inverses von
    /// `DeleteWaypoint`)
    AddWaypoint {
        waypoint: WaypointKey,
        net: NetKey,
        position: Vec2,
    },
    /// Wegpunkt aus seinem Netz entfernen
    DeleteWaypoint {
        waypoint: WaypointKey,
        net: NetKey,
        position: Vec2,
    },
}

impl EditCommand {
    /// Liefert das Gegen-Kommando für Undo.
    pub fn inverted(&self) -> EditCommand {
        match *self {
            EditCommand::AddComponent {
                component,
                desc,
                center,
            } => EditCommand::DeleteComponent {
                component,
                desc,
                center,
            },
            EditCommand::DeleteComponent {
                component,
                desc,
                center,
            } => EditCommand::AddComponent {
                component,
                desc,
                center,
            },
            EditCommand::SelectItem { item } => EditCommand::DeselectItem { item },
            EditCommand::DeselectItem { item } => EditCommand::SelectItem { item },
            EditCommand::SelectArea { area } => EditCommand::DeselectArea { area },
            EditCommand::DeselectArea { area } => EditCommand::SelectArea { area },
            EditCommand::MoveSelection {
                old_center,
                new_center,
                snap,
            } => EditCommand::MoveSelection {
                old_center: new_center,
                new_center: old_center,
                snap,
            },
            EditCommand::AddWaypoint {
                waypoint,
                net,
                position,
            } => EditCommand::DeleteWaypoint {
                waypoint,
                net,
                position,
            },
            EditCommand::DeleteWaypoint {
                waypoint,
                net,
                position,
            } => EditCommand::AddWaypoint {
                waypoint,
                net,
                position,
            },
        }
    }
}
