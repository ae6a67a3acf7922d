//! Anwenden von Editier-Kommandos auf Schaltplan und View.

use crate::app::command::EditCommand;
use crate::core::Circuit;
use crate::view::View;

/// Wendet ein Kommando an.
///
/// Stellt ein Kommando eine gelöschte Entity wieder her (Redo von Add,
/// Undo von Delete), entsteht ein frischer Key; das Kommando wird in place
/// auf diesen Key umgeschrieben, damit der nächste Undo/Redo-Schritt das
/// richtige Ziel trifft. Veraltete Keys in allen anderen Fällen sind
/// No-ops, nie Fehler.
pub fn apply_command(circuit: &mut Circuit, view: &mut View, command: &mut EditCommand) {
    log::debug!("Kommando: {command:?}");
    match command {
        EditCommand::AddComponent {
            component,
            desc,
            center,
        } => {
            // Beim Live-Commit existiert der Platzhalter bereits
            if circuit.component(*component).is_none() {
                *component = circuit.add_component(*desc, *center);
            }
        }
        EditCommand::DeleteComponent { component, .. } => {
            circuit.delete_component(*component);
        }
        EditCommand::SelectItem { item } => {
            if let Some(id) = *item {
                if circuit.has(id) {
                    view.select_item(id);
                }
            }
        }
        EditCommand::DeselectItem { item } => {
            if let Some(id) = *item {
                view.deselect_item(id);
            }
        }
        EditCommand::SelectArea { area } => {
            view.apply_select_area(circuit, *area);
        }
        EditCommand::DeselectArea { area } => {
            view.apply_deselect_area(circuit, *area);
        }
        EditCommand::MoveSelection {
            old_center,
            new_center,
            // Raster-Fang ist dem Anwenden egal, die Zentren sind bereits final
            snap: _,
        } => {
            let delta = *new_center - *old_center;
            view.translate_selected(circuit, delta);
            view.selection_center = *new_center;
        }
        EditCommand::AddWaypoint {
            waypoint,
            net,
            position,
        } => {
            if circuit.waypoint(*waypoint).is_none() {
                if let Some(fresh) = circuit.add_waypoint(*net, *position) {
                    *waypoint = fresh;
                }
            }
        }
        EditCommand::DeleteWaypoint { waypoint, .. } => {
            circuit.delete_waypoint(*waypoint);
        }
    }
}
