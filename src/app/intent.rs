//! Shell-Intents: Anfragen von Tastatur und Toolbar an den Editor.

use crate::core::DescriptorId;

/// Intents sind nicht-kontinuierliche Anfragen der Shell, die der Editor
/// zentral abarbeitet. Zeiger-Gesten und WASD-Panning laufen getrennt über
/// den Frame-Input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorIntent {
    /// Letzte Aktion rückgängig machen
    Undo,
    /// Rückgängig gemachte Aktion wiederherstellen
    Redo,
    /// Debug-Overlay (Wurzel-Leitungen) umschalten
    ToggleDebug,
    /// Selektierte Bauteile und Wegpunkte löschen
    DeleteSelected,
    /// Platzierung abbrechen, sonst Selektion aufheben
    Cancel,
    /// Platzierung für einen Bauteil-Typ scharfschalten
    StartPlacing { desc: DescriptorId },
}
