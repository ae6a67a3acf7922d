//! Edit-Log: begrenzter Undo/Redo-Verlauf aus invertierbaren Kommandos.

use crate::app::command::EditCommand;

/// Begrenzter Undo/Redo-Verlauf.
///
/// Gespeichert werden die angewendeten Kommandos selbst; Undo nimmt den
/// jüngsten Eintrag heraus, der Aufrufer wendet dessen Inverses an und
/// reicht das Ergebnis über [`EditLog::push_redo`] zurück (Redo spiegelbildlich).
/// Fortlaufende Move- und Select-Area-Kommandos derselben Geste werden im
/// jüngsten Eintrag zusammengefasst, bis [`EditLog::seal`] die Geste
/// abschließt; alle anderen Kommando-Arten bleiben eigene Einträge.
pub struct EditLog {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
    max_depth: usize,
    /// Jüngster Undo-Eintrag abgeschlossen? Dann nicht mehr zusammenfassen.
    sealed: bool,
}

impl EditLog {
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
            sealed: true,
        }
    }

    /// Hält ein angewendetes Kommando fest und leert den Redo-Stapel.
    pub fn record(&mut self, command: EditCommand) {
        self.redo_stack.clear();
        if !self.sealed {
            if let Some(top) = self.undo_stack.last_mut() {
                match (top, &command) {
                    (
                        EditCommand::MoveSelection {
                            new_center, snap, ..
                        },
                        EditCommand::MoveSelection {
                            new_center: next,
                            snap: next_snap,
                            ..
                        },
                    ) => {
                        *new_center = *next;
                        *snap = *next_snap;
                        return;
                    }
                    (EditCommand::SelectArea { area }, EditCommand::SelectArea { area: next }) => {
                        *area = *next;
                        return;
                    }
                    _ => {}
                }
            }
        }
        self.push_undo(command);
        self.sealed = false;
    }

    /// Schließt die laufende Geste ab; der jüngste Eintrag wird nicht mehr
    /// zusammengefasst.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Nimmt den jüngsten Undo-Eintrag heraus.
    pub fn pop_undo(&mut self) -> Option<EditCommand> {
        self.sealed = true;
        self.undo_stack.pop()
    }

    /// Nimmt den jüngsten Redo-Eintrag heraus.
    pub fn pop_redo(&mut self) -> Option<EditCommand> {
        self.redo_stack.pop()
    }

    /// Legt ein Kommando direkt auf den Undo-Stapel (Redo-Wiedergabe).
    pub fn push_undo(&mut self, command: EditCommand) {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(command);
    }

    /// Legt ein Kommando auf den Redo-Stapel (nach einem Undo).
    pub fn push_redo(&mut self, command: EditCommand) {
        if self.redo_stack.len() >= self.max_depth {
            self.redo_stack.remove(0);
        }
        self.redo_stack.push(command);
    }

    /// Undo-Stapel in Aufzeichnungs-Reihenfolge (ältester zuerst).
    pub fn undo_commands(&self) -> &[EditCommand] {
        &self.undo_stack
    }

    /// Redo-Stapel (jüngster Undo zuletzt).
    pub fn redo_commands(&self) -> &[EditCommand] {
        &self.redo_stack
    }
}
