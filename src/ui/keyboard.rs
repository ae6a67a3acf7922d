//! Keyboard-Shortcuts: mappt Frame-Input auf `EditorIntent`s.

use crate::app::EditorIntent;
use crate::ui::input::FrameInput;

/// Übersetzt die Tasten-Flanken eines Frames in Intents.
///
/// Undo/Redo hören auf den Shortcut-Modifier (Ctrl bzw. Cmd):
/// Z macht rückgängig, Shift+Z oder Y stellt wieder her. Space schaltet
/// das Debug-Overlay, Escape bricht ab, Delete löscht die Selektion.
pub fn collect_intents(input: &FrameInput) -> Vec<EditorIntent> {
    let mut intents = Vec::new();

    if input.modifiers.command && input.pressed.z && !input.modifiers.shift {
        intents.push(EditorIntent::Undo);
    }
    if input.modifiers.command && (input.pressed.y || (input.modifiers.shift && input.pressed.z)) {
        intents.push(EditorIntent::Redo);
    }
    if input.pressed.space {
        intents.push(EditorIntent::ToggleDebug);
    }
    if input.pressed.escape {
        intents.push(EditorIntent::Cancel);
    }
    if input.pressed.delete {
        intents.push(EditorIntent::DeleteSelected);
    }

    intents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::input::{ModifierState, PressedKeys};

    fn input_with(pressed: PressedKeys, modifiers: ModifierState) -> FrameInput {
        FrameInput {
            pressed,
            modifiers,
            ..FrameInput::default()
        }
    }

    #[test]
    fn test_ctrl_z_maps_to_undo() {
        let input = input_with(
            PressedKeys {
                z: true,
                ..PressedKeys::default()
            },
            ModifierState {
                command: true,
                ..ModifierState::default()
            },
        );
        assert_eq!(collect_intents(&input), vec![EditorIntent::Undo]);
    }

    #[test]
    fn test_ctrl_shift_z_maps_to_redo_only() {
        let input = input_with(
            PressedKeys {
                z: true,
                ..PressedKeys::default()
            },
            ModifierState {
                command: true,
                shift: true,
                ..ModifierState::default()
            },
        );
        assert_eq!(collect_intents(&input), vec![EditorIntent::Redo]);
    }

    #[test]
    fn test_ctrl_y_maps_to_redo() {
        let input = input_with(
            PressedKeys {
                y: true,
                ..PressedKeys::default()
            },
            ModifierState {
                command: true,
                ..ModifierState::default()
            },
        );
        assert_eq!(collect_intents(&input), vec![EditorIntent::Redo]);
    }

    #[test]
    fn test_z_without_modifier_does_nothing() {
        let input = input_with(
            PressedKeys {
                z: true,
                ..PressedKeys::default()
            },
            ModifierState::default(),
        );
        assert!(collect_intents(&input).is_empty());
    }

    #[test]
    fn test_space_escape_delete_map_directly() {
        let input = input_with(
            PressedKeys {
                space: true,
                escape: true,
                delete: true,
                ..PressedKeys::default()
            },
            ModifierState::default(),
        );
        assert_eq!(
            collect_intents(&input),
            vec![
                EditorIntent::ToggleDebug,
                EditorIntent::Cancel,
                EditorIntent::DeleteSelected,
            ]
        );
    }
}
