//! UI-Schicht: Frame-Eingaben, Tastatur-Intents und die Zeiger-Maschine.

pub mod input;
pub mod keyboard;
pub mod pointer;

pub use input::{collect_frame_input, FrameInput, HeldKeys, ModifierState, PressedKeys};
pub use keyboard::collect_intents;
pub use pointer::{Placement, PointerContext, PointerMachine, PointerState};
