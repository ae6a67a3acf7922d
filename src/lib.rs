//! Schaltplan-Editor Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod render;
pub mod shared;
pub mod ui;
pub mod view;

pub use app::{apply_command, EditCommand, EditLog, Editor, EditorIntent};
pub use core::{
    Box2, Camera, Circuit, CircuitEvent, Component, ComponentKey, DescriptorId, EntityId, NetKey,
    PortKey, WaypointKey,
};
pub use render::{DrawCall, DrawFlag, EguiRenderer, RecordingRenderer, Renderer};
pub use shared::Theme;
pub use ui::{collect_frame_input, collect_intents, FrameInput, PointerMachine, PointerState};
pub use view::{draw_view, View};
