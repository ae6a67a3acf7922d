//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app`, `view` und `render` geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod theme;

pub use theme::Theme;
pub use theme::{MOUSE_FUDGE, MOVE_THRESHOLD_PX, WAYPOINT_FUDGE};
