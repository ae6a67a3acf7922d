//! Application-Schicht: Kommandos, Edit-Log, Intents und die
//! Editor-Fassade.

pub mod command;
pub mod edit_log;
pub mod editor;
pub mod handlers;
pub mod intent;

pub use command::EditCommand;
pub use edit_log::EditLog;
pub use editor::Editor;
pub use handlers::apply_command;
pub use intent::EditorIntent;
