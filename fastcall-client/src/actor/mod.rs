mod session_actor;
mod session_command;
mod session_handle;

pub use session_actor::SessionActor;
pub use session_command::{SessionCommand, SessionSnapshot};
pub use session_handle::{SessionHandle, spawn_session};
