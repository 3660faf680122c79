pub mod config;
pub mod engine;
pub mod error;
pub mod install;
pub mod io;
pub mod mode;
pub mod paths;
pub mod shortcut;
pub mod store;

pub use engine::{FocusEngine, GlobalFocusState, ModeActivation, ModeChange, ModeStatus};
pub use error::{FocusError, Result};
pub use mode::{FocusMode, ModeAction};
