//! Modal dialogs and windows - self-contained dialog components.
//!
//! Dialogs own their state and return `DialogAction`s instead of mutating
//! the app directly. They are stored as `Option<Dialog>`: `None` is closed.

mod actions;
mod confirm_reset;
mod status_toasts;

pub use actions::DialogAction;
pub use confirm_reset::ConfirmResetDialog;
pub use status_toasts::render_status_toasts;
