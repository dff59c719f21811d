//! UI rendering modules for the chat client.
//!
//! - `messages`: message list with inline editing
//! - `dialogs`: reset confirmation and status toasts
//! - `theme`: color schemes and styling

pub mod dialogs;
pub mod messages;
pub mod theme;
