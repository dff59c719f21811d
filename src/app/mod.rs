//! Application module structure for ChatApp
//!
//! - `core`: ChatApp struct, initialization and action dispatch
//! - `events`: Event processing from backend
//! - `update`: Main update loop, polling and visibility
//! - `dialogs`: Dialog rendering orchestration
//! - `ui::panels`: Header and message panel rendering
//! - `ui::input`: Message input row

pub mod core;
pub mod dialogs;
pub mod events;
pub mod update;
pub mod ui;

pub use core::ChatApp;
