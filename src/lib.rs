//! Codecheck Chat client library.
//!
//! This module re-exports the core components for testing and extension.

pub mod api;
pub mod app;
pub mod backend;
pub mod config;
pub mod events;
pub mod input_state;
pub mod poller;
pub mod protocol;
pub mod state;
pub mod ui;
pub mod validation;

#[cfg(test)]
mod test_support;
