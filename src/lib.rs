//! temptrend - historical daily maximum temperature TUI
//!
//! This library exposes the application's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod error;
pub mod reducer;
pub mod state;
