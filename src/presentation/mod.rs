//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the application form and review screens using
//! ratatui, translates key presses into application actions and runs the
//! event loop that ties both to the countdown.

pub mod ui;
pub mod input;
pub mod runtime;

pub use ui::*;
pub use input::*;
pub use runtime::*;
