//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! holding the form being edited, the notification feed and the lifecycle
//! controller.

pub mod state;

pub use state::*;
