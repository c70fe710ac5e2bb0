//! Infrastructure layer providing external service integrations.
//!
//! This module contains the pieces that touch the outside world: the wall
//! clock, the random number generator, configuration files, log output and
//! the system clipboard.

pub mod clipboard;
pub mod clock;
pub mod config;
pub mod random;
pub mod telemetry;

pub use clipboard::*;
pub use clock::*;
pub use config::*;
pub use random::*;
