//! loanterm - Terminal Loan Application Library
//!
//! A terminal loan application form with a simulated, timer-driven review
//! that moves each application from received to processing to a randomized
//! decision.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod cli;

pub use domain::*;
pub use application::*;
