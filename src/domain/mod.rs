pub mod models;
pub mod services;
pub mod errors;
pub mod notifications;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use notifications::*;
