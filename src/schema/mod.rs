//! Schema module - Input, configuration and output types for panel layouts.

mod config;
mod error;
mod evolution;
mod layout;
mod request;

pub use config::*;
pub use error::*;
pub use evolution::*;
pub use layout::*;
pub use request::*;
