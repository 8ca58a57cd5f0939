pub mod config;
pub mod error;
pub mod layout;
pub mod quant;
pub mod station;

pub use config::*;
pub use error::*;
pub use layout::*;
pub use quant::*;
pub use station::*;
