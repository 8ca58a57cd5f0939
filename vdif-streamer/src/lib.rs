pub mod config;
pub mod error;
pub mod metrics;
pub mod session;
pub mod sink;
pub mod source;

pub use config::*;
pub use error::*;
pub use metrics::*;
pub use session::*;
pub use sink::*;
pub use source::*;
