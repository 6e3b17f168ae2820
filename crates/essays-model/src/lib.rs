pub mod config;
pub mod error;
pub mod listing;
pub mod naming;
pub mod summary;

pub use config::*;
pub use error::*;
pub use listing::*;
pub use summary::*;
