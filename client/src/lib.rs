pub mod client;
pub mod config;
pub mod error;
pub mod exchange;
pub mod transport;

pub use client::{ClientMode, StunClient};
pub use config::ClientConfig;
pub use error::StunError;
pub use exchange::MappedAddress;
