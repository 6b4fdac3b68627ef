pub mod attrs;
pub mod constants;
pub mod error;
pub mod header;
pub mod message_type;
pub mod packet;
pub mod util;
