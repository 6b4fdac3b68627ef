use std::io;
use stun_wire::attrs::errcode_attr::ServerErrorKind;
use stun_wire::error::{PackPacketErr, ParsePacketErr, ValidateErr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StunError {
    // 响应里没有可用的地址
    #[error("can't convert value, no address attribute in response")]
    CannotConvertValue,

    #[error("can't prepare packet")]
    CannotPreparePacket,

    #[error("can't resolve stun server address")]
    CannotResolveServerAddress,

    #[error("can't run transport, {0}")]
    CannotRunTransport(String),

    #[error("can't read, {0}")]
    CannotRead(String),

    #[error("wrong response")]
    WrongResponse,

    #[error("read timeout")]
    ReadTimeout,

    #[error("stun server error, {0:?}")]
    StunServerError(ServerErrorKind),
}

impl From<PackPacketErr> for StunError {
    fn from(_: PackPacketErr) -> Self {
        StunError::CannotPreparePacket
    }
}

impl From<ParsePacketErr> for StunError {
    fn from(e: ParsePacketErr) -> Self {
        StunError::CannotRead(e.to_string())
    }
}

impl From<ValidateErr> for StunError {
    fn from(_: ValidateErr) -> Self {
        StunError::WrongResponse
    }
}

impl StunError {
    pub fn transport(e: io::Error) -> Self {
        StunError::CannotRunTransport(e.to_string())
    }

    pub fn read(e: io::Error) -> Self {
        StunError::CannotRead(e.to_string())
    }
}
