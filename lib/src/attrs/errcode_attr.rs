use crate::attrs::RawAttr;
use crate::constants::ATTR_ERROR_CODE;
use crate::error::ParsePacketErr;
use crate::util;
use bytes::{BufMut, BytesMut};

/// Error classes a STUN server reports in ERROR-CODE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerErrorKind {
    Unknown,
    BadRequest,
    Unauthorized,
    UnknownAttribute,
    StaleCredentials,
    IntegrityCheckFailure,
    MissingUsername,
    UseTls,
    ServerError,
    GlobalFailure,
}

impl ServerErrorKind {
    pub fn from_code(code: u16) -> Self {
        match code {
            400 => ServerErrorKind::BadRequest,
            401 => ServerErrorKind::Unauthorized,
            420 => ServerErrorKind::UnknownAttribute,
            430 => ServerErrorKind::StaleCredentials,
            431 => ServerErrorKind::IntegrityCheckFailure,
            432 => ServerErrorKind::MissingUsername,
            433 => ServerErrorKind::UseTls,
            500 => ServerErrorKind::ServerError,
            600 => ServerErrorKind::GlobalFailure,
            _ => ServerErrorKind::Unknown,
        }
    }

    /// `None` for [`ServerErrorKind::Unknown`].
    pub fn code(&self) -> Option<u16> {
        let code = match self {
            ServerErrorKind::Unknown => return None,
            ServerErrorKind::BadRequest => 400,
            ServerErrorKind::Unauthorized => 401,
            ServerErrorKind::UnknownAttribute => 420,
            ServerErrorKind::StaleCredentials => 430,
            ServerErrorKind::IntegrityCheckFailure => 431,
            ServerErrorKind::MissingUsername => 432,
            ServerErrorKind::UseTls => 433,
            ServerErrorKind::ServerError => 500,
            ServerErrorKind::GlobalFailure => 600,
        };
        Some(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrcodeAttr {
    pub code: u16,
    pub reason: String,
}

impl ErrcodeAttr {
    pub fn new(code: u16, reason: &str) -> Self {
        Self {
            code,
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ServerErrorKind {
        ServerErrorKind::from_code(self.code)
    }
}

impl From<ErrcodeAttr> for RawAttr {
    fn from(attr: ErrcodeAttr) -> Self {
        let reason = util::pack_error_reason(&attr.reason);

        let mut bytes_buf = BytesMut::with_capacity(4 + reason.len());
        bytes_buf.put_u16(0);
        bytes_buf.put_u16(util::pack_error_code(attr.code));
        bytes_buf.put_slice(reason.as_bytes());

        RawAttr::new(ATTR_ERROR_CODE, bytes_buf.freeze())
    }
}

impl TryFrom<RawAttr> for ErrcodeAttr {
    type Error = ParsePacketErr;

    fn try_from(base_attr: RawAttr) -> Result<Self, Self::Error> {
        let value = &base_attr.value[..];
        if value.len() < 4 {
            return Err(ParsePacketErr::BufSize(format!(
                "err_code attr buf len:{} < 4",
                value.len()
            )));
        }

        let code = util::unpack_error_code(u16::from_be_bytes([value[2], value[3]]));

        // lossy, reason phrase is informative
        let reason = String::from_utf8_lossy(&value[4..]).trim().to_string();

        Ok(Self { code, reason })
    }
}
