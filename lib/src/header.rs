#![allow(clippy::len_without_is_empty)]

use crate::constants::*;
use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ParsePacketErr;
use crate::message_type::MessageType;

pub type TransId = [u8; TRANS_ID_LEN];
pub type MagicCookie = [u8; 4];

// rfc 5389, 6
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub msg_type: u16,

    // 不包括header的20字节
    pub msg_len: u16,

    pub magic_cookie: MagicCookie,

    pub trans_id: TransId,
}

impl Header {
    pub fn new(msg_type: u16, msg_len: u16, trans_id: TransId) -> Self {
        Self {
            msg_type,
            msg_len,
            magic_cookie: MAGIC_COOKIE,
            trans_id,
        }
    }

    pub fn len(&self) -> usize {
        HEADER_LEN
    }

    /// Total length of the message this header announces.
    pub fn packet_len(&self) -> usize {
        HEADER_LEN + self.msg_len as usize
    }

    pub fn message_type(&self) -> Result<MessageType, ParsePacketErr> {
        MessageType::try_from(self.msg_type)
    }

    pub fn pack(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_LEN);
        buf.put_u16(self.msg_type);
        buf.put_u16(self.msg_len);
        buf.put_slice(&self.magic_cookie);
        buf.put_slice(&self.trans_id);
        buf.freeze()
    }

    pub fn unpack(buf: &[u8]) -> Result<Self, ParsePacketErr> {
        if buf.len() < HEADER_LEN {
            return Err(ParsePacketErr::BufSize(format!(
                "header buf len:{} < {}",
                buf.len(),
                HEADER_LEN
            )));
        }

        let mut index = 0_usize;
        let msg_type = u16::from_be_bytes([buf[index], buf[index + 1]]);

        // the two most significant bits are always zero
        if msg_type & 0xC000 != 0 {
            return Err(ParsePacketErr::BadValue(format!(
                "message type: {:#06x}",
                msg_type
            )));
        }

        index += 2;
        let msg_len = u16::from_be_bytes([buf[index], buf[index + 1]]);

        index += 2;
        let mut magic_cookie = [0_u8; 4];
        magic_cookie.copy_from_slice(&buf[index..index + 4]);

        index += 4;
        let mut trans_id = [0_u8; TRANS_ID_LEN];
        trans_id.copy_from_slice(&buf[index..index + TRANS_ID_LEN]);

        Ok(Self {
            msg_type,
            msg_len,
            magic_cookie,
            trans_id,
        })
    }
}
