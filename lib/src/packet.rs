#![allow(clippy::len_without_is_empty)]

use crate::attrs::errcode_attr::ErrcodeAttr;
use crate::attrs::{Attribute, RawAttr};
use crate::constants::*;
use crate::error::{PackPacketErr, ParsePacketErr, ValidateErr};
use crate::header::{Header, TransId};
use crate::message_type::MessageType;
use bytes::{BufMut, Bytes, BytesMut};
use log::warn;

// header + attribute 区
// attribute 之间不做 4 字节对齐, 依次排列

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: Header,
    pub body: Bytes,
}

/// Result of reading a message from a buffer that may still be filling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A whole message, `consumed` bytes were used from the front of the buffer.
    Complete { packet: Packet, consumed: usize },

    /// The buffer holds less than the announced message.
    NeedMore { needed: usize },
}

impl Packet {
    pub fn new(header: Header, attrs: Vec<RawAttr>) -> Self {
        let mut packet = Self {
            header,
            body: Bytes::new(),
        };
        packet.add_attrs(attrs);
        packet
    }

    pub fn binding_request(trans_id: TransId) -> Self {
        let header = Header::new(MESSAGE_TYPE_BIND_REQ, 0, trans_id);
        Packet::new(header, vec![])
    }

    fn update_header_len(&mut self) {
        self.header.msg_len = u16::try_from(self.body.len()).unwrap_or(u16::MAX);
    }

    pub fn add_attr(&mut self, attr: RawAttr) {
        self.add_attrs(vec![attr]);
    }

    pub fn add_attrs(&mut self, attrs: Vec<RawAttr>) {
        let mut body = BytesMut::from(&self.body[..]);
        for v in attrs.iter() {
            body.put_slice(&v.pack());
        }
        self.body = body.freeze();
        self.update_header_len();
    }

    pub fn len(&self) -> usize {
        HEADER_LEN + self.body.len()
    }

    pub fn pack(&self) -> Result<Bytes, PackPacketErr> {
        if self.body.len() > u16::MAX as usize {
            return Err(PackPacketErr(format!(
                "body len:{} > {}",
                self.body.len(),
                u16::MAX
            )));
        }
        if self.body.len() != self.header.msg_len as usize {
            return Err(PackPacketErr(format!(
                "header len:{} != body len:{}",
                self.header.msg_len,
                self.body.len()
            )));
        }

        let mut buf = BytesMut::with_capacity(self.len());
        buf.put_slice(&self.header.pack());
        buf.put_slice(&self.body);

        Ok(buf.freeze())
    }

    /// Reads one message from the front of `buf`.
    ///
    /// Bytes past the announced length are not part of the message and are
    /// left to the caller.
    pub fn decode(buf: &[u8]) -> Result<Decoded, ParsePacketErr> {
        if buf.len() < HEADER_LEN {
            return Ok(Decoded::NeedMore {
                needed: HEADER_LEN - buf.len(),
            });
        }

        let header = Header::unpack(&buf[..HEADER_LEN])?;
        let total = header.packet_len();

        if buf.len() < total {
            return Ok(Decoded::NeedMore {
                needed: total - buf.len(),
            });
        }

        let body = Bytes::copy_from_slice(&buf[HEADER_LEN..total]);
        Ok(Decoded::Complete {
            packet: Packet { header, body },
            consumed: total,
        })
    }

    /// Reads a message that must span the whole of `buf`.
    pub fn unpack(buf: &[u8]) -> Result<Self, ParsePacketErr> {
        match Packet::decode(buf)? {
            Decoded::Complete { packet, consumed } if consumed == buf.len() => Ok(packet),
            Decoded::Complete { consumed, .. } => Err(ParsePacketErr::NotMatch(format!(
                "packet len:{} != buf len:{}",
                consumed,
                buf.len()
            ))),
            Decoded::NeedMore { needed } => Err(ParsePacketErr::BufSize(format!(
                "buf len:{}, need {} more",
                buf.len(),
                needed
            ))),
        }
    }

    pub fn message_type(&self) -> Result<MessageType, ParsePacketErr> {
        self.header.message_type()
    }

    pub fn is_error(&self) -> bool {
        self.message_type().map(|v| v.is_error()).unwrap_or(false)
    }

    /// Splits the body into attributes.
    ///
    /// Stops when less than an attribute header is left, after an ERROR-CODE,
    /// or at the first truncated attribute. What was read before stays usable.
    pub fn attrs(&self) -> Vec<RawAttr> {
        let mut attr_list = vec![];
        let mut rest = &self.body[..];

        while rest.len() >= ATTR_HEADER_LEN {
            let attr = match RawAttr::unpack(rest) {
                Ok(v) => v,
                Err(e) => {
                    warn!("stop reading attributes, {}", e);
                    break;
                }
            };

            rest = &rest[attr.len()..];
            let is_error_code = attr.attr_type == ATTR_ERROR_CODE;
            attr_list.push(attr);

            if is_error_code {
                break;
            }
        }

        attr_list
    }

    /// `None` when the value doesn't have the shape its type calls for.
    pub fn decode_attr(&self, attr: &RawAttr) -> Option<Attribute> {
        match attr.decode(&self.header) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("can't decode attr {}: {}", attr.name(), e);
                None
            }
        }
    }

    pub fn find_error_code(&self) -> Option<ErrcodeAttr> {
        self.attrs()
            .iter()
            .filter(|v| v.attr_type == ATTR_ERROR_CODE)
            .find_map(|v| match self.decode_attr(v) {
                Some(Attribute::ErrorCode(e)) => Some(e),
                _ => None,
            })
    }

    /// The address the server saw us from.
    ///
    /// XOR-MAPPED-ADDRESS wins even over an earlier MAPPED-ADDRESS, otherwise
    /// the first attribute carrying an address.
    pub fn find_mapped_address(&self) -> Option<Attribute> {
        let decoded: Vec<Attribute> = self
            .attrs()
            .iter()
            .filter_map(|v| self.decode_attr(v))
            .filter(|v| v.as_address().is_some())
            .collect();

        let xor_index = decoded
            .iter()
            .position(|v| matches!(v, Attribute::XorAddress(_)));

        decoded.into_iter().nth(xor_index.unwrap_or(0))
    }

    /// Checks that `response` answers this request.
    pub fn check_response(&self, response: &Packet) -> Result<(), ValidateErr> {
        if self.header.magic_cookie != response.header.magic_cookie {
            return Err(ValidateErr("magic cookie not match".to_string()));
        }

        if self.header.trans_id != response.header.trans_id {
            return Err(ValidateErr("trans_id not match".to_string()));
        }

        let req_type = self
            .message_type()
            .map_err(|e| ValidateErr(format!("request, {}", e)))?;
        let res_type = response
            .message_type()
            .map_err(|e| ValidateErr(format!("response, {}", e)))?;

        if !req_type.is_correct_response(res_type) {
            return Err(ValidateErr(format!(
                "{:?} is not a response to {:?}",
                res_type, req_type
            )));
        }

        Ok(())
    }

    pub fn is_correct_response(&self, response: &Packet) -> bool {
        self.check_response(response).is_ok()
    }
}
