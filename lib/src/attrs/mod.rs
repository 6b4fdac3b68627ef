#![allow(clippy::len_without_is_empty)]

use crate::constants::*;
use crate::error::ParsePacketErr;
use crate::header::Header;
use crate::util;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

pub mod address_attr;
pub mod change_request;
pub mod errcode_attr;
pub mod string_attr;
pub mod xor_address;

use address_attr::AddressAttr;
use change_request::ChangeRequest;
use errcode_attr::ErrcodeAttr;
use string_attr::StringAttr;
use xor_address::XorMappedAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttr {
    pub attr_type: u16,
    pub attr_len: u16,
    pub value: Bytes,
}

impl RawAttr {
    pub fn new(attr_type: u16, value: Bytes) -> Self {
        Self {
            attr_type,
            attr_len: value.len() as u16,
            value,
        }
    }

    pub fn len(&self) -> usize {
        self.attr_len as usize + ATTR_HEADER_LEN
    }

    pub fn name(&self) -> &'static str {
        attr_name(self.attr_type)
    }

    pub fn pack(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.len());

        buf.put_u16(self.attr_type);
        buf.put_u16(self.attr_len);
        buf.put_slice(&self.value);

        buf.freeze()
    }

    /// Reads one attribute from the front of `buf`. Trailing bytes are left alone.
    pub fn unpack(buf: &[u8]) -> Result<Self, ParsePacketErr> {
        if buf.len() < ATTR_HEADER_LEN {
            return Err(ParsePacketErr::BufSize(format!(
                "attr buf len:{}",
                buf.len()
            )));
        }

        let mut index = 0_usize;
        let attr_type = u16::from_be_bytes([buf[index], buf[index + 1]]);

        index += 2;
        let attr_len = u16::from_be_bytes([buf[index], buf[index + 1]]);

        index += 2;
        if buf.len() < index + attr_len as usize {
            return Err(ParsePacketErr::BufSize(format!(
                "attr buf len:{} < {}",
                buf.len(),
                index + attr_len as usize
            )));
        }

        let value = Bytes::copy_from_slice(&buf[index..index + attr_len as usize]);

        Ok(Self {
            attr_type,
            attr_len,
            value,
        })
    }

    /// Interprets the value according to `attr_type`.
    ///
    /// `header` is the header of the message carrying this attribute, it
    /// supplies the XOR mask for XOR-MAPPED-ADDRESS.
    pub fn decode(&self, header: &Header) -> Result<Attribute, ParsePacketErr> {
        let attr = match self.attr_type {
            v if AddressAttr::is_like_mapped_addr(v) => {
                Attribute::Address(AddressAttr::try_from(self.clone())?)
            }
            ATTR_XOR_MAPPED_ADDRESS => Attribute::XorAddress(XorMappedAddress::from_base_attr(
                self.clone(),
                &header.magic_cookie,
                &header.trans_id,
            )?),
            ATTR_ERROR_CODE => Attribute::ErrorCode(ErrcodeAttr::try_from(self.clone())?),
            ATTR_USERNAME | ATTR_PASSWORD | ATTR_SOFTWARE => {
                Attribute::Text(StringAttr::try_from(self.clone())?)
            }
            ATTR_CHANGE_REQUEST => {
                Attribute::ChangeRequest(ChangeRequest::try_from(self.clone())?)
            }
            _ => Attribute::Raw(self.clone()),
        };

        Ok(attr)
    }
}

/// Attributes carrying a family, an address and a port.
pub trait GeneralAddress {
    fn family(&self) -> u8;

    fn address(&self) -> String;

    fn port(&self) -> u16;
}

/// An attribute value interpreted by its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Address(AddressAttr),
    XorAddress(XorMappedAddress),
    ErrorCode(ErrcodeAttr),
    Text(StringAttr),
    ChangeRequest(ChangeRequest),
    Raw(RawAttr),
}

impl Attribute {
    pub fn attr_type(&self) -> u16 {
        match self {
            Attribute::Address(v) => v.attr_type,
            Attribute::XorAddress(_) => ATTR_XOR_MAPPED_ADDRESS,
            Attribute::ErrorCode(_) => ATTR_ERROR_CODE,
            Attribute::Text(v) => v.attr_type,
            Attribute::ChangeRequest(_) => ATTR_CHANGE_REQUEST,
            Attribute::Raw(v) => v.attr_type,
        }
    }

    pub fn as_address(&self) -> Option<&dyn GeneralAddress> {
        match self {
            Attribute::Address(v) => Some(v),
            Attribute::XorAddress(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", attr_name(self.attr_type()))?;

        if let Some(addr) = self.as_address() {
            let family = match addr.family() {
                ATTR_FAMILY_IPV4 => "IPv4",
                _ => "IPv6",
            };
            return write!(
                f,
                "family: {}, address: {}, port: {}",
                family,
                addr.address(),
                addr.port()
            );
        }

        match self {
            Attribute::ErrorCode(v) => {
                write!(
                    f,
                    "error code: {} ({:?}), reason: {}",
                    v.code,
                    v.kind(),
                    v.reason
                )
            }
            Attribute::Text(v) => write!(f, "{}", v.content),
            Attribute::ChangeRequest(v) => {
                write!(f, "change ip: {}, change port: {}", v.change_ip, v.change_port)
            }
            Attribute::Raw(v) => {
                let hex = util::print_bytes(&v.value, " ", 16);
                write!(f, "raw content: {}", hex.trim_end())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_truncated() {
        // declares 8 bytes, carries 4
        let buf = [0x00, 0x20, 0x00, 0x08, 0x00, 0x01, 0xB0, 0xC6];
        assert!(matches!(
            RawAttr::unpack(&buf),
            Err(ParsePacketErr::BufSize(_))
        ));
        assert!(RawAttr::unpack(&buf[..3]).is_err());
    }

    #[test]
    fn test_pack_unpack() {
        let attr = RawAttr::new(ATTR_SOFTWARE, Bytes::from_static(b"stun"));
        let buf = attr.pack();
        assert_eq!(&buf[..4], &[0x80, 0x22, 0x00, 0x04]);
        assert_eq!(RawAttr::unpack(&buf).unwrap(), attr);
    }

    #[test]
    fn test_unknown_type_falls_back_to_raw() {
        let header = Header::new(MESSAGE_TYPE_BIND_RES, 0, [0; TRANS_ID_LEN]);
        let attr = RawAttr::new(
            ATTR_FINGERPRINT,
            Bytes::from_static(&[0xDE, 0xAD, 0xBE, 0xEF]),
        );

        let decoded = attr.decode(&header).unwrap();
        assert_eq!(decoded, Attribute::Raw(attr));
        assert!(decoded.as_address().is_none());
        assert_eq!(decoded.to_string(), "FINGERPRINT: raw content: DE AD BE EF");
    }

    #[test]
    fn test_display_address() {
        let header = Header::new(MESSAGE_TYPE_BIND_RES, 0, [0; TRANS_ID_LEN]);
        let attr: RawAttr =
            AddressAttr::new(ATTR_MAPPED_ADDRESS, "10.20.30.40:1234".parse().unwrap()).into();

        let decoded = attr.decode(&header).unwrap();
        assert_eq!(
            decoded.to_string(),
            "MAPPED-ADDRESS: family: IPv4, address: 10.20.30.40, port: 1234"
        );
    }
}
