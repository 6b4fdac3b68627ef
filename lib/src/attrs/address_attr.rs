use crate::attrs::{GeneralAddress, RawAttr};
use crate::constants::*;
use crate::error::ParsePacketErr;
use crate::util;
use bytes::{BufMut, BytesMut};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

// 地址类的attribute
//
// mapped-address  response-address  source-address
// changed-address  response-origin  other-address

// ipv4: family: 0x01, 4 bytes
// ipv6: family: 0x02, 16 bytes

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressAttr {
    pub attr_type: u16,
    pub address: SocketAddr,
}

impl AddressAttr {
    pub fn new(attr_type: u16, address: SocketAddr) -> Self {
        Self { attr_type, address }
    }

    pub fn is_like_mapped_addr(attr_type: u16) -> bool {
        matches!(
            attr_type,
            ATTR_MAPPED_ADDRESS
                | ATTR_RESPONSE_ADDRESS
                | ATTR_SOURCE_ADDRESS
                | ATTR_CHANGED_ADDRESS
                | ATTR_RESPONSE_ORIGIN
                | ATTR_OTHER_ADDRESS
        )
    }
}

impl GeneralAddress for AddressAttr {
    fn family(&self) -> u8 {
        family_of(&self.address)
    }

    fn address(&self) -> String {
        util::format_ip(&self.address.ip())
    }

    fn port(&self) -> u16 {
        self.address.port()
    }
}

pub(crate) fn family_of(address: &SocketAddr) -> u8 {
    match address {
        SocketAddr::V4(_) => ATTR_FAMILY_IPV4,
        SocketAddr::V6(_) => ATTR_FAMILY_IPV6,
    }
}

/// Wire form: reserved byte, family, port, then 4 or 16 address bytes.
pub(crate) fn pack_address(address: &SocketAddr) -> BytesMut {
    let (port, ip_bytes): (u16, Vec<u8>) = match address {
        SocketAddr::V4(addr) => (addr.port(), addr.ip().octets().into()),
        SocketAddr::V6(addr) => (addr.port(), addr.ip().octets().into()),
    };

    let mut bytes_buf = BytesMut::with_capacity(4 + ip_bytes.len());
    bytes_buf.put_u8(0);
    bytes_buf.put_u8(family_of(address));
    bytes_buf.put_u16(port);
    bytes_buf.put_slice(&ip_bytes);
    bytes_buf
}

pub(crate) fn unpack_address(value: &[u8]) -> Result<SocketAddr, ParsePacketErr> {
    if value.len() < 4 {
        return Err(ParsePacketErr::BufSize(format!(
            "address attr buf len:{}",
            value.len()
        )));
    }

    let family = value[1];
    let port = u16::from_be_bytes([value[2], value[3]]);
    let ip_buf = &value[4..];

    let ip = match family {
        ATTR_FAMILY_IPV4 => {
            let addr: [u8; 4] = ip_buf.try_into().map_err(|_| {
                ParsePacketErr::NotMatch(format!("ipv4 buf len:{} != 4", ip_buf.len()))
            })?;
            IpAddr::V4(Ipv4Addr::from(addr))
        }
        ATTR_FAMILY_IPV6 => {
            let addr: [u8; 16] = ip_buf.try_into().map_err(|_| {
                ParsePacketErr::NotMatch(format!("ipv6 buf len:{} != 16", ip_buf.len()))
            })?;
            IpAddr::V6(Ipv6Addr::from(addr))
        }
        v => {
            return Err(ParsePacketErr::BadValue(format!("ip family: {}", v)));
        }
    };

    Ok(SocketAddr::new(ip, port))
}

impl From<AddressAttr> for RawAttr {
    fn from(attr: AddressAttr) -> Self {
        let value = pack_address(&attr.address).freeze();
        RawAttr::new(attr.attr_type, value)
    }
}

impl TryFrom<RawAttr> for AddressAttr {
    type Error = ParsePacketErr;

    fn try_from(base_attr: RawAttr) -> Result<Self, Self::Error> {
        let address = unpack_address(&base_attr.value)?;
        Ok(Self {
            attr_type: base_attr.attr_type,
            address,
        })
    }
}
