use crate::attrs::address_attr::{family_of, pack_address, unpack_address};
use crate::attrs::{GeneralAddress, RawAttr};
use crate::constants::*;
use crate::error::ParsePacketErr;
use crate::header::{MagicCookie, TransId};
use crate::util;
use std::net::SocketAddr;

// xor-mapped-address 端口和ip需要混淆
// port 和 magic cookie 做 xor
// address(ipv4) 和 magic cookie做xor
// address(ipv6) 和 magic cookie + trans_id 做xor

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorMappedAddress {
    pub address: SocketAddr,
    pub magic_cookie: MagicCookie,
    pub trans_id: TransId,
}

impl XorMappedAddress {
    pub fn new(trans_id: TransId, address: SocketAddr) -> Self {
        Self {
            address,
            magic_cookie: MAGIC_COOKIE,
            trans_id,
        }
    }

    /// Unmasks `base_attr` with the cookie and transaction id of its message.
    pub fn from_base_attr(
        base_attr: RawAttr,
        magic_cookie: &MagicCookie,
        trans_id: &TransId,
    ) -> Result<Self, ParsePacketErr> {
        let masked = unpack_address(&base_attr.value)?;
        let address = util::xor_address(masked, magic_cookie, trans_id);

        Ok(Self {
            address,
            magic_cookie: *magic_cookie,
            trans_id: *trans_id,
        })
    }
}

impl GeneralAddress for XorMappedAddress {
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

impl From<XorMappedAddress> for RawAttr {
    fn from(attr: XorMappedAddress) -> Self {
        let masked = util::xor_address(attr.address, &attr.magic_cookie, &attr.trans_id);
        RawAttr::new(ATTR_XOR_MAPPED_ADDRESS, pack_address(&masked).freeze())
    }
}
