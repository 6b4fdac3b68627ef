use crate::constants::TRANS_ID_LEN;
use crate::header::{MagicCookie, TransId};
use rand::prelude::*;
use std::fmt::Write as _;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

pub fn print_bytes(buf: &[u8], separator: &str, row_width: usize) -> String {
    let mut hex = String::new();
    buf.iter().enumerate().for_each(|(x, y)| {
        let _ = write!(hex, "{:02X}", y);
        if (x + 1) % row_width == 0 {
            hex.push('\n');
        } else {
            hex.push_str(separator);
        }
    });

    hex
}

pub fn new_trans_id() -> TransId {
    new_trans_id_from(&mut rand::thread_rng())
}

pub fn new_trans_id_from<R: RngCore + ?Sized>(rng: &mut R) -> TransId {
    let mut trans_id = [0u8; TRANS_ID_LEN];
    rng.fill_bytes(&mut trans_id);
    trans_id
}

pub fn xor_port(port: u16, magic_cookie: &MagicCookie) -> u16 {
    let magic_prefix = u16::from_be_bytes([magic_cookie[0], magic_cookie[1]]);
    port ^ magic_prefix
}

pub fn xor_address_v4(addr: SocketAddrV4, magic_cookie: &MagicCookie) -> SocketAddrV4 {
    let port = xor_port(addr.port(), magic_cookie);

    let src_buf = addr.ip().octets();
    let mut buf = [0_u8; 4];
    for i in 0..buf.len() {
        buf[i] = src_buf[i] ^ magic_cookie[i];
    }

    SocketAddrV4::new(Ipv4Addr::from(buf), port)
}

// 前4字节和 magic cookie 做 xor, 后12字节和 trans_id 做 xor
pub fn xor_address_v6(
    addr: SocketAddrV6,
    magic_cookie: &MagicCookie,
    trans_id: &TransId,
) -> SocketAddrV6 {
    let port = xor_port(addr.port(), magic_cookie);

    let src_buf = addr.ip().octets();
    let mut buf = [0_u8; 16];
    for i in 0..buf.len() {
        if i < magic_cookie.len() {
            buf[i] = src_buf[i] ^ magic_cookie[i];
        } else {
            buf[i] = src_buf[i] ^ trans_id[i - magic_cookie.len()];
        }
    }

    SocketAddrV6::new(Ipv6Addr::from(buf), port, 0, 0)
}

pub fn xor_address(addr: SocketAddr, magic_cookie: &MagicCookie, trans_id: &TransId) -> SocketAddr {
    match addr {
        SocketAddr::V4(v) => SocketAddr::V4(xor_address_v4(v, magic_cookie)),
        SocketAddr::V6(v) => SocketAddr::V6(xor_address_v6(v, magic_cookie, trans_id)),
    }
}

/// Dot-decimal for IPv4, eight uncompressed 4-hex-digit groups for IPv6.
pub fn format_ip(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(v) => v.to_string(),
        IpAddr::V6(v) => {
            let octets = v.octets();
            let groups: Vec<String> = octets
                .chunks(2)
                .map(|pair| format!("{:02x}{:02x}", pair[0], pair[1]))
                .collect();
            groups.join(":")
        }
    }
}

// 4*n bytes
pub fn pack_error_reason(msg: &str) -> String {
    let padding = match msg.len() % 4 {
        0 => 0,
        v => 4 - v,
    };

    let mut msg = msg.to_string();
    for _ in 0..padding {
        msg.push(' ');
    }
    msg
}

// class:  3 bit        1-6
// number: 8 bit        0-99
pub fn pack_error_code(code: u16) -> u16 {
    let class = code / 100;
    let number = code % 100;

    (class & 0x07) << 8 | number
}

pub fn unpack_error_code(code: u16) -> u16 {
    let class = (code >> 8) & 0x07;
    let number = code & 0x00ff;
    class * 100 + number
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAGIC_COOKIE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_print_bytes() {
        let s = print_bytes(&[0x01, 0xAB, 0x00, 0xFF], " ", 2);
        assert_eq!(s, "01 AB\n00 FF\n");
    }

    #[test]
    fn test_seeded_trans_id() {
        let a = new_trans_id_from(&mut StdRng::seed_from_u64(7));
        let b = new_trans_id_from(&mut StdRng::seed_from_u64(7));
        let c = new_trans_id_from(&mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_xor_v4_is_involution() {
        let addr: SocketAddrV4 = "136.169.168.185:37332".parse().unwrap();
        let masked = xor_address_v4(addr, &MAGIC_COOKIE);
        assert_eq!(masked.port(), 0xB0C6);
        assert_eq!(masked.ip().octets(), [0xA9, 0xBB, 0x0C, 0xFB]);
        assert_eq!(xor_address_v4(masked, &MAGIC_COOKIE), addr);
    }

    #[test]
    fn test_format_ipv6_uncompressed() {
        let ip: IpAddr = "1:0:0:0:0:0:0:ff".parse().unwrap();
        assert_eq!(format_ip(&ip), "0001:0000:0000:0000:0000:0000:0000:00ff");

        let ip: IpAddr = "10.0.0.1".parse().unwrap();
        assert_eq!(format_ip(&ip), "10.0.0.1");
    }

    #[test]
    fn test_error_code_packing() {
        assert_eq!(pack_error_code(400), 0x0400);
        assert_eq!(pack_error_code(431), 0x041F);
        assert_eq!(unpack_error_code(0x0400), 400);
        assert_eq!(unpack_error_code(pack_error_code(600)), 600);
    }

    #[test]
    fn test_pack_error_reason() {
        assert_eq!(pack_error_reason("no"), "no  ");
        assert_eq!(pack_error_reason("four"), "four");
    }
}
