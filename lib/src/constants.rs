// 0x2112A442
pub const MAGIC_COOKIE: [u8; 4] = [0x21, 0x12, 0xA4, 0x42];

pub const TRANS_ID_LEN: usize = 12;
pub const HEADER_LEN: usize = 20;
pub const ATTR_HEADER_LEN: usize = 4;

pub const MESSAGE_TYPE_BIND_REQ: u16 = 0x0001;
pub const MESSAGE_TYPE_BIND_RES: u16 = 0x0101;
pub const MESSAGE_TYPE_BIND_ERR_RES: u16 = 0x0111;
pub const MESSAGE_TYPE_SHARED_SECRET_REQ: u16 = 0x0002;
pub const MESSAGE_TYPE_SHARED_SECRET_RES: u16 = 0x0102;
pub const MESSAGE_TYPE_SHARED_SECRET_ERR_RES: u16 = 0x0112;

pub const ATTR_FAMILY_IPV4: u8 = 0x01;
pub const ATTR_FAMILY_IPV6: u8 = 0x02;

pub const ATTR_MAPPED_ADDRESS: u16 = 0x0001;
pub const ATTR_RESPONSE_ADDRESS: u16 = 0x0002;
pub const ATTR_CHANGE_REQUEST: u16 = 0x0003;
pub const ATTR_SOURCE_ADDRESS: u16 = 0x0004;
pub const ATTR_CHANGED_ADDRESS: u16 = 0x0005;
pub const ATTR_USERNAME: u16 = 0x0006;
pub const ATTR_PASSWORD: u16 = 0x0007;
pub const ATTR_MESSAGE_INTEGRITY: u16 = 0x0008;
pub const ATTR_ERROR_CODE: u16 = 0x0009;
pub const ATTR_UNKNOWN_ATTRIBUTES: u16 = 0x000a;
pub const ATTR_REFLECTED_FROM: u16 = 0x000b;
pub const ATTR_REALM: u16 = 0x0014;
pub const ATTR_NONCE: u16 = 0x0015;
pub const ATTR_XOR_MAPPED_ADDRESS: u16 = 0x0020;
pub const ATTR_PADDING: u16 = 0x0026;
pub const ATTR_RESPONSE_PORT: u16 = 0x0027;

pub const ATTR_SOFTWARE: u16 = 0x8022;
pub const ATTR_ALTERNATE_SERVER: u16 = 0x8023;
pub const ATTR_FINGERPRINT: u16 = 0x8028;
pub const ATTR_RESPONSE_ORIGIN: u16 = 0x802b;
pub const ATTR_OTHER_ADDRESS: u16 = 0x802c;

pub const CHANGE_REQUEST_IP: u32 = 0x04;
pub const CHANGE_REQUEST_PORT: u32 = 0x02;

pub fn attr_name(attr_type: u16) -> &'static str {
    match attr_type {
        ATTR_MAPPED_ADDRESS => "MAPPED-ADDRESS",
        ATTR_RESPONSE_ADDRESS => "RESPONSE-ADDRESS",
        ATTR_CHANGE_REQUEST => "CHANGE-REQUEST",
        ATTR_SOURCE_ADDRESS => "SOURCE-ADDRESS",
        ATTR_CHANGED_ADDRESS => "CHANGED-ADDRESS",
        ATTR_USERNAME => "USERNAME",
        ATTR_PASSWORD => "PASSWORD",
        ATTR_MESSAGE_INTEGRITY => "MESSAGE-INTEGRITY",
        ATTR_ERROR_CODE => "ERROR-CODE",
        ATTR_UNKNOWN_ATTRIBUTES => "UNKNOWN-ATTRIBUTES",
        ATTR_REFLECTED_FROM => "REFLECTED-FROM",
        ATTR_REALM => "REALM",
        ATTR_NONCE => "NONCE",
        ATTR_XOR_MAPPED_ADDRESS => "XOR-MAPPED-ADDRESS",
        ATTR_PADDING => "PADDING",
        ATTR_RESPONSE_PORT => "RESPONSE-PORT",
        ATTR_SOFTWARE => "SOFTWARE",
        ATTR_ALTERNATE_SERVER => "ALTERNATE-SERVER",
        ATTR_FINGERPRINT => "FINGERPRINT",
        ATTR_RESPONSE_ORIGIN => "RESPONSE-ORIGIN",
        ATTR_OTHER_ADDRESS => "OTHER-ADDRESS",
        _ => "UNKNOWN",
    }
}
