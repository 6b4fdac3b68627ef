use stun_wire::attrs::address_attr::AddressAttr;
use stun_wire::attrs::errcode_attr::{ErrcodeAttr, ServerErrorKind};
use stun_wire::attrs::string_attr::StringAttr;
use stun_wire::attrs::xor_address::XorMappedAddress;
use stun_wire::attrs::Attribute;
use stun_wire::constants::*;
use stun_wire::header::Header;
use stun_wire::message_type::MessageType;
use stun_wire::packet::{Decoded, Packet};
use stun_wire::util;

const BINDING_REQUEST: [u8; 20] = [
    0x00, 0x01, 0x00, 0x00, 0x21, 0x12, 0xA4, 0x42, 0xF4, 0xE3, 0x97, 0x94, 0x16, 0xA3, 0x28, 0xC7,
    0xDC, 0x90, 0xA7, 0x69,
];

const BINDING_RESPONSE: [u8; 32] = [
    0x01, 0x01, 0x00, 0x0C, 0x21, 0x12, 0xA4, 0x42, 0xF4, 0xE3, 0x97, 0x94, 0x16, 0xA3, 0x28, 0xC7,
    0xDC, 0x90, 0xA7, 0x69, 0x00, 0x20, 0x00, 0x08, 0x00, 0x01, 0xB0, 0xC6, 0xA9, 0xBB, 0x0C, 0xFB,
];

const BINDING_RESPONSE_IPV6: [u8; 44] = [
    0x01, 0x01, 0x00, 0x18, 0x21, 0x12, 0xA4, 0x42, 0xF4, 0xE3, 0x97, 0x94, 0x16, 0xA3, 0x28, 0xC7,
    0xDC, 0x90, 0xA7, 0x69, 0x00, 0x20, 0x00, 0x14, 0x00, 0x02, 0xB0, 0xC6, 0xA9, 0xBB, 0x0C, 0xFB,
    0x2B, 0x0C, 0x59, 0x91, 0x2D, 0x70, 0x0F, 0x02, 0xE7, 0x6F, 0x22, 0x0C,
];

// body length 10, reason "no" without padding
const BINDING_ERROR: [u8; 30] = [
    0x01, 0x11, 0x00, 0x0A, 0x21, 0x12, 0xA4, 0x42, 0xF4, 0xE3, 0x97, 0x94, 0x16, 0xA3, 0x28, 0xC7,
    0xDC, 0x90, 0xA7, 0x69, 0x00, 0x09, 0x00, 0x06, 0x00, 0x00, 0x04, 0x00, 0x6E, 0x6F,
];

const SHARED_SECRET_ERROR: [u8; 28] = [
    0x01, 0x12, 0x00, 0x08, 0x21, 0x12, 0xA4, 0x42, 0xF4, 0xE3, 0x97, 0x94, 0x16, 0xA3, 0x28, 0xC7,
    0xDC, 0x90, 0xA7, 0x69, 0x00, 0x09, 0x00, 0x02, 0x04, 0x00, 0xB0, 0xC6,
];

fn address_of(packet: &Packet) -> (String, u16) {
    let attrs = packet.attrs();
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs[0].attr_type, ATTR_XOR_MAPPED_ADDRESS);

    let decoded = packet.decode_attr(&attrs[0]).unwrap();
    let addr = decoded.as_address().unwrap();
    (addr.address(), addr.port())
}

#[test]
pub fn test_unpack_binding_response() {
    let packet = Packet::unpack(&BINDING_RESPONSE).unwrap();

    assert_eq!(packet.message_type(), Ok(MessageType::BindingResponse));
    assert_eq!(packet.header.msg_len, 12);
    assert_eq!(packet.header.magic_cookie, MAGIC_COOKIE);
    assert_eq!(
        address_of(&packet),
        ("136.169.168.185".to_string(), 37332)
    );
}

#[test]
pub fn test_unpack_binding_response_ipv6() {
    let packet = Packet::unpack(&BINDING_RESPONSE_IPV6).unwrap();

    assert_eq!(
        address_of(&packet),
        (
            "88a9:a8b9:dfef:ce05:3bd3:27c5:3bff:8565".to_string(),
            37332
        )
    );
}

#[test]
pub fn test_truncated_needs_more_data() {
    let short = &BINDING_RESPONSE[..BINDING_RESPONSE.len() - 1];
    assert_eq!(
        Packet::decode(short).unwrap(),
        Decoded::NeedMore { needed: 1 }
    );
    assert!(Packet::unpack(short).is_err());

    match Packet::decode(&BINDING_RESPONSE).unwrap() {
        Decoded::Complete { consumed, .. } => assert_eq!(consumed, BINDING_RESPONSE.len()),
        v => panic!("unexpected {:?}", v),
    }
}

#[test]
pub fn test_unpack_binding_error() {
    let packet = Packet::unpack(&BINDING_ERROR).unwrap();
    assert!(packet.is_error());

    let err = packet.find_error_code().unwrap();
    assert_eq!(err.code, 400);
    assert_eq!(err.kind(), ServerErrorKind::BadRequest);
    assert_eq!(err.reason, "no");
}

#[test]
pub fn test_correlation() {
    let request = Packet::unpack(&BINDING_REQUEST).unwrap();
    let response = Packet::unpack(&BINDING_RESPONSE).unwrap();
    assert!(request.is_correct_response(&response));

    let shared_secret_error = Packet::unpack(&SHARED_SECRET_ERROR).unwrap();
    assert!(!request.is_correct_response(&shared_secret_error));

    let mut wrong = BINDING_RESPONSE;
    wrong[8] = 0;
    let response = Packet::unpack(&wrong).unwrap();
    assert!(!request.is_correct_response(&response));
}

#[test]
pub fn test_shared_secret_error_short_code() {
    let packet = Packet::unpack(&SHARED_SECRET_ERROR).unwrap();

    // a 2 byte ERROR-CODE, the 2 trailing bytes don't make an attribute
    let attrs = packet.attrs();
    assert_eq!(attrs.len(), 1);
    assert!(packet.decode_attr(&attrs[0]).is_none());
    assert!(packet.find_error_code().is_none());
}

#[test]
pub fn test_round_trip_response() {
    let trans_id = util::new_trans_id();

    let header = Header::new(MESSAGE_TYPE_BIND_RES, 0, trans_id);
    let mapped_addr = "[1:2:3:4:5:6:7:8]:8080".parse().unwrap();
    let origin_addr = "10.20.30.40:1234".parse().unwrap();
    let other_addr = "10.20.30.41:1235".parse().unwrap();

    let attr_list = vec![
        AddressAttr::new(ATTR_MAPPED_ADDRESS, mapped_addr).into(),
        AddressAttr::new(ATTR_RESPONSE_ORIGIN, origin_addr).into(),
        AddressAttr::new(ATTR_OTHER_ADDRESS, other_addr).into(),
        XorMappedAddress::new(trans_id, mapped_addr).into(),
        StringAttr::new(ATTR_SOFTWARE, "stun-wire").into(),
    ];

    let packet = Packet::new(header, attr_list.clone());
    let buf = packet.pack().unwrap();
    println!("{}", util::print_bytes(&buf, " ", 8));

    let unpacked = Packet::unpack(&buf).unwrap();
    assert_eq!(unpacked, packet);
    assert_eq!(unpacked.attrs(), attr_list);

    match unpacked.find_mapped_address() {
        Some(Attribute::XorAddress(v)) => assert_eq!(v.address, mapped_addr),
        v => panic!("unexpected {:?}", v),
    }
}

#[test]
pub fn test_round_trip_error_response() {
    let header = Header::new(MESSAGE_TYPE_BIND_ERR_RES, 0, util::new_trans_id());
    let packet = Packet::new(header, vec![ErrcodeAttr::new(401, "not auth").into()]);

    let unpacked = Packet::unpack(&packet.pack().unwrap()).unwrap();
    assert_eq!(unpacked, packet);
    assert_eq!(
        unpacked.find_error_code().unwrap().kind(),
        ServerErrorKind::Unauthorized
    );
}
