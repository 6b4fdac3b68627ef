use crate::attrs::RawAttr;
use crate::error::ParsePacketErr;
use bytes::Bytes;

// USERNAME, PASSWORD, SOFTWARE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringAttr {
    pub attr_type: u16,
    pub content: String,
}

impl StringAttr {
    pub fn new(attr_type: u16, content: &str) -> Self {
        Self {
            attr_type,
            content: content.to_string(),
        }
    }
}

impl From<StringAttr> for RawAttr {
    fn from(attr: StringAttr) -> Self {
        RawAttr::new(attr.attr_type, Bytes::from(attr.content.into_bytes()))
    }
}

impl TryFrom<RawAttr> for StringAttr {
    type Error = ParsePacketErr;

    fn try_from(base_attr: RawAttr) -> Result<Self, Self::Error> {
        if base_attr.value.is_empty() {
            return Err(ParsePacketErr::BufSize(
                "string attr with empty value".to_string(),
            ));
        }

        let content =
            String::from_utf8(base_attr.value.to_vec()).map_err(|_| ParsePacketErr::NotUtf8)?;

        Ok(Self {
            attr_type: base_attr.attr_type,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ATTR_SOFTWARE;

    #[test]
    fn test_decode_utf8() {
        let raw: RawAttr = StringAttr::new(ATTR_SOFTWARE, "coturn-4.5").into();
        let attr = StringAttr::try_from(raw).unwrap();
        assert_eq!(attr.content, "coturn-4.5");
    }

    #[test]
    fn test_reject_invalid() {
        let raw = RawAttr::new(ATTR_SOFTWARE, Bytes::from_static(&[0xFF, 0xFE]));
        assert_eq!(StringAttr::try_from(raw), Err(ParsePacketErr::NotUtf8));

        let raw = RawAttr::new(ATTR_SOFTWARE, Bytes::new());
        assert!(StringAttr::try_from(raw).is_err());
    }
}
