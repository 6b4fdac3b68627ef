use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePacketErr {
    // 长度或值不匹配
    #[error("length mismatch: {0}")]
    NotMatch(String),

    // buf不够
    #[error("buffer too short: {0}")]
    BufSize(String),

    //字段的值不合规
    #[error("bad value: {0}")]
    BadValue(String),

    // 不是utf8字符串
    #[error("attribute value is not utf8")]
    NotUtf8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("can't pack packet: {0}")]
pub struct PackPacketErr(pub String);

/// Why a message was rejected as the answer to a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidateErr(pub String);
