use crate::constants::*;
use crate::error::ParsePacketErr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    BindingRequest,
    BindingResponse,
    BindingErrorResponse,
    SharedSecretRequest,
    SharedSecretResponse,
    SharedSecretErrorResponse,
}

impl MessageType {
    pub fn code(&self) -> u16 {
        match self {
            MessageType::BindingRequest => MESSAGE_TYPE_BIND_REQ,
            MessageType::BindingResponse => MESSAGE_TYPE_BIND_RES,
            MessageType::BindingErrorResponse => MESSAGE_TYPE_BIND_ERR_RES,
            MessageType::SharedSecretRequest => MESSAGE_TYPE_SHARED_SECRET_REQ,
            MessageType::SharedSecretResponse => MESSAGE_TYPE_SHARED_SECRET_RES,
            MessageType::SharedSecretErrorResponse => MESSAGE_TYPE_SHARED_SECRET_ERR_RES,
        }
    }

    /// Success counterpart of a request type, `None` for responses.
    pub fn success_response(&self) -> Option<MessageType> {
        match self {
            MessageType::BindingRequest => Some(MessageType::BindingResponse),
            MessageType::SharedSecretRequest => Some(MessageType::SharedSecretResponse),
            _ => None,
        }
    }

    /// Error counterpart of a request type, `None` for responses.
    pub fn error_response(&self) -> Option<MessageType> {
        match self {
            MessageType::BindingRequest => Some(MessageType::BindingErrorResponse),
            MessageType::SharedSecretRequest => Some(MessageType::SharedSecretErrorResponse),
            _ => None,
        }
    }

    /// Whether `response` is a valid answer (success or error) to this request type.
    pub fn is_correct_response(&self, response: MessageType) -> bool {
        self.success_response() == Some(response) || self.error_response() == Some(response)
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            MessageType::BindingErrorResponse | MessageType::SharedSecretErrorResponse
        )
    }
}

impl TryFrom<u16> for MessageType {
    type Error = ParsePacketErr;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            MESSAGE_TYPE_BIND_REQ => Ok(MessageType::BindingRequest),
            MESSAGE_TYPE_BIND_RES => Ok(MessageType::BindingResponse),
            MESSAGE_TYPE_BIND_ERR_RES => Ok(MessageType::BindingErrorResponse),
            MESSAGE_TYPE_SHARED_SECRET_REQ => Ok(MessageType::SharedSecretRequest),
            MESSAGE_TYPE_SHARED_SECRET_RES => Ok(MessageType::SharedSecretResponse),
            MESSAGE_TYPE_SHARED_SECRET_ERR_RES => Ok(MessageType::SharedSecretErrorResponse),
            v => Err(ParsePacketErr::BadValue(format!(
                "not support message type: {:#06x}",
                v
            ))),
        }
    }
}

impl From<MessageType> for u16 {
    fn from(msg_type: MessageType) -> Self {
        msg_type.code()
    }
}
