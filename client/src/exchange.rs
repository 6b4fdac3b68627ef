use crate::error::StunError;
use bytes::BytesMut;
use log::{debug, warn};
use stun_wire::attrs::errcode_attr::ServerErrorKind;
use stun_wire::attrs::GeneralAddress;
use stun_wire::packet::{Decoded, Packet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    AwaitingResponse,
    Succeeded,
    Failed,
    TimedOut,
}

/// Where the server saw the request come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedAddress {
    pub family: u8,
    pub address: String,
    pub port: u16,
}

impl MappedAddress {
    fn from_general(addr: &dyn GeneralAddress) -> Self {
        Self {
            family: addr.family(),
            address: addr.address(),
            port: addr.port(),
        }
    }
}

pub type Outcome = Result<MappedAddress, StunError>;

/// One binding request and its single outcome.
///
/// The exchange holds no socket. The driver feeds it datagrams, read errors
/// and the timer; whichever resolves it first wins and every later event
/// returns `None`.
pub struct Exchange {
    request: Packet,
    state: ExchangeState,

    // datagrams not yet forming a whole message
    recv_buf: BytesMut,
}

impl Exchange {
    pub fn new(request: Packet) -> Self {
        Self {
            request,
            state: ExchangeState::AwaitingResponse,
            recv_buf: BytesMut::new(),
        }
    }

    pub fn request(&self) -> &Packet {
        &self.request
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state != ExchangeState::AwaitingResponse
    }

    pub fn on_datagram(&mut self, data: &[u8], verbose: &mut dyn FnMut(&str)) -> Option<Outcome> {
        if self.is_finished() {
            debug!("exchange is {:?}, drop {} bytes", self.state, data.len());
            return None;
        }

        // a datagram holding a whole message replaces whatever is buffered
        if !self.recv_buf.is_empty() {
            if let Ok(Decoded::Complete { .. }) = Packet::decode(data) {
                debug!("drop {} buffered bytes", self.recv_buf.len());
                self.recv_buf.clear();
            }
        }

        self.recv_buf.extend_from_slice(data);

        let response = match Packet::decode(&self.recv_buf) {
            Ok(Decoded::Complete { packet, .. }) => {
                self.recv_buf.clear();
                packet
            }
            Ok(Decoded::NeedMore { needed }) => {
                debug!("need {} more bytes", needed);
                return None;
            }
            Err(e) => {
                warn!("can't decode response, {}", e);
                return self.resolve(Err(e.into()));
            }
        };

        if let Err(e) = self.request.check_response(&response) {
            warn!("wrong response, {}", e);
            return self.resolve(Err(e.into()));
        }

        let outcome = interpret(&response, verbose);
        self.resolve(outcome)
    }

    pub fn on_read_error(&mut self, e: StunError) -> Option<Outcome> {
        if self.is_finished() {
            return None;
        }
        self.resolve(Err(e))
    }

    pub fn on_timeout(&mut self) -> Option<Outcome> {
        if self.is_finished() {
            return None;
        }
        self.resolve(Err(StunError::ReadTimeout))
    }

    fn resolve(&mut self, outcome: Outcome) -> Option<Outcome> {
        self.state = match &outcome {
            Ok(_) => ExchangeState::Succeeded,
            Err(StunError::ReadTimeout) => ExchangeState::TimedOut,
            Err(_) => ExchangeState::Failed,
        };
        Some(outcome)
    }
}

fn interpret(response: &Packet, verbose: &mut dyn FnMut(&str)) -> Outcome {
    for attr in response.attrs().iter() {
        let line = match response.decode_attr(attr) {
            Some(v) => v.to_string(),
            None => format!("{}: description unavailable", attr.name()),
        };
        debug!("{}", line);
        verbose(&line);
    }

    if response.is_error() {
        let kind = response
            .find_error_code()
            .map(|v| v.kind())
            .unwrap_or(ServerErrorKind::Unknown);
        return Err(StunError::StunServerError(kind));
    }

    let attr = response.find_mapped_address();
    attr.as_ref()
        .and_then(|v| v.as_address())
        .map(MappedAddress::from_general)
        .ok_or(StunError::CannotConvertValue)
}
