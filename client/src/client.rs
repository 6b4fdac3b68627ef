use crate::config::{ClientConfig, EPHEMERAL_PORT_MAX, EPHEMERAL_PORT_MIN};
use crate::error::StunError;
use crate::exchange::{Exchange, Outcome};
use crate::transport::Transport;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::marker::PhantomData;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use stun_wire::packet::Packet;
use stun_wire::util::{new_trans_id_from, print_bytes};
use tokio::net::UdpSocket;

const RECV_BUF_LEN: usize = 32 * 1024;

pub type SuccessCallback = Box<dyn FnMut(&str, u16) + Send>;
pub type ErrorCallback = Box<dyn FnMut(StunError) + Send>;
pub type VerboseCallback = Box<dyn FnMut(&str) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientMode {
    /// One binding request, reports the mapped address.
    #[default]
    WhoAmI,

    /// Classifies the NAT with several probes. Not implemented yet, starting
    /// it reports nothing.
    NatTypeDiscovery,
}

/// STUN client running one exchange per [`start`](StunClient::start).
///
/// ```no_run
/// # async fn run() {
/// use stun_client::{ClientConfig, StunClient};
///
/// let mut client = StunClient::new(ClientConfig::new("stun.l.google.com", 19302))
///     .who_am_i()
///     .if_who_am_i_successful(|address, port| println!("{}:{}", address, port))
///     .if_error(|e| eprintln!("{}", e));
/// client.start().await;
/// # }
/// ```
pub struct StunClient<T: Transport = UdpSocket> {
    config: ClientConfig,
    mode: ClientMode,
    success_callback: Option<SuccessCallback>,
    error_callback: Option<ErrorCallback>,
    verbose_callback: Option<VerboseCallback>,
    rng: Box<dyn RngCore + Send>,
    transport: PhantomData<fn() -> T>,
}

impl StunClient<UdpSocket> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config)
    }
}

impl<T: Transport> StunClient<T> {
    pub fn with_transport(config: ClientConfig) -> Self {
        Self {
            config,
            mode: ClientMode::default(),
            success_callback: None,
            error_callback: None,
            verbose_callback: None,
            rng: Box::new(StdRng::from_entropy()),
            transport: PhantomData,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn mode(&self) -> ClientMode {
        self.mode
    }

    pub fn who_am_i(mut self) -> Self {
        self.mode = ClientMode::WhoAmI;
        self
    }

    pub fn discover_nat_type(mut self) -> Self {
        self.mode = ClientMode::NatTypeDiscovery;
        self
    }

    /// Source of transaction ids and ephemeral ports.
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// # Panics
    ///
    /// If a success callback is already set.
    pub fn if_who_am_i_successful<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, u16) + Send + 'static,
    {
        if self.success_callback.is_some() {
            panic!("success callback can be assigned only once");
        }
        self.success_callback = Some(Box::new(callback));
        self
    }

    /// # Panics
    ///
    /// If an error callback is already set.
    pub fn if_error<F>(mut self, callback: F) -> Self
    where
        F: FnMut(StunError) + Send + 'static,
    {
        if self.error_callback.is_some() {
            panic!("error callback can be assigned only once");
        }
        self.error_callback = Some(Box::new(callback));
        self
    }

    /// # Panics
    ///
    /// If a verbose callback is already set.
    pub fn verbose<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        if self.verbose_callback.is_some() {
            panic!("verbose callback can be assigned only once");
        }
        self.verbose_callback = Some(Box::new(callback));
        self
    }

    /// Runs the selected mode and hands its outcome to the callbacks.
    pub async fn start(&mut self) {
        match self.mode {
            ClientMode::WhoAmI => {
                let outcome = self.run_who_am_i().await;
                self.deliver(outcome);
            }
            ClientMode::NatTypeDiscovery => {
                warn!("nat type discovery is not implemented");
                emit(
                    &mut self.verbose_callback,
                    "NAT type discovery is not implemented yet",
                );
            }
        }
    }

    /// One binding exchange. The socket is closed before this returns.
    pub async fn run_who_am_i(&mut self) -> Outcome {
        let local_port = self.local_port();
        emit(
            &mut self.verbose_callback,
            &format!(
                "Start Who Am I procedure with Stun server {}:{} from local port {}",
                self.config.server_address, self.config.server_port, local_port
            ),
        );

        let server = self.resolve_server().await?;
        let bind_addr = match server {
            SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), local_port),
            SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), local_port),
        };

        let transport = T::bind(bind_addr).await.map_err(StunError::transport)?;
        debug!("local addr: {:?}", transport.local_addr());

        let request = Packet::binding_request(new_trans_id_from(&mut self.rng));
        let buf = request.pack()?;

        let sent = transport
            .send_to(&buf, server)
            .await
            .map_err(StunError::transport)?;
        debug!(
            "{:?} --> {}\n{}",
            transport.local_addr(),
            server,
            print_bytes(&buf, " ", 8)
        );
        debug!("sent: {}", sent);

        let mut exchange = Exchange::new(request);
        let outcome = drive(
            &transport,
            server,
            &mut exchange,
            self.config.timeout,
            &mut self.verbose_callback,
        )
        .await;

        drop(transport);
        debug!("exchange {:?}, transport closed", exchange.state());

        outcome
    }

    fn deliver(&mut self, outcome: Outcome) {
        match outcome {
            Ok(v) => {
                info!("mapped address: {}:{}", v.address, v.port);
                if let Some(callback) = self.success_callback.as_mut() {
                    callback(&v.address, v.port);
                }
            }
            Err(e) => {
                error!("error, who am i, {}", e);
                if let Some(callback) = self.error_callback.as_mut() {
                    callback(e);
                }
            }
        }
    }

    fn local_port(&mut self) -> u16 {
        match self.config.local_port {
            0 => self.rng.gen_range(EPHEMERAL_PORT_MIN..EPHEMERAL_PORT_MAX),
            v => v,
        }
    }

    async fn resolve_server(&self) -> Result<SocketAddr, StunError> {
        let host = (self.config.server_address.as_str(), self.config.server_port);
        let mut addrs = tokio::net::lookup_host(host).await.map_err(|e| {
            error!("error, lookup {}, {}", self.config.server_address, e);
            StunError::CannotResolveServerAddress
        })?;

        addrs.next().ok_or(StunError::CannotResolveServerAddress)
    }
}

fn emit(verbose: &mut Option<VerboseCallback>, line: &str) {
    debug!("{}", line);
    if let Some(callback) = verbose.as_mut() {
        callback(line);
    }
}

async fn drive<T: Transport>(
    transport: &T,
    server: SocketAddr,
    exchange: &mut Exchange,
    timeout: Duration,
    verbose: &mut Option<VerboseCallback>,
) -> Outcome {
    let mut recv_buf = vec![0u8; RECV_BUF_LEN];
    let mut verbose_line = |line: &str| {
        if let Some(callback) = verbose.as_mut() {
            callback(line);
        }
    };

    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            res = transport.recv_from(&mut recv_buf) => {
                let resolved = match res {
                    Ok((len, remote_addr)) if remote_addr != server => {
                        warn!("drop {} bytes from {}, not the server", len, remote_addr);
                        None
                    }
                    Ok((len, remote_addr)) => {
                        debug!("recv len: {}", len);
                        debug!("<-- {}\n{}", remote_addr, print_bytes(&recv_buf[..len], " ", 8));
                        exchange.on_datagram(&recv_buf[..len], &mut verbose_line)
                    }
                    Err(e) => exchange.on_read_error(StunError::read(e)),
                };

                if let Some(outcome) = resolved {
                    break outcome;
                }
            },
            _ = &mut deadline => {
                debug!("no response in {:?}", timeout);
                break exchange.on_timeout().unwrap_or(Err(StunError::ReadTimeout));
            }
        }
    }
}
