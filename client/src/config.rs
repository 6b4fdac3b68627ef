use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

// local_port 为 0 时, 每次在这个范围内随机选一个
pub const EPHEMERAL_PORT_MIN: u16 = 10000;
pub const EPHEMERAL_PORT_MAX: u16 = 55000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Hostname or literal address of the STUN server.
    pub server_address: String,
    pub server_port: u16,
    pub local_port: u16,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(server_address: &str, server_port: u16) -> Self {
        Self {
            server_address: server_address.to_string(),
            server_port,
            local_port: 0,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_local_port(mut self, local_port: u16) -> Self {
        self.local_port = local_port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("stun.l.google.com", 19302);
        assert_eq!(config.local_port, 0);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config = config
            .with_local_port(15702)
            .with_timeout(Duration::from_secs(1));
        assert_eq!(config.local_port, 15702);
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
