use std::fmt;

use uuid::Uuid;

/// Network address of a stream-connected controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpEndpoint {
    pub host: String,
    pub port: u16,
}

impl TcpEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for TcpEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Radio peripheral plus the writable characteristic that accepts commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioEndpoint {
    pub device_address: String,
    pub characteristic: Uuid,
}

impl RadioEndpoint {
    pub fn new(device_address: impl Into<String>, characteristic: Uuid) -> Self {
        Self {
            device_address: device_address.into(),
            characteristic,
        }
    }
}

impl fmt::Display for RadioEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.device_address, self.characteristic)
    }
}
