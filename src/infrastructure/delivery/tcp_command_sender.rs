use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::application::ports::{CommandSender, DeliveryError};
use crate::domain::{DeliveryResult, FloorNumber, TcpEndpoint};

/// Largest message accepted from the controller in a single read.
pub const READ_BUFFER_SIZE: usize = 1024;

/// Opens byte streams to a controller endpoint.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    async fn connect(&self, endpoint: &TcpEndpoint) -> io::Result<Self::Stream>;
}

pub struct TcpConnector;

#[async_trait]
impl StreamConnector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, endpoint: &TcpEndpoint) -> io::Result<TcpStream> {
        TcpStream::connect((endpoint.host.as_str(), endpoint.port)).await
    }
}

/// Sends a floor command over a fresh stream connection per call.
///
/// Protocol: optional greeting read, `"<floor>\n"` write, optional reply read.
/// Both reads are bounded by `read_timeout` and expiry means "nothing said".
/// The connection is shut down before returning on every path.
pub struct TcpCommandSender<C: StreamConnector = TcpConnector> {
    connector: C,
    endpoint: TcpEndpoint,
    read_timeout: Duration,
    connect_timeout: Option<Duration>,
}

impl TcpCommandSender {
    pub fn new(endpoint: TcpEndpoint, read_timeout: Duration) -> Self {
        Self::with_connector(TcpConnector, endpoint, read_timeout)
    }
}

impl<C: StreamConnector> TcpCommandSender<C> {
    pub fn with_connector(connector: C, endpoint: TcpEndpoint, read_timeout: Duration) -> Self {
        Self {
            connector,
            endpoint,
            read_timeout,
            connect_timeout: None,
        }
    }

    /// Bounds connection establishment. Unset means the connect wait is unbounded.
    pub fn with_connect_timeout(mut self, connect_timeout: Option<Duration>) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn endpoint(&self) -> &TcpEndpoint {
        &self.endpoint
    }

    pub async fn deliver(&self, floor: FloorNumber) -> DeliveryResult {
        tracing::info!(endpoint = %self.endpoint, "Connecting to elevator controller");

        let mut stream = match self.open().await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!(endpoint = %self.endpoint, error = %e, "Failed to send floor number to elevator");
                return e.into();
            }
        };
        tracing::info!(endpoint = %self.endpoint, "Connected to elevator controller");

        let outcome = self.exchange(&mut stream, floor).await;
        close(stream).await;

        match outcome {
            Ok(reply) => DeliveryResult::sent(reply),
            Err(e) => {
                tracing::error!(endpoint = %self.endpoint, floor = %floor, error = %e, "Failed to send floor number to elevator");
                e.into()
            }
        }
    }

    async fn open(&self) -> Result<C::Stream, DeliveryError> {
        let connecting = self.connector.connect(&self.endpoint);
        match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, connecting)
                .await
                .map_err(|_| DeliveryError::ConnectTimeout(limit))?
                .map_err(DeliveryError::Connect),
            None => connecting.await.map_err(DeliveryError::Connect),
        }
    }

    async fn exchange(
        &self,
        stream: &mut C::Stream,
        floor: FloorNumber,
    ) -> Result<Option<String>, DeliveryError> {
        let greeting = read_within(stream, self.read_timeout)
            .await
            .map_err(DeliveryError::Read)?;
        match &greeting {
            Some(text) => tracing::info!(greeting = %text, "Received welcome message"),
            None => tracing::debug!("No welcome message received within timeout"),
        }

        stream
            .write_all(&floor.to_line_frame())
            .await
            .map_err(DeliveryError::Write)?;
        stream.flush().await.map_err(DeliveryError::Write)?;
        tracing::info!(floor = %floor, "Sent floor number to elevator");

        let reply = read_within(stream, self.read_timeout)
            .await
            .map_err(DeliveryError::Read)?;
        match &reply {
            Some(text) => tracing::info!(reply = %text, "Elevator replied"),
            None => tracing::debug!("No reply from elevator within timeout"),
        }

        Ok(reply.or(greeting))
    }
}

#[async_trait]
impl<C: StreamConnector + 'static> CommandSender for TcpCommandSender<C> {
    async fn send(&self, floor: FloorNumber) -> DeliveryResult {
        self.deliver(floor).await
    }

    fn transport_name(&self) -> &'static str {
        "tcp"
    }
}

/// One-shot delivery to `host:port` without keeping a sender around.
pub async fn send_floor_over_tcp(
    floor: FloorNumber,
    host: &str,
    port: u16,
    read_timeout: Duration,
) -> DeliveryResult {
    TcpCommandSender::new(TcpEndpoint::new(host, port), read_timeout)
        .deliver(floor)
        .await
}

async fn close<S: AsyncWrite + Unpin>(mut stream: S) {
    if let Err(e) = stream.shutdown().await {
        tracing::debug!(error = %e, "Ignoring error while closing controller connection");
    }
}

async fn read_within<S: AsyncRead + Unpin>(
    stream: &mut S,
    wait: Duration,
) -> io::Result<Option<String>> {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    match tokio::time::timeout(wait, stream.read(&mut buf)).await {
        Err(_elapsed) => Ok(None),
        Ok(Ok(n)) => Ok(decode_message(&buf[..n])),
        Ok(Err(e)) => Err(e),
    }
}

/// Decodes controller text, dropping invalid UTF-8 and surrounding
/// whitespace. Blank messages count as no message.
///
/// A whitespace-only reply yields `None` rather than `""`, so it falls back
/// to the greeting instead of reporting an empty controller message.
pub fn decode_message(bytes: &[u8]) -> Option<String> {
    let text: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
