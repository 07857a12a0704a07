use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, DuplexStream, ReadBuf};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use liftcall::application::ports::CommandSender;
use liftcall::domain::{DeliveryStatus, FloorNumber, TcpEndpoint};
use liftcall::infrastructure::delivery::{
    StreamConnector, TcpCommandSender, decode_message, send_floor_over_tcp,
};

const TEST_READ_TIMEOUT: Duration = Duration::from_millis(300);

/// Controller double: optional greeting on accept, optional reply once a full
/// line arrives. Resolves to every byte received before the client closed.
async fn start_controller(
    greeting: Option<&'static [u8]>,
    reply: Option<&'static [u8]>,
) -> (u16, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        if let Some(greeting) = greeting {
            socket.write_all(greeting).await.unwrap();
        }

        let mut received = Vec::new();
        let mut buf = [0u8; 64];
        while !received.contains(&b'\n') {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return received;
            }
            received.extend_from_slice(&buf[..n]);
        }

        if let Some(reply) = reply {
            socket.write_all(reply).await.unwrap();
        }

        socket.read_to_end(&mut received).await.unwrap();
        received
    });

    (port, handle)
}

fn sender_for(port: u16) -> TcpCommandSender {
    TcpCommandSender::new(TcpEndpoint::new("127.0.0.1", port), TEST_READ_TIMEOUT)
}

#[tokio::test]
async fn given_controller_replies_when_sending_then_sent_with_reply() {
    let (port, controller) = start_controller(None, Some(b"OK5")).await;

    let result = sender_for(port).send(FloorNumber::new(5)).await;

    assert_eq!(result.status, DeliveryStatus::Sent);
    assert_eq!(result.reply.as_deref(), Some("OK5"));
    assert_eq!(controller.await.unwrap(), b"5\n".to_vec());
}

#[tokio::test]
async fn given_silent_controller_when_sending_then_sent_without_reply() {
    let (port, controller) = start_controller(None, None).await;

    let result = sender_for(port).send(FloorNumber::new(5)).await;

    assert_eq!(result.status, DeliveryStatus::Sent);
    assert_eq!(result.reply, None);
    assert_eq!(controller.await.unwrap(), b"5\n".to_vec());
}

#[tokio::test]
async fn given_greeting_only_when_sending_then_reply_is_trimmed_greeting() {
    let (port, controller) = start_controller(Some(b"  READY\r\n"), None).await;

    let result = sender_for(port).send(FloorNumber::new(3)).await;

    assert_eq!(result.status, DeliveryStatus::Sent);
    assert_eq!(result.reply.as_deref(), Some("READY"));
    assert_eq!(controller.await.unwrap(), b"3\n".to_vec());
}

#[tokio::test]
async fn given_greeting_and_reply_when_sending_then_reply_wins() {
    let (port, controller) = start_controller(Some(b"READY"), Some(b" ACK 12 \n")).await;

    let result = sender_for(port).send(FloorNumber::new(12)).await;

    assert_eq!(result.status, DeliveryStatus::Sent);
    assert_eq!(result.reply.as_deref(), Some("ACK 12"));
    assert_eq!(controller.await.unwrap(), b"12\n".to_vec());
}

#[tokio::test]
async fn given_blank_reply_after_greeting_when_sending_then_greeting_is_reported() {
    let (port, controller) = start_controller(Some(b"READY"), Some(b"  \r\n")).await;

    let result = sender_for(port).send(FloorNumber::new(7)).await;

    assert!(result.is_sent());
    assert_eq!(result.reply.as_deref(), Some("READY"));
    assert_eq!(controller.await.unwrap(), b"7\n".to_vec());
}

#[tokio::test]
async fn given_refused_connection_when_sending_then_error_without_reply() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = sender_for(port).send(FloorNumber::new(5)).await;

    assert!(result.status.to_string().starts_with("error:"));
    assert!(result.status.to_string().contains("connection failed"));
    assert_eq!(result.reply, None);
}

#[tokio::test]
async fn given_host_port_and_timeout_when_using_one_shot_helper_then_delivers() {
    let (port, controller) = start_controller(None, Some(b"OK9")).await;

    let result = send_floor_over_tcp(FloorNumber::new(9), "127.0.0.1", port, TEST_READ_TIMEOUT).await;

    assert!(result.is_sent());
    assert_eq!(result.reply.as_deref(), Some("OK9"));
    assert_eq!(controller.await.unwrap(), b"9\n".to_vec());
}

#[derive(Clone, Default)]
struct StreamProbe {
    closed: Arc<AtomicBool>,
    written: Arc<Mutex<Vec<u8>>>,
}

struct ProbedStream {
    inner: DuplexStream,
    probe: StreamProbe,
    fail_reads: bool,
    fail_writes: bool,
}

impl AsyncRead for ProbedStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.fail_reads {
            return Poll::Ready(Err(io::ErrorKind::ConnectionReset.into()));
        }
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl AsyncWrite for ProbedStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if self.fail_writes {
            return Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()));
        }
        let poll = Pin::new(&mut self.inner).poll_write(cx, buf);
        if let Poll::Ready(Ok(n)) = &poll {
            self.probe.written.lock().unwrap().extend_from_slice(&buf[..*n]);
        }
        poll
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.probe.closed.store(true, Ordering::SeqCst);
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

/// Hands out in-memory streams whose far end stays open but silent unless a
/// greeting is scripted.
#[derive(Default)]
struct ProbedConnector {
    probe: StreamProbe,
    greeting: Option<&'static [u8]>,
    fail_reads: bool,
    fail_writes: bool,
    peers: Mutex<Vec<DuplexStream>>,
}

#[async_trait]
impl StreamConnector for ProbedConnector {
    type Stream = ProbedStream;

    async fn connect(&self, _endpoint: &TcpEndpoint) -> io::Result<ProbedStream> {
        let (client, mut peer) = tokio::io::duplex(4096);
        if let Some(greeting) = self.greeting {
            peer.write_all(greeting).await?;
        }
        self.peers.lock().unwrap().push(peer);
        Ok(ProbedStream {
            inner: client,
            probe: self.probe.clone(),
            fail_reads: self.fail_reads,
            fail_writes: self.fail_writes,
        })
    }
}

struct RefusingConnector;

#[async_trait]
impl StreamConnector for RefusingConnector {
    type Stream = DuplexStream;

    async fn connect(&self, _endpoint: &TcpEndpoint) -> io::Result<DuplexStream> {
        Err(io::ErrorKind::ConnectionRefused.into())
    }
}

struct HangingConnector;

#[async_trait]
impl StreamConnector for HangingConnector {
    type Stream = DuplexStream;

    async fn connect(&self, _endpoint: &TcpEndpoint) -> io::Result<DuplexStream> {
        std::future::pending().await
    }
}

fn probed_sender(connector: ProbedConnector) -> TcpCommandSender<ProbedConnector> {
    TcpCommandSender::with_connector(
        connector,
        TcpEndpoint::new("controller", 9999),
        Duration::from_millis(100),
    )
}

#[tokio::test]
async fn given_successful_exchange_when_send_returns_then_stream_was_closed() {
    let connector = ProbedConnector::default();
    let probe = connector.probe.clone();

    let result = probed_sender(connector).send(FloorNumber::new(4)).await;

    assert!(result.is_sent());
    assert!(probe.closed.load(Ordering::SeqCst));
    assert_eq!(*probe.written.lock().unwrap(), b"4\n".to_vec());
}

#[tokio::test]
async fn given_write_failure_when_send_returns_then_error_and_stream_was_closed() {
    let connector = ProbedConnector {
        fail_writes: true,
        ..Default::default()
    };
    let probe = connector.probe.clone();

    let result = probed_sender(connector).send(FloorNumber::new(4)).await;

    assert!(result.status.to_string().starts_with("error: write failed"));
    assert_eq!(result.reply, None);
    assert!(probe.closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn given_read_failure_when_send_returns_then_error_and_stream_was_closed() {
    let connector = ProbedConnector {
        fail_reads: true,
        ..Default::default()
    };
    let probe = connector.probe.clone();

    let result = probed_sender(connector).send(FloorNumber::new(4)).await;

    assert!(result.status.to_string().starts_with("error: read failed"));
    assert_eq!(result.reply, None);
    assert!(probe.closed.load(Ordering::SeqCst));
    assert!(probe.written.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_greeting_with_invalid_utf8_when_sending_then_invalid_bytes_dropped() {
    let connector = ProbedConnector {
        greeting: Some(b"\xffREADY\xfe\n"),
        ..Default::default()
    };

    let result = probed_sender(connector).send(FloorNumber::new(1)).await;

    assert_eq!(result.reply.as_deref(), Some("READY"));
}

#[tokio::test]
async fn given_whitespace_only_greeting_when_sending_then_no_reply() {
    let connector = ProbedConnector {
        greeting: Some(b" \r\n "),
        ..Default::default()
    };

    let result = probed_sender(connector).send(FloorNumber::new(1)).await;

    assert!(result.is_sent());
    assert_eq!(result.reply, None);
}

#[tokio::test]
async fn given_refusing_connector_when_sending_then_error_without_reply() {
    let sender = TcpCommandSender::with_connector(
        RefusingConnector,
        TcpEndpoint::new("controller", 9999),
        TEST_READ_TIMEOUT,
    );

    let result = sender.send(FloorNumber::new(5)).await;

    assert!(result.status.to_string().starts_with("error: connection failed"));
    assert_eq!(result.reply, None);
}

#[tokio::test]
async fn given_connect_timeout_when_connect_hangs_then_error_result() {
    let sender = TcpCommandSender::with_connector(
        HangingConnector,
        TcpEndpoint::new("controller", 9999),
        TEST_READ_TIMEOUT,
    )
    .with_connect_timeout(Some(Duration::from_millis(50)));

    let result = sender.send(FloorNumber::new(5)).await;

    assert!(result.status.to_string().starts_with("error: connection timed out"));
    assert_eq!(result.reply, None);
}

#[test]
fn given_padded_bytes_when_decoding_then_trimmed_text() {
    assert_eq!(decode_message(b"\tOK5 \n").as_deref(), Some("OK5"));
    assert_eq!(decode_message(b""), None);
    assert_eq!(decode_message(b"\xff\xfe"), None);
}
