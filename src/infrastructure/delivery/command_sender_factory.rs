use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::application::ports::CommandSender;
use crate::domain::{RadioEndpoint, TcpEndpoint};
use crate::presentation::config::{DeliverySettings, DeliveryTransport};

use super::{BleCommandSender, BtleplugLink, TcpCommandSender};

pub struct CommandSenderFactory;

#[derive(Debug, thiserror::Error)]
pub enum CommandSenderFactoryError {
    #[error("invalid characteristic uuid '{0}': {1}")]
    InvalidCharacteristic(String, String),
    #[error("invalid {0}: {1} (expected a positive number of seconds)")]
    InvalidTimeout(&'static str, f64),
}

impl CommandSenderFactory {
    pub fn create(
        settings: &DeliverySettings,
    ) -> Result<Arc<dyn CommandSender>, CommandSenderFactoryError> {
        match settings.transport {
            DeliveryTransport::Tcp => {
                let tcp = &settings.tcp;
                let read_timeout = seconds("read_timeout_secs", tcp.read_timeout_secs)?;
                let connect_timeout = tcp
                    .connect_timeout_secs
                    .map(|secs| seconds("connect_timeout_secs", secs))
                    .transpose()?;
                let endpoint = TcpEndpoint::new(tcp.host.clone(), tcp.port);

                tracing::info!(
                    endpoint = %endpoint,
                    read_timeout_secs = tcp.read_timeout_secs,
                    connect_timeout_secs = ?tcp.connect_timeout_secs,
                    "Using TCP elevator transport"
                );
                Ok(Arc::new(
                    TcpCommandSender::new(endpoint, read_timeout)
                        .with_connect_timeout(connect_timeout),
                ))
            }
            DeliveryTransport::Ble => {
                let ble = &settings.ble;
                let characteristic = Uuid::parse_str(&ble.characteristic_uuid).map_err(|e| {
                    CommandSenderFactoryError::InvalidCharacteristic(
                        ble.characteristic_uuid.clone(),
                        e.to_string(),
                    )
                })?;
                let scan_timeout = seconds("scan_timeout_secs", ble.scan_timeout_secs)?;
                let endpoint = RadioEndpoint::new(ble.device_address.clone(), characteristic);

                tracing::info!(endpoint = %endpoint, "Using bluetooth elevator transport");
                Ok(Arc::new(BleCommandSender::new(
                    Arc::new(BtleplugLink::new(scan_timeout)),
                    endpoint,
                )))
            }
        }
    }
}

fn seconds(name: &'static str, secs: f64) -> Result<Duration, CommandSenderFactoryError> {
    if secs <= 0.0 {
        return Err(CommandSenderFactoryError::InvalidTimeout(name, secs));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|_| CommandSenderFactoryError::InvalidTimeout(name, secs))
}
