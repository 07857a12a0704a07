use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use btleplug::api::{BDAddr, Central, Manager as _, Peripheral as _, ScanFilter, WriteType};
use btleplug::platform::{Adapter, Manager, Peripheral};
use tokio::time::Instant;
use uuid::Uuid;

use crate::application::ports::{RadioLink, RadioLinkError, RadioSession};
use crate::domain::RadioEndpoint;

const SCAN_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Bluetooth LE access through the host's first adapter.
pub struct BtleplugLink {
    scan_timeout: Duration,
}

impl BtleplugLink {
    pub fn new(scan_timeout: Duration) -> Self {
        Self { scan_timeout }
    }

    async fn first_adapter(&self) -> Result<Adapter, RadioLinkError> {
        let manager = Manager::new().await.map_err(backend)?;
        manager
            .adapters()
            .await
            .map_err(backend)?
            .into_iter()
            .next()
            .ok_or(RadioLinkError::NoAdapter)
    }

    async fn find_peripheral(
        &self,
        adapter: &Adapter,
        address: BDAddr,
    ) -> Result<Peripheral, RadioLinkError> {
        adapter
            .start_scan(ScanFilter::default())
            .await
            .map_err(backend)?;

        let deadline = Instant::now() + self.scan_timeout;
        let found = loop {
            let peripherals = adapter.peripherals().await.map_err(backend)?;
            if let Some(peripheral) = peripherals.into_iter().find(|p| p.address() == address) {
                break Some(peripheral);
            }
            if Instant::now() >= deadline {
                break None;
            }
            tokio::time::sleep(SCAN_POLL_INTERVAL).await;
        };

        if let Err(e) = adapter.stop_scan().await {
            tracing::debug!(error = %e, "Ignoring error while stopping bluetooth scan");
        }

        found.ok_or_else(|| RadioLinkError::DeviceNotFound(address.to_string()))
    }
}

#[async_trait]
impl RadioLink for BtleplugLink {
    async fn connect(
        &self,
        endpoint: &RadioEndpoint,
    ) -> Result<Box<dyn RadioSession>, RadioLinkError> {
        let address = BDAddr::from_str(&endpoint.device_address).map_err(|e| {
            RadioLinkError::InvalidAddress(format!("{}: {}", endpoint.device_address, e))
        })?;

        let adapter = self.first_adapter().await?;
        let peripheral = self.find_peripheral(&adapter, address).await?;

        tracing::debug!(device = %address, "Connecting to bluetooth peripheral");
        peripheral.connect().await.map_err(backend)?;

        Ok(Box::new(BtleplugSession { peripheral }))
    }
}

struct BtleplugSession {
    peripheral: Peripheral,
}

#[async_trait]
impl RadioSession for BtleplugSession {
    async fn is_connected(&self) -> Result<bool, RadioLinkError> {
        self.peripheral.is_connected().await.map_err(backend)
    }

    async fn write(&self, characteristic: Uuid, payload: &[u8]) -> Result<(), RadioLinkError> {
        if self.peripheral.characteristics().is_empty() {
            self.peripheral.discover_services().await.map_err(backend)?;
        }

        let target = self
            .peripheral
            .characteristics()
            .into_iter()
            .find(|c| c.uuid == characteristic)
            .ok_or(RadioLinkError::CharacteristicNotFound(characteristic))?;

        self.peripheral
            .write(&target, payload, WriteType::WithResponse)
            .await
            .map_err(backend)
    }

    async fn disconnect(&self) -> Result<(), RadioLinkError> {
        self.peripheral.disconnect().await.map_err(backend)
    }
}

fn backend(err: btleplug::Error) -> RadioLinkError {
    RadioLinkError::Backend(err.to_string())
}
