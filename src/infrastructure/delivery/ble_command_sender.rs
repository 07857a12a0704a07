use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{CommandSender, DeliveryError, RadioLink, RadioSession};
use crate::domain::{DeliveryResult, FloorNumber, RadioEndpoint};

/// Writes a floor command to a fixed characteristic on a fixed peripheral.
pub struct BleCommandSender {
    link: Arc<dyn RadioLink>,
    endpoint: RadioEndpoint,
}

impl BleCommandSender {
    pub fn new(link: Arc<dyn RadioLink>, endpoint: RadioEndpoint) -> Self {
        Self { link, endpoint }
    }

    pub fn endpoint(&self) -> &RadioEndpoint {
        &self.endpoint
    }

    pub async fn deliver(&self, floor: FloorNumber) -> DeliveryResult {
        let session = match self.link.connect(&self.endpoint).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(device = %self.endpoint.device_address, error = %e, "Failed to connect to elevator bluetooth device");
                return DeliveryError::RadioConnect(e).into();
            }
        };

        let outcome = self.write_floor(session.as_ref(), floor).await;

        if let Err(e) = session.disconnect().await {
            tracing::debug!(device = %self.endpoint.device_address, error = %e, "Ignoring error while releasing bluetooth session");
        }

        match outcome {
            Ok(()) => {
                tracing::info!(floor = %floor, device = %self.endpoint.device_address, "Sent floor number via bluetooth");
                DeliveryResult::sent(None)
            }
            Err(e) => e.into(),
        }
    }

    async fn write_floor(
        &self,
        session: &dyn RadioSession,
        floor: FloorNumber,
    ) -> Result<(), DeliveryError> {
        let connected = session.is_connected().await.map_err(|e| {
            tracing::error!(device = %self.endpoint.device_address, error = %e, "Failed to query bluetooth connection state");
            DeliveryError::RadioConnect(e)
        })?;
        if !connected {
            tracing::warn!(device = %self.endpoint.device_address, "Failed to connect to elevator bluetooth device");
            return Err(DeliveryError::NotConnected);
        }

        session
            .write(self.endpoint.characteristic, &floor.to_payload())
            .await
            .map_err(|e| {
                tracing::error!(
                    characteristic = %self.endpoint.characteristic,
                    error = %e,
                    "Failed to write floor number to bluetooth characteristic"
                );
                DeliveryError::RadioWrite(e)
            })
    }
}

#[async_trait]
impl CommandSender for BleCommandSender {
    async fn send(&self, floor: FloorNumber) -> DeliveryResult {
        self.deliver(floor).await
    }

    fn transport_name(&self) -> &'static str {
        "ble"
    }
}
