use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::RadioEndpoint;

/// Opens connection-scoped sessions to a radio peripheral.
#[async_trait]
pub trait RadioLink: Send + Sync {
    async fn connect(
        &self,
        endpoint: &RadioEndpoint,
    ) -> Result<Box<dyn RadioSession>, RadioLinkError>;
}

#[async_trait]
pub trait RadioSession: Send + Sync {
    async fn is_connected(&self) -> Result<bool, RadioLinkError>;

    async fn write(&self, characteristic: Uuid, payload: &[u8]) -> Result<(), RadioLinkError>;

    async fn disconnect(&self) -> Result<(), RadioLinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RadioLinkError {
    #[error("no bluetooth adapter available")]
    NoAdapter,
    #[error("invalid device address: {0}")]
    InvalidAddress(String),
    #[error("device not found: {0}")]
    DeviceNotFound(String),
    #[error("characteristic not found: {0}")]
    CharacteristicNotFound(Uuid),
    #[error("bluetooth error: {0}")]
    Backend(String),
}
