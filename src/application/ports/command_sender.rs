use std::time::Duration;

use async_trait::async_trait;

use super::RadioLinkError;
use crate::domain::{DeliveryResult, FloorNumber};

/// Delivers one floor command to an elevator controller.
///
/// Implementations never fail: every outcome, including connection and
/// transport errors, is folded into the returned [`DeliveryResult`].
#[async_trait]
pub trait CommandSender: Send + Sync {
    async fn send(&self, floor: FloorNumber) -> DeliveryResult;

    fn transport_name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("connection failed: {0}")]
    Connect(std::io::Error),
    #[error("connection timed out after {0:?}")]
    ConnectTimeout(Duration),
    #[error("write failed: {0}")]
    Write(std::io::Error),
    #[error("read failed: {0}")]
    Read(std::io::Error),
    #[error("radio connection failed: {0}")]
    RadioConnect(RadioLinkError),
    #[error("radio device not connected")]
    NotConnected,
    #[error("radio write failed: {0}")]
    RadioWrite(RadioLinkError),
}

impl From<DeliveryError> for DeliveryResult {
    fn from(err: DeliveryError) -> Self {
        DeliveryResult::error(err.to_string())
    }
}
