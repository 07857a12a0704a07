use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Error(String),
}

impl DeliveryStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Sent => f.write_str("sent"),
            DeliveryStatus::Error(detail) => write!(f, "error: {}", detail),
        }
    }
}

impl Serialize for DeliveryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of a single send attempt. Every call produces one, failures included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryResult {
    pub status: DeliveryStatus,
    pub reply: Option<String>,
}

impl DeliveryResult {
    pub fn sent(reply: Option<String>) -> Self {
        Self {
            status: DeliveryStatus::Sent,
            reply,
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Error(detail.into()),
            reply: None,
        }
    }

    pub fn is_sent(&self) -> bool {
        self.status.is_sent()
    }
}
