use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target floor carried to the elevator controller.
///
/// No range is enforced here: basements, mezzanines and out-of-range values
/// are the controller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorNumber(i64);

impl FloorNumber {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Stream frame: decimal digits followed by a single newline.
    pub fn to_line_frame(&self) -> Vec<u8> {
        format!("{}\n", self.0).into_bytes()
    }

    /// Radio payload: decimal digits only, no terminator.
    pub fn to_payload(&self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }
}

impl From<i64> for FloorNumber {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for FloorNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid floor number '{}': {}", s, e))
    }
}

impl fmt::Display for FloorNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
