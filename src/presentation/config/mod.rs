mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    BleDeliverySettings, DeliverySettings, DeliveryTransport, LlmSettings, LoggingSettings,
    ServerSettings, Settings, TcpDeliverySettings, TranscriptionSettings,
};
