mod command_sender;
mod llm_client;
mod radio_link;
mod transcription_engine;

pub use command_sender::{CommandSender, DeliveryError};
pub use llm_client::{LlmClient, LlmClientError, LlmTokenStream};
pub use radio_link::{RadioLink, RadioLinkError, RadioSession};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
