mod audio_clip;
mod delivery_result;
mod endpoint;
mod floor_number;

pub use audio_clip::{AudioClip, AudioFormat, file_extension};
pub use delivery_result::{DeliveryResult, DeliveryStatus};
pub use endpoint::{RadioEndpoint, TcpEndpoint};
pub use floor_number::FloorNumber;
