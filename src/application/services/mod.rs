mod floor_call_service;
mod floor_extractor;

pub use floor_call_service::{FloorCallError, FloorCallOutcome, FloorCallService};
pub use floor_extractor::{
    EXTRACTION_SYSTEM_PROMPT, FloorExtractor, extraction_prompt, parse_floor_reply,
};
