pub mod audio;
pub mod delivery;
pub mod llm;
pub mod observability;
