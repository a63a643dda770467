/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public agri-predict adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod backend;
pub mod http;
pub mod payload;
pub mod types;

pub use backend::PredictionBackend;

// Re-export commonly used types from http
pub use http::{AgriClient, AgriError, ClientConfig, DEFAULT_BASE_URL, Result, TransportError};

// Re-export all types
pub use types::*;
