/*
[INPUT]:  HTTP client configuration and backend endpoints
[OUTPUT]: HTTP responses and typed prediction results
[POS]:    HTTP layer - backend communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod predict;
pub mod public;
pub mod recommend;

pub use error::{AgriError, Result, TransportError};

pub use client::{AgriClient, ClientConfig, DEFAULT_BASE_URL};
