/*
[INPUT]:  Backend schema definitions and serde requirements
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions for backend communication
[UPDATE]: When backend schema changes or new types added
*/

pub mod draft;
pub mod enums;
pub mod requests;
pub mod responses;

pub use draft::*;
pub use enums::*;
pub use requests::*;
pub use responses::*;
