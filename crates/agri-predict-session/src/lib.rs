/*
[INPUT]:  Public API exports for agri-predict-session crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod page;
pub mod render;
pub mod session;

// Re-export main types for convenience
pub use config::AppConfig;
pub use page::{PageUpdate, SessionEvent, TaskPage};
pub use render::ResultView;
pub use session::{
    OverlayState, RecommendationOverlay, SessionError, SessionStatus, TaskSession,
};
