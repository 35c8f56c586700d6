pub mod api;
pub mod core;
pub mod model;
pub mod guidance;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::TracerConfig;
pub use api::listener::{GuidanceListener, SessionListener};
pub use api::tracer::Tracer;
pub use api::types::{EventKind, EventRecord, TracerEvent};
pub use assets::{CatalogError, CharacterCatalog};
pub use core::session::{SessionEvent, SessionState, TracingSession};
pub use core::time::AnimationClock;
pub use core::validator::{coverage, CoverageTracker, StrokeScore, StrokeValidator};
pub use guidance::{GuidanceEvent, GuidanceFrame, GuidancePolicy};
pub use input::queue::{InputEvent, InputQueue};
pub use model::{Character, CharacterCategory, Point, ReferenceStroke};
