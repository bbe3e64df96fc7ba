//! Transit map data models, types, and traits.

pub mod flags;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use flags::{SegmentFlags, TransportSegmentFlags};
pub use traits::TransitModel;
pub use types::{ArrayKind, Result, SegmentRole, TransitError, TransportKind, TransportTypes};
