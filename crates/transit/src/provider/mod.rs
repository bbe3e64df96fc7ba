//! Concrete parsed-map storage.

pub mod model;

pub use model::{LineRecord, Model, StationRecord};
