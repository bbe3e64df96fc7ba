//! # metro-transit
//!
//! In-memory topology of a single transit map.
//!
//! ## Features
//!
//! - **Shared arrays**: a parsed [`Model`] owns text, stations and lines;
//!   everything else refers to them by integer id
//! - **Flyweight edges**: [`TransportSegment`] resolves its display text
//!   through the owning model on demand
//! - **Object graph**: [`graph::Network`] keeps stations and segments with
//!   per-station incidence lists that are wired atomically
//!
//! ## Example
//!
//! ```
//! use metro_transit::prelude::*;
//!
//! let mut network = Network::new();
//! let a = network.add_station("Chistye Prudy").unwrap();
//! let b = network.add_station("Lubyanka").unwrap();
//! let segment = network.connect(a, b, Some(1.5)).unwrap();
//!
//! let station = network.station(a).unwrap();
//! assert_eq!(station.incidences()[0].segment, segment);
//! assert_eq!(station.incidences()[0].role, SegmentRole::Begin);
//! ```

pub mod graph;
pub mod identifiers;
pub mod models;
pub mod provider;
pub mod segment;

// Re-exports for convenience
pub mod prelude {
    pub use crate::graph::{Incidence, Network, Segment, Station};
    pub use crate::identifiers::*;
    pub use crate::models::{flags::*, traits::*, types::*};
    pub use crate::provider::{LineRecord, Model, StationRecord};
    pub use crate::segment::TransportSegment;
}

pub use prelude::*;
