//! Object-graph representation of a transit network.
//!
//! Stations and segments live in one [`Network`] arena and refer to each
//! other by id. Connecting two stations registers the new segment on both
//! endpoints inside the same call, so no segment is ever observable without
//! both registrations.

pub mod segment;
pub mod station;

pub use segment::Segment;
pub use station::{Incidence, Station};

use std::sync::Arc;

use crate::identifiers::*;
use crate::models::types::*;

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Network {
    stations: Vec<Station>,
    segments: Vec<Segment>,
}

impl Network {
    /// Create a new empty network
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_station(&mut self, name: impl Into<Arc<str>>) -> Result<StationId> {
        let id = StationId::try_from(self.stations.len())
            .map_err(|_| TransitError::InvalidData("too many stations".into()))?;
        self.stations.push(Station::new(name));
        Ok(id)
    }

    /// Create a segment from `from` to `to` and register it on both stations.
    ///
    /// Both endpoints are checked before anything is written, so a failed
    /// call leaves the network untouched.
    pub fn connect(&mut self, from: StationId, to: StationId, delay: Option<f64>) -> Result<SegmentId> {
        for station in [from, to] {
            if station.index() >= self.stations.len() {
                return Err(TransitError::StationNotFound(station));
            }
        }
        let id = SegmentId::try_from(self.segments.len())
            .map_err(|_| TransitError::InvalidData("too many segments".into()))?;

        self.segments.push(Segment::new(from, to, delay));
        self.stations[from.index()].register(id, SegmentRole::Begin);
        self.stations[to.index()].register(id, SegmentRole::End);

        Ok(id)
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.index())
    }

    /// Mutable access to a segment's payload. Endpoints cannot be changed.
    pub fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.get_mut(id.index())
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments touching `station`, with the role the station plays in each
    pub fn segments_of(&self, station: StationId) -> Result<impl Iterator<Item = (&Segment, SegmentRole)> + '_> {
        let station = self
            .stations
            .get(station.index())
            .ok_or(TransitError::StationNotFound(station))?;
        Ok(station
            .incidences()
            .iter()
            .filter_map(move |incidence| self.segment(incidence.segment).map(|segment| (segment, incidence.role))))
    }

    /// `[FROM:<name>;TO:<name>]` for the segment stored under `id`
    pub fn describe_segment(&self, id: SegmentId) -> Result<String> {
        let segment = self
            .segment(id)
            .ok_or_else(|| TransitError::dangling(ArrayKind::Segment, id.get(), self.segments.len()))?;
        let name = |station: StationId| {
            self.station(station)
                .map(Station::name)
                .ok_or_else(|| TransitError::dangling(ArrayKind::Station, station.get(), self.stations.len()))
        };
        Ok(format!("[FROM:{};TO:{}]", name(segment.from())?, name(segment.to())?))
    }
}
