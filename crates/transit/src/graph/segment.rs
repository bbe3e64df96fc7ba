use geo::Coord;

use crate::identifiers::StationId;
use crate::models::flags::SegmentFlags;

/// A graph edge between two stations of one [`Network`](super::Network).
///
/// Endpoints are fixed at construction. Waypoints are opaque rendering data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    from: StationId,
    to: StationId,
    delay: Option<f64>,
    flags: SegmentFlags,
    waypoints: Option<Vec<Coord<i32>>>,
}

impl Segment {
    pub(crate) fn new(from: StationId, to: StationId, delay: Option<f64>) -> Self {
        Self {
            from,
            to,
            delay,
            flags: SegmentFlags::new(),
            waypoints: None,
        }
    }

    pub fn from(&self) -> StationId {
        self.from
    }

    pub fn to(&self) -> StationId {
        self.to
    }

    /// Travel time in minutes, if known
    pub fn delay(&self) -> Option<f64> {
        self.delay
    }

    pub fn flags(&self) -> SegmentFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: SegmentFlags) {
        self.flags = flags;
    }

    pub fn add_flag(&mut self, flag: u8) {
        self.flags.set(flag);
    }

    pub fn waypoints(&self) -> Option<&[Coord<i32>]> {
        self.waypoints.as_deref()
    }

    pub fn set_waypoints(&mut self, waypoints: Vec<Coord<i32>>) {
        self.waypoints = Some(waypoints);
    }

    pub fn clear_waypoints(&mut self) {
        self.waypoints = None;
    }
}
