//! Rendering flags carried by segments.
//!
//! The object graph and the flattened arrays use different bit layouts, so
//! each has its own mask type.

/// Flags on an object-graph [`Segment`](crate::graph::Segment)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SegmentFlags {
    pub(crate) flags: u8,
}

impl SegmentFlags {
    /// Drawn as a spline through the waypoints instead of straight lines
    pub const SPLINE: u8 = 0x01;
    pub const INVISIBLE: u8 = 0x02;

    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    pub const fn from_bits(flags: u8) -> Self {
        Self { flags }
    }

    pub const fn bits(&self) -> u8 {
        self.flags
    }

    pub fn set(&mut self, flag: u8) {
        self.flags |= flag;
    }

    pub fn unset(&mut self, flag: u8) {
        self.flags &= !flag;
    }

    pub fn contains(&self, flag: u8) -> bool {
        (self.flags & flag) != 0
    }

    pub fn is_spline(&self) -> bool {
        self.contains(Self::SPLINE)
    }

    pub fn is_invisible(&self) -> bool {
        self.contains(Self::INVISIBLE)
    }
}

/// Flags on a flattened [`TransportSegment`](crate::TransportSegment)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TransportSegmentFlags {
    pub(crate) flags: u32,
}

impl TransportSegmentFlags {
    pub const TYPE_INVISIBLE: u32 = 0x01;

    /// Marker used by map sources to tag a segment as invisible
    pub const INVISIBLE_MARKER: &'static str = "invisible";

    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    pub const fn from_bits(flags: u32) -> Self {
        Self { flags }
    }

    pub const fn bits(&self) -> u32 {
        self.flags
    }

    pub fn set(&mut self, flag: u32) {
        self.flags |= flag;
    }

    pub fn contains(&self, flag: u32) -> bool {
        (self.flags & flag) != 0
    }

    pub fn is_invisible(&self) -> bool {
        self.contains(Self::TYPE_INVISIBLE)
    }

    /// Parse a textual marker into flags. Unknown markers yield no flags.
    pub fn from_marker(marker: &str) -> Self {
        let mut flags = Self::new();
        if marker.trim().eq_ignore_ascii_case(Self::INVISIBLE_MARKER) {
            flags.set(Self::TYPE_INVISIBLE);
        }
        flags
    }
}
