//! Flattened, id-based edges.
//!
//! A [`TransportSegment`] stores only integer ids. Station, line and text
//! records stay in the owning [`TransitModel`], which must outlive every
//! segment that points into it.

use crate::identifiers::*;
use crate::models::{flags::TransportSegmentFlags, traits::TransitModel, types::Result};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportSegment {
    pub id: SegmentId,
    pub line_id: LineId,
    pub map_id: MapId,
    pub station_from_id: StationId,
    pub station_to_id: StationId,
    /// Travel time, if the source specifies one
    pub delay: Option<u32>,
    pub flags: TransportSegmentFlags,
}

impl TransportSegment {
    pub fn new(
        id: SegmentId,
        line_id: LineId,
        map_id: MapId,
        station_from_id: StationId,
        station_to_id: StationId,
        delay: Option<u32>,
    ) -> Self {
        Self {
            id,
            line_id,
            map_id,
            station_from_id,
            station_to_id,
            delay,
            flags: TransportSegmentFlags::new(),
        }
    }

    pub fn is_invisible(&self) -> bool {
        self.flags.is_invisible()
    }

    /// Human-readable summary resolved through the owner's text table.
    ///
    /// Fails with [`TransitError::DanglingReference`](crate::TransitError::DanglingReference)
    /// if any id is out of range for `owner`.
    pub fn resolve_display_form<M>(&self, owner: &M) -> Result<String>
    where
        M: TransitModel + ?Sized,
    {
        let from = owner.station_display_name(self.station_from_id)?;
        let to = owner.station_display_name(self.station_to_id)?;
        let line = owner.line_display_name(self.line_id)?;
        let delay = match self.delay {
            Some(delay) => delay.to_string(),
            None => "null".to_string(),
        };

        Ok(format!(
            "[ID:{};FROM:{};TO:{};LINE:{};DELAY:{}]",
            self.id, from, to, line, delay
        ))
    }
}
