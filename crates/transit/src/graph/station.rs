use std::sync::Arc;

use crate::identifiers::SegmentId;
use crate::models::types::SegmentRole;

/// A segment registered on a station, tagged with the station's role in it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Incidence {
    pub segment: SegmentId,
    pub role: SegmentRole,
}

/// A graph node. Incidences are only added by [`Network::connect`](super::Network::connect).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    name: Arc<str>,
    incidences: Vec<Incidence>,
}

impl Station {
    pub(crate) fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            incidences: Vec::new(),
        }
    }

    pub(crate) fn register(&mut self, segment: SegmentId, role: SegmentRole) {
        self.incidences.push(Incidence { segment, role });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn incidences(&self) -> &[Incidence] {
        &self.incidences
    }

    /// Roles this station plays in `segment` (two for a self-loop)
    pub fn roles_of(&self, segment: SegmentId) -> impl Iterator<Item = SegmentRole> + '_ {
        self.incidences
            .iter()
            .filter(move |incidence| incidence.segment == segment)
            .map(|incidence| incidence.role)
    }
}
