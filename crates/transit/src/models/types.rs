//! Core data types and enums for transit map data.

use std::fmt;

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Kinds of transport a map can describe.
///
/// The discriminant is the bit the kind occupies in a [`TransportTypes`] mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum TransportKind {
    Metro = 0x01,
    Tram = 0x02,
    Bus = 0x04,
    Train = 0x08,
    WaterBus = 0x10,
    Trolleybus = 0x20,
}

impl TransportKind {
    pub const ALL: [TransportKind; 6] = [
        Self::Metro,
        Self::Tram,
        Self::Bus,
        Self::Train,
        Self::WaterBus,
        Self::Trolleybus,
    ];
}

/// Which endpoint of a segment a station is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SegmentRole {
    Begin = 0x01,
    End = 0x02,
}

// ============================================================================
// Data Structures
// ============================================================================

/// Bitmask of [`TransportKind`]s present in one map
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TransportTypes {
    pub(crate) bits: u32,
}

impl TransportTypes {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    pub const fn bits(&self) -> u32 {
        self.bits
    }

    pub fn insert(&mut self, kind: TransportKind) {
        self.bits |= kind as u32;
    }

    pub fn contains(&self, kind: TransportKind) -> bool {
        (self.bits & kind as u32) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = TransportKind> + '_ {
        TransportKind::ALL.into_iter().filter(|kind| self.contains(*kind))
    }
}

impl FromIterator<TransportKind> for TransportTypes {
    fn from_iter<I: IntoIterator<Item = TransportKind>>(iter: I) -> Self {
        let mut types = Self::empty();
        for kind in iter {
            types.insert(kind);
        }
        types
    }
}

/// Which of the model's arrays an identifier failed to resolve against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayKind {
    Station,
    Line,
    Text,
    Segment,
    Locale,
}

impl fmt::Display for ArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Station => "station",
            Self::Line => "line",
            Self::Text => "text",
            Self::Segment => "segment",
            Self::Locale => "locale",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// An id points outside the owning model. Only a lifecycle bug produces this.
    #[error("Dangling {kind} reference: id {id} but model holds {len}")]
    DanglingReference { kind: ArrayKind, id: u32, len: usize },

    #[error("Station not found: {0}")]
    StationNotFound(StationId),

    #[error("Locale not found: {0}")]
    LocaleNotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl TransitError {
    pub(crate) fn dangling(kind: ArrayKind, id: u32, len: usize) -> Self {
        Self::DanglingReference { kind, id, len }
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;
