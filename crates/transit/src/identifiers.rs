//! Type-safe integer identifiers for entities held by a [`Model`](crate::Model).
//!
//! Every identifier is a position in one of the model's arrays. They are `Copy`
//! and carry no lifetime, so edges can point at stations, lines and texts
//! without owning them.

use std::fmt;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(u32);

        impl $name {
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            pub const fn get(self) -> u32 {
                self.0
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self::new(index)
            }
        }
    };
}

impl_identifier!(StationId);
impl_identifier!(LineId);
impl_identifier!(TextId);
impl_identifier!(SegmentId);
impl_identifier!(MapId);

impl TryFrom<usize> for SegmentId {
    type Error = std::num::TryFromIntError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u32::try_from(index).map(Self)
    }
}

impl TryFrom<usize> for StationId {
    type Error = std::num::TryFromIntError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u32::try_from(index).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = StationId::new(7);
        let id2 = StationId::from(7);
        let id3 = id1;

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert_eq!(id1.index(), 7);
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(LineId::new(3), 42);

        assert_eq!(map.get(&LineId::new(3)), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        let id = TextId::new(12);
        assert_eq!(format!("{}", id), "12");
    }

    #[test]
    fn test_identifier_from_usize() {
        assert_eq!(SegmentId::try_from(5usize).unwrap(), SegmentId::new(5));
        assert!(StationId::try_from(usize::MAX).is_err());
    }
}
