use std::fmt;

use super::face::FaceId;
use super::solid::SolidId;

/// A selectable entity: a single face or a whole solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A single face.
    Face(FaceId),
    /// A solid, standing for all of its faces.
    Solid(SolidId),
}

impl From<FaceId> for EntityRef {
    fn from(id: FaceId) -> Self {
        Self::Face(id)
    }
}

impl From<SolidId> for EntityRef {
    fn from(id: SolidId) -> Self {
        Self::Solid(id)
    }
}

/// IGES-style directory sequence number of an entity.
///
/// The entity at directory index `i` has sequence number `2 * i + 1`, so
/// valid numbers are always odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceNumber(u32);

impl SequenceNumber {
    /// Sequence number of the entity at directory `index`.
    ///
    /// Returns `None` if the number does not fit in a `u32`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        let index = u32::try_from(index).ok()?;
        index.checked_mul(2)?.checked_add(1).map(Self)
    }

    /// Wraps a raw number, rejecting even values (including zero).
    #[must_use]
    pub fn new(raw: u32) -> Option<Self> {
        (raw % 2 == 1).then_some(Self(raw))
    }

    /// Directory index this number refers to.
    #[must_use]
    pub fn index(self) -> usize {
        // u32 always fits in usize on supported targets.
        (self.0 / 2) as usize
    }

    /// The raw odd number.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
