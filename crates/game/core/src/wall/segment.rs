use std::fmt;

/// Number of sides on every ring.
pub const SIDES_PER_RING: usize = 4;

/// Address of one wall segment.
///
/// The derived ordering (ring, then side, then index) matches the flattened
/// index used by [`super::WallTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallSegmentId {
    pub ring: usize,
    pub side: usize,
    pub index: usize,
}

impl WallSegmentId {
    pub const fn new(ring: usize, side: usize, index: usize) -> Self {
        Self { ring, side, index }
    }

    pub const fn origin(&self) -> SideOrigin {
        SideOrigin::new(self.ring, self.side)
    }
}

impl fmt::Display for WallSegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}s{}i{}", self.ring, self.side, self.index)
    }
}

/// One side of one ring; where blue words enter the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideOrigin {
    pub ring: usize,
    pub side: usize,
}

impl SideOrigin {
    pub const fn new(ring: usize, side: usize) -> Self {
        Self { ring, side }
    }
}

/// Square area, centered on the arena origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaBounds {
    pub half_extent: f32,
}

impl ArenaBounds {
    pub const fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x.abs() <= self.half_extent && y.abs() <= self.half_extent
    }

    pub fn padded(&self, padding: f32) -> Self {
        Self::new(self.half_extent + padding)
    }
}
