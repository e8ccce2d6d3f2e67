//! Broken/unbroken state of every wall segment.

use super::segment::{ArenaBounds, SIDES_PER_RING, SideOrigin, WallSegmentId};
use crate::config::RingLayout;
use crate::events::{EventQueue, GameEvent};

/// Result of [`WallTracker::break_segment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakOutcome {
    /// The segment does not exist in this layout.
    Invalid,
    AlreadyBroken,
    Broken { ring_completed: bool },
}

/// Flat broken-state array over concentric rings of four sides each.
///
/// Segments are laid out ring by ring, side by side. Breaking is monotonic:
/// nothing un-breaks during a run, so a completed ring stays completed.
#[derive(Clone, Debug, PartialEq)]
pub struct WallTracker {
    rings: Vec<RingLayout>,
    /// Flat index of each ring's first segment.
    offsets: Vec<usize>,
    broken: Vec<bool>,
    completed: Vec<bool>,
}

impl WallTracker {
    pub fn new(rings: Vec<RingLayout>) -> Self {
        let mut offsets = Vec::with_capacity(rings.len());
        let mut total = 0;
        for ring in &rings {
            offsets.push(total);
            total += ring.segments_per_side * SIDES_PER_RING;
        }
        let ring_count = rings.len();
        Self {
            rings,
            offsets,
            broken: vec![false; total],
            completed: vec![false; ring_count],
        }
    }

    /// Restores every segment for a new run.
    pub fn reset(&mut self) {
        self.broken.fill(false);
        self.completed.fill(false);
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn segment_count(&self) -> usize {
        self.broken.len()
    }

    pub fn segments_per_side(&self, ring: usize) -> Option<usize> {
        self.rings.get(ring).map(|layout| layout.segments_per_side)
    }

    pub fn to_flat_index(&self, id: WallSegmentId) -> Option<usize> {
        let per_side = self.segments_per_side(id.ring)?;
        if id.side >= SIDES_PER_RING || id.index >= per_side {
            return None;
        }
        Some(self.offsets[id.ring] + id.side * per_side + id.index)
    }

    pub fn from_flat_index(&self, flat: usize) -> Option<WallSegmentId> {
        if flat >= self.broken.len() {
            return None;
        }
        let ring = self.offsets.partition_point(|&offset| offset <= flat) - 1;
        let per_side = self.rings[ring].segments_per_side;
        let local = flat - self.offsets[ring];
        Some(WallSegmentId::new(ring, local / per_side, local % per_side))
    }

    /// All segment ids in flat order.
    pub fn segments(&self) -> impl Iterator<Item = WallSegmentId> + '_ {
        (0..self.broken.len()).filter_map(|flat| self.from_flat_index(flat))
    }

    pub fn is_broken(&self, id: WallSegmentId) -> bool {
        self.to_flat_index(id).is_some_and(|flat| self.broken[flat])
    }

    /// Breaks a segment once. Emits `SegmentBroken`, plus `RingCompleted`
    /// when this was the ring's last standing segment.
    pub fn break_segment(&mut self, id: WallSegmentId, events: &mut EventQueue) -> BreakOutcome {
        let Some(flat) = self.to_flat_index(id) else {
            return BreakOutcome::Invalid;
        };
        if self.broken[flat] {
            return BreakOutcome::AlreadyBroken;
        }
        self.broken[flat] = true;
        events.push(GameEvent::SegmentBroken { segment: id });

        let ring_completed = !self.completed[id.ring] && self.ring_segments_broken(id.ring);
        if ring_completed {
            self.completed[id.ring] = true;
            events.push(GameEvent::RingCompleted { ring: id.ring });
            tracing::info!(ring = id.ring, "wall ring completed");
        }
        BreakOutcome::Broken { ring_completed }
    }

    /// Every segment on the side is broken.
    pub fn is_side_broken(&self, ring: usize, side: usize) -> bool {
        self.side_range(ring, side)
            .is_some_and(|range| self.broken[range].iter().all(|b| *b))
    }

    /// At least one segment on the side is broken.
    pub fn is_side_partially_broken(&self, ring: usize, side: usize) -> bool {
        self.side_range(ring, side)
            .is_some_and(|range| self.broken[range].iter().any(|b| *b))
    }

    pub fn is_ring_complete(&self, ring: usize) -> bool {
        self.completed.get(ring).copied().unwrap_or(false)
    }

    pub fn highest_completed_ring(&self) -> Option<usize> {
        self.completed.iter().rposition(|done| *done)
    }

    /// Sides with at least one broken segment, the places blue words may
    /// come from.
    pub fn partially_broken_sides(&self) -> Vec<SideOrigin> {
        (0..self.rings.len())
            .flat_map(|ring| (0..SIDES_PER_RING).map(move |side| SideOrigin::new(ring, side)))
            .filter(|origin| self.is_side_partially_broken(origin.ring, origin.side))
            .collect()
    }

    pub fn any_broken(&self) -> bool {
        self.broken.iter().any(|b| *b)
    }

    /// Area words may spawn in: the footprint of the ring just outside the
    /// highest completed one, or the innermost ring if none is complete.
    pub fn spawn_bounds(&self) -> ArenaBounds {
        let ring = self
            .highest_completed_ring()
            .map_or(0, |done| done + 1)
            .min(self.rings.len().saturating_sub(1));
        ArenaBounds::new(self.rings.get(ring).map_or(0.0, |layout| layout.half_extent))
    }

    pub fn camera_bounds(&self, padding: f32) -> ArenaBounds {
        self.spawn_bounds().padded(padding)
    }

    fn ring_segments_broken(&self, ring: usize) -> bool {
        (0..SIDES_PER_RING).all(|side| self.is_side_broken(ring, side))
    }

    fn side_range(&self, ring: usize, side: usize) -> Option<std::ops::Range<usize>> {
        let per_side = self.segments_per_side(ring)?;
        if side >= SIDES_PER_RING {
            return None;
        }
        let start = self.offsets[ring] + side * per_side;
        Some(start..start + per_side)
    }
}
