use bitflags::bitflags;

bitflags! {
    /// One-time milestones that persist across runs.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ProgressFlags: u8 {
        const COMPLETED_FIRST_RUN       = 1 << 0;
        const REACHED_LEVEL_10          = 1 << 1;
        const SEEN_COLLECTION_TUTORIAL  = 1 << 2;
    }
}

impl ProgressFlags {
    /// Level at which `REACHED_LEVEL_10` is set.
    pub const MILESTONE_LEVEL: u32 = 10;

    pub fn from_save(first_run: bool, level_10: bool, tutorial: bool) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::COMPLETED_FIRST_RUN, first_run);
        flags.set(Self::REACHED_LEVEL_10, level_10);
        flags.set(Self::SEEN_COLLECTION_TUTORIAL, tutorial);
        flags
    }
}
