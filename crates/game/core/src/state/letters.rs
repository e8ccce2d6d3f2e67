use crate::events::{EventQueue, GameEvent};

/// Letter rarity, from common `A` to rarest `E`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterKind {
    #[default]
    A,
    B,
    C,
    D,
    E,
}

impl LetterKind {
    pub const COUNT: usize = 5;

    pub const ALL: [LetterKind; Self::COUNT] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Letter inventory and coin balance.
///
/// Persists across runs. Coins never go negative: a spend that cannot be
/// covered is rejected and changes nothing. Each letter count is capped at
/// [`Self::MAX_PER_KIND`], which also bounds a converter session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterTracker {
    letters: [u64; LetterKind::COUNT],
    coins: u64,
}

impl LetterTracker {
    pub const MAX_PER_KIND: u64 = 99_999;

    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the inventory from saved counts, clamping each to
    /// [`Self::MAX_PER_KIND`].
    pub fn restore(letters: [u64; LetterKind::COUNT], coins: u64) -> Self {
        let clamped = letters.map(|count| count.min(Self::MAX_PER_KIND));
        if clamped != letters {
            tracing::warn!(?letters, "clamped saved letter counts");
        }
        Self {
            letters: clamped,
            coins,
        }
    }

    pub fn letters(&self) -> [u64; LetterKind::COUNT] {
        self.letters
    }

    pub fn letter_count(&self, kind: LetterKind) -> u64 {
        self.letters[kind.index()]
    }

    pub fn total_letters(&self) -> u64 {
        self.letters.iter().fold(0, |total, &count| total.saturating_add(count))
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn add_letter(&mut self, kind: LetterKind, events: &mut EventQueue) {
        let slot = &mut self.letters[kind.index()];
        *slot = slot.saturating_add(1).min(Self::MAX_PER_KIND);
        events.push(GameEvent::LetterSpawned { kind });
    }

    /// Returns letters taken out by [`Self::take_all_letters`] without events.
    pub fn return_letters(&mut self, kind: LetterKind, count: u64) {
        let slot = &mut self.letters[kind.index()];
        *slot = slot.saturating_add(count).min(Self::MAX_PER_KIND);
    }

    /// Empties the inventory and returns what it held.
    pub fn take_all_letters(&mut self) -> [u64; LetterKind::COUNT] {
        std::mem::take(&mut self.letters)
    }

    pub fn add_coins(&mut self, amount: u64, events: &mut EventQueue) {
        if amount == 0 {
            return;
        }
        self.coins = self.coins.saturating_add(amount);
        events.push(GameEvent::CoinsEarned {
            amount,
            total: self.coins,
        });
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.coins >= amount
    }

    /// Debits `amount` in full or not at all.
    pub fn try_spend_coins(&mut self, amount: u64, events: &mut EventQueue) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.coins -= amount;
        if amount > 0 {
            events.push(GameEvent::CoinsSpent {
                amount,
                total: self.coins,
            });
        }
        true
    }
}
