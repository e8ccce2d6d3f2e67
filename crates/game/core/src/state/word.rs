use std::fmt;

/// Unique identifier of a live word within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordId(pub u32);

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Word flavor. Blue words roam out of broken wall sides and pay coins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WordKind {
    #[default]
    Normal,
    Blue,
}

/// A typed target: text, match progress and hit points.
///
/// `matched` never exceeds the text length, and a word is completed exactly
/// when every character has been matched. Multi-hit words are re-armed with
/// new text instead of dying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefenseWord {
    id: WordId,
    text: Vec<char>,
    matched: usize,
    max_hp: u32,
    current_hp: i64,
    is_boss: bool,
    kind: WordKind,
    coin_reward: u64,
}

impl DefenseWord {
    pub fn new(id: WordId, text: &str, hp: u32) -> Self {
        let hp = hp.max(1);
        Self {
            id,
            text: normalize(text),
            matched: 0,
            max_hp: hp,
            current_hp: i64::from(hp),
            is_boss: false,
            kind: WordKind::Normal,
            coin_reward: 0,
        }
    }

    pub fn boss(id: WordId, text: &str, hp: u32) -> Self {
        Self {
            is_boss: true,
            ..Self::new(id, text, hp)
        }
    }

    /// A single-hit blue word worth `coin_reward` coins.
    pub fn blue(id: WordId, text: &str, coin_reward: u64) -> Self {
        Self {
            kind: WordKind::Blue,
            coin_reward,
            ..Self::new(id, text, 1)
        }
    }

    pub fn id(&self) -> WordId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: WordId) {
        self.id = id;
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn matched_count(&self) -> usize {
        self.matched
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Remaining hit points, floored at zero for display.
    pub fn current_hp(&self) -> u32 {
        self.current_hp.max(0) as u32
    }

    pub fn is_boss(&self) -> bool {
        self.is_boss
    }

    pub fn kind(&self) -> WordKind {
        self.kind
    }

    pub fn coin_reward(&self) -> u64 {
        self.coin_reward
    }

    /// The character the player must type next, if any.
    pub fn next_char(&self) -> Option<char> {
        self.text.get(self.matched).copied()
    }

    pub fn is_completed(&self) -> bool {
        self.matched == self.text.len()
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp <= 0
    }

    /// Advances the match if `c` equals the next character, ignoring case.
    pub fn try_match_char(&mut self, c: char) -> bool {
        match self.next_char() {
            Some(next) if chars_match(next, c) => {
                self.matched += 1;
                true
            }
            _ => false,
        }
    }

    /// Matches the next character unconditionally (assisted typing).
    pub fn force_match(&mut self) -> bool {
        if self.is_completed() {
            return false;
        }
        self.matched += 1;
        true
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp -= i64::from(amount);
    }

    /// Replaces the text and restarts matching.
    pub fn rearm(&mut self, text: &str) {
        self.text = normalize(text);
        self.matched = 0;
    }
}

fn normalize(text: &str) -> Vec<char> {
    text.trim().to_lowercase().chars().collect()
}

fn chars_match(expected: char, typed: char) -> bool {
    expected == typed || expected.to_lowercase().eq(typed.to_lowercase())
}
