//! Domain events and their synchronous, topic-based bus.
//!
//! Components append [`GameEvent`]s to an [`EventQueue`] while they run. The
//! flow controller drains the queue once its public call has finished and
//! hands the batch to the [`EventBus`], so no listener ever runs in the middle
//! of a component method.

use crate::flow::GameState;
use crate::state::{LetterKind, WordId, WordKind};
use crate::upgrade::NodeId;
use crate::wall::{SideOrigin, WallSegmentId};

/// Topics for event routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topic {
    /// Phase transitions, run lifecycle, autosave cadence.
    Flow,
    /// Words, warp, boss, hp, energy and level changes.
    Combat,
    /// Wall segments and rings.
    Wall,
    /// Letters and coins.
    Economy,
    /// Upgrade graph purchases and reveals.
    Upgrade,
    /// Letter converter minigame.
    Converter,
}

/// Why a run returned to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunEndReason {
    /// The collection phase ran to completion.
    Completed,
    /// Run hit points reached zero.
    Defeated,
    /// The player left voluntarily.
    Retreated,
}

/// Everything the presentation layer can observe.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    // ----- flow -----
    StateChanged { from: GameState, to: GameState },
    RunStarted { level: u32 },
    RunEnded { reason: RunEndReason, level: u32 },
    CollectionStarted { duration: f32 },
    /// The charge sub-sequence finished and slow motion began.
    ChargeReleased,
    CollectionEnded,
    AutosaveDue,

    // ----- combat -----
    WordSpawned {
        id: WordId,
        text: String,
        hp: u32,
        kind: WordKind,
        is_boss: bool,
        origin: Option<SideOrigin>,
    },
    WordTextChanged { id: WordId, text: String },
    CharMatched { id: WordId, matched: usize },
    WordCompleted { id: WordId },
    CriticalKill { id: WordId },
    WordReachedCenter { id: WordId },
    WarpReady { id: WordId },
    WarpCompleted { level: u32 },
    BossSpawned { id: WordId, level: u32 },
    BossHit { id: WordId, remaining_hp: u32 },
    BossDefeated { level: u32, prestige: u64 },
    /// A typed character matched nothing. Feedback only.
    InputError { ch: char },
    HpChanged { hp: u32, max_hp: u32 },
    ShieldBroken,
    LevelChanged { level: u32 },
    EnergyChanged { energy: f32, max_energy: f32 },
    EnergyDepleted,

    // ----- wall -----
    WallCharMatched { segment: WallSegmentId, matched: usize },
    SegmentBroken { segment: WallSegmentId },
    RingCompleted { ring: usize },

    // ----- economy -----
    LetterSpawned { kind: LetterKind },
    LetterCollected { kind: LetterKind, coins: u64 },
    CoinsEarned { amount: u64, total: u64 },
    CoinsSpent { amount: u64, total: u64 },

    // ----- upgrades -----
    NodePurchased { node: NodeId, level: u32 },
    NodeRevealed { node: NodeId },

    // ----- converter -----
    ConvertingStarted { letters: usize, holes: usize },
    ConvertingFinished { returned: usize },
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        use GameEvent::*;
        match self {
            StateChanged { .. }
            | RunStarted { .. }
            | RunEnded { .. }
            | CollectionStarted { .. }
            | ChargeReleased
            | CollectionEnded
            | AutosaveDue => Topic::Flow,
            WordSpawned { .. }
            | WordTextChanged { .. }
            | CharMatched { .. }
            | WordCompleted { .. }
            | CriticalKill { .. }
            | WordReachedCenter { .. }
            | WarpReady { .. }
            | WarpCompleted { .. }
            | BossSpawned { .. }
            | BossHit { .. }
            | BossDefeated { .. }
            | InputError { .. }
            | HpChanged { .. }
            | ShieldBroken
            | LevelChanged { .. }
            | EnergyChanged { .. }
            | EnergyDepleted => Topic::Combat,
            WallCharMatched { .. } | SegmentBroken { .. } | RingCompleted { .. } => Topic::Wall,
            LetterSpawned { .. }
            | LetterCollected { .. }
            | CoinsEarned { .. }
            | CoinsSpent { .. } => Topic::Economy,
            NodePurchased { .. } | NodeRevealed { .. } => Topic::Upgrade,
            ConvertingStarted { .. } | ConvertingFinished { .. } => Topic::Converter,
        }
    }
}

/// Ordered buffer of events produced during one call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GameEvent)>;

struct Subscription {
    id: SubscriptionId,
    topic: Option<Topic>,
    listener: Listener,
}

/// Topic-based, single-threaded event bus.
///
/// Subscribing the same closure twice registers it twice; callers pair each
/// `subscribe` with exactly one `unsubscribe`.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for a single topic.
    pub fn subscribe(
        &mut self,
        topic: Topic,
        listener: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.insert(Some(topic), Box::new(listener))
    }

    /// Registers a listener for every topic.
    pub fn subscribe_all(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.insert(None, Box::new(listener))
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Delivers one event to every matching listener, in subscription order.
    pub fn publish(&mut self, event: &GameEvent) {
        let topic = event.topic();
        for subscription in &mut self.subscriptions {
            if subscription.topic.is_none_or(|wanted| wanted == topic) {
                (subscription.listener)(event);
            }
        }
    }

    /// Drains `queue` and publishes its events in order.
    pub fn flush(&mut self, queue: &mut EventQueue) {
        for event in queue.drain() {
            tracing::trace!(?event, "publish");
            self.publish(&event);
        }
    }

    fn insert(&mut self, topic: Option<Topic>, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topic,
            listener,
        });
        id
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.subscriptions.len())
            .finish()
    }
}
