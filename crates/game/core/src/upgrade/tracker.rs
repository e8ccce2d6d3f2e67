//! Per-player purchase and reveal state over the upgrade graph.

use std::collections::{HashMap, HashSet};

use super::graph::{NodeId, UpgradeGraphConfig};
use crate::error::{ErrorSeverity, GameError};
use crate::events::{EventQueue, GameEvent};
use crate::state::LetterTracker;
use crate::stats::PlayerStats;

/// Why a node cannot be bought right now.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseError {
    #[error("unknown upgrade node {0}")]
    UnknownNode(NodeId),

    #[error("node {0} is already at max level")]
    MaxLevel(NodeId),

    #[error("node {0} has not been revealed")]
    NotRevealed(NodeId),

    #[error("node {node} requires parent {parent}")]
    ParentLocked { node: NodeId, parent: NodeId },

    #[error("node {node} costs {cost} coins, only {available} available")]
    CannotAfford {
        node: NodeId,
        cost: u64,
        available: u64,
    },
}

impl GameError for PurchaseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CannotAfford { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownNode(_) => "purchase_unknown_node",
            Self::MaxLevel(_) => "purchase_max_level",
            Self::NotRevealed(_) => "purchase_not_revealed",
            Self::ParentLocked { .. } => "purchase_parent_locked",
            Self::CannotAfford { .. } => "purchase_cannot_afford",
        }
    }
}

/// Persisted `(node, level)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct UpgradeEntry {
    pub node_id: NodeId,
    pub level: u32,
}

impl UpgradeEntry {
    pub fn new(node_id: impl Into<NodeId>, level: u32) -> Self {
        Self {
            node_id: node_id.into(),
            level,
        }
    }
}

/// Owned node levels and the revealed set, over a static graph.
///
/// The root is always revealed. A node is revealed once any parent reaches
/// level 1, and purchasable only when revealed, below max level, with every
/// parent at level 1 or more.
#[derive(Clone, Debug)]
pub struct UpgradeTracker {
    graph: UpgradeGraphConfig,
    levels: HashMap<NodeId, u32>,
    revealed: HashSet<NodeId>,
}

impl UpgradeTracker {
    pub fn new(graph: UpgradeGraphConfig) -> Self {
        let revealed = HashSet::from([graph.root().clone()]);
        Self {
            graph,
            levels: HashMap::new(),
            revealed,
        }
    }

    pub fn graph(&self) -> &UpgradeGraphConfig {
        &self.graph
    }

    pub fn level(&self, id: &NodeId) -> u32 {
        self.levels.get(id).copied().unwrap_or(0)
    }

    pub fn is_revealed(&self, id: &NodeId) -> bool {
        self.revealed.contains(id)
    }

    pub fn revealed(&self) -> impl Iterator<Item = &NodeId> {
        self.revealed.iter()
    }

    /// Cost of the next level, or the reason it cannot be bought.
    pub fn purchase_status(&self, id: &NodeId, coins: u64) -> Result<u64, PurchaseError> {
        let node = self
            .graph
            .node(id)
            .ok_or_else(|| PurchaseError::UnknownNode(id.clone()))?;
        let level = self.level(id);
        let cost = node
            .cost_for_next(level)
            .ok_or_else(|| PurchaseError::MaxLevel(id.clone()))?;
        if !self.is_revealed(id) {
            return Err(PurchaseError::NotRevealed(id.clone()));
        }
        if let Some(parent) = self.graph.parents_of(id).find(|p| self.level(&p.node_id) == 0) {
            return Err(PurchaseError::ParentLocked {
                node: id.clone(),
                parent: parent.node_id.clone(),
            });
        }
        if cost > coins {
            return Err(PurchaseError::CannotAfford {
                node: id.clone(),
                cost,
                available: coins,
            });
        }
        Ok(cost)
    }

    pub fn can_purchase(&self, id: &NodeId, coins: u64) -> bool {
        self.purchase_status(id, coins).is_ok()
    }

    /// Buys the next level of `id`. On failure nothing changes.
    pub fn try_purchase(
        &mut self,
        id: &NodeId,
        letters: &mut LetterTracker,
        stats: &mut PlayerStats,
        events: &mut EventQueue,
    ) -> bool {
        let cost = match self.purchase_status(id, letters.coins()) {
            Ok(cost) => cost,
            Err(err) => {
                tracing::debug!(node = %id, code = err.error_code(), "purchase rejected");
                return false;
            }
        };
        let Some(node) = self.graph.node(id) else {
            return false;
        };
        if !letters.try_spend_coins(cost, events) {
            return false;
        }

        let level = self.levels.get(id).copied().unwrap_or(0) + 1;
        self.levels.insert(id.clone(), level);

        // Another owned node drives this stat: rebuild in graph order.
        let shared = self
            .graph
            .sharing_stat(id)
            .any(|other| self.level(&other.node_id) > 0);
        if shared {
            self.apply_all_upgrades(stats);
        } else if let Some(value) = node.value_at(level) {
            stats.apply_upgrade(node.upgrade_id, value);
        }
        events.push(GameEvent::NodePurchased {
            node: id.clone(),
            level,
        });
        tracing::info!(node = %id, level, cost, upgrade = %node.upgrade_id, "upgrade purchased");

        if level == 1 {
            for child in &node.connected_to {
                if self.revealed.insert(child.clone()) {
                    events.push(GameEvent::NodeRevealed {
                        node: child.clone(),
                    });
                }
            }
        }
        true
    }

    /// Owned levels, in graph order. Unpurchased nodes are omitted.
    pub fn capture_state(&self) -> Vec<UpgradeEntry> {
        self.graph
            .topological()
            .filter_map(|node| {
                let level = self.level(&node.node_id);
                (level > 0).then(|| UpgradeEntry::new(node.node_id.clone(), level))
            })
            .collect()
    }

    /// Replaces owned levels with `entries`, re-derives the revealed set and
    /// replays every level into `stats`.
    ///
    /// Unknown nodes are skipped and levels above `max_level` are clamped, so
    /// saves from an older graph still load.
    pub fn restore_state(&mut self, entries: &[UpgradeEntry], stats: &mut PlayerStats) {
        self.levels.clear();
        for entry in entries {
            let Some(node) = self.graph.node(&entry.node_id) else {
                tracing::warn!(node = %entry.node_id, "restore skipped unknown upgrade node");
                continue;
            };
            let level = entry.level.min(node.max_level);
            if level > 0 {
                self.levels.insert(entry.node_id.clone(), level);
            }
        }

        self.revealed.clear();
        self.revealed.insert(self.graph.root().clone());
        for (id, _) in self.levels.iter().filter(|(_, level)| **level > 0) {
            self.revealed
                .extend(self.graph.children_of(id).iter().cloned());
        }

        self.apply_all_upgrades(stats);
        tracing::info!(owned = self.levels.len(), "upgrade state restored");
    }

    /// Rebuilds `stats` from base plus every owned level.
    pub fn apply_all_upgrades(&self, stats: &mut PlayerStats) {
        stats.reset_to_base();
        for node in self.graph.topological() {
            let level = self.level(&node.node_id);
            if let Some(value) = node.value_at(level) {
                stats.apply_upgrade(node.upgrade_id, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::UpgradeId;
    use crate::upgrade::UpgradeNode;

    fn node(id: &str, upgrade: UpgradeId, costs: &[u64], values: &[f32], children: &[&str]) -> UpgradeNode {
        UpgradeNode {
            node_id: NodeId::new(id),
            upgrade_id: upgrade,
            max_level: costs.len() as u32,
            costs_per_level: costs.to_vec(),
            values_per_level: values.to_vec(),
            connected_to: children.iter().map(|c| NodeId::new(*c)).collect(),
        }
    }

    fn graph() -> UpgradeGraphConfig {
        UpgradeGraphConfig::new(
            "root",
            vec![
                node("root", UpgradeId::MaxHp, &[5], &[4.0], &["crit", "energy"]),
                node("crit", UpgradeId::CritChance, &[10, 20], &[0.1, 0.2], &["damage"]),
                node("energy", UpgradeId::MaxEnergy, &[8, 16, 32], &[12.0, 14.0, 16.0], &["damage"]),
                node("damage", UpgradeId::BaseDamage, &[50], &[2.0], &[]),
            ],
        )
        .expect("valid graph")
    }

    fn funded(coins: u64) -> (LetterTracker, PlayerStats, EventQueue) {
        let mut events = EventQueue::new();
        let mut letters = LetterTracker::new();
        letters.add_coins(coins, &mut events);
        (letters, PlayerStats::base(), EventQueue::new())
    }

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    #[test]
    fn root_is_revealed_and_children_reveal_on_first_level() {
        let (mut letters, mut stats, mut events) = funded(100);
        let mut tracker = UpgradeTracker::new(graph());
        assert!(tracker.is_revealed(&id("root")));
        assert!(!tracker.is_revealed(&id("crit")));

        assert!(tracker.try_purchase(&id("root"), &mut letters, &mut stats, &mut events));
        assert!(tracker.is_revealed(&id("crit")));
        assert!(tracker.is_revealed(&id("energy")));
        assert!(!tracker.is_revealed(&id("damage")));
        assert_eq!(stats.max_hp, 4);
        assert_eq!(letters.coins(), 95);
    }

    #[test]
    fn insufficient_coins_changes_nothing() {
        let (mut letters, mut stats, mut events) = funded(4);
        let mut tracker = UpgradeTracker::new(graph());
        assert!(!tracker.try_purchase(&id("root"), &mut letters, &mut stats, &mut events));
        assert_eq!(tracker.level(&id("root")), 0);
        assert_eq!(letters.coins(), 4);
        assert_eq!(stats, PlayerStats::base());
        assert!(events.is_empty());
        assert!(matches!(
            tracker.purchase_status(&id("root"), 4),
            Err(PurchaseError::CannotAfford { cost: 5, .. })
        ));
    }

    #[test]
    fn all_parents_must_be_owned() {
        let (mut letters, mut stats, mut events) = funded(1000);
        let mut tracker = UpgradeTracker::new(graph());
        tracker.try_purchase(&id("root"), &mut letters, &mut stats, &mut events);
        assert!(tracker.try_purchase(&id("crit"), &mut letters, &mut stats, &mut events));

        // Revealed through "crit", but "energy" is still at level 0.
        assert!(tracker.is_revealed(&id("damage")));
        assert_eq!(
            tracker.purchase_status(&id("damage"), letters.coins()),
            Err(PurchaseError::ParentLocked {
                node: id("damage"),
                parent: id("energy"),
            })
        );

        assert!(tracker.try_purchase(&id("energy"), &mut letters, &mut stats, &mut events));
        assert!(tracker.try_purchase(&id("damage"), &mut letters, &mut stats, &mut events));
        assert_eq!(stats.base_damage, 2);
    }

    #[test]
    fn max_level_and_per_level_values() {
        let (mut letters, mut stats, mut events) = funded(1000);
        let mut tracker = UpgradeTracker::new(graph());
        tracker.try_purchase(&id("root"), &mut letters, &mut stats, &mut events);
        for expected in [12.0, 14.0, 16.0] {
            assert!(tracker.try_purchase(&id("energy"), &mut letters, &mut stats, &mut events));
            assert_eq!(stats.max_energy, expected);
        }
        let coins = letters.coins();
        assert!(!tracker.try_purchase(&id("energy"), &mut letters, &mut stats, &mut events));
        assert_eq!(letters.coins(), coins);
        assert_eq!(
            tracker.purchase_status(&id("energy"), coins),
            Err(PurchaseError::MaxLevel(id("energy")))
        );
        assert!(!tracker.try_purchase(&id("nope"), &mut letters, &mut stats, &mut events));
    }

    #[test]
    fn restore_matches_live_purchases_for_any_valid_order() {
        let orders: [&[&str]; 3] = [
            &["root", "crit", "energy", "crit", "damage", "energy"],
            &["root", "energy", "energy", "crit", "damage", "crit"],
            &["root", "crit", "crit", "energy", "energy", "damage"],
        ];

        let mut expected: Option<PlayerStats> = None;
        for order in orders {
            let (mut letters, mut stats, mut events) = funded(10_000);
            let mut live = UpgradeTracker::new(graph());
            for node in order {
                assert!(live.try_purchase(&id(node), &mut letters, &mut stats, &mut events));
            }

            let mut restored_stats = PlayerStats::base();
            restored_stats.apply_upgrade(UpgradeId::MaxHp, 99.0);
            let mut restored = UpgradeTracker::new(graph());
            restored.restore_state(&live.capture_state(), &mut restored_stats);

            assert_eq!(restored_stats, stats);
            assert_eq!(
                restored.revealed().collect::<HashSet<_>>(),
                live.revealed().collect::<HashSet<_>>()
            );
            if let Some(previous) = &expected {
                assert_eq!(previous, &stats);
            }
            expected = Some(stats);
        }
    }

    #[test]
    fn tiered_nodes_match_between_live_and_restore() {
        let tiers = || {
            UpgradeGraphConfig::new(
                "crit1",
                vec![
                    node("crit1", UpgradeId::CritChance, &[5, 10], &[0.1, 0.2], &["crit2"]),
                    node("crit2", UpgradeId::CritChance, &[20, 40], &[0.3, 0.4], &[]),
                ],
            )
            .expect("tiered graph")
        };

        let (mut letters, mut stats, mut events) = funded(1000);
        let mut live = UpgradeTracker::new(tiers());
        assert!(live.try_purchase(&id("crit1"), &mut letters, &mut stats, &mut events));
        assert_eq!(stats.crit_chance, 0.1);
        assert!(live.try_purchase(&id("crit2"), &mut letters, &mut stats, &mut events));
        assert_eq!(stats.crit_chance, 0.3);

        // Leveling the lower tier afterwards does not override the higher one.
        assert!(live.try_purchase(&id("crit1"), &mut letters, &mut stats, &mut events));
        assert_eq!(stats.crit_chance, 0.3);

        let mut restored_stats = PlayerStats::base();
        let mut restored = UpgradeTracker::new(tiers());
        restored.restore_state(&live.capture_state(), &mut restored_stats);
        assert_eq!(restored_stats, stats);

        assert!(live.try_purchase(&id("crit2"), &mut letters, &mut stats, &mut events));
        assert_eq!(stats.crit_chance, 0.4);
        restored.restore_state(&live.capture_state(), &mut restored_stats);
        assert_eq!(restored_stats, stats);
    }

    #[test]
    fn restore_tolerates_stale_entries() {
        let mut stats = PlayerStats::base();
        let mut tracker = UpgradeTracker::new(graph());
        tracker.restore_state(
            &[
                UpgradeEntry::new("root", 7),
                UpgradeEntry::new("removed_node", 2),
                UpgradeEntry::new("crit", 0),
            ],
            &mut stats,
        );
        assert_eq!(tracker.level(&id("root")), 1);
        assert_eq!(tracker.level(&id("crit")), 0);
        assert_eq!(tracker.capture_state(), vec![UpgradeEntry::new("root", 1)]);
        assert!(tracker.is_revealed(&id("crit")));
        assert_eq!(stats.max_hp, 4);
    }

    #[test]
    fn purchasability_never_skips_parents() {
        let (mut letters, mut stats, mut events) = funded(10_000);
        let mut tracker = UpgradeTracker::new(graph());
        let sequence = ["damage", "crit", "root", "damage", "crit", "damage", "energy", "damage"];
        for node in sequence {
            tracker.try_purchase(&id(node), &mut letters, &mut stats, &mut events);
            for candidate in tracker.graph().nodes() {
                if tracker.can_purchase(&candidate.node_id, letters.coins()) {
                    assert!(
                        tracker
                            .graph()
                            .parents_of(&candidate.node_id)
                            .all(|p| tracker.level(&p.node_id) >= 1)
                    );
                }
            }
        }
        assert_eq!(tracker.level(&id("damage")), 1);
    }
}
