//! Static upgrade graph.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{ErrorSeverity, GameError};
use crate::stats::UpgradeId;

/// Identifier of an upgrade node, as written in content files and saves.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One purchasable node.
///
/// `costs_per_level[i]` buys level `i + 1`; `values_per_level[i]` is the stat
/// value applied while the node sits at level `i + 1`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeNode {
    pub node_id: NodeId,
    pub upgrade_id: UpgradeId,
    pub max_level: u32,
    pub costs_per_level: Vec<u64>,
    pub values_per_level: Vec<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub connected_to: Vec<NodeId>,
}

impl UpgradeNode {
    /// Coin cost of going from `current_level` to the next level.
    pub fn cost_for_next(&self, current_level: u32) -> Option<u64> {
        if current_level >= self.max_level {
            return None;
        }
        self.costs_per_level.get(current_level as usize).copied()
    }

    /// Stat value applied at `level` (1-based).
    pub fn value_at(&self, level: u32) -> Option<f32> {
        let index = level.checked_sub(1)?;
        self.values_per_level.get(index as usize).copied()
    }
}

/// Integrity problems found while building an [`UpgradeGraphConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("upgrade graph has no nodes")]
    Empty,

    #[error("root node {0} is not defined")]
    MissingRoot(NodeId),

    #[error("node {0} is defined more than once")]
    DuplicateNode(NodeId),

    #[error("node {node} lists unknown child {child}")]
    UnknownChild { node: NodeId, child: NodeId },

    #[error("node {0} lists itself as a child")]
    SelfLoop(NodeId),

    #[error("cycle detected through node {0}")]
    Cycle(NodeId),

    #[error("node {0} has max level 0")]
    ZeroMaxLevel(NodeId),

    #[error("node {node} needs {expected} {table} entries, found {found}")]
    ShortTable {
        node: NodeId,
        table: &'static str,
        expected: u32,
        found: usize,
    },

    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),
}

impl GameError for GraphError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "graph_empty",
            Self::MissingRoot(_) => "graph_missing_root",
            Self::DuplicateNode(_) => "graph_duplicate_node",
            Self::UnknownChild { .. } => "graph_unknown_child",
            Self::SelfLoop(_) => "graph_self_loop",
            Self::Cycle(_) => "graph_cycle",
            Self::ZeroMaxLevel(_) => "graph_zero_max_level",
            Self::ShortTable { .. } => "graph_short_table",
            Self::Unreachable(_) => "graph_unreachable",
        }
    }
}

/// Validated DAG of upgrade nodes.
///
/// Construction rejects anything that could misbehave during play: dangling
/// edges, cycles, unreachable nodes and short cost/value tables.
///
/// Several nodes may drive the same stat (tiers of one upgrade). When more
/// than one of them is owned, the node latest in topological order wins.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeGraphConfig {
    root: NodeId,
    nodes: Vec<UpgradeNode>,
    index: HashMap<NodeId, usize>,
    parents: Vec<Vec<usize>>,
    /// Node indices with every parent before its children.
    topo_order: Vec<usize>,
}

impl UpgradeGraphConfig {
    pub fn new(root: impl Into<NodeId>, nodes: Vec<UpgradeNode>) -> Result<Self, GraphError> {
        let root = root.into();
        if nodes.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.node_id.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode(node.node_id.clone()));
            }
            if node.max_level == 0 {
                return Err(GraphError::ZeroMaxLevel(node.node_id.clone()));
            }
            for (table, found) in [
                ("cost", node.costs_per_level.len()),
                ("value", node.values_per_level.len()),
            ] {
                if found < node.max_level as usize {
                    return Err(GraphError::ShortTable {
                        node: node.node_id.clone(),
                        table,
                        expected: node.max_level,
                        found,
                    });
                }
            }
        }

        let root_index = *index
            .get(&root)
            .ok_or_else(|| GraphError::MissingRoot(root.clone()))?;

        let mut children = vec![Vec::new(); nodes.len()];
        let mut parents = vec![Vec::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            for child in &node.connected_to {
                if *child == node.node_id {
                    return Err(GraphError::SelfLoop(child.clone()));
                }
                let &c = index.get(child).ok_or_else(|| GraphError::UnknownChild {
                    node: node.node_id.clone(),
                    child: child.clone(),
                })?;
                if !children[i].contains(&c) {
                    children[i].push(c);
                    parents[c].push(i);
                }
            }
        }

        let topo_order = topological_order(&nodes, &children, &parents)?;

        let reachable = reachable_from(root_index, &children);
        if let Some(lost) = (0..nodes.len()).find(|i| !reachable.contains(i)) {
            return Err(GraphError::Unreachable(nodes[lost].node_id.clone()));
        }

        Ok(Self {
            root,
            nodes,
            index,
            parents,
            topo_order,
        })
    }

    pub fn root(&self) -> &NodeId {
        &self.root
    }

    pub fn nodes(&self) -> &[UpgradeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&UpgradeNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes that list `id` as a child.
    pub fn parents_of(&self, id: &NodeId) -> impl Iterator<Item = &UpgradeNode> {
        self.index
            .get(id)
            .into_iter()
            .flat_map(|&i| self.parents[i].iter().map(|&p| &self.nodes[p]))
    }

    pub fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.node(id)
            .map(|node| node.connected_to.as_slice())
            .unwrap_or(&[])
    }

    /// Every node, parents before children.
    pub fn topological(&self) -> impl Iterator<Item = &UpgradeNode> {
        self.topo_order.iter().map(|&i| &self.nodes[i])
    }

    /// Other nodes that drive the same stat as `id`.
    pub fn sharing_stat<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a UpgradeNode> {
        let upgrade = self.node(id).map(|node| node.upgrade_id);
        self.nodes
            .iter()
            .filter(move |node| Some(node.upgrade_id) == upgrade && node.node_id != *id)
    }
}

/// Kahn's algorithm; reports a node on the cycle if one exists.
fn topological_order(
    nodes: &[UpgradeNode],
    children: &[Vec<usize>],
    parents: &[Vec<usize>],
) -> Result<Vec<usize>, GraphError> {
    let mut remaining: Vec<usize> = parents.iter().map(Vec::len).collect();
    let mut ready: Vec<usize> = (0..nodes.len()).filter(|&i| remaining[i] == 0).rev().collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(i) = ready.pop() {
        order.push(i);
        for &c in children[i].iter().rev() {
            remaining[c] -= 1;
            if remaining[c] == 0 {
                ready.push(c);
            }
        }
    }

    if order.len() == nodes.len() {
        Ok(order)
    } else {
        let stuck = (0..nodes.len())
            .find(|&i| remaining[i] > 0)
            .unwrap_or_default();
        Err(GraphError::Cycle(nodes[stuck].node_id.clone()))
    }
}

fn reachable_from(start: usize, children: &[Vec<usize>]) -> HashSet<usize> {
    let mut seen = HashSet::from([start]);
    let mut stack = vec![start];
    while let Some(i) = stack.pop() {
        for &c in &children[i] {
            if seen.insert(c) {
                stack.push(c);
            }
        }
    }
    seen
}
