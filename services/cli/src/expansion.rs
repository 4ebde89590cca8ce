use nbs_discharge::workflows::screening::{DecisionTree, NodeId, NodeRef};
use std::collections::BTreeSet;

/// Which tree nodes the renderer shows opened. Owned by the caller and
/// passed to the renderer on every draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TreeExpansion {
    expanded: BTreeSet<NodeId>,
}

impl TreeExpansion {
    /// Every branch and scenario leaf opened; referral leaves have nothing
    /// to open.
    pub(crate) fn expand_all(tree: &DecisionTree) -> Self {
        let expanded = tree
            .walk()
            .into_iter()
            .filter(|(_, node)| !matches!(node, NodeRef::Referral(_)))
            .map(|(_, node)| node.id())
            .collect();
        Self { expanded }
    }

    pub(crate) fn collapse_all(tree: &DecisionTree) -> Self {
        Self {
            expanded: BTreeSet::from([tree.root().id()]),
        }
    }

    pub(crate) fn toggle(&mut self, id: NodeId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub(crate) fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }
}
