//! Static decision tree mirroring the discharge rules, and the resolver that
//! projects an outcome onto it.
//!
//! The tree is informational: renderers use the active path to decide what
//! to highlight. [`DecisionEngine`](super::DecisionEngine) stays the only
//! source of truth for the scenario.

use super::domain::{RiskLevel, Scenario};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;
use tracing::warn;

/// Stable identifier of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(&'static str);

impl NodeId {
    pub const ROOT: Self = Self("root");
    pub const AGE_AT_LEAST_READY: Self = Self("age_gte_24");
    pub const AGE_BELOW_READY: Self = Self("age_lt_24");
    pub const CAN_DELAY: Self = Self("can_delay");
    pub const DELAY_YES: Self = Self("delay_yes");
    pub const DELAY_NO: Self = Self("delay_no");
    pub const SCENARIO_A: Self = Self("scenario_a");
    pub const SCENARIO_B: Self = Self("scenario_b");
    pub const SCENARIO_C: Self = Self("scenario_c");

    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Answer a branch represents relative to its parent's question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchCondition {
    Yes,
    No,
}

impl BranchCondition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Branch {
    pub id: NodeId,
    pub label: &'static str,
    pub detail: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<BranchCondition>,
    pub children: Vec<DecisionTreeNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioLeaf {
    pub id: NodeId,
    pub label: &'static str,
    pub detail: &'static str,
    pub scenario: Scenario,
    pub risk_level: RiskLevel,
    pub actions: Vec<&'static str>,
    /// Referral destinations; only the early-discharge leaf carries any.
    pub referrals: Vec<ReferralLeaf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferralLeaf {
    pub id: NodeId,
    pub label: &'static str,
    pub center: &'static str,
    pub region: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionTreeNode {
    Branch(Branch),
    ScenarioLeaf(ScenarioLeaf),
    ReferralLeaf(ReferralLeaf),
}

impl DecisionTreeNode {
    pub fn view(&self) -> NodeRef<'_> {
        match self {
            Self::Branch(branch) => NodeRef::Branch(branch),
            Self::ScenarioLeaf(leaf) => NodeRef::Scenario(leaf),
            Self::ReferralLeaf(leaf) => NodeRef::Referral(leaf),
        }
    }
}

/// Borrowed view over any node, including referral leaves hanging off a
/// scenario leaf.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Branch(&'a Branch),
    Scenario(&'a ScenarioLeaf),
    Referral(&'a ReferralLeaf),
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        match self {
            Self::Branch(branch) => branch.id,
            Self::Scenario(leaf) => leaf.id,
            Self::Referral(leaf) => leaf.id,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Branch(branch) => branch.label,
            Self::Scenario(leaf) => leaf.label,
            Self::Referral(leaf) => leaf.label,
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            Self::Branch(branch) => branch.detail,
            Self::Scenario(leaf) => leaf.detail,
            Self::Referral(leaf) => leaf.center,
        }
    }

    pub fn children(self) -> Vec<NodeRef<'a>> {
        match self {
            Self::Branch(branch) => branch
                .children
                .iter()
                .map(DecisionTreeNode::view)
                .collect(),
            Self::Scenario(leaf) => leaf.referrals.iter().map(NodeRef::Referral).collect(),
            Self::Referral(_) => Vec::new(),
        }
    }

    pub fn has_children(self) -> bool {
        match self {
            Self::Branch(branch) => !branch.children.is_empty(),
            Self::Scenario(leaf) => !leaf.referrals.is_empty(),
            Self::Referral(_) => false,
        }
    }
}

/// Immutable decision tree rooted at a branch.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionTree {
    root: Branch,
}

impl DecisionTree {
    pub fn new(root: Branch) -> Self {
        Self { root }
    }

    /// The North Batinah tree, built once per process.
    pub fn standard() -> &'static Self {
        static TREE: OnceLock<DecisionTree> = OnceLock::new();
        TREE.get_or_init(|| Self::new(standard_root()))
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::Branch(&self.root)
    }

    /// Pre-order traversal yielding each node with its depth (root is 0).
    pub fn walk(&self) -> Vec<(usize, NodeRef<'_>)> {
        let mut visited = Vec::new();
        let mut stack = vec![(0, self.root())];
        while let Some((depth, node)) = stack.pop() {
            visited.push((depth, node));
            for child in node.children().into_iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        visited
    }

    pub fn find(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.walk()
            .into_iter()
            .map(|(_, node)| node)
            .find(|node| node.id() == id)
    }

    pub fn scenario_leaf(&self, scenario: Scenario) -> Option<&ScenarioLeaf> {
        self.walk().into_iter().find_map(|(_, node)| match node {
            NodeRef::Scenario(leaf) if leaf.scenario == scenario => Some(leaf),
            _ => None,
        })
    }

    pub fn referral_leaves(&self) -> Vec<&ReferralLeaf> {
        self.walk()
            .into_iter()
            .filter_map(|(_, node)| match node {
                NodeRef::Referral(leaf) => Some(leaf),
                _ => None,
            })
            .collect()
    }

    /// Nodes from the root down to the first node matching `target`.
    pub fn path_to<F>(&self, target: F) -> Option<Vec<NodeRef<'_>>>
    where
        F: Fn(NodeRef<'_>) -> bool,
    {
        fn descend<'a, F>(node: NodeRef<'a>, target: &F, path: &mut Vec<NodeRef<'a>>) -> bool
        where
            F: Fn(NodeRef<'_>) -> bool,
        {
            path.push(node);
            if target(node) {
                return true;
            }
            for child in node.children() {
                if descend(child, target, path) {
                    return true;
                }
            }
            path.pop();
            false
        }

        let mut path = Vec::new();
        descend(self.root(), &target, &mut path).then_some(path)
    }

    /// Node ids from the root to the leaf realised by `scenario`, extended by
    /// the referral leaf for `wilayat` when that leaf exists.
    pub fn active_path(&self, scenario: Scenario, wilayat: Option<&str>) -> ActivePath {
        let path = self.path_to(|node| {
            matches!(node, NodeRef::Scenario(leaf) if leaf.scenario == scenario)
        });

        let Some(path) = path else {
            warn!(
                scenario = scenario.letter(),
                "decision tree has no leaf for scenario"
            );
            return ActivePath {
                nodes: vec![self.root.id],
            };
        };

        let mut nodes: Vec<NodeId> = path.iter().map(|node| node.id()).collect();
        if let (Some(NodeRef::Scenario(leaf)), Some(key)) = (path.last(), wilayat) {
            if let Some(referral) = leaf.referrals.iter().find(|referral| referral.region == key) {
                nodes.push(referral.id);
            }
        }

        ActivePath { nodes }
    }
}

/// Resolves the active path on the standard tree.
pub fn resolve_active_path(scenario: Scenario, wilayat: Option<&str>) -> ActivePath {
    DecisionTree::standard().active_path(scenario, wilayat)
}

/// Connected chain of node ids from the tree root to the realised leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivePath {
    nodes: Vec<NodeId>,
}

impl ActivePath {
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn to_set(&self) -> BTreeSet<NodeId> {
        self.nodes.iter().copied().collect()
    }
}

fn standard_root() -> Branch {
    Branch {
        id: NodeId::ROOT,
        label: "Baby Born",
        detail: "Sohar Hospital — North Batinah",
        condition: None,
        children: vec![
            DecisionTreeNode::Branch(Branch {
                id: NodeId::AGE_AT_LEAST_READY,
                label: "Age ≥ 24 hours",
                detail: "Sample-ready at discharge",
                condition: Some(BranchCondition::Yes),
                children: vec![DecisionTreeNode::ScenarioLeaf(ScenarioLeaf {
                    id: NodeId::SCENARIO_A,
                    label: "Scenario A",
                    detail: "Collect & Discharge",
                    scenario: Scenario::A,
                    risk_level: RiskLevel::Low,
                    actions: vec![
                        "Collect NBS sample immediately",
                        "Complete Al Shifa documentation",
                        "Discharge baby",
                    ],
                    referrals: Vec::new(),
                })],
            }),
            DecisionTreeNode::Branch(Branch {
                id: NodeId::AGE_BELOW_READY,
                label: "Age < 24 hours",
                detail: "Too early for NBS sample",
                condition: Some(BranchCondition::No),
                children: vec![DecisionTreeNode::Branch(Branch {
                    id: NodeId::CAN_DELAY,
                    label: "Can Delay Discharge?",
                    detail: "Clinical decision point",
                    condition: None,
                    children: vec![delay_yes_branch(), delay_no_branch()],
                })],
            }),
        ],
    }
}

fn delay_yes_branch() -> DecisionTreeNode {
    DecisionTreeNode::Branch(Branch {
        id: NodeId::DELAY_YES,
        label: "Yes — Delay",
        detail: "Wait until 24h then collect",
        condition: Some(BranchCondition::Yes),
        children: vec![DecisionTreeNode::ScenarioLeaf(ScenarioLeaf {
            id: NodeId::SCENARIO_B,
            label: "Scenario B",
            detail: "Delay Discharge",
            scenario: Scenario::B,
            risk_level: RiskLevel::Medium,
            actions: vec![
                "Delay discharge until 24h",
                "Collect NBS sample",
                "Complete Al Shifa documentation",
                "Discharge baby",
            ],
            referrals: Vec::new(),
        })],
    })
}

fn delay_no_branch() -> DecisionTreeNode {
    DecisionTreeNode::Branch(Branch {
        id: NodeId::DELAY_NO,
        label: "No — Must Discharge",
        detail: "Outpatient follow-up required",
        condition: Some(BranchCondition::No),
        children: vec![DecisionTreeNode::ScenarioLeaf(ScenarioLeaf {
            id: NodeId::SCENARIO_C,
            label: "Scenario C",
            detail: "Early Discharge — Follow-up",
            scenario: Scenario::C,
            risk_level: RiskLevel::High,
            actions: vec![
                "Provide NBS Card to mother",
                "Complete all documentation",
                "Direct to collection center",
                "Focal Point must track baby",
            ],
            referrals: vec![
                referral_leaf("ref_sohar", "Sohar", "Sohar Hospital", "sohar"),
                referral_leaf(
                    "ref_shinas",
                    "Shinas & Liwa",
                    "Shinas Polyclinic",
                    "shinas_liwa",
                ),
                referral_leaf("ref_saham", "Saham", "Saham Hospital", "saham"),
                referral_leaf(
                    "ref_khabourah",
                    "Khabourah & Suwaiq",
                    "Al Suwaiq Hospital",
                    "khabourah_suwaiq",
                ),
            ],
        })],
    })
}

fn referral_leaf(
    id: &'static str,
    label: &'static str,
    center: &'static str,
    region: &'static str,
) -> ReferralLeaf {
    ReferralLeaf {
        id: NodeId::new(id),
        label,
        center,
        region,
    }
}
