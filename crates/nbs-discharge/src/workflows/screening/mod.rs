//! Newborn screening discharge decisions: the rule engine, the referral
//! directory it consults, and the decision tree used to visualise it.

pub mod domain;
mod engine;
pub mod referral;
pub mod report;
pub mod transport;
pub mod tree;

#[cfg(test)]
mod tests;

pub use domain::{
    ActionStep, DischargeInputs, InputError, Outcome, ReferralEntry, RiskLevel, Scenario,
};
pub use engine::{decide, DecisionEngine, DecisionThresholds};
pub use referral::{ReferralDirectory, RegionReferral};
pub use report::{CauseEffectEntry, DischargeReport, FocalPointNotice};
pub use transport::{TransportProtocol, TransportStep};
pub use tree::{
    resolve_active_path, ActivePath, Branch, BranchCondition, DecisionTree, DecisionTreeNode,
    NodeId, NodeRef, ReferralLeaf, ScenarioLeaf,
};
