mod insights;
pub mod views;

pub use insights::{
    cause_effect_summary, collection_deadline, follow_up_risk_score, sample_readiness_percent,
};
pub use views::{CauseEffectEntry, DischargeReport, FocalPointNotice};

use super::domain::{DischargeInputs, Scenario};
use super::engine::DecisionEngine;
use super::tree::DecisionTree;
use insights::focal_point_notice;

impl DischargeReport {
    /// Runs the engine and projects the outcome onto the tree.
    pub fn build(
        engine: &DecisionEngine<'_>,
        tree: &DecisionTree,
        inputs: DischargeInputs,
    ) -> Self {
        let outcome = engine.decide_inputs(&inputs);
        let thresholds = engine.thresholds();

        let active_path = tree.active_path(outcome.scenario, inputs.wilayat());
        let collection_deadline = match outcome.scenario {
            Scenario::C => inputs
                .born_at
                .map(|born_at| collection_deadline(born_at, thresholds)),
            Scenario::A | Scenario::B => None,
        };

        Self {
            risk_label: outcome.risk_level.label(),
            sample_readiness_percent: sample_readiness_percent(inputs.age_hours, thresholds),
            follow_up_risk_score: follow_up_risk_score(outcome.scenario),
            focal_point: focal_point_notice(outcome.focal_needed),
            active_path,
            collection_deadline,
            inputs,
            outcome,
        }
    }

    pub fn standard(inputs: DischargeInputs) -> Self {
        Self::build(&DecisionEngine::standard(), DecisionTree::standard(), inputs)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
