mod config;
mod policy;
mod rules;

pub use config::DecisionThresholds;

pub(crate) use policy::REGION_FALLBACK_STEP;

use super::domain::{DischargeInputs, Outcome};
use super::referral::ReferralDirectory;
use policy::build_outcome;
use rules::{classify, DischargeRule};
use tracing::debug;

/// Stateless evaluator mapping (age, delay feasibility, wilayat) to an outcome.
///
/// Every call recomputes from scratch, so one engine can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine<'a> {
    directory: &'a ReferralDirectory,
    thresholds: DecisionThresholds,
}

impl DecisionEngine<'static> {
    pub fn standard() -> Self {
        Self::new(
            ReferralDirectory::north_batinah(),
            DecisionThresholds::standard(),
        )
    }
}

impl<'a> DecisionEngine<'a> {
    pub fn new(directory: &'a ReferralDirectory, thresholds: DecisionThresholds) -> Self {
        Self {
            directory,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &DecisionThresholds {
        &self.thresholds
    }

    pub fn decide(&self, age_hours: f64, can_delay: bool, wilayat: Option<&str>) -> Outcome {
        let rule = classify(age_hours, can_delay, &self.thresholds);

        let referral = match rule {
            DischargeRule::EarlyDischarge { .. } => wilayat
                .and_then(|key| self.directory.lookup(key))
                .copied(),
            _ => None,
        };

        let outcome = build_outcome(rule, referral, &self.thresholds);
        debug!(
            age_hours,
            can_delay,
            wilayat = wilayat.unwrap_or("unset"),
            scenario = outcome.scenario.letter(),
            referral_resolved = outcome.referral.is_some(),
            "discharge decision computed"
        );
        outcome
    }

    pub fn decide_inputs(&self, inputs: &DischargeInputs) -> Outcome {
        self.decide(inputs.age_hours, inputs.can_delay, inputs.wilayat())
    }
}

/// Decides with the standard thresholds and the North Batinah directory.
pub fn decide(age_hours: f64, can_delay: bool, wilayat: Option<&str>) -> Outcome {
    DecisionEngine::standard().decide(age_hours, can_delay, wilayat)
}
