use super::super::domain::{DischargeInputs, Outcome, Scenario};
use super::super::tree::ActivePath;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocalPointNotice {
    pub headline: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CauseEffectEntry {
    pub cause: &'static str,
    pub effect: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Scenario>,
}

/// Everything a presentation layer needs to show one discharge decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DischargeReport {
    pub inputs: DischargeInputs,
    pub outcome: Outcome,
    pub risk_label: &'static str,
    pub sample_readiness_percent: u8,
    pub follow_up_risk_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_point: Option<FocalPointNotice>,
    pub active_path: ActivePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_deadline: Option<NaiveDateTime>,
}
