use super::super::domain::{ActionStep, Outcome, ReferralEntry, Scenario};
use super::config::DecisionThresholds;
use super::rules::DischargeRule;

pub(crate) const REGION_FALLBACK_STEP: &str = "Select Wilayat to determine collection center";

pub(crate) fn build_outcome(
    rule: DischargeRule,
    referral: Option<ReferralEntry>,
    thresholds: &DecisionThresholds,
) -> Outcome {
    match rule {
        DischargeRule::CollectAndDischarge => collect_and_discharge(),
        DischargeRule::DelayDischarge { wait_hours } => delay_discharge(wait_hours, thresholds),
        DischargeRule::EarlyDischarge {
            hours_until_window_closes,
        } => early_discharge(hours_until_window_closes, referral, thresholds),
    }
}

fn collect_and_discharge() -> Outcome {
    let scenario = Scenario::A;
    Outcome {
        scenario,
        risk_level: scenario.risk_level(),
        title: scenario.title(),
        steps: vec![
            ActionStep::satisfied("Collect NBS sample immediately"),
            ActionStep::satisfied("Complete documentation in Al Shifa"),
            ActionStep::satisfied("Discharge baby"),
        ],
        referral: None,
        focal_needed: false,
        urgency_message: "No follow-up needed. Standard pathway.".to_string(),
        deadline_label: None,
        wait_hours: None,
        hours_until_window_closes: None,
    }
}

fn delay_discharge(wait_hours: u32, thresholds: &DecisionThresholds) -> Outcome {
    let scenario = Scenario::B;
    let unit = hours_word(wait_hours);
    Outcome {
        scenario,
        risk_level: scenario.risk_level(),
        title: scenario.title(),
        steps: vec![
            ActionStep::pending(format!(
                "Delay discharge by ~{wait_hours} {unit} until baby reaches {} hrs",
                thresholds.sample_ready_hours
            )),
            ActionStep::pending("Then collect NBS sample"),
            ActionStep::pending("Complete Al Shifa documentation"),
            ActionStep::pending("Discharge baby"),
        ],
        referral: None,
        focal_needed: false,
        urgency_message: format!("Wait {wait_hours} more {unit} before collecting sample."),
        deadline_label: Some(format!("{wait_hours}h until eligible")),
        wait_hours: Some(wait_hours),
        hours_until_window_closes: None,
    }
}

fn early_discharge(
    hours_until_window_closes: f64,
    referral: Option<ReferralEntry>,
    thresholds: &DecisionThresholds,
) -> Outcome {
    let scenario = Scenario::C;
    let remaining = hours_until_window_closes.round() as u32;

    let direction = match referral {
        Some(ReferralEntry {
            center,
            note: Some(note),
            ..
        }) => format!("Direct mother to {center} ({note})"),
        Some(ReferralEntry { center, .. }) => format!("Direct mother to {center}"),
        None => REGION_FALLBACK_STEP.to_string(),
    };

    Outcome {
        scenario,
        risk_level: scenario.risk_level(),
        title: scenario.title(),
        steps: vec![
            ActionStep::pending(
                "Provide NBS Card to mother — mark Required Collection Date clearly",
            ),
            ActionStep::pending(
                "Complete all demographics & Al Shifa documentation before discharge",
            ),
            ActionStep::pending(direction),
            ActionStep::pending("Focal Point must track baby and confirm collection"),
        ],
        referral,
        focal_needed: true,
        urgency_message: format!(
            "Sample must be collected within {remaining}h ({}-hr window from birth).",
            thresholds.collection_window_hours
        ),
        deadline_label: Some(format!("{remaining} hours remaining")),
        wait_hours: None,
        hours_until_window_closes: Some(remaining),
    }
}

fn hours_word(count: u32) -> &'static str {
    if count > 1 {
        "hours"
    } else {
        "hour"
    }
}
