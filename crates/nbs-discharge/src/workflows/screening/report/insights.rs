use super::super::domain::Scenario;
use super::super::engine::DecisionThresholds;
use super::views::{CauseEffectEntry, FocalPointNotice};
use chrono::{Duration, NaiveDateTime};

/// Share of the sample-ready age already reached, as a whole percentage.
///
/// Rounds to nearest; the collection-window countdown on the outcome
/// rounds independently of this value.
pub fn sample_readiness_percent(age_hours: f64, thresholds: &DecisionThresholds) -> u8 {
    if age_hours >= thresholds.sample_ready_hours {
        return 100;
    }

    let percent = (age_hours / thresholds.sample_ready_hours) * 100.0;
    percent.round().clamp(0.0, 100.0) as u8
}

pub const fn follow_up_risk_score(scenario: Scenario) -> u8 {
    match scenario {
        Scenario::A => 10,
        Scenario::B => 45,
        Scenario::C => 90,
    }
}

/// Required Collection Date to write on the NBS card.
pub fn collection_deadline(
    born_at: NaiveDateTime,
    thresholds: &DecisionThresholds,
) -> NaiveDateTime {
    let window_minutes = (thresholds.collection_window_hours * 60.0).round() as i64;
    born_at + Duration::minutes(window_minutes)
}

pub(crate) fn focal_point_notice(focal_needed: bool) -> Option<FocalPointNotice> {
    focal_needed.then_some(FocalPointNotice {
        headline: "Focal Point Activation Required",
        detail: "Must track this baby, verify collection within 48h, and include in bi-weekly report to DGHSNBG.",
    })
}

pub fn cause_effect_summary() -> Vec<CauseEffectEntry> {
    vec![
        CauseEffectEntry {
            cause: "Baby age above 24h",
            effect: "Direct collection & discharge (A)",
            scenario: Some(Scenario::A),
        },
        CauseEffectEntry {
            cause: "Age below 24h + delay OK",
            effect: "Wait for eligibility (B)",
            scenario: Some(Scenario::B),
        },
        CauseEffectEntry {
            cause: "Age below 24h + no delay",
            effect: "Outpatient follow-up required (C)",
            scenario: Some(Scenario::C),
        },
        CauseEffectEntry {
            cause: "Wilayat changes",
            effect: "Referral destination updates (C)",
            scenario: Some(Scenario::C),
        },
        CauseEffectEntry {
            cause: "No Focal Point activated",
            effect: "Risk of missed 48h window",
            scenario: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn readiness_saturates_at_the_ready_age() {
        let thresholds = DecisionThresholds::standard();
        assert_eq!(sample_readiness_percent(24.0, &thresholds), 100);
        assert_eq!(sample_readiness_percent(70.0, &thresholds), 100);
        assert_eq!(sample_readiness_percent(12.0, &thresholds), 50);
        assert_eq!(sample_readiness_percent(20.0, &thresholds), 83);
        assert_eq!(sample_readiness_percent(0.0, &thresholds), 0);
    }

    #[test]
    fn deadline_is_two_days_after_birth() {
        let born_at = NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|date| date.and_hms_opt(22, 30, 0))
            .expect("valid birth time");
        let deadline = collection_deadline(born_at, &DecisionThresholds::standard());
        assert_eq!(deadline.to_string(), "2025-03-16 22:30:00");
    }

    #[test]
    fn focal_point_notice_only_when_needed() {
        assert!(focal_point_notice(false).is_none());
        let notice = focal_point_notice(true).expect("notice issued");
        assert!(notice.detail.contains("bi-weekly report"));
    }
}
