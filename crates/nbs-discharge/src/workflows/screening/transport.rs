use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransportStep {
    pub label: &'static str,
    pub instruction: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

/// How collected cards travel from the region to the screening laboratory.
#[derive(Debug, Clone, Serialize)]
pub struct TransportProtocol {
    pub steps: Vec<TransportStep>,
    pub dispatch_time: NaiveTime,
    pub skipped_weekdays: Vec<Weekday>,
}

impl TransportProtocol {
    pub fn north_batinah() -> Self {
        Self {
            steps: vec![
                TransportStep {
                    label: "SORTING",
                    instruction: "Keep Sohar samples separate from institution samples",
                    warning: None,
                },
                TransportStep {
                    label: "CENTRALIZE",
                    instruction: "All regional samples → Sohar Hospital",
                    warning: None,
                },
                TransportStep {
                    label: "DISPATCH",
                    instruction: "Daily at 5:00 AM to Genetic Center, Muscat",
                    warning: Some("Except Fridays"),
                },
            ],
            dispatch_time: NaiveTime::from_hms_opt(5, 0, 0).unwrap_or_default(),
            skipped_weekdays: vec![Weekday::Fri],
        }
    }

    /// First dispatch slot at or after `after`.
    pub fn next_dispatch(&self, after: NaiveDateTime) -> NaiveDateTime {
        let mut candidate = after.date().and_time(self.dispatch_time);
        if candidate < after {
            candidate += Duration::days(1);
        }

        // at most one full week of skipped days
        for _ in 0..7 {
            if !self.skipped_weekdays.contains(&candidate.weekday()) {
                break;
            }
            candidate += Duration::days(1);
        }
        candidate
    }
}
