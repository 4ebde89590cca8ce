use super::config::DecisionThresholds;

/// The rule that fired for an input triple, with the timing it computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DischargeRule {
    CollectAndDischarge,
    DelayDischarge { wait_hours: u32 },
    EarlyDischarge { hours_until_window_closes: f64 },
}

/// Rules are checked in priority order; the first match wins.
pub(crate) fn classify(
    age_hours: f64,
    can_delay: bool,
    thresholds: &DecisionThresholds,
) -> DischargeRule {
    if age_hours >= thresholds.sample_ready_hours {
        return DischargeRule::CollectAndDischarge;
    }

    if age_hours >= thresholds.delay_floor_hours && can_delay {
        let remaining = (thresholds.sample_ready_hours - age_hours).ceil();
        return DischargeRule::DelayDischarge {
            wait_hours: (remaining as u32).max(1),
        };
    }

    DischargeRule::EarlyDischarge {
        hours_until_window_closes: (thresholds.collection_window_hours - age_hours).max(0.0),
    }
}
