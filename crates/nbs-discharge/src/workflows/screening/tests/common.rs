use crate::workflows::screening::domain::ReferralEntry;
use crate::workflows::screening::engine::{DecisionEngine, DecisionThresholds};
use crate::workflows::screening::referral::{ReferralDirectory, RegionReferral};

pub(super) const UNKNOWN_WILAYAT: &str = "buraimi";

pub(super) fn engine() -> DecisionEngine<'static> {
    DecisionEngine::standard()
}

/// A directory with a single region, to check nothing depends on the
/// North Batinah entry count.
pub(super) fn single_region_directory() -> ReferralDirectory {
    ReferralDirectory::new([RegionReferral {
        key: "liwa",
        entry: ReferralEntry {
            label: "Liwa",
            center: "Liwa Health Center",
            note: Some("Ground floor laboratory"),
        },
    }])
}

pub(super) fn engine_with(directory: &ReferralDirectory) -> DecisionEngine<'_> {
    DecisionEngine::new(directory, DecisionThresholds::standard())
}

/// Ages spanning every band, including the exact boundaries.
pub(super) fn age_grid() -> Vec<f64> {
    let mut ages: Vec<f64> = (0..=144).map(|half_hours| half_hours as f64 * 0.5).collect();
    ages.extend([11.999, 12.0, 12.001, 23.999, 24.0, 24.001, 1_000.0]);
    ages
}
