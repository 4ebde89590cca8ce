use super::domain::ReferralEntry;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

/// A region key together with the referral it resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionReferral {
    pub key: &'static str,
    #[serde(flatten)]
    pub entry: ReferralEntry,
}

/// Region key to collection center lookup, kept in registration order so
/// region pickers can list it as-is.
#[derive(Debug)]
pub struct ReferralDirectory {
    regions: Vec<RegionReferral>,
    index: HashMap<&'static str, usize>,
}

impl ReferralDirectory {
    pub fn new(regions: impl IntoIterator<Item = RegionReferral>) -> Self {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();

        for region in regions {
            if index.contains_key(region.key) {
                warn!(key = region.key, "duplicate wilayat key ignored");
                continue;
            }
            index.insert(region.key, ordered.len());
            ordered.push(region);
        }

        Self {
            regions: ordered,
            index,
        }
    }

    /// Directory for the North Batinah governorate deployment.
    pub fn north_batinah() -> &'static Self {
        static DIRECTORY: OnceLock<ReferralDirectory> = OnceLock::new();
        DIRECTORY.get_or_init(|| Self::new(north_batinah_regions()))
    }

    pub fn lookup(&self, key: &str) -> Option<&ReferralEntry> {
        self.index
            .get(key)
            .map(|position| &self.regions[*position].entry)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn regions(&self) -> &[RegionReferral] {
        &self.regions
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.regions.iter().map(|region| region.key)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn north_batinah_regions() -> Vec<RegionReferral> {
    vec![
        RegionReferral {
            key: "sohar",
            entry: ReferralEntry {
                label: "Sohar",
                center: "Sohar Hospital",
                note: Some("Return to Sohar Hospital"),
            },
        },
        RegionReferral {
            key: "shinas_liwa",
            entry: ReferralEntry {
                label: "Shinas & Liwa",
                center: "Shinas Polyclinic",
                note: Some("Delivery Suite"),
            },
        },
        RegionReferral {
            key: "saham",
            entry: ReferralEntry {
                label: "Saham",
                center: "Saham Hospital",
                note: None,
            },
        },
        RegionReferral {
            key: "khabourah_suwaiq",
            entry: ReferralEntry {
                label: "Al Khabourah & Al Suwaiq",
                center: "Al Suwaiq Hospital",
                note: None,
            },
        },
    ]
}
