use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The three mutually exclusive discharge pathways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Scenario {
    A,
    B,
    C,
}

impl Scenario {
    pub const fn ordered() -> [Self; 3] {
        [Self::A, Self::B, Self::C]
    }

    pub const fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::A => "Collect & Discharge",
            Self::B => "Delay Discharge",
            Self::C => "Early Discharge — Outpatient Follow-up",
        }
    }

    pub const fn risk_level(self) -> RiskLevel {
        match self {
            Self::A => RiskLevel::Low,
            Self::B => RiskLevel::Medium,
            Self::C => RiskLevel::High,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario {}", self.letter())
    }
}

impl FromStr for Scenario {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(InputError::UnknownScenario(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW RISK",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH RISK",
        }
    }
}

/// Collection center a mother is referred to after an early discharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferralEntry {
    pub label: &'static str,
    pub center: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// A checklist item. `done` marks a step the pathway already satisfies,
/// not one the user ticked off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionStep {
    pub text: String,
    pub done: bool,
}

impl ActionStep {
    pub(crate) fn satisfied(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: true,
        }
    }

    pub(crate) fn pending(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// Discharge recommendation for a single newborn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub scenario: Scenario,
    pub risk_level: RiskLevel,
    pub title: &'static str,
    pub steps: Vec<ActionStep>,
    pub referral: Option<ReferralEntry>,
    pub focal_needed: bool,
    pub urgency_message: String,
    pub deadline_label: Option<String>,
    /// Whole hours left before a delayed baby becomes sample-ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_hours: Option<u32>,
    /// Rounded hours left in the 48-hour collection window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_until_window_closes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("age at discharge must be a finite, non-negative number of hours (got {0})")]
    InvalidAge(String),
    #[error("discharge time {discharge_at} is earlier than birth time {born_at}")]
    DischargeBeforeBirth {
        born_at: NaiveDateTime,
        discharge_at: NaiveDateTime,
    },
    #[error("unknown scenario '{0}', expected one of A, B or C")]
    UnknownScenario(String),
}

/// Validated input triple collected by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DischargeInputs {
    pub age_hours: f64,
    pub can_delay: bool,
    pub wilayat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub born_at: Option<NaiveDateTime>,
}

impl DischargeInputs {
    pub fn new(
        age_hours: f64,
        can_delay: bool,
        wilayat: Option<String>,
    ) -> Result<Self, InputError> {
        if !age_hours.is_finite() || age_hours < 0.0 {
            return Err(InputError::InvalidAge(age_hours.to_string()));
        }

        Ok(Self {
            age_hours,
            can_delay,
            wilayat,
            born_at: None,
        })
    }

    /// Derives the age at discharge from the birth and discharge times.
    pub fn from_timestamps(
        born_at: NaiveDateTime,
        discharge_at: NaiveDateTime,
        can_delay: bool,
        wilayat: Option<String>,
    ) -> Result<Self, InputError> {
        if discharge_at < born_at {
            return Err(InputError::DischargeBeforeBirth {
                born_at,
                discharge_at,
            });
        }

        let minutes = (discharge_at - born_at).num_minutes();
        let mut inputs = Self::new(minutes as f64 / 60.0, can_delay, wilayat)?;
        inputs.born_at = Some(born_at);
        Ok(inputs)
    }

    pub fn wilayat(&self) -> Option<&str> {
        self.wilayat.as_deref()
    }
}
