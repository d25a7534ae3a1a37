use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::translate::Language;

/// One snapshot of sensor values keyed by vital name.
pub type Readings = HashMap<String, f64>;

#[derive(Debug, Clone)]
pub struct Config {
    pub vitals_config_path: Option<PathBuf>,
    pub language: Language,
    pub cycles: u32,
    pub seed: Option<u64>,
    pub slack_webhook_url: Option<String>,
    pub monitor_name: Option<String>,
    pub exit_on_alert: bool,
}

pub const DEFAULT_TOLERANCE_FRACTION: f64 = 0.015;

fn default_tolerance_fraction() -> f64 {
    DEFAULT_TOLERANCE_FRACTION
}

/// Reference range for a single vital sign.
///
/// `max_value` of `None` marks a vital with no upper limit; such a vital is
/// never classified above `Normal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSpec {
    pub name: String,
    pub min_value: f64,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default = "default_tolerance_fraction")]
    pub tolerance_fraction: f64,
    #[serde(default)]
    pub unit: String,
    pub out_of_range_message: String,
}

impl VitalSpec {
    pub fn bounded(name: impl Into<String>, min_value: f64, max_value: f64) -> Self {
        Self::build(name.into(), min_value, Some(max_value))
    }

    pub fn unbounded(name: impl Into<String>, min_value: f64) -> Self {
        Self::build(name.into(), min_value, None)
    }

    fn build(name: String, min_value: f64, max_value: Option<f64>) -> Self {
        let out_of_range_message = format!("{} is out of range.", name);
        Self {
            name,
            min_value,
            max_value,
            tolerance_fraction: DEFAULT_TOLERANCE_FRACTION,
            unit: String::new(),
            out_of_range_message,
        }
    }

    pub fn with_tolerance(mut self, tolerance_fraction: f64) -> Self {
        self.tolerance_fraction = tolerance_fraction;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.out_of_range_message = message.into();
        self
    }

    /// Upper limit used for range checks; `+inf` when unbounded.
    pub fn upper_limit(&self) -> f64 {
        self.max_value.unwrap_or(f64::INFINITY)
    }

    /// Absolute width of the near-boundary bands.
    ///
    /// Sized from `max_value`; unbounded vitals size it from `min_value`.
    pub fn tolerance(&self) -> f64 {
        self.max_value.unwrap_or(self.min_value).abs() * self.tolerance_fraction
    }

    /// Centre of the reference range. Unbounded vitals get a value clear of
    /// the near-low band.
    pub fn midpoint(&self) -> f64 {
        match self.max_value {
            Some(max) => (self.min_value + max) / 2.0,
            None => self.min_value + 2.0 * self.tolerance().max(1.0),
        }
    }
}

/// Severity band of a reading relative to its reference range, ordered from
/// lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    CriticallyLow,
    NearLow,
    Normal,
    NearHigh,
    CriticallyHigh,
}

impl Band {
    pub fn label(&self) -> &'static str {
        match self {
            Band::CriticallyLow => "CRITICALLY_LOW",
            Band::NearLow => "NEAR_LOW",
            Band::Normal => "NORMAL",
            Band::NearHigh => "NEAR_HIGH",
            Band::CriticallyHigh => "CRITICALLY_HIGH",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalStatus {
    pub name: String,
    pub value: f64,
    pub in_range: bool,
    /// Only populated by `report`.
    pub band: Option<Band>,
}

/// Outcome of evaluating one snapshot. Statuses keep the configured order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub statuses: Vec<VitalStatus>,
    pub overall: bool,
}

impl EvaluationResult {
    pub fn per_vital(&self) -> impl Iterator<Item = (&str, bool)> {
        self.statuses.iter().map(|s| (s.name.as_str(), s.in_range))
    }

    pub fn get(&self, name: &str) -> Option<&VitalStatus> {
        self.statuses.iter().find(|s| s.name == name)
    }

    pub fn failures(&self) -> impl Iterator<Item = &VitalStatus> {
        self.statuses.iter().filter(|s| !s.in_range)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

#[derive(Serialize)]
pub struct SlackPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub blocks: Vec<serde_json::Value>,
}
