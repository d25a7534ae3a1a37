use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::types::*;

/// Aggregated outcome of a monitoring run over one or more snapshots.
pub struct MonitorReport {
    pub config: Config,
    pub started_at: DateTime<Utc>,
    pub vitals: Vec<VitalTally>,
    pub cycles: usize,
    pub failing_cycles: usize,
    /// Distinct alert messages with how often each was raised, first seen first.
    pub alerts: Vec<(String, usize)>,
}

/// Per-vital counters across the run, kept in configured order.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalTally {
    pub name: String,
    pub unit: String,
    pub out_of_range: usize,
    pub bands: BTreeMap<Band, usize>,
    pub last_value: Option<f64>,
    pub last_band: Option<Band>,
}

impl VitalTally {
    fn new(spec: &VitalSpec) -> Self {
        Self {
            name: spec.name.clone(),
            unit: spec.unit.clone(),
            out_of_range: 0,
            bands: BTreeMap::new(),
            last_value: None,
            last_band: None,
        }
    }

    pub fn band_count(&self, band: Band) -> usize {
        self.bands.get(&band).copied().unwrap_or(0)
    }
}

impl MonitorReport {
    pub fn new(config: Config, specs: &[VitalSpec]) -> Self {
        Self {
            config,
            started_at: Utc::now(),
            vitals: specs.iter().map(VitalTally::new).collect(),
            cycles: 0,
            failing_cycles: 0,
            alerts: Vec::new(),
        }
    }

    /// Fold one evaluation into the running totals.
    pub fn add_result(&mut self, result: &EvaluationResult) {
        self.cycles += 1;
        if !result.overall {
            self.failing_cycles += 1;
        }
        for status in &result.statuses {
            let Some(tally) = self.vitals.iter_mut().find(|t| t.name == status.name) else {
                continue;
            };
            if !status.in_range {
                tally.out_of_range += 1;
            }
            if let Some(band) = status.band {
                *tally.bands.entry(band).or_insert(0) += 1;
            }
            tally.last_value = Some(status.value);
            tally.last_band = status.band;
        }
    }

    pub fn add_alerts(&mut self, alerts: Vec<String>) {
        for alert in alerts {
            match self.alerts.iter_mut().find(|(message, _)| *message == alert) {
                Some((_, count)) => *count += 1,
                None => self.alerts.push((alert, 1)),
            }
        }
    }

    /// Check if any cycle had an out-of-range vital
    pub fn has_alerts(&self) -> bool {
        self.failing_cycles > 0
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            cycles: self.cycles,
            failing_cycles: self.failing_cycles,
            out_of_range_counts: self
                .vitals
                .iter()
                .map(|t| (t.name.clone(), t.out_of_range))
                .collect(),
        }
    }
}

pub struct ReportSummary {
    pub cycles: usize,
    pub failing_cycles: usize,
    pub out_of_range_counts: Vec<(String, usize)>,
}

impl ReportSummary {
    pub fn total_alerts(&self) -> usize {
        self.out_of_range_counts.iter().map(|(_, n)| n).sum()
    }

    pub fn has_alerts(&self) -> bool {
        self.total_alerts() > 0
    }

    pub fn passing_cycles(&self) -> usize {
        self.cycles - self.failing_cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::Language;

    fn config() -> Config {
        Config {
            vitals_config_path: None,
            language: Language::English,
            cycles: 2,
            seed: None,
            slack_webhook_url: None,
            monitor_name: None,
            exit_on_alert: false,
        }
    }

    fn status(name: &str, value: f64, in_range: bool, band: Option<Band>) -> VitalStatus {
        VitalStatus {
            name: name.to_string(),
            value,
            in_range,
            band,
        }
    }

    #[test]
    fn test_add_result_tallies() {
        let specs = vec![
            VitalSpec::bounded("temperature", 95.0, 102.0),
            VitalSpec::bounded("pulseRate", 60.0, 100.0),
        ];
        let mut report = MonitorReport::new(config(), &specs);
        assert!(!report.has_alerts());

        report.add_result(&EvaluationResult {
            statuses: vec![
                status("temperature", 98.0, true, Some(Band::Normal)),
                status("pulseRate", 70.0, true, Some(Band::Normal)),
            ],
            overall: true,
        });
        report.add_result(&EvaluationResult {
            statuses: vec![
                status("temperature", 104.0, false, Some(Band::CriticallyHigh)),
                status("pulseRate", 99.0, true, Some(Band::NearHigh)),
            ],
            overall: false,
        });

        assert!(report.has_alerts());
        assert_eq!(report.cycles, 2);
        assert_eq!(report.failing_cycles, 1);

        let temperature = &report.vitals[0];
        assert_eq!(temperature.out_of_range, 1);
        assert_eq!(temperature.band_count(Band::Normal), 1);
        assert_eq!(temperature.band_count(Band::CriticallyHigh), 1);
        assert_eq!(temperature.band_count(Band::NearLow), 0);
        assert_eq!(temperature.last_value, Some(104.0));

        let summary = report.summary();
        assert_eq!(summary.total_alerts(), 1);
        assert_eq!(summary.passing_cycles(), 1);
        assert!(summary.has_alerts());
    }

    #[test]
    fn test_add_alerts_groups_repeats() {
        let specs = vec![VitalSpec::bounded("spo2", 90.0, 100.0)];
        let mut report = MonitorReport::new(config(), &specs);

        report.add_alerts(vec!["low spo2".to_string(), "high pulse".to_string()]);
        report.add_alerts(vec!["low spo2".to_string()]);

        assert_eq!(
            report.alerts,
            vec![("low spo2".to_string(), 2), ("high pulse".to_string(), 1)]
        );
    }

    #[test]
    fn test_unevaluated_results_leave_bands_empty() {
        let specs = vec![VitalSpec::bounded("spo2", 90.0, 100.0)];
        let mut report = MonitorReport::new(config(), &specs);

        report.add_result(&EvaluationResult {
            statuses: vec![status("spo2", 85.0, false, None)],
            overall: false,
        });

        assert!(report.vitals[0].bands.is_empty());
        assert_eq!(report.vitals[0].last_band, None);
        assert_eq!(report.summary().total_alerts(), 1);
    }
}
