use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Readings, VitalSpec};

/// Supplies snapshots of current vital values.
pub trait SensorSource {
    fn next_reading(&mut self) -> Readings;
}

/// Produces random values around each vital's reference range, so that most
/// snapshots are normal but some drift out of bounds.
pub struct SimulatedSensor {
    specs: Vec<VitalSpec>,
    rng: StdRng,
}

/// Fraction of the range span added on each side of the sampling window.
const DRIFT_FRACTION: f64 = 0.1;

impl SimulatedSensor {
    pub fn new(specs: &[VitalSpec]) -> Self {
        Self {
            specs: specs.to_vec(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(specs: &[VitalSpec], seed: u64) -> Self {
        Self {
            specs: specs.to_vec(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

/// Sampling window `(low, high)` for a vital.
pub fn sample_window(spec: &VitalSpec) -> (f64, f64) {
    match spec.max_value {
        Some(max) => {
            let drift = (max - spec.min_value) * DRIFT_FRACTION;
            (spec.min_value - drift, max + drift)
        }
        None => {
            let drift = spec.min_value.abs() * DRIFT_FRACTION;
            (spec.min_value - drift, spec.min_value + drift)
        }
    }
}

impl SensorSource for SimulatedSensor {
    fn next_reading(&mut self) -> Readings {
        let mut readings = Readings::with_capacity(self.specs.len());
        for spec in &self.specs {
            let (low, high) = sample_window(spec);
            let value = if high > low {
                self.rng.random_range(low..=high)
            } else {
                low
            };
            readings.insert(spec.name.clone(), value);
        }
        readings
    }
}

/// Returns the same snapshot on every call.
#[derive(Debug, Clone, Default)]
pub struct FixedSensor {
    readings: Readings,
}

impl FixedSensor {
    pub fn new(readings: Readings) -> Self {
        Self { readings }
    }

    /// Every vital at the centre of its range.
    pub fn at_midpoints(specs: &[VitalSpec]) -> Self {
        let readings = specs
            .iter()
            .map(|s| (s.name.clone(), s.midpoint()))
            .collect();
        Self { readings }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: f64) -> Self {
        self.readings.insert(name.into(), value);
        self
    }
}

impl SensorSource for FixedSensor {
    fn next_reading(&mut self) -> Readings {
        self.readings.clone()
    }
}
