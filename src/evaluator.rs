use tracing::debug;

use crate::config::VitalsConfig;
use crate::error::VitalsError;
use crate::notify::{Notifier, StatusSink};
use crate::ranges::{classify, spec_in_range};
use crate::sensor::SensorSource;
use crate::types::{EvaluationResult, Readings, VitalSpec, VitalStatus};

fn lookup(spec: &VitalSpec, readings: &Readings) -> Result<f64, VitalsError> {
    readings
        .get(&spec.name)
        .copied()
        .ok_or_else(|| VitalsError::MissingReading {
            vital: spec.name.clone(),
        })
}

/// Walk `specs` in order, notifying once for every out-of-range vital.
///
/// Readings are resolved up front so a missing vital aborts before any
/// notification is sent.
fn traverse<N, F>(
    specs: &[VitalSpec],
    readings: &Readings,
    notifier: &N,
    mut on_status: F,
) -> Result<EvaluationResult, VitalsError>
where
    N: Notifier + ?Sized,
    F: FnMut(&VitalSpec, &mut VitalStatus),
{
    let values = specs
        .iter()
        .map(|spec| lookup(spec, readings))
        .collect::<Result<Vec<_>, _>>()?;

    let mut statuses = Vec::with_capacity(specs.len());
    let mut overall = true;
    for (spec, value) in specs.iter().zip(values) {
        let in_range = spec_in_range(spec, value);
        if !in_range {
            debug!(vital = %spec.name, value, "out of range");
            notifier.notify(&spec.out_of_range_message);
        }
        overall &= in_range;

        let mut status = VitalStatus {
            name: spec.name.clone(),
            value,
            in_range,
            band: None,
        };
        on_status(spec, &mut status);
        statuses.push(status);
    }

    Ok(EvaluationResult { statuses, overall })
}

/// Check every reading against its range and fold the outcome.
pub fn evaluate<N>(
    specs: &[VitalSpec],
    readings: &Readings,
    notifier: &N,
) -> Result<EvaluationResult, VitalsError>
where
    N: Notifier + ?Sized,
{
    traverse(specs, readings, notifier, |_, _| {})
}

/// As `evaluate`, additionally classifying each vital and emitting a
/// `{name} - {band}` line to `sink`.
pub fn report<N, S>(
    specs: &[VitalSpec],
    readings: &Readings,
    notifier: &N,
    sink: &S,
) -> Result<EvaluationResult, VitalsError>
where
    N: Notifier + ?Sized,
    S: StatusSink + ?Sized,
{
    traverse(specs, readings, notifier, |spec, status| {
        let band = classify(spec, status.value);
        sink.emit(&format!("{} - {}", spec.name, band));
        status.band = Some(band);
    })
}

/// Binds a vital configuration to its collaborators.
pub struct Monitor<'a, N: ?Sized, S: ?Sized> {
    vitals: &'a VitalsConfig,
    notifier: &'a N,
    sink: &'a S,
}

impl<'a, N, S> Monitor<'a, N, S>
where
    N: Notifier + ?Sized,
    S: StatusSink + ?Sized,
{
    pub fn new(vitals: &'a VitalsConfig, notifier: &'a N, sink: &'a S) -> Self {
        Self { vitals, notifier, sink }
    }

    pub fn evaluate(&self, readings: &Readings) -> Result<EvaluationResult, VitalsError> {
        evaluate(self.vitals.specs(), readings, self.notifier)
    }

    pub fn report(&self, readings: &Readings) -> Result<EvaluationResult, VitalsError> {
        report(self.vitals.specs(), readings, self.notifier, self.sink)
    }

    /// Pull one snapshot from `source` and report on it.
    pub fn poll<T: SensorSource + ?Sized>(&self, source: &mut T) -> Result<EvaluationResult, VitalsError> {
        let readings = source.next_reading();
        self.report(&readings)
    }
}
