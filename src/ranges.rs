use crate::error::VitalsError;
use crate::types::{Band, VitalSpec};

/// Classify `value` into a severity band for `spec`.
///
/// Boundaries are checked in order from lowest to highest and the first match
/// wins, so a value sitting exactly on a shared boundary always lands in the
/// lower band. NaN is treated as a lost signal and reported as `CriticallyLow`.
pub fn classify(spec: &VitalSpec, value: f64) -> Band {
    if value.is_nan() {
        return Band::CriticallyLow;
    }
    let tol = spec.tolerance();
    let min = spec.min_value;

    if value <= min {
        return Band::CriticallyLow;
    }
    if value <= min + tol {
        return Band::NearLow;
    }
    match spec.max_value {
        None => Band::Normal,
        Some(max) if value <= max - tol => Band::Normal,
        Some(max) if value < max => Band::NearHigh,
        Some(_) => Band::CriticallyHigh,
    }
}

/// Inclusive range check. NaN is never in range.
pub fn is_in_range(value: f64, min_value: f64, max_value: f64) -> bool {
    min_value <= value && value <= max_value
}

pub fn spec_in_range(spec: &VitalSpec, value: f64) -> bool {
    is_in_range(value, spec.min_value, spec.upper_limit())
}

/// Check the invariants a spec must satisfy before it can be used for
/// classification.
pub fn validate_spec(spec: &VitalSpec) -> Result<(), VitalsError> {
    let name = spec.name.as_str();
    if name.trim().is_empty() {
        return Err(VitalsError::invalid_spec(name, "name must not be empty"));
    }
    if !spec.min_value.is_finite() {
        return Err(VitalsError::invalid_spec(name, "min_value must be finite"));
    }
    if !spec.tolerance_fraction.is_finite() || spec.tolerance_fraction < 0.0 {
        return Err(VitalsError::invalid_spec(
            name,
            format!("tolerance_fraction must be >= 0, got {}", spec.tolerance_fraction),
        ));
    }

    let Some(max) = spec.max_value else {
        return Ok(());
    };
    if !max.is_finite() {
        return Err(VitalsError::invalid_spec(
            name,
            "max_value must be finite; omit it for an unbounded vital",
        ));
    }
    if spec.min_value >= max {
        return Err(VitalsError::invalid_spec(
            name,
            format!("min_value {} must be below max_value {}", spec.min_value, max),
        ));
    }
    let half_span = (max - spec.min_value) / 2.0;
    if spec.tolerance() >= half_span {
        return Err(VitalsError::invalid_spec(
            name,
            format!(
                "tolerance {:.3} leaves no normal band (half span {:.3})",
                spec.tolerance(),
                half_span
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temperature() -> VitalSpec {
        VitalSpec::bounded("temperature", 95.0, 102.0).with_tolerance(0.015)
    }

    #[test]
    fn test_classify_boundaries() {
        let spec = temperature();

        assert_eq!(classify(&spec, 94.0), Band::CriticallyLow);
        assert_eq!(classify(&spec, 95.0), Band::CriticallyLow);
        assert_eq!(classify(&spec, 95.01), Band::NearLow);
        assert_eq!(classify(&spec, 96.5), Band::NearLow);
        assert_eq!(classify(&spec, 98.0), Band::Normal);
        assert_eq!(classify(&spec, 100.4), Band::Normal);
        assert_eq!(classify(&spec, 101.99), Band::NearHigh);
        assert_eq!(classify(&spec, 102.0), Band::CriticallyHigh);
        assert_eq!(classify(&spec, 110.0), Band::CriticallyHigh);
    }

    #[test]
    fn test_classify_zero_tolerance() {
        let spec = temperature().with_tolerance(0.0);

        assert_eq!(classify(&spec, 95.0), Band::CriticallyLow);
        assert_eq!(classify(&spec, 95.01), Band::Normal);
        assert_eq!(classify(&spec, 101.99), Band::Normal);
        // With no near band, max - tol == max and the Normal rule matches first.
        assert_eq!(classify(&spec, 102.0), Band::Normal);
        assert_eq!(classify(&spec, 102.01), Band::CriticallyHigh);
    }

    #[test]
    fn test_classify_unbounded() {
        let spec = VitalSpec::unbounded("spo2", 90.0).with_tolerance(0.015);

        assert_eq!(classify(&spec, 89.0), Band::CriticallyLow);
        assert_eq!(classify(&spec, 91.0), Band::NearLow);
        assert_eq!(classify(&spec, 99.0), Band::Normal);
        assert_eq!(classify(&spec, 1000.0), Band::Normal);
    }

    #[test]
    fn test_classify_non_finite() {
        let spec = temperature();

        assert_eq!(classify(&spec, f64::NAN), Band::CriticallyLow);
        assert_eq!(classify(&spec, f64::NEG_INFINITY), Band::CriticallyLow);
        assert_eq!(classify(&spec, f64::INFINITY), Band::CriticallyHigh);
    }

    #[test]
    fn test_classify_overlapping_bands_prefers_lower() {
        // Unvalidated spec whose near bands swallow the normal band.
        let spec = VitalSpec::bounded("odd", 0.0, 10.0).with_tolerance(0.6);

        assert_eq!(classify(&spec, 5.0), Band::NearLow);
        assert_eq!(classify(&spec, 9.0), Band::NearHigh);
        assert_eq!(classify(&spec, 10.0), Band::CriticallyHigh);
    }

    #[test]
    fn test_is_in_range() {
        assert!(is_in_range(95.0, 95.0, 102.0));
        assert!(is_in_range(102.0, 95.0, 102.0));
        assert!(is_in_range(98.6, 95.0, 102.0));
        assert!(!is_in_range(94.99, 95.0, 102.0));
        assert!(!is_in_range(102.01, 95.0, 102.0));
        assert!(!is_in_range(f64::NAN, 95.0, 102.0));
    }

    #[test]
    fn test_spec_in_range_unbounded() {
        let spec = VitalSpec::unbounded("spo2", 90.0);

        assert!(spec_in_range(&spec, 90.0));
        assert!(spec_in_range(&spec, 1_000.0));
        assert!(!spec_in_range(&spec, 89.9));
    }

    #[test]
    fn test_validate_spec() {
        assert!(validate_spec(&temperature()).is_ok());
        assert!(validate_spec(&VitalSpec::unbounded("spo2", 90.0)).is_ok());

        let inverted = VitalSpec::bounded("inverted", 102.0, 95.0);
        let err = validate_spec(&inverted).unwrap_err();
        assert!(err.to_string().contains("inverted"));

        let equal = VitalSpec::bounded("equal", 95.0, 95.0);
        assert!(validate_spec(&equal).is_err());

        let negative = temperature().with_tolerance(-0.1);
        assert!(validate_spec(&negative).is_err());

        let too_wide = VitalSpec::bounded("wide", 0.0, 10.0).with_tolerance(0.5);
        assert!(matches!(
            validate_spec(&too_wide),
            Err(VitalsError::InvalidSpec { .. })
        ));

        let nameless = VitalSpec::bounded("  ", 0.0, 10.0);
        assert!(validate_spec(&nameless).is_err());

        let infinite = VitalSpec::bounded("inf", 0.0, f64::INFINITY);
        assert!(validate_spec(&infinite).is_err());
    }
}
