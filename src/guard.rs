//! Validation of raw floating-point input.
//!
//! Every coordinate constructor funnels its fields through these checks, so
//! a value that exists is a value whose invariants hold. The functions are
//! pure: they either hand the input back unchanged or reject it with
//! [`InvalidArgument`].

use crate::error::{InvalidArgument, Reason};
use std::f64::consts::{PI, TAU};

/// Rejects NaN and ±infinity.
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, InvalidArgument> {
    if value.is_nan() {
        return Err(InvalidArgument::new(name, Reason::NaN));
    }
    if value.is_infinite() {
        return Err(InvalidArgument::new(name, Reason::Infinite));
    }
    Ok(value)
}

/// Validates an azimuthal angle in radians: finite and in `[0, 2π)`.
pub(crate) fn azimuth(name: &'static str, value: f64) -> Result<f64, InvalidArgument> {
    let value = finite(name, value)?;
    if !(0.0..TAU).contains(&value) {
        return Err(InvalidArgument::new(name, Reason::OutOfRange("in [0, 2π)")));
    }
    Ok(value)
}

/// Validates a polar angle in radians: finite and in `[0, π)`.
pub(crate) fn polar(name: &'static str, value: f64) -> Result<f64, InvalidArgument> {
    let value = finite(name, value)?;
    if !(0.0..PI).contains(&value) {
        return Err(InvalidArgument::new(name, Reason::OutOfRange("in [0, π)")));
    }
    Ok(value)
}

/// Validates a radial distance: finite and non-negative.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, InvalidArgument> {
    let value = finite(name, value)?;
    if value < 0.0 {
        return Err(InvalidArgument::new(name, Reason::OutOfRange("non-negative")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(-12.5)]
    #[case(f64::MAX)]
    #[case(f64::MIN_POSITIVE)]
    fn finite_accepts(#[case] value: f64) {
        assert_eq!(finite("v", value), Ok(value));
    }

    #[test]
    fn finite_rejects_nan_and_infinities() {
        assert_eq!(
            finite("v", f64::NAN).unwrap_err().reason(),
            &Reason::NaN
        );
        assert_eq!(
            finite("v", f64::INFINITY).unwrap_err().reason(),
            &Reason::Infinite
        );
        assert_eq!(
            finite("v", f64::NEG_INFINITY).unwrap_err().reason(),
            &Reason::Infinite
        );
    }

    #[rstest]
    #[case(-0.1, false)]
    #[case(0.0, true)]
    #[case(TAU - 1e-9, true)]
    #[case(TAU, false)]
    fn azimuth_bounds(#[case] value: f64, #[case] ok: bool) {
        assert_eq!(azimuth("phi", value).is_ok(), ok);
    }

    #[rstest]
    #[case(-0.1, false)]
    #[case(0.0, true)]
    #[case(PI - 1e-9, true)]
    // π itself is excluded from the polar domain
    #[case(PI, false)]
    fn polar_bounds(#[case] value: f64, #[case] ok: bool) {
        assert_eq!(polar("theta", value).is_ok(), ok);
    }

    #[test]
    fn radius_must_not_be_negative() {
        assert!(non_negative("radius", 0.0).is_ok());
        assert!(non_negative("radius", 3.5).is_ok());
        assert_eq!(
            non_negative("radius", -1.0).unwrap_err().reason(),
            &Reason::OutOfRange("non-negative")
        );
    }
}
