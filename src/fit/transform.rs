//! Transforms from R² to the published "main result".
//!
//! Each variant clamps its input to its own domain before applying its formula.
//! Variants with a finite ceiling may also carry a saturation value that is
//! returned once the clamped input reaches the ceiling. Both constants live in
//! `ClampSpec` so the clamp/formula pairing for every variant sits in one table.
//!
//! Results are rounded to 6 decimals when finite (`round_to_6`).

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Lower bound applied to `1 - r` inside logs, roots and powers.
const COMPLEMENT_FLOOR: f64 = 1e-10;

/// Transform used by the fixed-transform endpoint.
pub const DEFAULT_TRANSFORM: Transform = Transform::NegLogComplement;

/// Named R² transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    ReciprocalComplement,
    ExpReciprocalComplement,
    NegLogComplement,
    InverseSqrtComplement,
    TangentHalfPi,
    ExpDecayScaled,
    InverseCubeComplement,
    Log1p,
    ExpClampedLow,
    Sqrt1p,
    Square,
    ArctanNormalized,
    SaturatingRatio,
    Sinh,
    ExpNegative,
}

/// Input domain and saturation behaviour of a transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampSpec {
    /// Inputs below this are raised to it.
    pub floor: f64,
    /// Inputs above this are lowered to it (`INFINITY` = no upper clamp).
    pub ceiling: f64,
    /// Output returned once the clamped input reaches `ceiling`.
    pub saturation: Option<f64>,
}

impl ClampSpec {
    const fn new(floor: f64, ceiling: f64, saturation: Option<f64>) -> Self {
        Self {
            floor,
            ceiling,
            saturation,
        }
    }

    const fn lower(floor: f64) -> Self {
        Self::new(floor, f64::INFINITY, None)
    }

    pub fn clamp(&self, r: f64) -> f64 {
        r.max(self.floor).min(self.ceiling)
    }
}

/// Direction in which a transform's output moves as R² increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Monotonicity {
    NonDecreasing,
    NonIncreasing,
    /// Rises until the formula overflows to `+inf`, then drops back to the
    /// saturation value at the ceiling.
    NonMonotone,
}

impl Transform {
    pub const ALL: [Transform; 15] = [
        Transform::ReciprocalComplement,
        Transform::ExpReciprocalComplement,
        Transform::NegLogComplement,
        Transform::InverseSqrtComplement,
        Transform::TangentHalfPi,
        Transform::ExpDecayScaled,
        Transform::InverseCubeComplement,
        Transform::Log1p,
        Transform::ExpClampedLow,
        Transform::Sqrt1p,
        Transform::Square,
        Transform::ArctanNormalized,
        Transform::SaturatingRatio,
        Transform::Sinh,
        Transform::ExpNegative,
    ];

    /// Wire name used in `transformKey` and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Transform::ReciprocalComplement => "reciprocal-complement",
            Transform::ExpReciprocalComplement => "exp-reciprocal-complement",
            Transform::NegLogComplement => "neg-log-complement",
            Transform::InverseSqrtComplement => "inverse-sqrt-complement",
            Transform::TangentHalfPi => "tangent-half-pi",
            Transform::ExpDecayScaled => "exp-decay-scaled",
            Transform::InverseCubeComplement => "inverse-cube-complement",
            Transform::Log1p => "log1p",
            Transform::ExpClampedLow => "exp-clamped-low",
            Transform::Sqrt1p => "sqrt1p",
            Transform::Square => "square",
            Transform::ArctanNormalized => "arctan-normalized",
            Transform::SaturatingRatio => "saturating-ratio",
            Transform::Sinh => "sinh",
            Transform::ExpNegative => "exp-negative",
        }
    }

    /// Human-readable formula (for `invsq transforms`).
    pub fn formula(self) -> &'static str {
        match self {
            Transform::ReciprocalComplement => "1/(1-r)",
            Transform::ExpReciprocalComplement => "exp(1/(1-r))",
            Transform::NegLogComplement => "-ln(max(1e-10, 1-r))",
            Transform::InverseSqrtComplement => "1/sqrt(max(1e-10, 1-r))",
            Transform::TangentHalfPi => "tan(pi*r/2)",
            Transform::ExpDecayScaled => "exp(10*(r-1))",
            Transform::InverseCubeComplement => "1/max(1e-10, 1-r)^3",
            Transform::Log1p => "ln(1+r)",
            Transform::ExpClampedLow => "exp(r)",
            Transform::Sqrt1p => "sqrt(1+r)",
            Transform::Square => "r^2",
            Transform::ArctanNormalized => "atan(r)*2/pi",
            Transform::SaturatingRatio => "r/(1+r)",
            Transform::Sinh => "sinh(r)",
            Transform::ExpNegative => "exp(-r)",
        }
    }

    pub fn clamp_spec(self) -> ClampSpec {
        match self {
            Transform::ReciprocalComplement => ClampSpec::new(0.0, 0.999, Some(1e10)),
            Transform::ExpReciprocalComplement => ClampSpec::new(0.0, 0.999, Some(1e100)),
            Transform::NegLogComplement => ClampSpec::new(0.0, 0.9999, None),
            Transform::InverseSqrtComplement => ClampSpec::new(0.0, 0.999, Some(1e10)),
            Transform::TangentHalfPi => ClampSpec::new(0.0, 0.999, None),
            Transform::InverseCubeComplement => ClampSpec::new(0.0, 0.999, Some(1e30)),
            Transform::ExpClampedLow => ClampSpec::lower(-10.0),
            Transform::ExpDecayScaled
            | Transform::Log1p
            | Transform::Sqrt1p
            | Transform::Square
            | Transform::ArctanNormalized
            | Transform::SaturatingRatio
            | Transform::Sinh
            | Transform::ExpNegative => ClampSpec::lower(0.0),
        }
    }

    pub fn monotonicity(self) -> Monotonicity {
        match self {
            Transform::ExpNegative => Monotonicity::NonIncreasing,
            // exp(1/(1-r)) passes 1e100 near r ≈ 0.99566 and is +inf from r ≈ 0.99859.
            Transform::ExpReciprocalComplement => Monotonicity::NonMonotone,
            _ => Monotonicity::NonDecreasing,
        }
    }

    /// Apply the transform to a raw R² (clamping included, no rounding).
    pub fn apply(self, r2: f64) -> f64 {
        let spec = self.clamp_spec();
        let r = spec.clamp(r2);
        if let Some(saturation) = spec.saturation {
            if r >= spec.ceiling {
                return saturation;
            }
        }

        match self {
            Transform::ReciprocalComplement => 1.0 / (1.0 - r),
            Transform::ExpReciprocalComplement => (1.0 / (1.0 - r)).exp(),
            Transform::NegLogComplement => -(1.0 - r).max(COMPLEMENT_FLOOR).ln(),
            Transform::InverseSqrtComplement => 1.0 / (1.0 - r).max(COMPLEMENT_FLOOR).sqrt(),
            Transform::TangentHalfPi => (PI * r / 2.0).tan(),
            Transform::ExpDecayScaled => (10.0 * (r - 1.0)).exp(),
            Transform::InverseCubeComplement => 1.0 / (1.0 - r).max(COMPLEMENT_FLOOR).powi(3),
            Transform::Log1p => (1.0 + r).ln(),
            Transform::ExpClampedLow => r.exp(),
            Transform::Sqrt1p => (1.0 + r).sqrt(),
            Transform::Square => r * r,
            Transform::ArctanNormalized => r.atan() * 2.0 / PI,
            Transform::SaturatingRatio => {
                let v = r / (1.0 + r);
                if v.is_nan() || v == 0.0 { 0.0 } else { v }
            }
            Transform::Sinh => r.sinh(),
            Transform::ExpNegative => (-r).exp(),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A transform name outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransform(pub String);

impl fmt::Display for UnknownTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transform: {}", self.0)
    }
}

impl std::error::Error for UnknownTransform {}

impl FromStr for Transform {
    type Err = UnknownTransform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transform::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| UnknownTransform(s.to_string()))
    }
}

/// Failure while evaluating a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// The input R² was NaN.
    NotANumber(Transform),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::NotANumber(t) => {
                write!(f, "transform {t} failed: input is not a number")
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Apply `transform` to `r2` and round the result for publication.
pub fn evaluate(transform: Transform, r2: f64) -> Result<f64, TransformError> {
    if r2.is_nan() {
        return Err(TransformError::NotANumber(transform));
    }
    Ok(round_to_6(transform.apply(r2)))
}

/// Magnitude above which an `f64` has no fractional digits left to round.
const ROUNDING_LIMIT: f64 = 1e15;

/// Round finite values to 6 decimals; non-finite values pass through.
///
/// Values beyond `ROUNDING_LIMIT` are returned unchanged so `value * 1e6`
/// cannot overflow. Negative zero is normalized to `0.0`.
pub fn round_to_6(value: f64) -> f64 {
    if !value.is_finite() || value.abs() > ROUNDING_LIMIT {
        return value;
    }
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn baselines_at_zero() {
        assert_eq!(evaluate(Transform::ReciprocalComplement, 0.0).unwrap(), 1.0);
        assert_eq!(evaluate(Transform::ExpReciprocalComplement, 0.0).unwrap(), 2.718282);
        let neg_log = evaluate(Transform::NegLogComplement, 0.0).unwrap();
        assert_eq!(neg_log, 0.0);
        assert!(neg_log.is_sign_positive());
        assert_eq!(evaluate(Transform::Square, 0.0).unwrap(), 0.0);
        assert_eq!(evaluate(Transform::InverseSqrtComplement, 0.0).unwrap(), 1.0);
        assert_eq!(evaluate(Transform::TangentHalfPi, 0.0).unwrap(), 0.0);
        assert_eq!(evaluate(Transform::ExpDecayScaled, 0.0).unwrap(), 0.000045);
        assert_eq!(evaluate(Transform::InverseCubeComplement, 0.0).unwrap(), 1.0);
        assert_eq!(evaluate(Transform::Log1p, 0.0).unwrap(), 0.0);
        assert_eq!(evaluate(Transform::ExpClampedLow, 0.0).unwrap(), 1.0);
        assert_eq!(evaluate(Transform::Sqrt1p, 0.0).unwrap(), 1.0);
        assert_eq!(evaluate(Transform::ArctanNormalized, 0.0).unwrap(), 0.0);
        assert_eq!(evaluate(Transform::SaturatingRatio, 0.0).unwrap(), 0.0);
        assert_eq!(evaluate(Transform::Sinh, 0.0).unwrap(), 0.0);
        assert_eq!(evaluate(Transform::ExpNegative, 0.0).unwrap(), 1.0);
    }

    #[test]
    fn saturation_at_ceiling() {
        assert_eq!(Transform::ReciprocalComplement.apply(0.999), 1e10);
        assert_eq!(Transform::ReciprocalComplement.apply(1.0), 1e10);
        assert_eq!(Transform::ExpReciprocalComplement.apply(1.5), 1e100);
        assert_eq!(Transform::InverseSqrtComplement.apply(1.0), 1e10);
        assert_eq!(Transform::InverseCubeComplement.apply(1.0), 1e30);
    }

    #[test]
    fn just_below_ceiling_uses_formula() {
        let v = Transform::ReciprocalComplement.apply(0.99);
        assert!(close(v, 100.0), "{v}");
        let v = Transform::InverseCubeComplement.apply(0.9);
        assert!(close(v, 1000.0), "{v}");
    }

    #[test]
    fn neg_log_complement_tops_out_at_its_clamp() {
        let top = evaluate(Transform::NegLogComplement, 1.0).unwrap();
        assert_eq!(top, 9.21034);
        assert_eq!(evaluate(Transform::NegLogComplement, 3.0).unwrap(), top);
    }

    #[test]
    fn tangent_grows_smoothly_toward_clamp() {
        let below = Transform::TangentHalfPi.apply(0.99);
        let at = Transform::TangentHalfPi.apply(0.999);
        let above = Transform::TangentHalfPi.apply(1.2);
        assert!(below < at);
        assert_eq!(at, above);
        assert!(at.is_finite());
    }

    #[test]
    fn negative_inputs_are_clamped() {
        for t in Transform::ALL {
            let spec = t.clamp_spec();
            assert_eq!(t.apply(-50.0), t.apply(spec.floor), "{t}");
        }
        // exp-clamped-low keeps negative values down to -10.
        assert!(close(Transform::ExpClampedLow.apply(-1.0), (-1.0f64).exp()));
        assert!(close(Transform::ExpClampedLow.apply(-20.0), (-10.0f64).exp()));
    }

    #[test]
    fn unbounded_transforms_have_no_upper_clamp() {
        assert!(close(Transform::Square.apply(2.0), 4.0));
        assert!(close(Transform::ExpDecayScaled.apply(1.5), 5.0f64.exp()));
        assert!(close(Transform::Sinh.apply(1.2), 1.2f64.sinh()));
    }

    #[test]
    fn every_transform_is_monotone_over_its_domain() {
        let grid: Vec<f64> = (-20..=240).map(|i| i as f64 * 0.005).collect();
        for t in Transform::ALL {
            let values: Vec<f64> = grid.iter().map(|&r| t.apply(r)).collect();
            for (w, r) in values.windows(2).zip(grid.iter()) {
                match t.monotonicity() {
                    Monotonicity::NonDecreasing => assert!(w[1] >= w[0], "{t} at r={r}"),
                    Monotonicity::NonIncreasing => assert!(w[1] <= w[0], "{t} at r={r}"),
                    Monotonicity::NonMonotone => {}
                }
            }
        }
    }

    #[test]
    fn exp_reciprocal_complement_is_only_monotone_below_its_overflow() {
        let t = Transform::ExpReciprocalComplement;
        assert_eq!(t.monotonicity(), Monotonicity::NonMonotone);

        let below: Vec<f64> = (0..=9950).map(|i| t.apply(i as f64 * 1e-4)).collect();
        assert!(below.windows(2).all(|w| w[1] >= w[0]));

        assert!(t.apply(0.9989).is_infinite());
        assert_eq!(t.apply(0.999), 1e100);
    }

    #[test]
    fn exp_reciprocal_complement_overflows_just_below_ceiling() {
        // exp(1/(1-r)) passes the 1e100 saturation value near r ≈ 0.99566 and
        // overflows past r ≈ 0.99859; the non-finite value is passed through.
        assert!(Transform::ExpReciprocalComplement.apply(0.997) > 1e100);
        let v = evaluate(Transform::ExpReciprocalComplement, 0.9985).unwrap();
        assert!(v.is_finite());
        assert!(evaluate(Transform::ExpReciprocalComplement, 0.9989).unwrap().is_infinite());
    }

    #[test]
    fn outputs_are_finite_for_finite_inputs() {
        for t in Transform::ALL {
            for &r in &[-1e6, -1.0, 0.0, 0.5, 0.9999, 1.0, 1.0 + 1e-12] {
                assert!(t.apply(r).is_finite(), "{t} at {r}");
            }
        }
    }

    #[test]
    fn keys_round_trip_and_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for t in Transform::ALL {
            assert!(seen.insert(t.key()));
            assert_eq!(t.key().parse::<Transform>().unwrap(), t);
        }
        assert_eq!(seen.len(), 15);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "bogus".parse::<Transform>().unwrap_err();
        assert_eq!(err.to_string(), "unknown transform: bogus");
        assert!("Square".parse::<Transform>().is_err());
    }

    #[test]
    fn nan_input_fails_evaluation() {
        let err = evaluate(Transform::Square, f64::NAN).unwrap_err();
        assert_eq!(err, TransformError::NotANumber(Transform::Square));
    }

    #[test]
    fn rounding_rules() {
        assert_eq!(round_to_6(1.23456789), 1.234568);
        assert_eq!(round_to_6(-0.0000001), 0.0);
        assert!(round_to_6(f64::INFINITY).is_infinite());
        assert!(round_to_6(f64::NAN).is_nan());
        assert!(close(round_to_6(1e30), 1e30));
        assert_eq!(round_to_6(1e305), 1e305);
        assert_eq!(round_to_6(-1.5e308), -1.5e308);
        assert_eq!(round_to_6(123456789.1234567), 123456789.123457);
    }

    #[test]
    fn default_is_neg_log_complement() {
        assert_eq!(DEFAULT_TRANSFORM.key(), "neg-log-complement");
    }
}
