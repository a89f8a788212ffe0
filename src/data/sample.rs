//! Synthetic sample generation from a known inverse-square curve.
//!
//! Used for demos (`invsq sample`) and for deterministic test data. Points are
//! drawn as:
//!
//! ```text
//! x ~ Uniform[x_min, x_max]
//! y = b/x² + a + σ·z,   z ~ N(0, 1)
//! ```

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde_json::{Value, json};

use crate::domain::SampleConfig;
use crate::error::{AppError, EXIT_RUNTIME, EXIT_USAGE};
use crate::models::InverseSquareModel;

/// Generate `config.count` rows `[x, y]`, sorted by `x`.
pub fn generate_rows(config: &SampleConfig) -> Result<Vec<[f64; 2]>, AppError> {
    if config.count == 0 {
        return Err(AppError::new(EXIT_USAGE, "Sample count must be > 0."));
    }
    if !(config.x_min.is_finite()
        && config.x_max.is_finite()
        && config.x_min > 0.0
        && config.x_max > config.x_min)
    {
        return Err(AppError::new(EXIT_USAGE, "Invalid x range: need 0 < x_min < x_max."));
    }
    if !(config.a.is_finite() && config.b.is_finite()) {
        return Err(AppError::new(EXIT_USAGE, "Curve coefficients must be finite."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(EXIT_USAGE, "Noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Noise distribution error: {e}")))?;
    let curve = InverseSquareModel::new(config.a, config.b);

    let mut rows: Vec<[f64; 2]> = (0..config.count)
        .map(|_| {
            let x = rng.gen_range(config.x_min..=config.x_max);
            let y = curve.predict(x) + normal.sample(&mut rng);
            [x, y]
        })
        .collect();
    rows.sort_by(|l, r| l[0].partial_cmp(&r[0]).unwrap_or(std::cmp::Ordering::Equal));

    Ok(rows)
}

/// Wrap rows in the request body shape `{"rows": [...]}`.
pub fn rows_document(rows: &[[f64; 2]]) -> Value {
    json!({ "rows": rows })
}
