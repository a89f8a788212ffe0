//! Plain-text reports for the CLI.

use crate::fit::{Monotonicity, Transform};
use crate::io::IngestedRows;

/// Table of transform keys, clamp domains and saturation values.
pub fn format_transform_table() -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<26} {:<24} {:<18} {:<10} {}\n",
        "key", "formula", "domain", "saturates", "direction"
    ));
    for t in Transform::ALL {
        let spec = t.clamp_spec();
        let domain = if spec.ceiling.is_finite() {
            format!("[{}, {}]", spec.floor, spec.ceiling)
        } else {
            format!(">= {}", spec.floor)
        };
        let saturation = spec
            .saturation
            .map(|v| format!("{v:e}"))
            .unwrap_or_else(|| "-".to_string());
        let direction = match t.monotonicity() {
            Monotonicity::NonDecreasing => "up",
            Monotonicity::NonIncreasing => "down",
            Monotonicity::NonMonotone => "none",
        };
        out.push_str(&format!(
            "{:<26} {:<24} {:<18} {:<10} {}\n",
            t.key(),
            t.formula(),
            domain,
            saturation,
            direction
        ));
    }
    out
}

/// One-line summary of an ingest (rows read / used / skipped).
pub fn format_ingest_summary(ingested: &IngestedRows) -> String {
    format!(
        "rows read: {}, used: {}, skipped: {}",
        ingested.rows_read,
        ingested.rows_used(),
        ingested.row_errors.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn table_lists_every_transform() {
        let table = format_transform_table();
        assert_eq!(table.lines().count(), 16);
        for t in Transform::ALL {
            assert!(table.contains(t.key()), "missing {t}");
        }
        assert!(table.contains("[0, 0.9999]"));
        assert!(table.contains(">= -10"));
        assert!(table.contains("1e10"));
    }

    #[test]
    fn ingest_summary_counts() {
        let ingested = crate::io::parse_rows(&json!([[1, 2], ["x", 1], [2, 3]])).unwrap();
        assert_eq!(format_ingest_summary(&ingested), "rows read: 3, used: 2, skipped: 1");
    }
}
