//! Derived nutrient ratio columns.

use crate::error::Result;
use crate::types::{AnalysisWarning, columns};
use crate::utils::{f64_values, has_column};
use polars::prelude::*;
use tracing::{info, warn};

const OPERATION: &str = "add_nutrient_ratios";

/// Ratio `numerator / denominator` that is always finite.
///
/// A zero or missing denominator (or a missing numerator) yields 0.
#[inline]
pub fn guarded_ratio(numerator: Option<f64>, denominator: Option<f64>) -> f64 {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => {
            let ratio = n / d;
            if ratio.is_finite() { ratio } else { 0.0 }
        }
        _ => 0.0,
    }
}

/// Add `Protein_to_Carbs_ratio` and `Carbs_to_Fat_ratio` columns.
///
/// Rows are never dropped. A ratio whose input column is absent is skipped
/// with a warning.
pub fn add_nutrient_ratios(
    df: DataFrame,
    warnings: &mut Vec<AnalysisWarning>,
) -> Result<DataFrame> {
    info!("Adding nutrient ratio columns");
    let mut df = df;

    let pairs = [
        (columns::PROTEIN_TO_CARBS_RATIO, columns::PROTEIN, columns::CARBS),
        (columns::CARBS_TO_FAT_RATIO, columns::CARBS, columns::FAT),
    ];

    for (ratio_name, numerator, denominator) in pairs {
        let missing: Vec<&str> = [numerator, denominator]
            .into_iter()
            .filter(|name| !has_column(&df, name))
            .collect();

        if !missing.is_empty() {
            for column in missing {
                warn!("Column '{}' not found; skipping '{}'", column, ratio_name);
                warnings.push(AnalysisWarning::new(
                    OPERATION,
                    column,
                    format!("Column '{}' not found; '{}' not added", column, ratio_name),
                ));
            }
            continue;
        }

        let numerators = f64_values(&df, numerator)?;
        let denominators = f64_values(&df, denominator)?;

        let ratios: Vec<f64> = numerators
            .into_iter()
            .zip(denominators)
            .map(|(n, d)| guarded_ratio(n, d))
            .collect();

        df.with_column(Series::new(ratio_name.into(), ratios))?;
    }

    Ok(df)
}
