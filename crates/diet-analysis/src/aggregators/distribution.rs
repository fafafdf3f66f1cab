//! Descriptive statistics for macronutrient columns.

use crate::error::Result;
use crate::types::{AnalysisWarning, MacroColumn, MacroDistribution};
use crate::utils::{f64_values, has_column, percentile, sample_std};
use polars::prelude::*;
use tracing::{info, warn};

const OPERATION: &str = "macronutrient_distribution";

/// Count, mean, standard deviation, min, quartiles and max per macro column.
///
/// Absent columns are left out and reported as warnings. Percentiles use
/// linear interpolation; the standard deviation is the sample one.
pub fn macronutrient_distribution(
    df: &DataFrame,
    warnings: &mut Vec<AnalysisWarning>,
) -> Result<Vec<MacroDistribution>> {
    info!("Calculating macronutrient distribution statistics");

    let mut stats = Vec::with_capacity(MacroColumn::ALL.len());
    for column in MacroColumn::ALL {
        if !has_column(df, column.column_name()) {
            warn!("Column '{}' not found; excluded from distribution", column);
            warnings.push(AnalysisWarning::missing_column(OPERATION, column.column_name()));
            continue;
        }

        let values: Vec<f64> = f64_values(df, column.column_name())?
            .into_iter()
            .flatten()
            .collect();
        stats.push(describe(column, values));
    }

    if stats.is_empty() {
        warn!("No macronutrient columns present; distribution is empty");
    }

    Ok(stats)
}

fn describe(column: MacroColumn, mut values: Vec<f64>) -> MacroDistribution {
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);

    MacroDistribution {
        column,
        count,
        mean,
        std: sample_std(&values),
        min: values.first().copied(),
        p25: percentile(&values, 0.25),
        p50: percentile(&values, 0.50),
        p75: percentile(&values, 0.75),
        max: values.last().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_matches_describe() {
        let df = df![
            "Protein(g)" => [1.0, 2.0, 3.0, 4.0],
            "Carbs(g)" => [Some(10.0), None, Some(30.0), Some(20.0)],
            "Fat(g)" => [5.0, 5.0, 5.0, 5.0],
        ]
        .unwrap();
        let mut warnings = Vec::new();

        let stats = macronutrient_distribution(&df, &mut warnings).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(stats.len(), 3);

        let protein = &stats[0];
        assert_eq!(protein.column, MacroColumn::Protein);
        assert_eq!(protein.count, 4);
        assert_eq!(protein.mean, Some(2.5));
        assert_eq!(protein.min, Some(1.0));
        assert_eq!(protein.p25, Some(1.75));
        assert_eq!(protein.p50, Some(2.5));
        assert_eq!(protein.p75, Some(3.25));
        assert_eq!(protein.max, Some(4.0));
        let std = protein.std.unwrap();
        assert!((std - 1.2909944487358056).abs() < 1e-12);

        let carbs = &stats[1];
        assert_eq!(carbs.count, 3);
        assert_eq!(carbs.p50, Some(20.0));

        assert_eq!(stats[2].std, Some(0.0));
    }

    #[test]
    fn test_distribution_skips_absent_columns() {
        let df = df!["Fat(g)" => [1.0, 3.0]].unwrap();
        let mut warnings = Vec::new();

        let stats = macronutrient_distribution(&df, &mut warnings).unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].column, MacroColumn::Fat);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_distribution_no_macro_columns() {
        let df = df!["Diet_type" => ["vegan"]].unwrap();
        let mut warnings = Vec::new();

        let stats = macronutrient_distribution(&df, &mut warnings).unwrap();

        assert!(stats.is_empty());
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_distribution_all_missing_values() {
        let df = df!["Protein(g)" => [Option::<f64>::None]].unwrap();
        let mut warnings = Vec::new();

        let stats = macronutrient_distribution(&df, &mut warnings).unwrap();

        assert_eq!(stats[0].count, 0);
        assert_eq!(stats[0].mean, None);
        assert_eq!(stats[0].max, None);
    }
}
