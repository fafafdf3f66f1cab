//! Data cleaning module for the recipe table.
//!
//! This module provides functionality for:
//! - Filling missing macronutrient values with the column mean
//! - Deriving nutrient ratio columns

mod imputation;
mod ratios;

pub use imputation::{MeanFill, MeanImputer};
pub use ratios::{add_nutrient_ratios, guarded_ratio};

use crate::error::Result;
use crate::types::{AnalysisWarning, MacroColumn};
use crate::utils::{has_column, is_numeric_dtype};
use polars::prelude::*;
use tracing::{debug, info, warn};

const OPERATION: &str = "clean_macronutrients";

/// Fill missing values in the Protein, Carbs and Fat columns with their means.
///
/// Each mean is taken over the values present before filling, so running
/// this again on its own output changes nothing. Absent columns are skipped
/// and reported as warnings.
///
/// # Errors
///
/// A macro column holding text that is not a number fails the call.
pub fn clean_macronutrients(
    df: DataFrame,
    warnings: &mut Vec<AnalysisWarning>,
) -> Result<DataFrame> {
    info!("Cleaning macronutrient columns (handling missing data)");
    let mut df = df;

    for column in MacroColumn::ALL {
        let name = column.column_name();

        if !has_column(&df, name) {
            warn!("Column '{}' not found in dataset", name);
            warnings.push(AnalysisWarning::missing_column(OPERATION, name));
            continue;
        }

        let dtype = df.column(name)?.dtype().clone();
        if !is_numeric_dtype(&dtype) {
            debug!("Casting '{}' from {:?} to Float64", name, dtype);
        }

        match MeanImputer::fill_column(&mut df, name)? {
            MeanFill::Filled { mean, filled } if filled > 0 => {
                debug!("Filled {} missing values in '{}' with mean {:.2}", filled, name, mean);
            }
            MeanFill::Filled { .. } => {}
            MeanFill::NoValues => {
                warn!("Column '{}' has no values; mean is undefined", name);
                warnings.push(AnalysisWarning::new(
                    OPERATION,
                    name,
                    format!("Column '{}' has no values to compute a mean from", name),
                ));
            }
        }
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::columns;
    use crate::utils::f64_values;

    fn macros_with_gaps() -> DataFrame {
        df![
            "Diet_type" => ["vegan", "keto", "vegan", "paleo"],
            "Protein(g)" => [Some(10.0), None, Some(20.0), None],
            "Carbs(g)" => [Some(4.0), Some(8.0), None, Some(6.0)],
            "Fat(g)" => [Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        ]
        .unwrap()
    }

    #[test]
    fn test_clean_fills_with_pre_cleaning_mean() {
        let mut warnings = Vec::new();
        let df = clean_macronutrients(macros_with_gaps(), &mut warnings).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(
            f64_values(&df, columns::PROTEIN).unwrap(),
            vec![Some(10.0), Some(15.0), Some(20.0), Some(15.0)]
        );
        assert_eq!(
            f64_values(&df, columns::CARBS).unwrap(),
            vec![Some(4.0), Some(8.0), Some(6.0), Some(6.0)]
        );
        for column in MacroColumn::ALL {
            assert_eq!(df.column(column.column_name()).unwrap().null_count(), 0);
        }
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut warnings = Vec::new();
        let once = clean_macronutrients(macros_with_gaps(), &mut warnings).unwrap();
        let twice = clean_macronutrients(once.clone(), &mut warnings).unwrap();

        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_clean_missing_column_warns() {
        let df = df![
            "Diet_type" => ["vegan"],
            "Protein(g)" => [Some(1.0)],
        ]
        .unwrap();
        let mut warnings = Vec::new();

        let df = clean_macronutrients(df, &mut warnings).unwrap();

        assert_eq!(df.width(), 2);
        let missing: Vec<&str> = warnings.iter().map(|w| w.column.as_str()).collect();
        assert_eq!(missing, vec!["Carbs(g)", "Fat(g)"]);
    }

    #[test]
    fn test_clean_leaves_other_columns_untouched() {
        let mut warnings = Vec::new();
        let df = clean_macronutrients(macros_with_gaps(), &mut warnings).unwrap();

        let diets = crate::utils::string_values(&df, columns::DIET_TYPE).unwrap();
        assert_eq!(diets[1].as_deref(), Some("keto"));
        assert_eq!(df.height(), 4);
    }

    #[test]
    fn test_clean_all_missing_column_warns_and_keeps_nulls() {
        let df = df![
            "Protein(g)" => [Option::<f64>::None, None],
            "Carbs(g)" => [1.0, 2.0],
            "Fat(g)" => [1.0, 2.0],
        ]
        .unwrap();
        let mut warnings = Vec::new();

        let df = clean_macronutrients(df, &mut warnings).unwrap();

        assert_eq!(df.column(columns::PROTEIN).unwrap().null_count(), 2);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].column, "Protein(g)");
    }
}
