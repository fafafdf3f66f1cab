//! Most common cuisine per diet type.

use crate::error::Result;
use crate::types::{AnalysisWarning, CuisineMode, UNKNOWN_CUISINE, columns};
use crate::utils::{group_rows, has_column, string_mode, string_values};
use polars::prelude::*;
use tracing::{info, warn};

const OPERATION: &str = "common_cuisines";

/// The modal `Cuisine_type` of every diet type.
///
/// Ties go to the cuisine seen first within the group. A group without any
/// cuisine values reports `"Unknown"`. A missing `Cuisine_type` (or
/// `Diet_type`) column gives an empty result and a warning.
pub fn common_cuisines(
    df: &DataFrame,
    warnings: &mut Vec<AnalysisWarning>,
) -> Result<Vec<CuisineMode>> {
    info!("Identifying most common cuisine per diet type");

    for required in [columns::CUISINE_TYPE, columns::DIET_TYPE] {
        if !has_column(df, required) {
            warn!("Column '{}' missing; returning empty result", required);
            warnings.push(AnalysisWarning::missing_column(OPERATION, required));
            return Ok(Vec::new());
        }
    }

    let diets = string_values(df, columns::DIET_TYPE)?;
    let cuisines = string_values(df, columns::CUISINE_TYPE)?;

    let modes = group_rows(&diets)
        .into_iter()
        .map(|(diet_type, rows)| {
            let values = rows.iter().filter_map(|&row| cuisines[row].as_deref());
            CuisineMode {
                diet_type,
                cuisine_type: string_mode(values).unwrap_or_else(|| UNKNOWN_CUISINE.to_string()),
            }
        })
        .collect();

    Ok(modes)
}
