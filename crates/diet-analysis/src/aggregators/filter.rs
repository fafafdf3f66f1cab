//! Diet type filtering.

use crate::error::Result;
use crate::types::{AnalysisWarning, columns};
use crate::utils::{has_column, string_values, take_rows};
use polars::prelude::*;
use tracing::{debug, info, warn};

const OPERATION: &str = "filter_by_diet";

/// Value that selects every diet.
pub const ALL_DIETS: &str = "all";

/// Rows whose `Diet_type` equals `diet_type`, ignoring case.
///
/// `"all"` in any casing returns the whole table. A missing `Diet_type`
/// column gives an empty frame and a warning.
pub fn filter_by_diet(
    df: &DataFrame,
    diet_type: &str,
    warnings: &mut Vec<AnalysisWarning>,
) -> Result<DataFrame> {
    info!("Filtering data for diet type: {}", diet_type);

    let wanted = diet_type.to_lowercase();
    if wanted == ALL_DIETS {
        return Ok(df.clone());
    }

    if !has_column(df, columns::DIET_TYPE) {
        warn!("Column '{}' not found; nothing to filter", columns::DIET_TYPE);
        warnings.push(AnalysisWarning::missing_column(OPERATION, columns::DIET_TYPE));
        return Ok(df.head(Some(0)));
    }

    let rows: Vec<usize> = string_values(df, columns::DIET_TYPE)?
        .iter()
        .enumerate()
        .filter(|(_, diet)| diet.as_deref().is_some_and(|d| d.to_lowercase() == wanted))
        .map(|(row, _)| row)
        .collect();

    debug!("{} of {} rows match '{}'", rows.len(), df.height(), diet_type);
    take_rows(df, &rows)
}
