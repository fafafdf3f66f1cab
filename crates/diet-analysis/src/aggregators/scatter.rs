//! Protein-versus-carbs scatter data.

use crate::error::Result;
use crate::types::{AnalysisWarning, ScatterPoint, columns};
use crate::utils::{f64_values, has_column, string_values};
use polars::prelude::*;
use tracing::{debug, info, warn};

const OPERATION: &str = "scatter_points";

/// One point per recipe with diet, protein, carbs and cuisine all present.
///
/// Rows missing any of the four values are dropped. If one of the columns
/// is absent the result is empty.
pub fn scatter_points(
    df: &DataFrame,
    warnings: &mut Vec<AnalysisWarning>,
) -> Result<Vec<ScatterPoint>> {
    info!("Collecting protein and carbs scatter data");

    let required = [
        columns::DIET_TYPE,
        columns::PROTEIN,
        columns::CARBS,
        columns::CUISINE_TYPE,
    ];
    let missing: Vec<&str> = required
        .into_iter()
        .filter(|name| !has_column(df, name))
        .collect();
    if !missing.is_empty() {
        for column in missing {
            warn!("Column '{}' not found; no scatter data", column);
            warnings.push(AnalysisWarning::missing_column(OPERATION, column));
        }
        return Ok(Vec::new());
    }

    let diets = string_values(df, columns::DIET_TYPE)?;
    let proteins = f64_values(df, columns::PROTEIN)?;
    let carbs = f64_values(df, columns::CARBS)?;
    let cuisines = string_values(df, columns::CUISINE_TYPE)?;

    let points: Vec<ScatterPoint> = diets
        .into_iter()
        .zip(proteins)
        .zip(carbs)
        .zip(cuisines)
        .filter_map(|(((diet, protein), carbs), cuisine)| {
            Some(ScatterPoint {
                diet_type: diet?,
                protein: protein?,
                carbs: carbs?,
                cuisine_type: cuisine?,
            })
        })
        .collect();

    debug!("{} of {} rows are complete", points.len(), df.height());
    Ok(points)
}
