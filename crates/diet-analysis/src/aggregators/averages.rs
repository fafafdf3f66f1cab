//! Per-diet macronutrient averages.

use crate::error::Result;
use crate::types::{AnalysisWarning, DietMacroAverages, MacroColumn, columns};
use crate::utils::{f64_values, group_rows, has_column, string_values};
use polars::prelude::*;
use tracing::{debug, info, warn};

const OPERATION: &str = "average_macros";

/// Average Protein, Carbs and Fat per diet type.
///
/// Diets come out in ascending order. A macro column missing from the
/// table is left out of every group (reported once as a warning); a missing
/// `Diet_type` column yields no groups.
pub fn average_macros(
    df: &DataFrame,
    warnings: &mut Vec<AnalysisWarning>,
) -> Result<Vec<DietMacroAverages>> {
    info!("Calculating average macronutrient content per diet type");

    if !has_column(df, columns::DIET_TYPE) {
        warn!("Column '{}' not found; no diet groups to average", columns::DIET_TYPE);
        warnings.push(AnalysisWarning::missing_column(OPERATION, columns::DIET_TYPE));
        return Ok(Vec::new());
    }

    let mut present = Vec::with_capacity(MacroColumn::ALL.len());
    for column in MacroColumn::ALL {
        if has_column(df, column.column_name()) {
            present.push((column, f64_values(df, column.column_name())?));
        } else {
            warn!("Column '{}' not found; omitted from averages", column);
            warnings.push(AnalysisWarning::missing_column(OPERATION, column.column_name()));
        }
    }

    let diets = string_values(df, columns::DIET_TYPE)?;
    let groups = group_rows(&diets);
    debug!("Averaging {} diet groups", groups.len());

    let averages = groups
        .into_iter()
        .map(|(diet, rows)| {
            let mut averages = DietMacroAverages::new(diet);
            for (column, values) in &present {
                let group_values: Vec<Option<f64>> = rows.iter().map(|&row| values[row]).collect();
                let group = Series::new(column.column_name().into(), group_values);
                averages.set(*column, group.mean());
            }
            averages
        })
        .collect();

    Ok(averages)
}

/// Diet type with the highest average protein.
///
/// Ties go to the diet listed first. Returns `None` when no diet has an
/// averaged protein value.
pub fn highest_protein_diet(averages: &[DietMacroAverages]) -> Option<String> {
    info!("Finding diet with highest average protein content");

    let mut best: Option<(&str, f64)> = None;
    for entry in averages {
        let Some(protein) = entry.protein else {
            continue;
        };
        if best.is_none_or(|(_, top)| protein > top) {
            best = Some((entry.diet_type.as_str(), protein));
        }
    }

    if best.is_none() {
        warn!("No averaged protein values available");
    }
    best.map(|(diet, _)| diet.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DataFrame {
        df![
            "Diet_type" => ["vegan", "keto", "vegan"],
            "Protein(g)" => [10.0, 30.0, 20.0],
            "Carbs(g)" => [20.0, 5.0, 10.0],
            "Fat(g)" => [5.0, 40.0, 8.0],
        ]
        .unwrap()
    }

    #[test]
    fn test_average_macros_per_diet() {
        let mut warnings = Vec::new();
        let averages = average_macros(&sample(), &mut warnings).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(
            averages,
            vec![
                DietMacroAverages {
                    diet_type: "keto".to_string(),
                    protein: Some(30.0),
                    carbs: Some(5.0),
                    fat: Some(40.0),
                },
                DietMacroAverages {
                    diet_type: "vegan".to_string(),
                    protein: Some(15.0),
                    carbs: Some(15.0),
                    fat: Some(6.5),
                },
            ]
        );
    }

    #[test]
    fn test_highest_protein_diet() {
        let mut warnings = Vec::new();
        let averages = average_macros(&sample(), &mut warnings).unwrap();
        assert_eq!(highest_protein_diet(&averages).as_deref(), Some("keto"));
    }

    #[test]
    fn test_highest_protein_tie_goes_to_first() {
        let mut a = DietMacroAverages::new("dash");
        a.protein = Some(12.0);
        let mut b = DietMacroAverages::new("keto");
        b.protein = Some(12.0);
        assert_eq!(highest_protein_diet(&[a, b]).as_deref(), Some("dash"));
    }

    #[test]
    fn test_highest_protein_without_protein_is_none() {
        let averages = vec![DietMacroAverages::new("vegan")];
        assert_eq!(highest_protein_diet(&averages), None);
        assert_eq!(highest_protein_diet(&[]), None);
    }

    #[test]
    fn test_average_macros_missing_macro_column() {
        let df = df![
            "Diet_type" => ["vegan", "keto"],
            "Protein(g)" => [10.0, 30.0],
            "Carbs(g)" => [1.0, 2.0],
        ]
        .unwrap();
        let mut warnings = Vec::new();

        let averages = average_macros(&df, &mut warnings).unwrap();

        assert_eq!(averages.len(), 2);
        assert!(averages.iter().all(|a| a.fat.is_none() && a.protein.is_some()));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].column, "Fat(g)");
    }

    #[test]
    fn test_average_macros_missing_diet_column() {
        let df = df!["Protein(g)" => [10.0]].unwrap();
        let mut warnings = Vec::new();

        let averages = average_macros(&df, &mut warnings).unwrap();

        assert!(averages.is_empty());
        assert_eq!(warnings[0].column, "Diet_type");
    }

    #[test]
    fn test_average_macros_skips_null_diets() {
        let df = df![
            "Diet_type" => [Some("vegan"), None],
            "Protein(g)" => [10.0, 99.0],
            "Carbs(g)" => [1.0, 1.0],
            "Fat(g)" => [1.0, 1.0],
        ]
        .unwrap();
        let mut warnings = Vec::new();

        let averages = average_macros(&df, &mut warnings).unwrap();

        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].protein, Some(10.0));
    }
}
