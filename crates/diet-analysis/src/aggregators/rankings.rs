//! Protein rankings per diet type.

use crate::error::Result;
use crate::types::{AnalysisWarning, TopProteinRecipe, columns};
use crate::utils::{f64_values, group_rows, has_column, string_values, take_rows};
use polars::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

const OPERATION: &str = "top_protein_recipes";

/// Descending order with missing values last.
fn protein_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Top `top_n` recipes by protein for every diet type.
///
/// Diet groups are concatenated in ascending order. Inside a group rows are
/// sorted by `Protein(g)` descending; the sort is stable so equal values
/// keep their original row order. Without a `Protein(g)` or `Diet_type`
/// column the result is an empty frame with the input schema.
pub fn top_protein_recipes(
    df: &DataFrame,
    top_n: usize,
    warnings: &mut Vec<AnalysisWarning>,
) -> Result<DataFrame> {
    info!("Identifying top {} protein-rich recipes per diet type", top_n);

    let mut complete = true;
    for required in [columns::PROTEIN, columns::DIET_TYPE] {
        if !has_column(df, required) {
            warn!("Column '{}' not found; no protein ranking", required);
            warnings.push(AnalysisWarning::missing_column(OPERATION, required));
            complete = false;
        }
    }
    if !complete {
        return Ok(df.head(Some(0)));
    }

    let proteins = f64_values(df, columns::PROTEIN)?;
    let diets = string_values(df, columns::DIET_TYPE)?;

    let mut selected = Vec::new();
    for (diet, mut rows) in group_rows(&diets) {
        rows.sort_by(|&a, &b| protein_desc(proteins[a], proteins[b]));
        rows.truncate(top_n);
        debug!("'{}': keeping {} recipes", diet, rows.len());
        selected.extend(rows);
    }

    take_rows(df, &selected)
}

/// Project a ranking onto `Diet_type`, `Recipe_name`, `Protein(g)` and
/// `Cuisine_type`.
///
/// Optional columns that are absent project to `None`.
pub fn project_top_recipes(ranked: &DataFrame) -> Result<Vec<TopProteinRecipe>> {
    if !has_column(ranked, columns::DIET_TYPE) {
        return Ok(Vec::new());
    }

    let height = ranked.height();
    let diets = string_values(ranked, columns::DIET_TYPE)?;
    let recipes = optional_strings(ranked, columns::RECIPE_NAME, height)?;
    let cuisines = optional_strings(ranked, columns::CUISINE_TYPE, height)?;
    let proteins = if has_column(ranked, columns::PROTEIN) {
        f64_values(ranked, columns::PROTEIN)?
    } else {
        vec![None; height]
    };

    let projected = diets
        .into_iter()
        .zip(recipes)
        .zip(proteins)
        .zip(cuisines)
        .filter_map(|(((diet, recipe_name), protein), cuisine_type)| {
            diet.map(|diet_type| TopProteinRecipe {
                diet_type,
                recipe_name,
                protein,
                cuisine_type,
            })
        })
        .collect();

    Ok(projected)
}

fn optional_strings(df: &DataFrame, name: &str, height: usize) -> Result<Vec<Option<String>>> {
    if has_column(df, name) {
        string_values(df, name)
    } else {
        Ok(vec![None; height])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipes() -> DataFrame {
        df![
            "Diet_type" => ["vegan", "keto", "vegan", "vegan", "keto", "vegan"],
            "Recipe_name" => ["a", "b", "c", "d", "e", "f"],
            "Protein(g)" => [Some(10.0), Some(50.0), Some(30.0), Some(10.0), None, Some(20.0)],
            "Cuisine_type" => ["thai", "american", "indian", "thai", "french", "mexican"],
        ]
        .unwrap()
    }

    fn names(df: &DataFrame) -> Vec<String> {
        string_values(df, columns::RECIPE_NAME)
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_top_n_per_group_sorted_desc() {
        let mut warnings = Vec::new();
        let top = top_protein_recipes(&recipes(), 2, &mut warnings).unwrap();

        // keto first (ascending groups), missing protein ranks last
        assert_eq!(names(&top), vec!["b", "e", "c", "f"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_ties_keep_original_order() {
        let mut warnings = Vec::new();
        let top = top_protein_recipes(&recipes(), 10, &mut warnings).unwrap();

        // vegan: 30 (c), 20 (f), 10 (a), 10 (d)
        assert_eq!(names(&top), vec!["b", "e", "c", "f", "a", "d"]);
    }

    #[test]
    fn test_group_never_exceeds_top_n() {
        let mut warnings = Vec::new();
        let top = top_protein_recipes(&recipes(), 1, &mut warnings).unwrap();

        let diets = string_values(&top, columns::DIET_TYPE).unwrap();
        let vegan = diets.iter().filter(|d| d.as_deref() == Some("vegan")).count();
        let keto = diets.iter().filter(|d| d.as_deref() == Some("keto")).count();
        assert_eq!((vegan, keto), (1, 1));
    }

    #[test]
    fn test_missing_protein_returns_empty_frame() {
        let df = df![
            "Diet_type" => ["vegan"],
            "Recipe_name" => ["a"],
        ]
        .unwrap();
        let mut warnings = Vec::new();

        let top = top_protein_recipes(&df, 5, &mut warnings).unwrap();

        assert_eq!(top.height(), 0);
        assert_eq!(top.width(), 2);
        assert_eq!(warnings[0].column, "Protein(g)");
    }

    #[test]
    fn test_project_top_recipes() {
        let mut warnings = Vec::new();
        let top = top_protein_recipes(&recipes(), 1, &mut warnings).unwrap();

        let projected = project_top_recipes(&top).unwrap();

        assert_eq!(
            projected[0],
            TopProteinRecipe {
                diet_type: "keto".to_string(),
                recipe_name: Some("b".to_string()),
                protein: Some(50.0),
                cuisine_type: Some("american".to_string()),
            }
        );
        assert_eq!(projected[1].recipe_name.as_deref(), Some("c"));
    }

    #[test]
    fn test_project_without_cuisine_column() {
        let df = df![
            "Diet_type" => ["vegan"],
            "Recipe_name" => ["a"],
            "Protein(g)" => [3.0],
        ]
        .unwrap();

        let projected = project_top_recipes(&df).unwrap();

        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].cuisine_type, None);
    }
}
