use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names of the recipe dataset, exactly as stored in the CSV header.
pub mod columns {
    pub const DIET_TYPE: &str = "Diet_type";
    pub const RECIPE_NAME: &str = "Recipe_name";
    pub const CUISINE_TYPE: &str = "Cuisine_type";
    pub const PROTEIN: &str = "Protein(g)";
    pub const CARBS: &str = "Carbs(g)";
    pub const FAT: &str = "Fat(g)";
    pub const PROTEIN_TO_CARBS_RATIO: &str = "Protein_to_Carbs_ratio";
    pub const CARBS_TO_FAT_RATIO: &str = "Carbs_to_Fat_ratio";
}

/// Placeholder cuisine for a diet group that has no cuisine values.
pub const UNKNOWN_CUISINE: &str = "Unknown";

/// The three macronutrient columns, in dataset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroColumn {
    #[serde(rename = "Protein(g)")]
    Protein,
    #[serde(rename = "Carbs(g)")]
    Carbs,
    #[serde(rename = "Fat(g)")]
    Fat,
}

impl MacroColumn {
    pub const ALL: [MacroColumn; 3] = [MacroColumn::Protein, MacroColumn::Carbs, MacroColumn::Fat];

    /// Column name in the dataset.
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Protein => columns::PROTEIN,
            Self::Carbs => columns::CARBS,
            Self::Fat => columns::FAT,
        }
    }
}

impl fmt::Display for MacroColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// A non-fatal condition met while analyzing, usually a missing column.
///
/// Warnings are collected alongside results; they never abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWarning {
    /// Operation that degraded (e.g. "common_cuisines").
    pub operation: String,
    /// Column that caused the fallback.
    pub column: String,
    pub message: String,
}

impl AnalysisWarning {
    pub fn new(
        operation: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    /// Warning for a column that is absent from the table.
    pub fn missing_column(operation: impl Into<String>, column: impl Into<String>) -> Self {
        let column = column.into();
        let message = format!("Column '{}' not found in dataset", column);
        Self::new(operation, column, message)
    }
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.operation, self.message)
    }
}

/// Average macronutrients of one diet type.
///
/// A macro whose column is absent from the dataset is `None` and left out
/// of the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietMacroAverages {
    #[serde(rename = "Diet_type")]
    pub diet_type: String,
    #[serde(rename = "Protein(g)", skip_serializing_if = "Option::is_none", default)]
    pub protein: Option<f64>,
    #[serde(rename = "Carbs(g)", skip_serializing_if = "Option::is_none", default)]
    pub carbs: Option<f64>,
    #[serde(rename = "Fat(g)", skip_serializing_if = "Option::is_none", default)]
    pub fat: Option<f64>,
}

impl DietMacroAverages {
    pub fn new(diet_type: impl Into<String>) -> Self {
        Self {
            diet_type: diet_type.into(),
            protein: None,
            carbs: None,
            fat: None,
        }
    }

    pub fn get(&self, column: MacroColumn) -> Option<f64> {
        match column {
            MacroColumn::Protein => self.protein,
            MacroColumn::Carbs => self.carbs,
            MacroColumn::Fat => self.fat,
        }
    }

    pub fn set(&mut self, column: MacroColumn, value: Option<f64>) {
        match column {
            MacroColumn::Protein => self.protein = value,
            MacroColumn::Carbs => self.carbs = value,
            MacroColumn::Fat => self.fat = value,
        }
    }
}

/// One row of the top-protein projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProteinRecipe {
    #[serde(rename = "Diet_type")]
    pub diet_type: String,
    #[serde(rename = "Recipe_name")]
    pub recipe_name: Option<String>,
    #[serde(rename = "Protein(g)")]
    pub protein: Option<f64>,
    #[serde(rename = "Cuisine_type")]
    pub cuisine_type: Option<String>,
}

/// Most common cuisine of one diet type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuisineMode {
    #[serde(rename = "Diet_type")]
    pub diet_type: String,
    #[serde(rename = "Cuisine_type")]
    pub cuisine_type: String,
}

/// Descriptive statistics of one macronutrient column.
///
/// Statistics that are undefined for the available values (e.g. standard
/// deviation of a single value) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroDistribution {
    pub column: MacroColumn,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Point for a protein-versus-carbs scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    #[serde(rename = "Diet_type")]
    pub diet_type: String,
    #[serde(rename = "Protein(g)")]
    pub protein: f64,
    #[serde(rename = "Carbs(g)")]
    pub carbs: f64,
    #[serde(rename = "Cuisine_type")]
    pub cuisine_type: String,
}

/// Bundle produced by a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub average_macros: Vec<DietMacroAverages>,
    pub top_protein_recipes: Vec<TopProteinRecipe>,
    pub highest_protein_diet: Option<String>,
    pub common_cuisines: Vec<CuisineMode>,
    /// Degraded conditions met during the run.
    #[serde(default)]
    pub warnings: Vec<AnalysisWarning>,
    /// Local time the bundle was assembled ("%Y-%m-%d %H:%M:%S").
    pub generated_at: String,
}

/// Result of a single query together with the warnings raised while
/// producing it.
///
/// Serializes as `{ "data": ..., "warnings": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutput<T> {
    pub data: T,
    pub warnings: Vec<AnalysisWarning>,
}

impl<T> QueryOutput<T> {
    pub fn new(data: T, warnings: Vec<AnalysisWarning>) -> Self {
        Self { data, warnings }
    }
}
