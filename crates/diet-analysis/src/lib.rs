//! Recipe Nutrition Analysis Library
//!
//! Turns a flat table of recipes into aggregate nutritional statistics,
//! built on Polars.
//!
//! # Overview
//!
//! - **Loading**: Read the comma-delimited recipe dataset
//! - **Cleaning**: Fill missing Protein, Carbs and Fat values with column means
//! - **Ratios**: Derive Protein-to-Carbs and Carbs-to-Fat ratios without ever
//!   producing infinities
//! - **Aggregation**: Per-diet averages, top protein recipes, most common
//!   cuisine, highest-protein diet, diet filtering and distribution summaries
//! - **Progress Reporting**: Staged updates for long runs
//!
//! Missing columns never fail a run. Each affected operation falls back to an
//! empty result (or `None`, or `"Unknown"`) and records an
//! [`AnalysisWarning`]. Only an unreadable dataset is an error.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use diet_analysis::run_full_analysis;
//!
//! let result = run_full_analysis("res/All_Diets.csv")?;
//! println!("Highest protein diet: {:?}", result.highest_protein_diet);
//! for avg in &result.average_macros {
//!     println!("{}: {:?} g protein", avg.diet_type, avg.protein);
//! }
//! ```
//!
//! # Individual Queries
//!
//! ```rust,ignore
//! use diet_analysis::{aggregators, cleaner, load_dataset};
//!
//! let mut warnings = Vec::new();
//! let df = load_dataset("res/All_Diets.csv")?;
//! let df = cleaner::clean_macronutrients(df, &mut warnings)?;
//!
//! let keto = aggregators::filter_by_diet(&df, "Keto", &mut warnings)?;
//! let stats = aggregators::macronutrient_distribution(&keto, &mut warnings)?;
//! ```

pub mod aggregators;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregators::{
    average_macros, common_cuisines, filter_by_diet, highest_protein_diet,
    macronutrient_distribution, scatter_points, top_protein_recipes,
};
pub use cleaner::{add_nutrient_ratios, clean_macronutrients};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, ResultExt};
pub use loader::{DatasetLoader, load_dataset};
pub use pipeline::{
    AnalysisStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate, run_full_analysis,
};
pub use types::{
    AnalysisResult, AnalysisWarning, CuisineMode, DietMacroAverages, MacroColumn,
    MacroDistribution, QueryOutput, ScatterPoint, TopProteinRecipe,
};
