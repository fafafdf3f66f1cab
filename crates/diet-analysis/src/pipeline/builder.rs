//! Full analysis pipeline.
//!
//! This module provides the `Pipeline` struct and builder that chain
//! loading, cleaning, ratio derivation and the aggregators into one run.

use crate::aggregators::{
    average_macros, common_cuisines, highest_protein_diet, project_top_recipes,
    top_protein_recipes,
};
use crate::cleaner::{add_nutrient_ratios, clean_macronutrients};
use crate::config::{AnalysisConfig, ConfigValidationError};
use crate::error::Result;
use crate::loader::DatasetLoader;
use crate::pipeline::progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::types::{AnalysisResult, AnalysisWarning};
use chrono::Local;
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// The recipe analysis pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
/// A pipeline holds no table between runs; every run loads its own.
///
/// # Example
///
/// ```rust,ignore
/// use diet_analysis::{AnalysisConfig, Pipeline};
///
/// let result = Pipeline::builder()
///     .config(AnalysisConfig::builder().dataset_path("res/All_Diets.csv").build()?)
///     .on_progress(|update| println!("{}", update.message))
///     .build()?
///     .run()?;
///
/// println!("Highest protein diet: {:?}", result.highest_protein_diet);
/// ```
pub struct Pipeline {
    config: AnalysisConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    loader: DatasetLoader,
}

// Independent runs may execute on separate threads.
static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full analysis on the configured dataset.
    pub fn run(&self) -> Result<AnalysisResult> {
        self.run_path(&self.config.dataset_path)
    }

    /// Run the full analysis on the dataset at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DatasetNotFound`](crate::error::AnalysisError::DatasetNotFound)
    /// when the file cannot be read. Missing columns are never errors; they
    /// show up in [`AnalysisResult::warnings`].
    pub fn run_path(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let path = path.as_ref();
        self.track(move || {
            self.report_progress(ProgressUpdate::started(AnalysisStage::LoadingDataset));
            let df = self.loader.load(path)?;
            self.analyze_loaded(df)
        })
    }

    /// Run the full analysis on a table that is already in memory.
    pub fn analyze(&self, df: DataFrame) -> Result<AnalysisResult> {
        self.track(move || {
            self.report_progress(ProgressUpdate::started(AnalysisStage::LoadingDataset));
            self.analyze_loaded(df)
        })
    }

    /// Load the configured dataset and fill missing macros.
    ///
    /// This is the table every single-query front end starts from. No ratio
    /// columns are added; use [`prepare`](Self::prepare) for those.
    pub fn load_cleaned(&self) -> Result<(DataFrame, Vec<AnalysisWarning>)> {
        let mut warnings = Vec::new();
        let df = self.loader.load(&self.config.dataset_path)?;
        let df = clean_macronutrients(df, &mut warnings)?;
        Ok((df, warnings))
    }

    /// Clean a raw table and derive its ratio columns.
    pub fn prepare(df: DataFrame, warnings: &mut Vec<AnalysisWarning>) -> Result<DataFrame> {
        let df = clean_macronutrients(df, warnings)?;
        add_nutrient_ratios(df, warnings)
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    /// Emit the terminal update for a run.
    fn track<F>(&self, run: F) -> Result<AnalysisResult>
    where
        F: FnOnce() -> Result<AnalysisResult>,
    {
        info!("Starting full analysis pipeline");
        let start_time = Instant::now();

        match run() {
            Ok(result) => {
                info!(
                    "Analysis pipeline completed successfully in {}ms",
                    start_time.elapsed().as_millis()
                );
                self.report_progress(ProgressUpdate::complete());
                Ok(result)
            }
            Err(e) => {
                error!("Pipeline error: {}", e);
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn analyze_loaded(&self, df: DataFrame) -> Result<AnalysisResult> {
        let mut warnings = Vec::new();

        debug!("Input shape: {:?}", df.shape());
        let df = Self::prepare(df, &mut warnings)?;

        self.report_progress(ProgressUpdate::started(AnalysisStage::CalculatingAverages));
        let averages = average_macros(&df, &mut warnings)?;

        self.report_progress(ProgressUpdate::started(AnalysisStage::FindingTopProtein));
        let ranked = top_protein_recipes(&df, self.config.top_n, &mut warnings)?;
        let top_protein_recipes = project_top_recipes(&ranked)?;

        self.report_progress(ProgressUpdate::started(AnalysisStage::GeneratingSummary));
        let highest = highest_protein_diet(&averages);
        let cuisines = common_cuisines(&df, &mut warnings)?;

        if !warnings.is_empty() {
            warn!("Analysis finished with {} warnings", warnings.len());
        }

        Ok(AnalysisResult {
            average_macros: averages,
            top_protein_recipes,
            highest_protein_diet: highest,
            common_cuisines: cuisines,
            warnings,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }
}

/// Run the full analysis on `path` with the default configuration.
pub fn run_full_analysis(path: impl AsRef<Path>) -> Result<AnalysisResult> {
    Pipeline::builder().build()?.run_path(path)
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<AnalysisConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving stage updates.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// Convenience over [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let loader = DatasetLoader::new(config.infer_schema_length);

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            loader,
        })
    }
}
