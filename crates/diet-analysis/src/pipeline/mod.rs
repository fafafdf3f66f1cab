//! Pipeline module.
//!
//! This module provides the full analysis pipeline and its progress events.

mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder, run_full_analysis};
pub use progress::{AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
