//! Progress reporting for the analysis pipeline.
//!
//! A full run announces four stages, always in this order and always with
//! the same messages:
//!
//! 1. `"Loading dataset..."`
//! 2. `"Calculating averages..."`
//! 3. `"Finding top protein recipes..."`
//! 4. `"Generating summary..."`
//!
//! followed by a single [`AnalysisStage::Complete`] or
//! [`AnalysisStage::Failed`] update. Front ends (a WebSocket channel, a
//! terminal spinner) subscribe by implementing [`ProgressReporter`].
//!
//! # Example
//!
//! ```rust,ignore
//! use diet_analysis::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of a full analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    /// Reading, cleaning and deriving ratios
    LoadingDataset,
    /// Per-diet macro averages
    CalculatingAverages,
    /// Per-diet protein rankings
    FindingTopProtein,
    /// Highest-protein diet, cuisines and the result bundle
    GeneratingSummary,
    /// Run finished successfully
    Complete,
    /// Run aborted with an error
    Failed,
}

impl AnalysisStage {
    /// The stages of a run in emission order, terminal states excluded.
    pub const SEQUENCE: [AnalysisStage; 4] = [
        AnalysisStage::LoadingDataset,
        AnalysisStage::CalculatingAverages,
        AnalysisStage::FindingTopProtein,
        AnalysisStage::GeneratingSummary,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LoadingDataset => "Loading Dataset",
            Self::CalculatingAverages => "Calculating Averages",
            Self::FindingTopProtein => "Finding Top Protein Recipes",
            Self::GeneratingSummary => "Generating Summary",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Status message emitted when the stage starts.
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::LoadingDataset => "Loading dataset...",
            Self::CalculatingAverages => "Calculating averages...",
            Self::FindingTopProtein => "Finding top protein recipes...",
            Self::GeneratingSummary => "Generating summary...",
            Self::Complete => "Analysis complete",
            Self::Failed => "Analysis failed",
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::LoadingDataset => 0.0,
            Self::CalculatingAverages => 0.4,
            Self::FindingTopProtein => 0.6,
            Self::GeneratingSummary => 0.8,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A progress event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: AnalysisStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// The update announcing the start of `stage`.
    pub fn started(stage: AnalysisStage) -> Self {
        Self {
            stage,
            progress: stage.base_progress().clamp(0.0, 1.0),
            message: stage.status_message().to_string(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete() -> Self {
        Self::started(AnalysisStage::Complete)
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: AnalysisStage::Failed,
            progress: 0.0,
            message: message.into(),
        }
    }

    /// Whether no further updates follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self.stage, AnalysisStage::Complete | AnalysisStage::Failed)
    }
}

/// Trait for receiving progress updates during a run.
///
/// Implementations must be `Send + Sync` so a pipeline running on a worker
/// thread can report to a listener owned elsewhere.
///
/// # Example
///
/// ```rust,ignore
/// use diet_analysis::{ProgressReporter, ProgressUpdate};
/// use std::sync::mpsc::Sender;
/// use std::sync::Mutex;
///
/// struct ChannelReporter(Mutex<Sender<ProgressUpdate>>);
///
/// impl ProgressReporter for ChannelReporter {
///     fn report(&self, update: ProgressUpdate) {
///         self.0.lock().unwrap().send(update).ok();
///     }
/// }
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Called at each stage boundary. Implementations should not block.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_stage_messages_match_contract() {
        let messages: Vec<&str> = AnalysisStage::SEQUENCE
            .iter()
            .map(|s| s.status_message())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Loading dataset...",
                "Calculating averages...",
                "Finding top protein recipes...",
                "Generating summary...",
            ]
        );
    }

    #[test]
    fn test_base_progress_increases_through_sequence() {
        let progress: Vec<f32> = AnalysisStage::SEQUENCE
            .iter()
            .map(|s| s.base_progress())
            .collect();
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
        assert!(progress.iter().all(|p| *p < AnalysisStage::Complete.base_progress()));
    }

    #[test]
    fn test_progress_update_started() {
        let update = ProgressUpdate::started(AnalysisStage::FindingTopProtein);
        assert_eq!(update.stage, AnalysisStage::FindingTopProtein);
        assert_eq!(update.progress, 0.6);
        assert_eq!(update.message, "Finding top protein recipes...");
        assert!(!update.is_terminal());
    }

    #[test]
    fn test_progress_update_terminal_states() {
        let complete = ProgressUpdate::complete();
        assert_eq!(complete.progress, 1.0);
        assert!(complete.is_terminal());

        let failed = ProgressUpdate::failed("Dataset not found: x.csv");
        assert_eq!(failed.stage, AnalysisStage::Failed);
        assert_eq!(failed.message, "Dataset not found: x.csv");
        assert!(failed.is_terminal());
    }

    #[test]
    fn test_closure_progress_reporter() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        reporter.report(ProgressUpdate::started(AnalysisStage::LoadingDataset));
        reporter.report(ProgressUpdate::complete());

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_progress_update_json_serialization() {
        let update = ProgressUpdate::started(AnalysisStage::CalculatingAverages);
        let json = serde_json::to_string(&update).expect("Should serialize");

        assert!(json.contains("\"stage\":\"calculating_averages\""));
        assert!(json.contains("\"message\":\"Calculating averages...\""));
    }

    #[test]
    fn test_progress_reporter_across_threads() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = Arc::new(ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let reporter_clone = reporter.clone();
        let handle = std::thread::spawn(move || {
            reporter_clone.report(ProgressUpdate::started(AnalysisStage::GeneratingSummary));
        });

        handle.join().expect("Thread should not panic");
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
