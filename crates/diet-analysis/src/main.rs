//! CLI entry point for the recipe analysis pipeline.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use diet_analysis::aggregators::{
    average_macros, common_cuisines, filter_by_diet, macronutrient_distribution,
    project_top_recipes, scatter_points, top_protein_recipes,
};
use diet_analysis::config::{DEFAULT_DATASET_PATH, DEFAULT_TOP_N};
use diet_analysis::utils::{dataframe_to_records, to_json_pretty};
use diet_analysis::{
    AnalysisConfig, AnalysisResult, AnalysisWarning, CuisineMode, DietMacroAverages,
    MacroDistribution, Pipeline, QueryOutput, TopProteinRecipe,
};
use dotenv::dotenv;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author = "Diet Analysis Team",
    version,
    about = "Nutritional analysis of recipe datasets",
    long_about = "Computes per-diet macronutrient statistics from a recipe CSV.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  DIET_DATASET    Path to the dataset (a .env file is honoured)\n\n\
                  EXAMPLES:\n  \
                  # Full summary of the default dataset\n  \
                  diet-analysis\n\n  \
                  # Average macros per diet as JSON\n  \
                  diet-analysis --json averages\n\n  \
                  # Keto recipes only\n  \
                  diet-analysis -d data/All_Diets.csv filter keto"
)]
struct Args {
    /// Path to the recipe CSV file
    #[arg(short, long, env = "DIET_DATASET", default_value = DEFAULT_DATASET_PATH, global = true)]
    dataset: PathBuf,

    /// Recipes kept per diet in protein rankings
    #[arg(long, default_value_t = DEFAULT_TOP_N, global = true)]
    top_n: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and results)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable tables
    ///
    /// Disables all logs so stdout carries only JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Full analysis: averages, top protein recipes, highest-protein diet and cuisines
    Summary {
        /// Write the full result as JSON into this directory
        ///
        /// The file is named <dataset_stem>_analysis.json
        #[arg(short = 'r', long)]
        emit_report: Option<PathBuf>,
    },
    /// Average Protein, Carbs and Fat per diet type
    #[command(visible_alias = "heatmap")]
    Averages,
    /// Highest-protein recipes per diet type
    TopProtein,
    /// Most common cuisine per diet type
    Cuisines,
    /// Recipes of one diet type ("all" keeps everything)
    Filter {
        /// Diet type, compared case-insensitively
        diet: String,
    },
    /// Count, mean, std, min, quartiles and max of each macronutrient
    Distribution,
    /// Protein vs carbs points with diet and cuisine
    Scatter,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // .env must be loaded before parsing so DIET_DATASET can come from it
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = AnalysisConfig::builder()
        .dataset_path(&args.dataset)
        .top_n(args.top_n)
        .build()?;

    let pipeline = build_pipeline(&args, config)?;

    let command = args
        .command
        .clone()
        .unwrap_or(Command::Summary { emit_report: None });

    let outcome = match command {
        Command::Summary { emit_report } => run_summary(&pipeline, &args, emit_report.as_deref()),
        query => run_query(&pipeline, &args, &query),
    };

    if let Err(ref e) = outcome {
        error!("Analysis failed: {:#}", e);
    }
    outcome
}

/// Build the pipeline, wiring progress updates into the log.
fn build_pipeline(args: &Args, config: AnalysisConfig) -> Result<Pipeline> {
    let mut builder = Pipeline::builder().config(config);

    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    Ok(builder.build()?)
}

/// Run the full analysis and print the result bundle.
fn run_summary(pipeline: &Pipeline, args: &Args, emit_report: Option<&Path>) -> Result<()> {
    let result = pipeline
        .run()
        .map_err(|e| anyhow!("Pipeline failed: {}", e))?;

    if let Some(dir) = emit_report {
        let report_path = write_report(&result, dir, &args.dataset)?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        return print_json(&result);
    }

    print_summary(&result);
    Ok(())
}

/// Run a single query against the cleaned table.
fn run_query(pipeline: &Pipeline, args: &Args, command: &Command) -> Result<()> {
    let (df, mut warnings) = pipeline.load_cleaned()?;
    let top_n = pipeline.config().top_n;

    match command {
        Command::Averages => {
            let averages = average_macros(&df, &mut warnings)?;
            emit(args, averages.as_slice(), &warnings, print_averages)
        }
        Command::TopProtein => {
            let ranked = top_protein_recipes(&df, top_n, &mut warnings)?;
            let recipes = project_top_recipes(&ranked)?;
            emit(args, recipes.as_slice(), &warnings, print_top_recipes)
        }
        Command::Cuisines => {
            let cuisines = common_cuisines(&df, &mut warnings)?;
            emit(args, cuisines.as_slice(), &warnings, print_cuisines)
        }
        Command::Filter { diet } => {
            let filtered = filter_by_diet(&df, diet, &mut warnings)?;
            if args.json {
                return print_json(&QueryOutput::new(dataframe_to_records(&filtered)?, warnings));
            }
            println!("{}", filtered);
            print_warnings(&warnings);
            Ok(())
        }
        Command::Distribution => {
            let stats = macronutrient_distribution(&df, &mut warnings)?;
            emit(args, stats.as_slice(), &warnings, print_distribution)
        }
        Command::Scatter => {
            let points = scatter_points(&df, &mut warnings)?;
            if args.json {
                return print_json(&QueryOutput::new(points, warnings));
            }
            println!("{} complete recipes (diet, protein, carbs, cuisine)", points.len());
            for point in points.iter().take(10) {
                println!(
                    "  {:<15} {:>8.2} {:>8.2}  {}",
                    point.diet_type, point.protein, point.carbs, point.cuisine_type
                );
            }
            print_warnings(&warnings);
            Ok(())
        }
        Command::Summary { .. } => Err(anyhow!("summary is not a single query")),
    }
}

/// Print `value` and its warnings as a JSON envelope, or through `human`
/// followed by any warnings.
fn emit<T: Serialize + ?Sized>(
    args: &Args,
    value: &T,
    warnings: &[AnalysisWarning],
    human: fn(&T),
) -> Result<()> {
    if args.json {
        return print_json(&QueryOutput::new(value, warnings.to_vec()));
    }
    human(value);
    print_warnings(warnings);
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", to_json_pretty(value)?);
    Ok(())
}

/// Write the result bundle to `<dir>/<dataset_stem>_analysis.json`.
fn write_report(result: &AnalysisResult, dir: &Path, dataset: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    let stem = dataset
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    let report_path = dir.join(format!("{}_analysis.json", stem));

    fs::write(&report_path, to_json_pretty(result)?)
        .with_context(|| format!("Failed to write report {}", report_path.display()))?;

    Ok(report_path)
}

fn format_grams(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Print a human-readable summary of a full run.
///
/// Note: `println!` is intentional here; this is the command's output, not
/// logging, and must be visible regardless of log level.
fn print_summary(result: &AnalysisResult) {
    println!();
    println!("{}", "=".repeat(80));
    println!("RECIPE ANALYSIS SUMMARY");
    println!("{}", "=".repeat(80));
    println!();

    match result.highest_protein_diet {
        Some(ref diet) => println!("Highest Protein Diet: {}", diet),
        None => println!("Highest Protein Diet: unavailable"),
    }
    println!();

    println!("AVERAGE MACRONUTRIENTS");
    println!("{}", "-".repeat(40));
    print_averages(&result.average_macros);
    println!();

    println!("TOP PROTEIN RECIPES");
    println!("{}", "-".repeat(40));
    print_top_recipes(&result.top_protein_recipes);
    println!();

    println!("MOST COMMON CUISINES");
    println!("{}", "-".repeat(40));
    print_cuisines(&result.common_cuisines);
    println!();

    print_warnings(&result.warnings);
    println!("Generated at {}", result.generated_at);
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
}

fn print_averages(averages: &[DietMacroAverages]) {
    println!(
        "{:<20} {:>12} {:>12} {:>12}",
        "Diet", "Protein(g)", "Carbs(g)", "Fat(g)"
    );
    for avg in averages {
        println!(
            "{:<20} {:>12} {:>12} {:>12}",
            truncate_str(&avg.diet_type, 19),
            format_grams(avg.protein),
            format_grams(avg.carbs),
            format_grams(avg.fat)
        );
    }
}

fn print_top_recipes(recipes: &[TopProteinRecipe]) {
    println!(
        "{:<15} {:<40} {:>10}  {}",
        "Diet", "Recipe", "Protein(g)", "Cuisine"
    );
    for recipe in recipes {
        println!(
            "{:<15} {:<40} {:>10}  {}",
            truncate_str(&recipe.diet_type, 14),
            truncate_str(recipe.recipe_name.as_deref().unwrap_or("-"), 39),
            format_grams(recipe.protein),
            recipe.cuisine_type.as_deref().unwrap_or("-")
        );
    }
}

fn print_cuisines(cuisines: &[CuisineMode]) {
    for entry in cuisines {
        println!("  {:<20} {}", truncate_str(&entry.diet_type, 19), entry.cuisine_type);
    }
}

fn print_distribution(stats: &[MacroDistribution]) {
    println!(
        "{:<12} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for s in stats {
        println!(
            "{:<12} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            s.column.column_name(),
            s.count,
            format_grams(s.mean),
            format_grams(s.std),
            format_grams(s.min),
            format_grams(s.p25),
            format_grams(s.p50),
            format_grams(s.p75),
            format_grams(s.max)
        );
    }
}

fn print_warnings(warnings: &[AnalysisWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("Warnings:");
    for warning in warnings {
        println!("  ! {}", warning);
    }
    println!();
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
