//! Read-only queries over the cleaned recipe table.
//!
//! Every aggregator borrows the table, has no side effects besides logging
//! and pushing warnings, and does not depend on any other aggregator, so
//! they can run in any order.

mod averages;
mod cuisines;
mod distribution;
mod filter;
mod rankings;
mod scatter;

pub use averages::{average_macros, highest_protein_diet};
pub use cuisines::common_cuisines;
pub use distribution::macronutrient_distribution;
pub use filter::{ALL_DIETS, filter_by_diet};
pub use rankings::{project_top_recipes, top_protein_recipes};
pub use scatter::scatter_points;
