/*!
# courtstats - NBA Player-Season Analytics

Exploratory descriptive analysis over a tabular dataset of professional
basketball player statistics, rendered as annotated charts.

The dataset holds one row per player-team-season. From it, courtstats
computes four independent summaries and draws one chart for each:

- Top 5 tallest players (horizontal bar)
- Top 5 scorers by points per game (vertical bar)
- Top 5 teams by average points per game (vertical bar)
- Player age distribution over 10 equal-width bins (histogram)

## Architecture

The pipeline is a straight line: load, query, render.

- **CSV input** → loaded into a Polars DataFrame by the [`reader`] module
- **Validation** → [`record::Dataset`] checks and normalizes column types
- **Queries** → pure read-only reductions in the [`query`] module
- **Output** → rendered via the [`render`] abstraction (Vega-Lite, HTML)

## Core Components

- [`reader`] - Data source abstraction layer
- [`record`] - Typed row model and validated dataset wrapper
- [`query`] - The four analytical queries
- [`render`] - Chart rendering abstraction layer
- [`pipeline`] - End-to-end composition and the [`Analysis`] report
*/

pub mod format;
pub mod pipeline;
pub mod query;
pub mod reader;
pub mod record;
pub mod render;

// Re-export key types for convenience
pub use pipeline::{run_pipeline, Analysis};
pub use query::{AgeBin, TallestPlayer, TeamAverage, TopScorer};
pub use record::{Dataset, PlayerSeason};

// DataFrame abstraction (wraps Polars)
pub use polars::prelude::DataFrame;

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum CourtstatsError {
    /// The input file is missing, unreadable, or its header lacks a
    /// required column.
    #[error("Load error: {0}")]
    LoadError(String),

    /// A required column is missing from a frame, holds nulls, or is
    /// non-numeric where a numeric value is required.
    #[error("Data error: {0}")]
    DataError(String),

    /// Chart serialization or artifact write failure.
    #[error("Render error: {0}")]
    RenderError(String),
}

pub type Result<T> = std::result::Result<T, CourtstatsError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
