//! The four analytical queries
//!
//! Each query is a pure function over a validated [`Dataset`](crate::Dataset):
//! it reads, reduces, and returns typed result rows. No query mutates the
//! dataset or depends on another query's output.
//!
//! Ranking queries share the same ordering contract: descending by the
//! ranking value, ties broken by the source file's row order. The grouping
//! queries use Polars' stable group-by so that group order, "first seen"
//! reductions, and tie-breaks all follow that same row order.

mod ages;
mod scorers;
mod tallest;
mod teams;

pub use ages::{age_distribution, AgeBin, AGE_BIN_COUNT};
pub use scorers::{top_scorers, TopScorer};
pub use tallest::{tallest_players, TallestPlayer};
pub use teams::{team_averages, TeamAverage};

/// Result size of the three ranking queries.
pub const TOP_N: usize = 5;
