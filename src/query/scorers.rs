//! Top-scorers query
//!
//! Ranks raw rows, not players: a player with two strong seasons occupies
//! two slots, each with the team of that season's row.

use polars::prelude::*;
use serde::Serialize;

use crate::record::{self, f64_column, required_f64, required_str, str_column};
use crate::{CourtstatsError, Dataset, Result};

/// One row of the top-scorers result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopScorer {
    pub player_name: String,
    /// Average points per game of this row's season.
    pub pts: f64,
    pub team_abbreviation: String,
}

/// Return the `n` rows with the highest points per game.
///
/// The descending sort is stable: equal values rank in source order.
pub fn top_scorers(dataset: &Dataset, n: usize) -> Result<Vec<TopScorer>> {
    let ranked = dataset
        .frame()
        .clone()
        .lazy()
        .select([
            col(record::PLAYER_NAME),
            col(record::PTS),
            col(record::TEAM),
        ])
        .sort(
            [record::PTS],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(n as IdxSize)
        .collect()
        .map_err(|e| CourtstatsError::DataError(format!("Top-scorers query failed: {}", e)))?;

    let names = str_column(&ranked, record::PLAYER_NAME)?;
    let pts = f64_column(&ranked, record::PTS)?;
    let teams = str_column(&ranked, record::TEAM)?;

    let mut rows = Vec::with_capacity(ranked.height());
    for idx in 0..ranked.height() {
        rows.push(TopScorer {
            player_name: required_str(names, idx, record::PLAYER_NAME)?.to_string(),
            pts: required_f64(pts, idx, record::PTS)?,
            team_abbreviation: required_str(teams, idx, record::TEAM)?.to_string(),
        });
    }
    Ok(rows)
}
