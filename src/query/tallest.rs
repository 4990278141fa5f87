//! Tallest-players query
//!
//! A player can appear in many seasons, so rows are first collapsed per
//! player: maximum height across seasons, team from the player's first row
//! in source order. The top `n` of those summaries are returned.

use polars::prelude::*;
use serde::Serialize;

use crate::record::{self, f64_column, required_f64, required_str, str_column};
use crate::{CourtstatsError, Dataset, Result};

/// One row of the tallest-players result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallestPlayer {
    pub player_name: String,
    /// Maximum height over all of this player's rows, in centimeters.
    pub player_height: f64,
    /// Team code of the player's first row in source order.
    pub team_abbreviation: String,
}

/// Collapse rows per player and return the `n` tallest.
///
/// Groups are formed in first-appearance order and the descending sort is
/// stable, so equal heights rank in source order.
pub fn tallest_players(dataset: &Dataset, n: usize) -> Result<Vec<TallestPlayer>> {
    let summarized = dataset
        .frame()
        .clone()
        .lazy()
        .group_by_stable([col(record::PLAYER_NAME)])
        .agg([
            col(record::PLAYER_HEIGHT).max(),
            col(record::TEAM).first(),
        ])
        .sort(
            [record::PLAYER_HEIGHT],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(n as IdxSize)
        .collect()
        .map_err(|e| {
            CourtstatsError::DataError(format!("Tallest-players query failed: {}", e))
        })?;

    let names = str_column(&summarized, record::PLAYER_NAME)?;
    let heights = f64_column(&summarized, record::PLAYER_HEIGHT)?;
    let teams = str_column(&summarized, record::TEAM)?;

    let mut rows = Vec::with_capacity(summarized.height());
    for idx in 0..summarized.height() {
        rows.push(TallestPlayer {
            player_name: required_str(names, idx, record::PLAYER_NAME)?.to_string(),
            player_height: required_f64(heights, idx, record::PLAYER_HEIGHT)?,
            team_abbreviation: required_str(teams, idx, record::TEAM)?.to_string(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerSeason;

    fn record(name: &str, height: f64, team: &str) -> PlayerSeason {
        PlayerSeason {
            player_name: name.to_string(),
            player_height: height,
            pts: 0.0,
            age: 25.0,
            team_abbreviation: team.to_string(),
        }
    }

    #[test]
    fn test_max_height_and_first_team_per_player() {
        let dataset = Dataset::from_records(vec![
            record("A", 210.0, "X"),
            record("A", 205.0, "Y"),
            record("B", 215.0, "Z"),
        ])
        .unwrap();

        let rows = tallest_players(&dataset, 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player_name, "B");
        assert_eq!(rows[0].player_height, 215.0);
        assert_eq!(rows[1].player_name, "A");
        assert_eq!(rows[1].player_height, 210.0);
        // Team is the first seen in source order, not the one of the max-height row
        assert_eq!(rows[1].team_abbreviation, "X");
    }

    #[test]
    fn test_ties_keep_source_order() {
        let dataset = Dataset::from_records(vec![
            record("First", 200.0, "X"),
            record("Second", 200.0, "Y"),
            record("Third", 200.0, "Z"),
        ])
        .unwrap();

        let rows = tallest_players(&dataset, 3).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_result_capped_at_group_count() {
        let dataset = Dataset::from_records(vec![
            record("A", 210.0, "X"),
            record("A", 211.0, "X"),
            record("B", 215.0, "Z"),
        ])
        .unwrap();

        // Only two distinct players, so asking for five returns two
        let rows = tallest_players(&dataset, 5).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let dataset = Dataset::from_records(Vec::new()).unwrap();
        assert!(tallest_players(&dataset, 5).unwrap().is_empty());
    }
}
