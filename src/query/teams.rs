//! Team-averages query

use polars::prelude::*;
use serde::Serialize;

use crate::record::{self, f64_column, required_f64, required_str, str_column};
use crate::{CourtstatsError, Dataset, Result};

/// One row of the team-averages result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAverage {
    pub team_abbreviation: String,
    /// Arithmetic mean of points per game over all of the team's rows.
    pub mean_pts: f64,
}

/// Group rows by team, average points per game, return the `n` best.
///
/// Stable group-by plus a stable descending sort: teams with equal means
/// rank in first-appearance order.
pub fn team_averages(dataset: &Dataset, n: usize) -> Result<Vec<TeamAverage>> {
    let averaged = dataset
        .frame()
        .clone()
        .lazy()
        .group_by_stable([col(record::TEAM)])
        .agg([col(record::PTS).mean()])
        .sort(
            [record::PTS],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(n as IdxSize)
        .collect()
        .map_err(|e| CourtstatsError::DataError(format!("Team-averages query failed: {}", e)))?;

    let teams = str_column(&averaged, record::TEAM)?;
    let means = f64_column(&averaged, record::PTS)?;

    let mut rows = Vec::with_capacity(averaged.height());
    for idx in 0..averaged.height() {
        rows.push(TeamAverage {
            team_abbreviation: required_str(teams, idx, record::TEAM)?.to_string(),
            mean_pts: required_f64(means, idx, record::PTS)?,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerSeason;

    fn record(name: &str, pts: f64, team: &str) -> PlayerSeason {
        PlayerSeason {
            player_name: name.to_string(),
            player_height: 200.0,
            pts,
            age: 25.0,
            team_abbreviation: team.to_string(),
        }
    }

    #[test]
    fn test_mean_per_team() {
        let dataset = Dataset::from_records(vec![
            record("A", 10.0, "X"),
            record("B", 20.0, "X"),
            record("C", 12.0, "Y"),
        ])
        .unwrap();

        let rows = team_averages(&dataset, 5).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team_abbreviation, "X");
        assert_eq!(rows[0].mean_pts, 15.0);
        assert_eq!(rows[1].team_abbreviation, "Y");
        assert_eq!(rows[1].mean_pts, 12.0);
    }

    #[test]
    fn test_top_n_and_ordering() {
        let dataset = Dataset::from_records(vec![
            record("A", 1.0, "T1"),
            record("B", 2.0, "T2"),
            record("C", 3.0, "T3"),
            record("D", 4.0, "T4"),
            record("E", 5.0, "T5"),
            record("F", 6.0, "T6"),
        ])
        .unwrap();

        let rows = team_averages(&dataset, 5).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].team_abbreviation, "T6");
        for pair in rows.windows(2) {
            assert!(pair[0].mean_pts >= pair[1].mean_pts);
        }
    }

    #[test]
    fn test_empty_input() {
        let dataset = Dataset::from_records(Vec::new()).unwrap();
        assert!(team_averages(&dataset, 5).unwrap().is_empty());
    }
}
