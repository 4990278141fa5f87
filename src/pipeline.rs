//! End-to-end analysis pipeline
//!
//! Two-stage API in the spirit of load-then-render: [`run_pipeline`]
//! produces an [`Analysis`] (pure data, no side effects beyond reading the
//! file), and `Analysis::render` hands the four charts to whatever
//! [`Renderer`] the caller supplies. Console output lives in
//! `Analysis::print_tables` so library users can skip it entirely.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::format;
use crate::query::{
    age_distribution, tallest_players, team_averages, top_scorers, AgeBin, TallestPlayer,
    TeamAverage, TopScorer, TOP_N,
};
use crate::reader::{CsvReader, Reader};
use crate::render::{Bar, BarChart, HistogramBin, HistogramChart, Renderer};
use crate::{Dataset, Result};

/// Chart titles and colors, fixed per analysis step.
const TALLEST_TITLE: &str = "Top 5 Tallest Players";
const SCORERS_TITLE: &str = "Top 5 Scorers";
const TEAMS_TITLE: &str = "Top 5 Teams by Average Points";
const AGES_TITLE: &str = "Player Age Distribution";

/// The full report: one result per analysis step, in pipeline order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub tallest: Vec<TallestPlayer>,
    pub scorers: Vec<TopScorer>,
    pub team_averages: Vec<TeamAverage>,
    pub age_bins: Vec<AgeBin>,
}

/// Load, validate, and analyze the file at `path`.
pub fn run_pipeline(path: impl AsRef<Path>) -> Result<Analysis> {
    let df = CsvReader::from_path(path).load()?;
    let dataset = Dataset::try_new(df)?;
    analyze(&dataset)
}

/// Run the four queries over an already-validated dataset.
pub fn analyze(dataset: &Dataset) -> Result<Analysis> {
    let tallest = tallest_players(dataset, TOP_N)?;
    info!(rows = tallest.len(), "tallest-players query done");

    let scorers = top_scorers(dataset, TOP_N)?;
    info!(rows = scorers.len(), "top-scorers query done");

    let team_averages = team_averages(dataset, TOP_N)?;
    info!(rows = team_averages.len(), "team-averages query done");

    let age_bins = age_distribution(dataset)?;
    info!(bins = age_bins.len(), "age-distribution query done");

    Ok(Analysis {
        tallest,
        scorers,
        team_averages,
        age_bins,
    })
}

impl Analysis {
    /// Chart for the tallest-players result.
    pub fn tallest_chart(&self) -> BarChart {
        BarChart {
            name: "top_tallest".to_string(),
            title: TALLEST_TITLE.to_string(),
            category_title: "Player Name".to_string(),
            value_title: "Height (cm)".to_string(),
            color: "skyblue".to_string(),
            bars: self
                .tallest
                .iter()
                .map(|row| Bar {
                    label: row.player_name.clone(),
                    value: row.player_height,
                })
                .collect(),
        }
    }

    /// Chart for the top-scorers result.
    pub fn scorers_chart(&self) -> BarChart {
        BarChart {
            name: "top_scorers".to_string(),
            title: SCORERS_TITLE.to_string(),
            category_title: "Player Name".to_string(),
            value_title: "Points Per Game".to_string(),
            color: "orange".to_string(),
            bars: self
                .scorers
                .iter()
                .map(|row| Bar {
                    label: row.player_name.clone(),
                    value: row.pts,
                })
                .collect(),
        }
    }

    /// Chart for the team-averages result.
    pub fn teams_chart(&self) -> BarChart {
        BarChart {
            name: "team_avg_pts".to_string(),
            title: TEAMS_TITLE.to_string(),
            category_title: "Team".to_string(),
            value_title: "Average Points".to_string(),
            color: "green".to_string(),
            bars: self
                .team_averages
                .iter()
                .map(|row| Bar {
                    label: row.team_abbreviation.clone(),
                    value: row.mean_pts,
                })
                .collect(),
        }
    }

    /// Chart for the age-distribution result.
    pub fn ages_chart(&self) -> HistogramChart {
        HistogramChart {
            name: "age_distribution".to_string(),
            title: AGES_TITLE.to_string(),
            value_title: "Age".to_string(),
            count_title: "Frequency".to_string(),
            color: "purple".to_string(),
            bins: self
                .age_bins
                .iter()
                .map(|bin| HistogramBin {
                    lower: bin.lower,
                    upper: bin.upper,
                    count: bin.count,
                })
                .collect(),
        }
    }

    /// Draw all four charts, in pipeline order.
    ///
    /// Empty results still produce charts; a chart with no bars is the
    /// documented behavior for an empty dataset, not an error.
    pub fn render(&self, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.horizontal_bar(&self.tallest_chart())?;
        renderer.vertical_bar(&self.scorers_chart())?;
        renderer.vertical_bar(&self.teams_chart())?;
        renderer.histogram(&self.ages_chart())?;
        Ok(())
    }

    /// Print the four result tables to stdout.
    pub fn print_tables(&self) {
        println!("{}:", TALLEST_TITLE);
        let rows: Vec<Vec<String>> = self
            .tallest
            .iter()
            .map(|r| {
                vec![
                    r.player_name.clone(),
                    format::two_decimals(r.player_height),
                    r.team_abbreviation.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            format::render_table(&["player_name", "player_height", "team_abbreviation"], &rows)
        );

        println!("{}:", SCORERS_TITLE);
        let rows: Vec<Vec<String>> = self
            .scorers
            .iter()
            .map(|r| {
                vec![
                    r.player_name.clone(),
                    format::two_decimals(r.pts),
                    r.team_abbreviation.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            format::render_table(&["player_name", "pts", "team_abbreviation"], &rows)
        );

        println!("{}:", TEAMS_TITLE);
        let rows: Vec<Vec<String>> = self
            .team_averages
            .iter()
            .map(|r| {
                vec![
                    r.team_abbreviation.clone(),
                    format::two_decimals(r.mean_pts),
                ]
            })
            .collect();
        println!(
            "{}",
            format::render_table(&["team_abbreviation", "mean_pts"], &rows)
        );

        println!("{}:", AGES_TITLE);
        let rows: Vec<Vec<String>> = self
            .age_bins
            .iter()
            .enumerate()
            .map(|(i, b)| {
                // Last bin is closed on the right, the rest are half-open
                let closing = if i + 1 == self.age_bins.len() { "]" } else { ")" };
                vec![
                    format!(
                        "[{}, {}{}",
                        format::two_decimals(b.lower),
                        format::two_decimals(b.upper),
                        closing
                    ),
                    format::count(b.count),
                ]
            })
            .collect();
        println!("{}", format::render_table(&["age_range", "count"], &rows));
    }
}
