//! Typed row model and validated dataset wrapper
//!
//! The source file is loosely typed; this module is where it stops being so.
//! [`Dataset::try_new`] normalizes the required columns to fixed dtypes and
//! fails fast with `DataError` on anything that does not fit, so every query
//! downstream can assume a clean, null-free frame.

use polars::prelude::*;
use serde::Serialize;

use crate::{CourtstatsError, Result};

/// Column holding the player name.
pub const PLAYER_NAME: &str = "player_name";
/// Column holding the player height in centimeters.
pub const PLAYER_HEIGHT: &str = "player_height";
/// Column holding average points per game.
pub const PTS: &str = "pts";
/// Column holding the player age in years.
pub const AGE: &str = "age";
/// Column holding the short team code.
pub const TEAM: &str = "team_abbreviation";

/// Columns every input file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [PLAYER_NAME, PLAYER_HEIGHT, PTS, AGE, TEAM];

const NUMERIC_COLUMNS: [&str; 3] = [PLAYER_HEIGHT, PTS, AGE];
const STRING_COLUMNS: [&str; 2] = [PLAYER_NAME, TEAM];

/// One player-team-season row.
///
/// `player_name` is not unique across rows; a player appears once per
/// season/team combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeason {
    pub player_name: String,
    pub player_height: f64,
    pub pts: f64,
    pub age: f64,
    pub team_abbreviation: String,
}

/// A validated, immutable player-season table.
///
/// Construction is the validation step: numeric columns are cast to
/// `Float64`, string columns to `String`, and any null or non-numeric value
/// in a required column aborts with `DataError`. Row order of the source is
/// preserved, which the queries rely on for "first seen" semantics and
/// stable tie-breaks.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Validate and normalize a raw frame into a dataset.
    ///
    /// # Errors
    ///
    /// Returns `CourtstatsError::DataError` if:
    /// - a required column is missing
    /// - a numeric column holds a value that does not parse as a number
    /// - any required column holds a null
    pub fn try_new(frame: DataFrame) -> Result<Self> {
        let names = frame.get_column_names();
        for required in REQUIRED_COLUMNS {
            if !names.iter().any(|c| c.as_str() == required) {
                return Err(CourtstatsError::DataError(format!(
                    "required column '{}' missing. Available columns: {}",
                    required,
                    names
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
        }

        let mut frame = frame;
        for name in NUMERIC_COLUMNS {
            let series = normalized_column(&frame, name, &DataType::Float64)?;
            frame.replace(name, series).map_err(|e| {
                CourtstatsError::DataError(format!("Failed to replace column '{}': {}", name, e))
            })?;
        }
        for name in STRING_COLUMNS {
            let series = normalized_column(&frame, name, &DataType::String)?;
            frame.replace(name, series).map_err(|e| {
                CourtstatsError::DataError(format!("Failed to replace column '{}': {}", name, e))
            })?;
        }

        Ok(Self { frame })
    }

    /// Build a dataset from typed rows.
    pub fn from_records(records: Vec<PlayerSeason>) -> Result<Self> {
        let names: Vec<&str> = records.iter().map(|r| r.player_name.as_str()).collect();
        let heights: Vec<f64> = records.iter().map(|r| r.player_height).collect();
        let pts: Vec<f64> = records.iter().map(|r| r.pts).collect();
        let ages: Vec<f64> = records.iter().map(|r| r.age).collect();
        let teams: Vec<&str> = records.iter().map(|r| r.team_abbreviation.as_str()).collect();

        let frame = DataFrame::new(vec![
            Column::new(PLAYER_NAME.into(), names),
            Column::new(PLAYER_HEIGHT.into(), heights),
            Column::new(PTS.into(), pts),
            Column::new(AGE.into(), ages),
            Column::new(TEAM.into(), teams),
        ])
        .map_err(|e| CourtstatsError::DataError(format!("Failed to build frame: {}", e)))?;

        Self::try_new(frame)
    }

    /// The underlying frame, normalized and read-only from here on.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// True if the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// The first `n` rows, for console previews.
    pub fn preview(&self, n: usize) -> DataFrame {
        self.frame.head(Some(n))
    }

    /// Materialize the dataset as typed rows, in source order.
    pub fn records(&self) -> Result<Vec<PlayerSeason>> {
        let names = str_column(&self.frame, PLAYER_NAME)?;
        let heights = f64_column(&self.frame, PLAYER_HEIGHT)?;
        let pts = f64_column(&self.frame, PTS)?;
        let ages = f64_column(&self.frame, AGE)?;
        let teams = str_column(&self.frame, TEAM)?;

        let mut records = Vec::with_capacity(self.frame.height());
        for idx in 0..self.frame.height() {
            records.push(PlayerSeason {
                player_name: required_str(names, idx, PLAYER_NAME)?.to_string(),
                player_height: required_f64(heights, idx, PLAYER_HEIGHT)?,
                pts: required_f64(pts, idx, PTS)?,
                age: required_f64(ages, idx, AGE)?,
                team_abbreviation: required_str(teams, idx, TEAM)?.to_string(),
            });
        }
        Ok(records)
    }
}

/// Cast a column to the target dtype, rejecting values the cast loses.
///
/// `Series::cast` turns unparseable values into nulls rather than failing,
/// so a rise in the null count is the type-mismatch signal. Nulls that were
/// already present are rejected as well: queries assume complete columns.
fn normalized_column(frame: &DataFrame, name: &str, dtype: &DataType) -> Result<Series> {
    let column = frame
        .column(name)
        .map_err(|e| CourtstatsError::DataError(format!("Column '{}' not found: {}", name, e)))?;
    let series = column.as_materialized_series();

    let casted = series.cast(dtype).map_err(|e| {
        CourtstatsError::DataError(format!(
            "Column '{}' cannot be read as {}: {}",
            name, dtype, e
        ))
    })?;

    if casted.null_count() > series.null_count() {
        return Err(CourtstatsError::DataError(format!(
            "Column '{}' holds values that are not {}",
            name, dtype
        )));
    }
    if casted.null_count() > 0 {
        return Err(CourtstatsError::DataError(format!(
            "Column '{}' holds {} empty value(s)",
            name,
            casted.null_count()
        )));
    }

    Ok(casted)
}

/// Fetch a column as `f64` values.
pub(crate) fn f64_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Float64Chunked> {
    frame
        .column(name)
        .map_err(|e| CourtstatsError::DataError(format!("Column '{}' not found: {}", name, e)))?
        .as_materialized_series()
        .f64()
        .map_err(|e| {
            CourtstatsError::DataError(format!("Column '{}' is not numeric: {}", name, e))
        })
}

/// Fetch a column as string values.
pub(crate) fn str_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    frame
        .column(name)
        .map_err(|e| CourtstatsError::DataError(format!("Column '{}' not found: {}", name, e)))?
        .as_materialized_series()
        .str()
        .map_err(|e| {
            CourtstatsError::DataError(format!("Column '{}' is not a string column: {}", name, e))
        })
}

pub(crate) fn required_f64(ca: &Float64Chunked, idx: usize, name: &str) -> Result<f64> {
    ca.get(idx).ok_or_else(|| {
        CourtstatsError::DataError(format!("Column '{}' holds a null at row {}", name, idx))
    })
}

pub(crate) fn required_str<'a>(ca: &'a StringChunked, idx: usize, name: &str) -> Result<&'a str> {
    ca.get(idx).ok_or_else(|| {
        CourtstatsError::DataError(format!("Column '{}' holds a null at row {}", name, idx))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, height: f64, pts: f64, age: f64, team: &str) -> PlayerSeason {
        PlayerSeason {
            player_name: name.to_string(),
            player_height: height,
            pts,
            age,
            team_abbreviation: team.to_string(),
        }
    }

    #[test]
    fn test_from_records_round_trip() {
        let records = vec![
            record("A", 210.0, 20.0, 25.0, "X"),
            record("B", 215.0, 10.0, 30.0, "Z"),
        ];
        let dataset = Dataset::from_records(records.clone()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records().unwrap(), records);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::from_records(Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.records().unwrap().is_empty());
    }

    #[test]
    fn test_missing_column_rejected() {
        let frame = df!(
            PLAYER_NAME => ["A"],
            PLAYER_HEIGHT => [210.0],
            AGE => [25.0],
            TEAM => ["X"],
        )
        .unwrap();

        let err = Dataset::try_new(frame).unwrap_err();
        assert!(err.to_string().contains("'pts' missing"));
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let frame = df!(
            PLAYER_NAME => ["A"],
            PLAYER_HEIGHT => ["tall"],
            PTS => [20.0],
            AGE => [25.0],
            TEAM => ["X"],
        )
        .unwrap();

        let err = Dataset::try_new(frame).unwrap_err();
        assert!(matches!(err, CourtstatsError::DataError(_)));
        assert!(err.to_string().contains("player_height"));
    }

    #[test]
    fn test_null_value_rejected() {
        let frame = df!(
            PLAYER_NAME => ["A", "B"],
            PLAYER_HEIGHT => [210.0, 215.0],
            PTS => [Some(20.0), None],
            AGE => [25.0, 30.0],
            TEAM => ["X", "Z"],
        )
        .unwrap();

        let err = Dataset::try_new(frame).unwrap_err();
        assert!(err.to_string().contains("empty value"));
    }

    #[test]
    fn test_integer_columns_normalize_to_float() {
        let frame = df!(
            PLAYER_NAME => ["A"],
            PLAYER_HEIGHT => [210i64],
            PTS => [20i64],
            AGE => [25i64],
            TEAM => ["X"],
        )
        .unwrap();

        let dataset = Dataset::try_new(frame).unwrap();
        let records = dataset.records().unwrap();
        assert_eq!(records[0].player_height, 210.0);
        assert_eq!(records[0].age, 25.0);
    }

    #[test]
    fn test_extra_columns_preserved() {
        let frame = df!(
            PLAYER_NAME => ["A"],
            PLAYER_HEIGHT => [210.0],
            PTS => [20.0],
            AGE => [25.0],
            TEAM => ["X"],
            "college" => ["Duke"],
        )
        .unwrap();

        let dataset = Dataset::try_new(frame).unwrap();
        assert!(dataset
            .frame()
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == "college"));
    }
}
