//! CSV data source implementation
//!
//! Loads comma-separated player-season files through Polars' lazy CSV
//! scanner. The header row is required; column types are inferred by the
//! scanner and normalized later by `Dataset::try_new`.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::info;

use crate::reader::Reader;
use crate::record::REQUIRED_COLUMNS;
use crate::{CourtstatsError, Result};

/// Comma-separated file reader
///
/// # Examples
///
/// ```rust,ignore
/// use courtstats::reader::{CsvReader, Reader};
///
/// let reader = CsvReader::from_path("all_seasons.csv");
/// let df = reader.load()?;
/// ```
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    /// Create a reader for the given file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The path this reader loads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reader for CsvReader {
    fn load(&self) -> Result<DataFrame> {
        if !self.path.exists() {
            return Err(CourtstatsError::LoadError(format!(
                "File not found: {}",
                self.path.display()
            )));
        }

        let df = LazyCsvReader::new(self.path.clone())
            .with_has_header(true)
            .finish()
            .map_err(|e| {
                CourtstatsError::LoadError(format!(
                    "Failed to open '{}': {}",
                    self.path.display(),
                    e
                ))
            })?
            .collect()
            .map_err(|e| {
                CourtstatsError::LoadError(format!(
                    "Failed to parse '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        self.validate_columns(&df, &REQUIRED_COLUMNS)?;

        info!(
            rows = df.height(),
            columns = df.width(),
            path = %self.path.display(),
            "loaded dataset"
        );

        Ok(df)
    }

    fn validate_columns(&self, df: &DataFrame, columns: &[&str]) -> Result<()> {
        let header: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for col in columns {
            if !header.iter().any(|c| c == col) {
                return Err(CourtstatsError::LoadError(format!(
                    "Header of '{}' lacks required column '{}'. Found: {}",
                    self.path.display(),
                    col,
                    header.join(", ")
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Write a throwaway CSV under the test temp dir and return its path.
    fn write_fixture(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("courtstats-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    const HEADER: &str = "player_name,team_abbreviation,age,player_height,pts,college\n";

    #[test]
    fn test_load_well_formed_file() {
        let path = write_fixture(
            "ok.csv",
            &format!(
                "{}{}{}",
                HEADER, "Dennis Rodman,CHI,36,198.12,5.7,Southeastern Oklahoma\n",
                "Arvydas Sabonis,POR,31,220.98,14.5,none\n"
            ),
        );

        let df = CsvReader::from_path(&path).load().unwrap();
        assert_eq!(df.height(), 2);
        assert!(df
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == "player_height"));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = CsvReader::from_path("/nonexistent/players.csv")
            .load()
            .unwrap_err();
        assert!(matches!(err, CourtstatsError::LoadError(_)));
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_incompatible_header_is_load_error() {
        let path = write_fixture("badheader.csv", "player_name,team_abbreviation\nA,X\n");

        let err = CsvReader::from_path(&path).load().unwrap_err();
        assert!(matches!(err, CourtstatsError::LoadError(_)));
        assert!(err.to_string().contains("player_height"));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_row_order_preserved() {
        let path = write_fixture(
            "order.csv",
            &format!(
                "{}{}{}{}",
                HEADER,
                "First,AAA,25,200.0,10.0,none\n",
                "Second,BBB,26,201.0,11.0,none\n",
                "Third,CCC,27,202.0,12.0,none\n"
            ),
        );

        let df = CsvReader::from_path(&path).load().unwrap();
        let names = df.column("player_name").unwrap();
        let names = names.as_materialized_series().str().unwrap();
        assert_eq!(names.get(0), Some("First"));
        assert_eq!(names.get(2), Some("Third"));

        std::fs::remove_file(path).ok();
    }
}
