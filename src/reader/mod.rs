//! Data source abstraction layer for courtstats
//!
//! The reader module provides a pluggable interface for loading tabular
//! player-season data and returning Polars DataFrames for analysis.
//!
//! # Architecture
//!
//! All readers implement the `Reader` trait, which provides:
//! - File → DataFrame conversion
//! - Required-column validation against the loaded header
//! - Load error handling
//!
//! # Example
//!
//! ```rust,ignore
//! use courtstats::reader::{CsvReader, Reader};
//!
//! let reader = CsvReader::from_path("all_seasons.csv");
//! let df = reader.load()?;
//! ```

use crate::{DataFrame, Result};

pub mod csv;

pub use csv::CsvReader;

/// Trait for data source readers
///
/// Readers load a tabular source and return a Polars DataFrame with the
/// source's row order intact.
pub trait Reader {
    /// Load the source into a DataFrame
    ///
    /// # Returns
    ///
    /// A Polars DataFrame containing every row of the source, in order
    ///
    /// # Errors
    ///
    /// Returns `CourtstatsError::LoadError` if:
    /// - The file is missing or unreadable
    /// - The content cannot be parsed as delimited text
    /// - The header lacks a required column
    fn load(&self) -> Result<DataFrame>;

    /// Validate that specified columns exist in a loaded frame
    ///
    /// This is useful for checking column names right after load to provide
    /// better error messages than a failing query would.
    ///
    /// # Arguments
    ///
    /// * `df` - The loaded frame to introspect
    /// * `columns` - Column names that must be present
    ///
    /// # Returns
    ///
    /// Ok(()) if all columns exist, otherwise an error
    fn validate_columns(&self, df: &DataFrame, columns: &[&str]) -> Result<()>;
}
