//! Age-distribution query
//!
//! Buckets every row's age into 10 equal-width bins spanning the global
//! [min, max] of the column. All bins are half-open `[lower, upper)` except
//! the last, which is closed so the maximum itself is counted.

use polars::prelude::*;
use serde::Serialize;

use crate::record::{self, f64_column};
use crate::{Dataset, Result};

/// Number of bins in the age histogram.
pub const AGE_BIN_COUNT: usize = 10;

/// One histogram bin: `[lower, upper)`, last bin `[lower, upper]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
}

/// Count rows per age bin, in ascending bin order.
///
/// An empty dataset yields zero bins rather than an error; there is no
/// range to partition. A dataset where every age is identical yields
/// zero-width bins with the whole population in the last one.
pub fn age_distribution(dataset: &Dataset) -> Result<Vec<AgeBin>> {
    let ages = f64_column(dataset.frame(), record::AGE)?;
    if ages.is_empty() {
        return Ok(Vec::new());
    }

    // Validated columns are null-free, so min/max exist for non-empty input
    let min = ages.min().unwrap_or(0.0);
    let max = ages.max().unwrap_or(0.0);
    let width = (max - min) / AGE_BIN_COUNT as f64;

    let mut counts = [0u32; AGE_BIN_COUNT];
    for value in ages.into_no_null_iter() {
        let idx = if width > 0.0 {
            (((value - min) / width) as usize).min(AGE_BIN_COUNT - 1)
        } else {
            AGE_BIN_COUNT - 1
        };
        counts[idx] += 1;
    }

    let bins = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| AgeBin {
            lower: min + i as f64 * width,
            // Closing edge is the exact maximum, not an accumulated sum
            upper: if i == AGE_BIN_COUNT - 1 {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect();

    Ok(bins)
}
