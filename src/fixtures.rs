// =============================================================================
// Reference Data Loader
// =============================================================================
//
// Reads chart exports that carry both the raw prices and the squeeze values a
// reference charting platform computed for them, so the indicator can be
// checked against known outputs.
//
// Column layout (header row skipped, columns addressed by position):
//
//   0 time | 1 open | 2 high | 3 low | 4 close | 5 line | 6 squeeze (0/1)
//
// `line` is blank or `NaN` while the reference platform is still warming up.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};

use crate::types::PriceSeries;

const COL_HIGH: usize = 2;
const COL_LOW: usize = 3;
const COL_CLOSE: usize = 4;
const COL_LINE: usize = 5;
const COL_SQUEEZE: usize = 6;

/// Prices plus the expected indicator output for each bar.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub series: PriceSeries,
    /// Expected momentum value; `None` where the reference is undefined.
    pub expected_values: Vec<Option<f64>>,
    pub expected_squeeze: Vec<bool>,
}

/// Load a reference export from `path`.
pub fn load_reference_csv(path: impl AsRef<Path>) -> Result<ReferenceData> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open reference data {}", path.display()))?;

    let mut data = ReferenceData::default();
    for (row, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("bad csv row {} in {}", row + 1, path.display()))?;
        let line = row + 2;

        data.series.high.push(price(&record, COL_HIGH, line)?);
        data.series.low.push(price(&record, COL_LOW, line)?);
        data.series.close.push(price(&record, COL_CLOSE, line)?);
        data.expected_values.push(optional_value(&record, COL_LINE));
        data.expected_squeeze.push(flag(&record, COL_SQUEEZE, line)?);
    }

    Ok(data)
}

fn cell<'a>(record: &'a StringRecord, col: usize, line: usize) -> Result<&'a str> {
    record
        .get(col)
        .ok_or_else(|| anyhow!("line {line}: missing column {col}"))
}

fn price(record: &StringRecord, col: usize, line: usize) -> Result<f64> {
    let raw = cell(record, col, line)?;
    raw.parse::<f64>()
        .with_context(|| format!("line {line}: column {col} is not a number: {raw:?}"))
}

fn optional_value(record: &StringRecord, col: usize) -> Option<f64> {
    record
        .get(col)
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn flag(record: &StringRecord, col: usize, line: usize) -> Result<bool> {
    match cell(record, col, line)? {
        "1" => Ok(true),
        "0" | "" => Ok(false),
        other => Err(anyhow!("line {line}: squeeze flag must be 0 or 1, got {other:?}")),
    }
}
