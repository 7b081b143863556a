use std::fs::{self, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use sweep_core::{ErrorInfo, SweepError};

use crate::sweep::SweepReport;

/// One CSV row per attempted invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Plan label.
    pub plan_name: String,
    /// Plan hash.
    pub plan_hash: String,
    /// Position in the sweep.
    pub index: usize,
    /// Dimension.
    pub dimension: u32,
    /// Point count.
    pub point_count: u64,
    /// Radius.
    pub radius: f64,
    /// Exit status.
    pub exit_code: i32,
    /// Wall-clock milliseconds.
    pub elapsed_ms: u64,
}

fn wrap_csv(code: &str, path: &Path, err: csv::Error) -> SweepError {
    SweepError::Serde(
        ErrorInfo::new(code, "CSV ledger failure")
            .with_path(path)
            .with_hint(err.to_string()),
    )
}

/// Appends every invocation in `report` to the ledger, writing a header when
/// the file is new.
pub fn append_ledger(path: &Path, report: &SweepReport) -> Result<(), SweepError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| SweepError::io("ledger_dir", parent, err))?;
    }
    let file_exists = path.exists();
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| SweepError::io("ledger_open", path, err))?;
    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(BufWriter::new(file));
    for record in &report.invocations {
        let row = LedgerRow {
            plan_name: report.plan_name.clone(),
            plan_hash: report.plan_hash.clone(),
            index: record.index,
            dimension: record.tuple.dimension,
            point_count: record.tuple.point_count,
            radius: record.tuple.radius,
            exit_code: record.exit_code,
            elapsed_ms: record.elapsed_ms,
        };
        writer
            .serialize(&row)
            .map_err(|err| wrap_csv("ledger_write_row", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| SweepError::io("ledger_flush", path, err))?;
    Ok(())
}

/// Reads every row of a ledger written by [`append_ledger`].
pub fn read_ledger(path: &Path) -> Result<Vec<LedgerRow>, SweepError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|err| wrap_csv("ledger_open", path, err))?;
    reader
        .deserialize()
        .collect::<Result<Vec<LedgerRow>, _>>()
        .map_err(|err| wrap_csv("ledger_read_row", path, err))
}
