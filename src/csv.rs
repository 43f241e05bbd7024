use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::Transaction;

/// Errors that can occur when exporting the transaction log
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to create '{}': {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("failed to write csv row: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to flush csv writer: {0}")]
    Flush(#[from] io::Error),
}

const HEADER: [&str; 3] = ["id", "category", "amount"];

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    id: &'a str,
    category: String,
    amount: String,
}

/// Write the transaction log in csv format, oldest entry first.
/// The header row is written even when the log is empty.
pub fn write_history<W: io::Write>(writer: W, transactions: &[Transaction]) -> Result<(), CsvError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(HEADER)?;

    for tx in transactions {
        let row = HistoryRow {
            id: tx.id().as_str(),
            category: tx.kind().to_string(),
            amount: tx.amount().to_string(),
        };
        writer.serialize(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the transaction log to a csv file, replacing any existing file
pub fn export_history(path: impl AsRef<Path>, transactions: &[Transaction]) -> Result<(), CsvError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CsvError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_history(file, transactions)
}
