//! JSON Lines codec: one JSON object per line.
//!
//! Adapted from ironbeam's `io::jsonl` (`read_jsonl_vec`/`write_jsonl_vec`):
//! the line-numbered `anyhow::Context` it attaches to a bad line becomes a
//! `Error::Decode { line, .. }` here, since this crate surfaces one concrete
//! error enum at its boundary instead of `anyhow::Error`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;

use crate::error::Error;
use crate::value::Record;

/// Parse one line of JSON Lines input into a [`Record`]. `line_no` is
/// 1-based, used only to label a decode failure.
pub fn decode_line(line: &str, line_no: usize) -> Result<Record, Error> {
    serde_json::from_str(line).map_err(|e| Error::decode(e.to_string(), line_no))
}

/// Serialize a [`Record`] as one line of JSON Lines output (no trailing
/// newline).
pub fn encode_line(record: &Record) -> Result<String, Error> {
    serde_json::to_string(record).map_err(|e| Error::encoding(e.to_string()))
}

/// Read every record from a JSON Lines file, skipping blank lines.
///
/// File-level I/O failures are collected with `anyhow::Context` before
/// being flattened into this crate's own `Error` at the function boundary.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Record>, Error> {
    let path = path.as_ref();
    let file = open(path).map_err(|e| Error::configuration(format!("{e:#}")))?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("cannot read line {} of `{}`", i + 1, path.display()))
            .map_err(|e| Error::configuration(format!("{e:#}")))?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(decode_line(&line, i + 1)?);
    }
    Ok(records)
}

fn open(path: &Path) -> anyhow::Result<File> {
    File::open(path).with_context(|| format!("cannot open `{}`", path.display()))
}

/// Write every record to a JSON Lines file, one per line.
pub fn write_file(path: impl AsRef<Path>, records: &[Record]) -> Result<(), Error> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("cannot create `{}`", path.display()))
        .map_err(|e| Error::configuration(format!("{e:#}")))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        let line = encode_line(record)?;
        writeln!(writer, "{line}")
            .context("failed writing a record")
            .map_err(|e| Error::encoding(format!("{e:#}")))?;
    }
    writer
        .flush()
        .context("failed flushing output file")
        .map_err(|e| Error::encoding(format!("{e:#}")))?;
    Ok(())
}
