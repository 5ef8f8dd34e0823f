use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::store::HistoryStore;

/// Default export location: `<data_local_dir>/health-predict/exports`
pub fn default_export_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("health-predict")
        .join("exports")
}

/// Write a snapshot of the history to a JSONL file, one record per line.
/// Returns the number of records written
pub fn to_jsonl(history: &HistoryStore, target_path: impl AsRef<Path>) -> io::Result<usize> {
    let target_path = target_path.as_ref();
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let records = history.all();

    // Create target file (truncate if exists)
    let mut writer = BufWriter::new(File::create(target_path)?);
    for record in &records {
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    log::info!(
        "Exported {} prediction records to {}",
        records.len(),
        target_path.display()
    );
    Ok(records.len())
}
