//! Export command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spendcast_core::export::export_to_file;
use spendcast_core::{Database, ExportFormat};

/// Export every stored expense, returning the path written
pub fn cmd_export(db: &Database, format: ExportFormat, output: Option<&Path>) -> Result<PathBuf> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    let count = export_to_file(db, format, &path)
        .with_context(|| format!("Failed to export to {}", path.display()))?;

    println!(
        "✅ Exported {} expenses as {} to {}",
        count,
        format.as_str(),
        path.display()
    );
    Ok(path)
}
