// src/services/report_export.rs

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{error::AppError, models::report::UserReport};

/// Escapes a CSV field.
/// Values starting with a formula trigger (=, +, @, -, tab, CR, LF) are prefixed with a tab,
/// and values containing separators or quotes are wrapped in quotes.
fn escape_csv_field(value: &str) -> String {
    let sanitized = if value.starts_with(['=', '+', '@', '-', '\t', '\r', '\n']) {
        format!("\t{}", value)
    } else {
        value.to_string()
    };

    if sanitized.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", sanitized.replace('"', "\"\""))
    } else {
        sanitized
    }
}

fn write_row<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> std::io::Result<()> {
    let line = fields
        .iter()
        .map(|f| escape_csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{}", line)
}

fn write_error(err: std::io::Error) -> AppError {
    tracing::error!("Failed to write user reports: {:?}", err);
    AppError::Export(err.to_string())
}

/// Writes the header (only when there is at least one report) and one row per report.
pub fn write_user_reports<W: Write>(reports: &[UserReport], writer: &mut W) -> Result<(), AppError> {
    if !reports.is_empty() {
        write_row(writer, &UserReport::FIELDS).map_err(write_error)?;
    }
    for report in reports {
        write_row(writer, &report.row()).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)
}

/// Exports the per-user reports to a CSV file, replacing any existing file.
///
/// Open and write failures are returned as `AppError::Export`; a partially
/// written file is left as is.
///
/// Fields are sanitized for spreadsheet use: a value starting with `=`, `+`,
/// `@`, `-` or a control character gets a leading tab, so a user named
/// `-Ann` is exported as a tab followed by `-Ann`. Numeric columns are never affected.
pub fn export_user_reports(reports: &[UserReport], path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        tracing::error!("Failed to open report file {}: {:?}", path.display(), e);
        AppError::Export(format!("{}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    write_user_reports(reports, &mut writer)?;

    tracing::info!(
        rows = reports.len(),
        path = %path.display(),
        "Exported user reports"
    );
    Ok(())
}
