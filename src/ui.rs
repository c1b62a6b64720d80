// UI layer: turns upload outcomes into the console lines an operator
// reads. Text is built by the `format_*` functions and printed by the
// `print_*` ones. The ✓/✗ marker is colored only on an interactive
// terminal without `NO_COLOR`, so piped output stays plain.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use std::path::Path;

use crate::api::UploadOutcome;
use crate::error::UploadError;
use crate::walker::{DirectoryReport, ExtensionFilter};

pub const SUCCESS_MARK: &str = "✓";
pub const FAILURE_MARK: &str = "✗";

/// Lines describing one upload attempt. The first line carries the
/// marker; the rest are indented details.
pub fn format_outcome(file_path: &Path, outcome: &UploadOutcome) -> Vec<String> {
    match outcome {
        Ok(receipt) => {
            let mut lines = vec![
                format!("Successfully uploaded: {}", receipt.original_name),
                format!("  Saved as: {}", receipt.stored_filename),
                format!("  Size: {} bytes", receipt.size),
            ];
            if let Some(path) = &receipt.path {
                lines.push(format!("  Location: {}", path));
            }
            lines
        }
        Err(err) => format_error(file_path, err),
    }
}

pub fn format_error(file_path: &Path, err: &UploadError) -> Vec<String> {
    match err {
        UploadError::NotFound(_) | UploadError::NotADirectory(_) => {
            vec![format!("Error: {}", err)]
        }
        UploadError::Connection { endpoint } => vec![
            format!("Error: Could not connect to server at {}", endpoint),
            "  Make sure the server is running and the URL is correct.".to_string(),
        ],
        UploadError::Server { status, body } => vec![
            format!("Upload failed ({}): {}", file_path.display(), status),
            format!("  {}", body),
        ],
        UploadError::MalformedResponse(detail) => vec![
            format!("Upload of {} returned a malformed server response", file_path.display()),
            format!("  {}", detail),
        ],
        UploadError::Other(msg) => vec![format!("Error: {}", msg)],
    }
}

pub fn format_found(count: usize, dir: &Path) -> String {
    format!("Found {} file(s) to upload in {}", count, dir.display())
}

pub fn format_no_matches(dir: &Path, filter: &ExtensionFilter) -> String {
    let exts: Vec<&str> = filter.iter().collect();
    format!(
        "No matching files found in {} (extensions: {})",
        dir.display(),
        exts.join(", ")
    )
}

pub fn format_summary(report: &DirectoryReport) -> String {
    format!(
        "{}/{} files uploaded successfully",
        report.succeeded, report.total
    )
}

/// The ✓/✗ marker, styled green/red when `color` is set.
pub fn format_marker(ok: bool, color: bool) -> String {
    match (ok, color) {
        (true, true) => SUCCESS_MARK.green().to_string(),
        (false, true) => FAILURE_MARK.red().to_string(),
        (true, false) => SUCCESS_MARK.to_string(),
        (false, false) => FAILURE_MARK.to_string(),
    }
}

/// One outcome block: the marker on the first line, details unchanged.
pub fn render_block(ok: bool, lines: &[String], color: bool) -> Vec<String> {
    let mut iter = lines.iter();
    let mut block = Vec::with_capacity(lines.len());
    if let Some(first) = iter.next() {
        block.push(format!("{} {}", format_marker(ok, color), first));
    }
    block.extend(iter.cloned());
    block
}

fn use_color() -> bool {
    let no_color = std::env::var_os("NO_COLOR").map_or(false, |v| !v.is_empty());
    !no_color && std::io::stdout().is_tty()
}

pub fn print_outcome(file_path: &Path, outcome: &UploadOutcome) {
    let lines = format_outcome(file_path, outcome);
    print_block(outcome.is_ok(), &lines);
}

pub fn print_error(file_path: &Path, err: &UploadError) {
    print_block(false, &format_error(file_path, err));
}

pub fn print_found(count: usize, dir: &Path) {
    println!("{}", format_found(count, dir));
    println!();
}

pub fn print_no_matches(dir: &Path, filter: &ExtensionFilter) {
    println!("{}", format_no_matches(dir, filter));
}

pub fn print_summary(report: &DirectoryReport) {
    println!();
    print_block(report.all_succeeded(), &[format_summary(report)]);
}

fn print_block(ok: bool, lines: &[String]) {
    for line in render_block(ok, lines, use_color()) {
        println!("{}", line);
    }
}
