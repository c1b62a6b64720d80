// Library root
// -----------
// This crate exposes a small library surface for the uploader CLI. The
// binary (`main.rs`) only parses arguments and calls `cli::run`.
//
// Module responsibilities:
// - `api`: HTTP interaction with the Walk Report server (one multipart
//   POST per file) and classification of the response.
// - `walker`: Non-recursive directory scan with an extension allow-list,
//   feeding files to `api` one at a time.
// - `ui`: Console reporting (✓/✗ lines, directory tally).
// - `cli`: Argument parsing and the file-or-directory dispatch.
// - `error`: The error taxonomy shared by the modules above.
pub mod api;
pub mod cli;
pub mod error;
pub mod ui;
pub mod walker;
