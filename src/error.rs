// Error taxonomy for a single upload attempt. Every variant is turned
// into a console line by `ui`; none of them abort the process.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// The input path does not exist on disk.
    #[error("'{}' not found", .0.display())]
    NotFound(PathBuf),

    /// Directory mode was asked to walk something that is not a directory.
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The server could not be reached (refused, DNS failure, unreachable).
    #[error("connection error: cannot reach {endpoint}")]
    Connection { endpoint: String },

    /// Any non-200 response. The body is kept as opaque text.
    #[error("upload failed: {status} {body}")]
    Server { status: u16, body: String },

    /// A 200 response whose body is not the expected JSON shape.
    #[error("malformed server response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Other(String),
}
