// Uploader: a small blocking HTTP client that posts one file at a time
// to the Walk Report server's `/api/upload` endpoint and classifies the
// response into an `UploadOutcome`.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::Path;

use crate::error::UploadError;

/// Server used when the caller does not pass one. Earlier revisions of
/// the tool defaulted to port 3000; callers should not rely on either.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5001";

/// Path appended to the server base URL.
pub const UPLOAD_PATH: &str = "/api/upload";

/// Name of the multipart field the server reads the file from.
pub const FILE_FIELD: &str = "file";

/// JSON body returned by the server on HTTP 200.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub original_name: String,
    /// Name the server stored the file under.
    #[serde(rename = "filename")]
    pub stored_filename: String,
    pub size: u64,
    /// Public path of the stored file, e.g. `/uploads/<filename>`.
    #[serde(default)]
    pub path: Option<String>,
}

/// Result of one upload attempt. Only consumed for reporting and counting.
pub type UploadOutcome = std::result::Result<UploadReceipt, UploadError>;

/// Blocking client bound to one server base URL. Building it once and
/// reusing it for every file of a directory run keeps one connection pool.
#[derive(Clone)]
pub struct UploadClient {
    client: Client,
    base_url: String,
}

impl UploadClient {
    /// Create a client for `base_url`. Trailing slashes are dropped so the
    /// upload URL never contains `//api/upload`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(UploadClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, UPLOAD_PATH)
    }

    /// Upload a single file using multipart/form-data.
    ///
    /// A missing path fails with `NotFound` before any request is made.
    /// The whole file is read into memory and the handle is closed before
    /// the request is sent.
    pub fn upload_file(&self, file_path: &Path) -> UploadOutcome {
        let outcome = self.send_file(file_path);
        if let Err(err) = &outcome {
            warn!("Upload of {} failed: {}", file_path.display(), err);
        }
        outcome
    }

    fn send_file(&self, file_path: &Path) -> UploadOutcome {
        if !file_path.exists() {
            return Err(UploadError::NotFound(file_path.to_path_buf()));
        }

        let form = build_form(file_path)?;
        let url = self.upload_url();
        debug!("POST {} ({})", url, file_path.display());

        let res = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| self.classify_transport_error(e))?;

        let status = res.status();
        let body = res
            .text()
            .map_err(|e| self.classify_transport_error(e))?;

        if status != StatusCode::OK {
            return Err(UploadError::Server {
                status: status.as_u16(),
                body,
            });
        }

        parse_receipt(&body)
    }

    fn classify_transport_error(&self, err: reqwest::Error) -> UploadError {
        if err.is_connect() {
            debug!("Connect error to {}: {}", self.base_url, err);
            UploadError::Connection {
                endpoint: self.base_url.clone(),
            }
        } else {
            UploadError::Other(err.to_string())
        }
    }
}

/// Decode a 200 response body. Anything that is not the expected JSON
/// shape becomes `MalformedResponse` instead of a crash.
pub fn parse_receipt(body: &str) -> UploadOutcome {
    serde_json::from_str(body).map_err(|e| UploadError::MalformedResponse(e.to_string()))
}

fn build_form(file_path: &Path) -> Result<multipart::Form, UploadError> {
    let file_name = file_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| {
            UploadError::Other(format!("'{}' has no file name", file_path.display()))
        })?;

    let data = std::fs::read(file_path)
        .map_err(|e| UploadError::Other(format!("Failed to read {}: {}", file_path.display(), e)))?;

    let mime = mime_for(&data);
    let part = multipart::Part::bytes(data)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| UploadError::Other(e.to_string()))?;

    Ok(multipart::Form::new().part(FILE_FIELD, part))
}

/// MIME type for the multipart part, sniffed from the file's magic bytes.
fn mime_for(data: &[u8]) -> &'static str {
    infer::get(data)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream")
}
