//! Command-line arguments and the file/directory dispatch.

use anyhow::Result;
use clap::Parser;
use log::debug;
use std::path::{Path, PathBuf};

use crate::api::{UploadClient, DEFAULT_SERVER_URL};
use crate::ui;
use crate::walker::{self, ExtensionFilter};

/// Upload image files to a Walk Report server
#[derive(Parser, Debug, Clone)]
#[command(name = "walkreport-upload")]
#[command(
    about = "Upload image files to a Walk Report server",
    after_help = "Example: walkreport-upload /home/pi/image.jpg http://192.168.1.100:5001"
)]
pub struct Args {
    /// File or directory to upload
    pub path: Option<PathBuf>,

    /// Server base URL
    #[arg(default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Comma-separated extensions uploaded in directory mode (e.g. jpg,png)
    #[arg(short, long, value_delimiter = ',')]
    pub ext: Vec<String>,

    /// Exit with status 1 when any upload fails
    #[arg(long)]
    pub fail_on_error: bool,
}

impl Args {
    pub fn extension_filter(&self) -> ExtensionFilter {
        if self.ext.is_empty() {
            ExtensionFilter::default()
        } else {
            ExtensionFilter::new(&self.ext)
        }
    }
}

/// Upload `path` (a file or a directory) to `args.server_url`. Returns
/// whether every attempted upload succeeded; failures are already printed.
pub fn run(path: &Path, args: &Args) -> Result<bool> {
    let filter = args.extension_filter();
    if filter.is_empty() {
        anyhow::bail!("--ext did not contain any usable extension");
    }

    let client = UploadClient::new(&args.server_url)?;

    if path.is_dir() {
        debug!("{} is a directory", path.display());
        match walker::upload_directory(&client, path, &filter) {
            Ok(report) => Ok(report.all_succeeded()),
            Err(err) => {
                ui::print_error(path, &err);
                Ok(false)
            }
        }
    } else {
        let outcome = client.upload_file(path);
        ui::print_outcome(path, &outcome);
        Ok(outcome.is_ok())
    }
}

/// Process exit status for a finished run. Failed uploads only change it
/// when `--fail-on-error` was given.
pub fn exit_code(all_succeeded: bool, args: &Args) -> i32 {
    if args.fail_on_error && !all_succeeded {
        1
    } else {
        0
    }
}
