use std::io::{self, Write};
use std::path::PathBuf;

/// Everything that can stop an upload run short of a response.
///
/// Non-2xx responses are not errors; they come back as an
/// [`UploadOutcome`](crate::uploader::UploadOutcome) and are printed as-is.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File {} not found.", .0.display())]
    FileMissing(PathBuf),

    #[error("failed to open {}: {}", .path.display(), .source)]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to write progress output: {0}")]
    Output(#[source] io::Error),

    #[error("service at {url} not ready after {attempts} attempts")]
    NotReady { url: String, attempts: u32 },
}

impl UploadError {
    /// Print the error the way the console contract expects: the missing-file
    /// message stands alone, everything else is prefixed with `Error:`.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            UploadError::FileMissing(_) => writeln!(out, "{}", self),
            _ => writeln!(out, "Error: {}", self),
        }
    }
}
