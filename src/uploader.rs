use crate::error::UploadError;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::io::{self, Write};
use std::path::Path;
use tokio::fs::File;

pub const UPLOAD_URL: &str = "http://localhost:5000/api/upload";
pub const FILE_FIELD: &str = "file";
const FILE_MIME: &str = "image/png";

/// Raw result of a completed POST. The body is kept as text, unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub status: u16,
    pub body: String,
}

impl UploadOutcome {
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Status Code: {}", self.status)?;
        writeln!(out, "Response: {}", self.body)
    }
}

/// POST the file at `path` to `url` as multipart form data, under the part name `file`.
///
/// `extra_fields` are appended as plain text parts. Any HTTP status is
/// returned as an outcome; only a missing file, an unreadable file, a
/// failed progress write or a transport failure is an error. The file
/// handle lives inside the request body and is dropped once the request
/// finishes, whichever way it ends.
pub async fn upload<W: Write>(
    client: &Client,
    path: &Path,
    url: &str,
    extra_fields: &[(String, String)],
    out: &mut W,
) -> Result<UploadOutcome, UploadError> {
    if !path.exists() {
        return Err(UploadError::FileMissing(path.to_path_buf()));
    }

    writeln!(out, "Uploading {} to {}...", path.display(), url)
        .map_err(UploadError::Output)?;

    let part = file_part(path).await?;
    let mut form = Form::new().part(FILE_FIELD, part);
    for (name, value) in extra_fields {
        form = form.text(name.clone(), value.clone());
    }

    let response = client.post(url)
        .multipart(form)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;
    log::info!("Upload to {} finished with HTTP {}", url, status);

    Ok(UploadOutcome { status, body })
}

async fn file_part(path: &Path) -> Result<Part, UploadError> {
    let open_err = |source: io::Error| {
        if source.kind() == io::ErrorKind::NotFound {
            UploadError::FileMissing(path.to_path_buf())
        } else {
            UploadError::OpenFile { path: path.to_path_buf(), source }
        }
    };

    let file = File::open(path).await.map_err(open_err)?;
    let length = file.metadata().await.map_err(open_err)?.len();

    let file_name = path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FILE_FIELD.to_string());

    log::debug!("Attaching {} ({} bytes) as '{}'", path.display(), length, FILE_FIELD);

    let part = Part::stream_with_length(Body::from(file), length)
        .file_name(file_name)
        .mime_str(FILE_MIME)?;

    Ok(part)
}
