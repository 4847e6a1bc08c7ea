use reqwest::Client;
use std::io::Write;
use std::path::Path;

pub mod error;
pub mod readiness;
pub mod sample_image;
pub mod uploader;

pub use error::UploadError;
pub use readiness::{wait_until_ready, ProbePolicy, Readiness};
pub use sample_image::generate_sample_image;
pub use uploader::{upload, UploadOutcome};

// Trait to abstract the run configuration
pub trait UploaderConfig {
    fn upload_url(&self) -> &str;
    fn output_path(&self) -> &Path;
    fn readiness(&self) -> Readiness;

    fn extra_fields(&self) -> &[(String, String)] {
        &[]
    }
}

/// Wait for the service, write the sample image, upload it and print what happened.
///
/// Readiness and upload failures are printed to `out` and end the run with
/// `Ok`. Only a failure to write the image or to `out` itself is returned.
pub async fn run_smoke_test<T: UploaderConfig, W: Write>(
    client: &Client,
    config: &T,
    out: &mut W,
) -> anyhow::Result<Option<UploadOutcome>> {
    writeln!(out, "Waiting for service to be ready...")?;

    if let Err(e) = wait_until_ready(client, &config.readiness()).await {
        e.report(out)?;
        return Ok(None);
    }

    let file_path = generate_sample_image(config.output_path())?;

    match upload(client, &file_path, config.upload_url(), config.extra_fields(), out).await {
        Ok(outcome) => {
            outcome.report(out)?;
            Ok(Some(outcome))
        }
        Err(UploadError::Output(e)) => Err(e.into()),
        Err(e) => {
            e.report(out)?;
            Ok(None)
        }
    }
}
