use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use reqwest::Client;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use upload_smoke_lib::{
    run_smoke_test,
    sample_image::SAMPLE_IMAGE_PATH,
    uploader::UPLOAD_URL,
    ProbePolicy,
    Readiness,
    UploaderConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Upload endpoint to POST the sample image to
    #[arg(long, env("UPLOAD_URL"), default_value = UPLOAD_URL)]
    url: String,

    /// Where to write the generated sample image
    #[arg(long, env("SAMPLE_IMAGE_PATH"), default_value = SAMPLE_IMAGE_PATH)]
    output: PathBuf,

    /// Seconds to wait before uploading when no health URL is given
    #[arg(long, env("STARTUP_DELAY_SECS"), default_value = "5")]
    startup_delay_secs: u64,

    /// Health endpoint to poll instead of sleeping
    #[arg(long, env("HEALTH_URL"))]
    health_url: Option<String>,

    /// Maximum number of health probes
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    probe_attempts: u32,

    /// Delay after the first failed probe, doubled after each further failure
    #[arg(long, default_value = "500")]
    probe_interval_ms: u64,

    /// Timeout for the upload request
    #[arg(long, env("UPLOAD_TIMEOUT_SECS"), default_value = "300")]
    timeout_secs: u64,

    /// Extra form field sent alongside the file, as NAME=VALUE (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

impl UploaderConfig for Args {
    fn upload_url(&self) -> &str {
        &self.url
    }

    fn output_path(&self) -> &Path {
        &self.output
    }

    fn readiness(&self) -> Readiness {
        match &self.health_url {
            Some(url) => Readiness::Probe(ProbePolicy {
                max_attempts: self.probe_attempts,
                initial_backoff: Duration::from_millis(self.probe_interval_ms),
                ..ProbePolicy::new(url.clone())
            }),
            None => Readiness::Delay(Duration::from_secs(self.startup_delay_secs)),
        }
    }

    fn extra_fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let (name, value) = s.split_once('=')
        .ok_or_else(|| format!("invalid field '{}': expected NAME=VALUE", s))?;
    if name.is_empty() {
        return Err(format!("invalid field '{}': empty name", s));
    }
    Ok((name.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    log::debug!("Args: {:?}", args);

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    let mut stdout = io::stdout().lock();
    run_smoke_test(&client, &args, &mut stdout).await?;

    Ok(())
}
