use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;
use upload_smoke_lib::sample_image::{generate_sample_image, SAMPLE_IMAGE_PATH};

/// Write the sample image without uploading it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Where to write the generated sample image
    #[arg(long, env("SAMPLE_IMAGE_PATH"), default_value = SAMPLE_IMAGE_PATH)]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let written = generate_sample_image(&args.output)?;
    println!("Created sample image at {}", written.display());

    Ok(())
}
