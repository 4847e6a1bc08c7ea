use anyhow::Result;
use image::Rgb;
use std::fs;
use tempfile::tempdir;
use upload_smoke_lib::sample_image::{generate_sample_image, HEIGHT, WIDTH};

#[test]
fn test_sample_image_dimensions() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("sample_text.png");

    let written = generate_sample_image(&path)?;
    assert_eq!(written, path);
    assert!(path.exists());

    let img = image::open(&path)?.to_rgb8();
    assert_eq!(img.dimensions(), (200, 100));
    assert_eq!((WIDTH, HEIGHT), (200, 100));

    // Corners stay background, the text row has ink
    assert_eq!(*img.get_pixel(0, 0), Rgb([255, 255, 255]));
    assert_eq!(*img.get_pixel(199, 99), Rgb([255, 255, 255]));
    let black = img.enumerate_pixels()
        .filter(|(_, y, p)| (10..18).contains(y) && **p == Rgb([0, 0, 0]))
        .count();
    assert!(black > 0, "expected text pixels in rows 10..18");

    Ok(())
}

#[test]
fn test_sample_image_is_deterministic_and_overwrites() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("sample_text.png");

    fs::write(&path, "stale content")?;
    generate_sample_image(&path)?;
    let first = fs::read(&path)?;
    assert_ne!(first, b"stale content");

    generate_sample_image(&path)?;
    let second = fs::read(&path)?;
    assert_eq!(first, second, "two runs should write identical bytes");

    Ok(())
}

#[test]
fn test_sample_image_into_missing_directory_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("no_such_dir").join("sample_text.png");

    let err = generate_sample_image(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to write sample image"));
}
