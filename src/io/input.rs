use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, imageops::FilterType};
use tracing::debug;

/// Extensions accepted by the OCR pipeline
pub const OCR_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Extensions accepted by the vision pipeline
pub const VISION_IMAGE_EXTENSIONS: [&str; 1] = ["jpg"];

/// Default upper bound for an encoded image sent to the vision model
pub const DEFAULT_MAX_IMAGE_KB: usize = 180;

/// List regular files in `dir` whose extension matches (case-insensitive), sorted by name
pub fn list_images(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {:?}", dir))?
            .path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)));
        if matches {
            images.push(path);
        }
    }

    images.sort();
    Ok(images)
}

/// Decode bytes as UTF-8, replacing invalid sequences instead of failing
pub fn decode_text_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read a text file, tolerating invalid UTF-8
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    Ok(decode_text_lossy(&bytes))
}

/// Re-encode an image, shrinking it by 10% per side until it fits in `max_kb`
///
/// The source format is kept. Fails if the image cannot be decoded or if it
/// still exceeds the limit once a side reaches one pixel.
pub fn resize_to_limit(bytes: &[u8], max_kb: usize) -> Result<Vec<u8>> {
    let format = image::guess_format(bytes).context("Unrecognized image format")?;
    let mut img = image::load_from_memory_with_format(bytes, format)
        .context("Failed to decode image")?;
    let limit = max_kb * 1024;

    loop {
        let encoded = encode_as(&img, format)?;
        if encoded.len() <= limit {
            debug!(
                "Encoded {}x{} image at {} bytes",
                img.width(),
                img.height(),
                encoded.len()
            );
            return Ok(encoded);
        }

        if img.width() <= 1 || img.height() <= 1 {
            anyhow::bail!(
                "Image cannot be reduced below {} KB (currently {} bytes)",
                max_kb,
                encoded.len()
            );
        }

        let width = ((img.width() as f64 * 0.9) as u32).max(1);
        let height = ((img.height() as f64 * 0.9) as u32).max(1);
        img = img.resize_exact(width, height, FilterType::Lanczos3);
    }
}

fn encode_as(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    // JPEG has no alpha channel
    let img = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img.clone()
    };
    img.write_to(&mut Cursor::new(&mut buf), format)
        .context("Failed to encode image")?;
    Ok(buf)
}

/// Load, shrink to `max_kb`, and base64-encode an image file
pub fn encode_image(path: &Path, max_kb: usize) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read image: {:?}", path))?;
    let resized = resize_to_limit(&bytes, max_kb)
        .with_context(|| format!("Failed to resize image: {:?}", path))?;
    Ok(STANDARD.encode(resized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn noisy_png(width: u32, height: u32) -> Vec<u8> {
        // xorshift noise so PNG compression cannot shrink it much
        let mut state = 0x9e37_79b9_7f4a_7c15u64;
        let img = RgbImage::from_fn(width, height, |_, _| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let [r, g, b, ..] = state.to_le_bytes();
            Rgb([r, g, b])
        });
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_list_images_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.JPG", "a.png", "c.jpeg", "notes.txt", "d.gif"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.jpg")).unwrap();

        let images = list_images(dir.path(), &OCR_IMAGE_EXTENSIONS).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPG", "c.jpeg"]);

        let vision = list_images(dir.path(), &VISION_IMAGE_EXTENSIONS).unwrap();
        assert_eq!(vision.len(), 1);
    }

    #[test]
    fn test_decode_text_lossy() {
        let bytes = b"Jane Doe\n\xff\xfeAcme Corp.";
        let text = decode_text_lossy(bytes);
        assert!(text.starts_with("Jane Doe\n"));
        assert!(text.ends_with("Acme Corp."));
        assert!(text.contains('\u{fffd}'));
    }

    #[test]
    fn test_small_image_is_unchanged_in_size() {
        let png = noisy_png(8, 8);
        let resized = resize_to_limit(&png, 180).unwrap();
        let img = image::load_from_memory(&resized).unwrap();
        assert_eq!((img.width(), img.height()), (8, 8));
    }

    #[test]
    fn test_large_image_is_shrunk() {
        let png = noisy_png(400, 400);
        assert!(png.len() > 50 * 1024);

        let resized = resize_to_limit(&png, 50).unwrap();
        assert!(resized.len() <= 50 * 1024);
        let img = image::load_from_memory(&resized).unwrap();
        assert!(img.width() < 400);
    }

    #[test]
    fn test_encode_image_is_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        std::fs::write(&path, noisy_png(4, 4)).unwrap();

        let encoded = encode_image(&path, DEFAULT_MAX_IMAGE_KB).unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert!(image::load_from_memory(&decoded).is_ok());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(resize_to_limit(b"not an image", 180).is_err());
    }
}
