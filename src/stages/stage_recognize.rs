use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::error::RecognitionError;
use crate::io::encode_image;
use crate::recognition::{NvidiaClient, read_archive_text};

/// Configuration for text acquisition
#[derive(Debug, Clone)]
pub struct RecognizeConfig {
    /// Maximum retries per image on retryable service failure
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further attempt
    pub retry_backoff: Duration,
    /// Size limit for images sent to the vision model
    pub max_image_kb: usize,
    /// Keep the raw OCR archive next to the CSV output
    pub keep_archives: bool,
}

impl Default for RecognizeConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_backoff: Duration::from_secs(1),
            max_image_kb: crate::io::DEFAULT_MAX_IMAGE_KB,
            keep_archives: false,
        }
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or retries run out
pub async fn with_retries<T, F, Fut>(label: &str, config: &RecognizeConfig, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, RecognitionError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < config.max_retries => {
                attempt += 1;
                let delay = config.retry_backoff * 2u32.saturating_pow(attempt - 1);
                warn!(
                    "{}: {} (retry {} of {} in {:?})",
                    label, e, attempt, config.max_retries, delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e).with_context(|| format!("{} failed", label)),
        }
    }
}

/// Obtain OCR text for one image: upload, run OCR, read the result archive
pub async fn recognize_ocr(
    client: &NvidiaClient,
    image: &Path,
    archive_dir: Option<&Path>,
    config: &RecognizeConfig,
) -> Result<String> {
    let bytes =
        std::fs::read(image).with_context(|| format!("Failed to read image: {:?}", image))?;

    let asset_id = with_retries("Asset upload", config, || {
        client.upload_asset(bytes.clone(), "Input Image")
    })
    .await?;
    info!("Uploaded {:?} as asset {}", image, asset_id);

    let archive = with_retries("OCR", config, || client.run_ocr(asset_id)).await?;

    if let Some(dir) = archive_dir {
        let name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| asset_id.to_string());
        let path = dir.join(format!("{}_output.zip", name));
        std::fs::write(&path, &archive)
            .with_context(|| format!("Failed to write archive: {:?}", path))?;
        info!("Saved OCR archive to {:?}", path);
    }

    let text = read_archive_text(&archive).context("Failed to read OCR archive")?;
    info!(
        "Extracted {} characters of text from {:?}",
        text.chars().count(),
        image
    );
    Ok(text)
}

/// Obtain vision-model text for one image: resize, encode, ask the model
pub async fn recognize_vision(
    client: &NvidiaClient,
    image: &Path,
    config: &RecognizeConfig,
) -> Result<String> {
    let image_b64 = encode_image(image, config.max_image_kb)?;
    with_retries("Vision analysis", config, || client.analyze_image(&image_b64)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast_config(max_retries: u32) -> RecognizeConfig {
        RecognizeConfig {
            max_retries,
            retry_backoff: Duration::from_millis(1),
            ..Default::default()
        }
    }

    fn server_error() -> RecognitionError {
        RecognitionError::Api {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        }
    }

    #[test]
    fn test_recognize_config_default() {
        let config = RecognizeConfig::default();
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.max_image_kb, 180);
        assert!(!config.keep_archives);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = Cell::new(0);
        let result = with_retries("op", &fast_config(2), || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { if n < 3 { Err(server_error()) } else { Ok(n) } }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = Cell::new(0);
        let result: Result<()> = with_retries("op", &fast_config(1), || {
            calls.set(calls.get() + 1);
            async { Err(server_error()) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_fails_fast() {
        let calls = Cell::new(0);
        let result: Result<()> = with_retries("op", &fast_config(5), || {
            calls.set(calls.get() + 1);
            async {
                Err(RecognitionError::Unauthorized {
                    body: String::new(),
                })
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
