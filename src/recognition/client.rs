use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{RecognitionError, RecognitionResult};
use crate::models::{
    AssetUploadRequest, AssetUploadResponse, ChatCompletionRequest, ChatCompletionResponse,
    ChatMessage, OcrRequest,
};

use super::build_vision_prompt;

pub const DEFAULT_ASSETS_URL: &str = "https://api.nvcf.nvidia.com/v2/nvcf/assets";
pub const DEFAULT_OCR_URL: &str = "https://ai.api.nvidia.com/v1/cv/nvidia/ocdrnet";
pub const DEFAULT_VISION_URL: &str =
    "https://ai.api.nvidia.com/v1/vlm/microsoft/phi-3-vision-128k-instruct";

/// Configuration for the NVIDIA recognition endpoints
#[derive(Clone)]
pub struct NvidiaConfig {
    /// API key (from NGC_PERSONAL_API_KEY or NVIDIA_NGC_PERSONAL_API_KEY)
    pub api_key: String,
    /// NVCF asset registration endpoint
    pub assets_url: String,
    /// OCR endpoint; responds with a zip archive
    pub ocr_url: String,
    /// Vision-language chat completion endpoint
    pub vision_url: String,
    /// Timeout for JSON API calls
    pub request_timeout: Duration,
    /// Timeout for the asset byte upload
    pub upload_timeout: Duration,
    /// Maximum tokens in the vision response
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl NvidiaConfig {
    /// Create config from environment variables, loading `.env` first if present
    pub fn from_env() -> RecognitionResult<Self> {
        dotenvy::dotenv().ok();

        let api_key = ["NGC_PERSONAL_API_KEY", "NVIDIA_NGC_PERSONAL_API_KEY"]
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
            .ok_or(RecognitionError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Create with default endpoints and sampling settings
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            assets_url: DEFAULT_ASSETS_URL.to_string(),
            ocr_url: DEFAULT_OCR_URL.to_string(),
            vision_url: DEFAULT_VISION_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(300),
            max_tokens: 1024,
            temperature: 1.0,
            top_p: 0.7,
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

impl std::fmt::Debug for NvidiaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NvidiaConfig")
            .field("api_key", &"<redacted>")
            .field("assets_url", &self.assets_url)
            .field("ocr_url", &self.ocr_url)
            .field("vision_url", &self.vision_url)
            .field("request_timeout", &self.request_timeout)
            .field("upload_timeout", &self.upload_timeout)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .finish()
    }
}

/// Client for NVCF asset upload, OCR, and vision-language inference
pub struct NvidiaClient {
    client: Client,
    config: NvidiaConfig,
}

impl NvidiaClient {
    pub fn new(config: NvidiaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &NvidiaConfig {
        &self.config
    }

    /// Upload image bytes as an NVCF asset and return its id
    pub async fn upload_asset(&self, bytes: Vec<u8>, description: &str) -> RecognitionResult<Uuid> {
        let request = AssetUploadRequest {
            content_type: "image/jpeg".to_string(),
            description: description.to_string(),
        };

        let response = self
            .client
            .post(&self.config.assets_url)
            .header("Authorization", self.config.bearer())
            .header("accept", "application/json")
            .json(&request)
            .timeout(self.config.request_timeout)
            .send()
            .await?;
        let response = check_status(response).await?;
        let asset: AssetUploadResponse = response.json().await?;

        debug!("Uploading {} bytes to asset {}", bytes.len(), asset.asset_id);
        let response = self
            .client
            .put(&asset.upload_url)
            .header("x-amz-meta-nvcf-asset-description", description)
            .header("content-type", "image/jpeg")
            .body(bytes)
            .timeout(self.config.upload_timeout)
            .send()
            .await?;
        check_status(response).await?;

        Uuid::parse_str(&asset.asset_id).map_err(|source| RecognitionError::InvalidAssetId {
            id: asset.asset_id.clone(),
            source,
        })
    }

    /// Run OCR on an uploaded asset; the response body is a zip archive
    pub async fn run_ocr(&self, asset_id: Uuid) -> RecognitionResult<Vec<u8>> {
        let asset = asset_id.to_string();
        let request = OcrRequest {
            image: asset.clone(),
            render_label: false,
        };

        let response = self
            .client
            .post(&self.config.ocr_url)
            .header("Authorization", self.config.bearer())
            .header("NVCF-INPUT-ASSET-REFERENCES", &asset)
            .header("NVCF-FUNCTION-ASSET-IDS", &asset)
            .json(&request)
            .timeout(self.config.request_timeout)
            .send()
            .await?;
        let response = check_status(response).await?;
        let body = response.bytes().await?;

        info!("OCR returned {} bytes for asset {}", body.len(), asset);
        Ok(body.to_vec())
    }

    /// Ask the vision model for "Name, Company" lines describing a base64 image
    pub async fn analyze_image(&self, image_b64: &str) -> RecognitionResult<String> {
        let request = ChatCompletionRequest {
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_vision_prompt(image_b64),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        };

        let response = self
            .client
            .post(&self.config.vision_url)
            .header("Authorization", self.config.bearer())
            .header("accept", "application/json")
            .json(&request)
            .timeout(self.config.request_timeout)
            .send()
            .await?;
        let response = check_status(response).await?;
        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| RecognitionError::MissingContent("no choices in completion".to_string()))
    }
}

/// Map non-success statuses to typed errors, keeping the body for diagnostics
async fn check_status(response: Response) -> RecognitionResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        Err(RecognitionError::Unauthorized { body })
    } else {
        Err(RecognitionError::Api { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = NvidiaConfig::new("key".to_string());
        assert_eq!(config.ocr_url, DEFAULT_OCR_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.upload_timeout, Duration::from_secs(300));
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.top_p, 0.7);
        assert_eq!(config.bearer(), "Bearer key");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = NvidiaConfig::new("secret-key".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
