use serde::{Deserialize, Serialize};

/// Request body for registering a new asset with NVCF
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUploadRequest {
    pub content_type: String,
    pub description: String,
}

/// Response from the asset registration endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUploadResponse {
    /// Pre-signed URL the asset bytes are PUT to
    pub upload_url: String,
    /// Asset identifier referenced by later inference calls
    pub asset_id: String,
}

/// Request body for the OCR (ocdrnet) endpoint
#[derive(Debug, Clone, Serialize)]
pub struct OcrRequest {
    /// Asset id as a string
    pub image: String,
    pub render_label: bool,
}

/// Chat completion request sent to the vision-language model
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion response; only the fields the pipeline reads
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatCompletionResponse {
    /// Text content of the first choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_asset_response() {
        let json = r#"{"uploadUrl": "https://s3.example/upload", "assetId": "0d1c6a4e-3a1c-4a51-9a4e-0c2b7f0f1e11"}"#;
        let response: AssetUploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.upload_url, "https://s3.example/upload");
        assert_eq!(response.asset_id, "0d1c6a4e-3a1c-4a51-9a4e-0c2b7f0f1e11");
    }

    #[test]
    fn test_asset_request_is_camel_case() {
        let request = AssetUploadRequest {
            content_type: "image/jpeg".to_string(),
            description: "Input Image".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contentType"], "image/jpeg");
        assert_eq!(value["description"], "Input Image");
    }

    #[test]
    fn test_first_content() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Alice Jones, Widget Co"}}
            ]
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_content(), Some("Alice Jones, Widget Co"));

        let empty: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_content(), None);
    }
}
