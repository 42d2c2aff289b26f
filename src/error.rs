use thiserror::Error;

/// Failures at the recognition-service boundary
///
/// The text pipeline itself never fails; these only decide whether a document's
/// text could be obtained at all.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// No API key in the environment
    #[error("NVIDIA API key not found; set NGC_PERSONAL_API_KEY or NVIDIA_NGC_PERSONAL_API_KEY")]
    MissingApiKey,

    /// The service rejected the credentials (HTTP 401)
    #[error("Unauthorized: check your NVIDIA API key ({body})")]
    Unauthorized { body: String },

    /// Any other non-success status
    #[error("NVIDIA API error: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response parsed but carried no usable content
    #[error("Response contained no content: {0}")]
    MissingContent(String),

    /// The asset id returned by the service is not a UUID
    #[error("Invalid asset id '{id}': {source}")]
    InvalidAssetId {
        id: String,
        #[source]
        source: uuid::Error,
    },

    /// The OCR result archive could not be read
    #[error("Failed to read result archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Connection, timeout, or body decoding failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl RecognitionError {
    /// Whether retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            RecognitionError::Http(_) => true,
            RecognitionError::Api { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

pub type RecognitionResult<T> = std::result::Result<T, RecognitionError>;
