/// Display-facing data records
///
/// Pure data consumed by preview components: this layer constructs them but
/// never renders or mutates them.
use serde::{Deserialize, Serialize};

/// Everything a preview component needs to show an image payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewDescriptor {
    /// The image as a base64 data URI.
    pub base64: String,
    /// Display filename.
    pub filename: String,
    /// Decoded payload size in bytes.
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// MIME type, serialized as `type` for display layers.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

/// Outcome record for a compression attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompressResult {
    pub fn ok(url: impl Into<String>) -> Self {
        Self {
            success: true,
            url: Some(url.into()),
            error: None,
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            url: None,
            error: Some(error.to_string()),
        }
    }
}

impl From<crate::error::Result<String>> for CompressResult {
    fn from(result: crate::error::Result<String>) -> Self {
        match result {
            Ok(url) => CompressResult::ok(url),
            Err(e) => CompressResult::failure(e),
        }
    }
}
