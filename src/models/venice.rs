// Venice API types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /models` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    pub data: Vec<VeniceModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VeniceModel {
    pub id: String,
    #[serde(rename = "type")]
    pub model_type: String,
}

/// `GET /image/styles` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleList {
    pub data: Vec<String>,
}

/// `POST /image/generate` request body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageGenerateRequest {
    pub model: String,
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub hide_watermark: bool,
    pub return_binary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<Value>,
}

/// `POST /image/generate` response body. Images are base64 strings, kept opaque.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerateResponse {
    pub images: Vec<Value>,
}
