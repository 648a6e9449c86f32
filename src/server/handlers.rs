// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{ProxyError, Result};
use crate::models::sdapi::{
    default_samplers, GenerationRequest, GenerationSettings, ModelDescriptor, OptionsUpdate,
    ProgressResponse, SamplerDescriptor, StyleDescriptor, Txt2ImgResponse,
};
use crate::translation::{translate_models, translate_request, translate_response, translate_styles};
use axum::{extract::State, Json};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

/// Handler for /sdapi/v1/sd-models
pub async fn sd_models_handler(State(state): State<AppState>) -> Result<Json<Vec<ModelDescriptor>>> {
    let list = state
        .venice_client
        .list_models(state.config.gateway.filter_model_listing)
        .await?;

    Ok(Json(translate_models(list)))
}

/// Handler for /sdapi/v1/samplers
pub async fn samplers_handler() -> Json<Vec<SamplerDescriptor>> {
    Json(default_samplers())
}

/// Handler for /sdapi/v1/sd-vae (Venice style presets)
pub async fn sd_vae_handler(State(state): State<AppState>) -> Result<Json<Vec<StyleDescriptor>>> {
    let list = state.venice_client.list_styles().await?;
    Ok(Json(translate_styles(list)))
}

pub async fn write_options_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<GenerationSettings>> {
    let update: OptionsUpdate = parse_body(&body)?;
    Ok(Json(state.settings.apply(update)))
}

pub async fn read_options_handler(State(state): State<AppState>) -> Json<GenerationSettings> {
    Json(state.settings.get())
}

pub async fn progress_handler() -> Json<ProgressResponse> {
    Json(ProgressResponse::idle())
}

/// Handler for /sdapi/v1/txt2img
pub async fn txt2img_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<Txt2ImgResponse>> {
    let req: GenerationRequest = parse_body(&body)?;
    let model = state.settings.model_checkpoint();

    info!(
        "Received txt2img request: model={}, {}x{}, steps={:?}",
        model, req.width, req.height, req.steps
    );

    // 1. Translate WebUI request to Venice format
    let venice_req = translate_request(req, &model, &state.config.gateway);

    // 2. Call Venice
    let venice_resp = match state.venice_client.generate_image(&venice_req).await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Venice image generation failed: {}", e);
            return Err(e);
        }
    };

    // 3. Wrap images in the WebUI envelope
    Ok(Json(translate_response(venice_resp)))
}

/// Deserialize a JSON body, reporting failures in the WebUI error envelope.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        debug!(
            "Rejected request body (first 500 chars): {}",
            body.chars().take(500).collect::<String>()
        );
        ProxyError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })
}
