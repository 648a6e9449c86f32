// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    progress_handler, read_options_handler, samplers_handler, sd_models_handler, sd_vae_handler,
    txt2img_handler, write_options_handler,
};
use crate::config::AppConfig;
use crate::error::Result;
use crate::settings::SettingsStore;
use crate::venice::VeniceClient;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub venice_client: Arc<VeniceClient>,
    pub settings: SettingsStore,
}

pub fn create_router(
    config: AppConfig,
    venice_client: VeniceClient,
    settings: SettingsStore,
) -> Result<Router> {
    let max_body_bytes = config.server.max_body_bytes;
    let support_style_preset = config.gateway.support_style_preset;

    let state = AppState {
        config,
        venice_client: Arc::new(venice_client),
        settings,
    };

    let mut app = Router::new()
        .route("/sdapi/v1/sd-models", get(sd_models_handler))
        .route("/sdapi/v1/samplers", get(samplers_handler))
        .route(
            "/sdapi/v1/options",
            get(read_options_handler).post(write_options_handler),
        )
        .route("/sdapi/v1/progress", get(progress_handler))
        .route("/sdapi/v1/txt2img", post(txt2img_handler));

    // Style presets double as the VAE list; the legacy shim had neither
    if support_style_preset {
        app = app.route("/sdapi/v1/sd-vae", get(sd_vae_handler));
    }

    let app = app
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        // Echo the client's x-request-id, minting a UUID when absent
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state);

    Ok(app)
}
