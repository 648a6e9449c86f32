// Request translation (WebUI txt2img → Venice image/generate)
// Author: kelexine (https://github.com/kelexine)

use crate::config::GatewayConfig;
use crate::models::sdapi::GenerationRequest;
use crate::models::venice::ImageGenerateRequest;
use serde_json::Value;
use tracing::debug;

/// `override_settings` key WebUI clients use to pick a VAE, reused for style presets.
pub const STYLE_PRESET_KEY: &str = "sd_vae";

/// Translate a WebUI txt2img request into a Venice generate request for `model`.
pub fn translate_request(
    req: GenerationRequest,
    model: &str,
    gateway: &GatewayConfig,
) -> ImageGenerateRequest {
    let (width, height) = if gateway.enforce_dimension_cutout {
        (
            clamp_dimension(req.width, gateway.max_dimension),
            clamp_dimension(req.height, gateway.max_dimension),
        )
    } else {
        (req.width, req.height)
    };

    if (width, height) != (req.width, req.height) {
        debug!(
            "Clamping dimensions from {}x{} to {}x{}",
            req.width, req.height, width, height
        );
    }

    let style_preset = if gateway.support_style_preset {
        extract_style_preset(req.override_settings.as_ref())
    } else {
        None
    };

    let prompt = truncate_chars(&req.prompt, gateway.prompt_cutout);
    let negative_prompt = truncate_chars(&req.negative_prompt, gateway.prompt_cutout);

    debug!(
        "Translated txt2img request: model={}, {}x{}, steps={:?}, style_preset={:?}",
        model, width, height, req.steps, style_preset
    );

    ImageGenerateRequest {
        model: model.to_string(),
        prompt,
        negative_prompt,
        width,
        height,
        steps: req.steps.unwrap_or(gateway.default_steps),
        hide_watermark: true,
        return_binary: false,
        style_preset,
    }
}

pub fn clamp_dimension(value: u32, max: u32) -> u32 {
    value.min(max)
}

/// First `max` characters of `text`. Counts chars, so multi-byte input is never split.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn extract_style_preset(overrides: Option<&serde_json::Map<String, Value>>) -> Option<Value> {
    overrides?
        .get(STYLE_PRESET_KEY)
        .filter(|value| is_truthy(value))
        .cloned()
}

/// Truthiness as WebUI clients understand it: null, false, 0, and empty values are "unset".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn request(body: Value) -> GenerationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_basic_translation() {
        let req = request(json!({
            "prompt": "a lighthouse at dusk",
            "negative_prompt": "blurry",
            "steps": 20,
            "width": 768,
            "height": 512
        }));

        let out = translate_request(req, "fluently-xl", &GatewayConfig::default());

        assert_eq!(out.model, "fluently-xl");
        assert_eq!(out.prompt, "a lighthouse at dusk");
        assert_eq!(out.negative_prompt, "blurry");
        assert_eq!((out.width, out.height, out.steps), (768, 512, 20));
        assert!(out.hide_watermark);
        assert!(!out.return_binary);
        assert!(out.style_preset.is_none());
    }

    #[test]
    fn test_dimensions_are_clamped() {
        let req = request(json!({ "prompt": "x", "width": 2048, "height": 1280 }));
        let out = translate_request(req, "m", &GatewayConfig::default());

        assert_eq!((out.width, out.height), (1280, 1280));
    }

    #[test]
    fn test_legacy_does_not_clamp() {
        let req = request(json!({ "prompt": "x", "width": 2048, "height": 4096 }));
        let out = translate_request(req, "m", &GatewayConfig::legacy());

        assert_eq!((out.width, out.height), (2048, 4096));
    }

    #[test]
    fn test_default_steps_follow_gateway() {
        let out = translate_request(request(json!({ "prompt": "x" })), "m", &GatewayConfig::default());
        assert_eq!(out.steps, 30);

        let out = translate_request(request(json!({ "prompt": "x" })), "m", &GatewayConfig::legacy());
        assert_eq!(out.steps, 25);
    }

    #[test]
    fn test_prompt_truncation() {
        let long = "a".repeat(1500);
        let req = request(json!({ "prompt": long, "negative_prompt": long }));
        let out = translate_request(req, "m", &GatewayConfig::default());

        assert_eq!(out.prompt.len(), 1024);
        assert_eq!(out.negative_prompt.len(), 1024);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let text = "é".repeat(1030);
        let truncated = truncate_chars(&text, 1024);

        assert_eq!(truncated.chars().count(), 1024);
        assert_eq!(truncated, "é".repeat(1024));
    }

    #[test]
    fn test_style_preset_forwarded() {
        let req = request(json!({ "prompt": "x", "override_settings": { "sd_vae": "anime" } }));
        let out = translate_request(req, "m", &GatewayConfig::default());

        assert_eq!(out.style_preset, Some(json!("anime")));
    }

    #[test]
    fn test_falsy_style_preset_dropped() {
        for value in [json!(""), json!(null), json!(false), json!(0)] {
            let req = request(json!({ "prompt": "x", "override_settings": { "sd_vae": value } }));
            let out = translate_request(req, "m", &GatewayConfig::default());
            assert!(out.style_preset.is_none());
        }

        let req = request(json!({ "prompt": "x", "override_settings": { "CLIP_stop_at_last_layers": 2 } }));
        let out = translate_request(req, "m", &GatewayConfig::default());
        assert!(out.style_preset.is_none());
    }

    #[test]
    fn test_legacy_ignores_style_preset() {
        let req = request(json!({ "prompt": "x", "override_settings": { "sd_vae": "anime" } }));
        let out = translate_request(req, "m", &GatewayConfig::legacy());

        assert!(out.style_preset.is_none());
    }

    proptest! {
        #[test]
        fn prop_clamp_caps_at_max(value in 0u32..10_000) {
            let clamped = clamp_dimension(value, 1280);
            prop_assert!(clamped <= 1280);
            if value <= 1280 {
                prop_assert_eq!(clamped, value);
            } else {
                prop_assert_eq!(clamped, 1280);
            }
        }

        #[test]
        fn prop_truncate_is_prefix(text in "\\PC{0,2000}") {
            let truncated = truncate_chars(&text, 1024);
            prop_assert!(text.starts_with(&truncated));
            prop_assert_eq!(truncated.chars().count(), text.chars().count().min(1024));
        }
    }
}
