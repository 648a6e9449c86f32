// Stable Diffusion WebUI (`/sdapi/v1`) API types
// Author: kelexine (https://github.com/kelexine)

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder hashes reported for every remote model.
pub const PLACEHOLDER_HASH: &str = "8888888888";
pub const PLACEHOLDER_SHA256: &str =
    "8888888888888888888888888888888888888888888888888888888888888888";

/// Process-wide generation settings exposed through `/sdapi/v1/options`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationSettings {
    pub sd_model_checkpoint: String,
    pub samples_format: String,
}

impl GenerationSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            sd_model_checkpoint: model.into(),
            samples_format: "png".to_string(),
        }
    }
}

/// Body of `POST /sdapi/v1/options`. WebUI clients send the whole options
/// blob; everything but the known keys is dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsUpdate {
    #[serde(default)]
    pub sd_model_checkpoint: Option<String>,
    #[serde(default)]
    pub samples_format: Option<String>,
}

/// Body of `POST /sdapi/v1/txt2img`.
///
/// `steps` and `seed` stay optional so the gateway can apply its configured
/// defaults. Integer fields also accept whole floats (`1024.0`) and numeric
/// strings (`"20"`), which several WebUI clients send.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: String,
    #[serde(default, deserialize_with = "lenient_opt_int")]
    pub steps: Option<u32>,
    #[serde(default = "default_cfg_scale")]
    pub cfg_scale: f64,
    #[serde(default, deserialize_with = "lenient_opt_int")]
    pub seed: Option<i64>,
    #[serde(default = "default_dimension", deserialize_with = "lenient_int")]
    pub width: u32,
    #[serde(default = "default_dimension", deserialize_with = "lenient_int")]
    pub height: u32,
    #[serde(default)]
    pub override_settings: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDescriptor {
    pub title: String,
    pub model_name: String,
    pub hash: String,
    pub sha256: String,
    pub config: Option<String>,
}

impl ModelDescriptor {
    pub fn from_remote_id(id: &str) -> Self {
        Self {
            title: id.to_string(),
            model_name: id.to_string(),
            hash: PLACEHOLDER_HASH.to_string(),
            sha256: PLACEHOLDER_SHA256.to_string(),
            config: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplerDescriptor {
    pub name: String,
    pub aliases: Vec<String>,
    pub options: Map<String, Value>,
}

/// The only sampler the shim advertises.
pub fn default_samplers() -> Vec<SamplerDescriptor> {
    vec![SamplerDescriptor {
        name: "Euler".to_string(),
        aliases: vec!["euler".to_string()],
        options: Map::new(),
    }]
}

/// Venice style presets are surfaced to WebUI clients as VAEs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleDescriptor {
    pub model_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressState {
    pub job_count: u32,
}

/// `/sdapi/v1/progress` body. There is no job tracking, so this is always idle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressResponse {
    pub progress: f64,
    pub state: ProgressState,
}

impl ProgressResponse {
    pub fn idle() -> Self {
        Self {
            progress: 0.0,
            state: ProgressState { job_count: 0 },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Txt2ImgResponse {
    pub images: Vec<Value>,
    /// Always empty; effective parameters are not echoed back.
    pub parameters: Map<String, Value>,
    pub info: String,
}

/// An integer as loosely typed clients send it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseInt {
    fn as_i64(&self) -> Option<i64> {
        match self {
            LooseInt::Int(n) => Some(*n),
            LooseInt::Float(f) => whole_float(*f),
            LooseInt::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_float))
            }
        }
    }

    fn coerce<T: TryFrom<i64>, E: de::Error>(self) -> Result<T, E> {
        self.as_i64()
            .and_then(|n| T::try_from(n).ok())
            .ok_or_else(|| E::custom(format!("invalid integer value: {:?}", self)))
    }
}

fn whole_float(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64)
        .then_some(f as i64)
}

fn lenient_int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    LooseInt::deserialize(deserializer)?.coerce()
}

fn lenient_opt_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    Option::<LooseInt>::deserialize(deserializer)?
        .map(LooseInt::coerce)
        .transpose()
}

fn default_cfg_scale() -> f64 {
    7.0
}

fn default_dimension() -> u32 {
    1024
}
