// Response translation (Venice → WebUI)
// Author: kelexine (https://github.com/kelexine)

use crate::models::sdapi::{ModelDescriptor, StyleDescriptor, Txt2ImgResponse};
use crate::models::venice::{ImageGenerateResponse, ModelList, StyleList};
use serde_json::Map;
use tracing::debug;

const IMAGE_MODEL_TYPE: &str = "image";

/// Keep image models only, in Venice's order.
pub fn translate_models(list: ModelList) -> Vec<ModelDescriptor> {
    let total = list.data.len();
    let models: Vec<ModelDescriptor> = list
        .data
        .into_iter()
        .filter(|model| model.model_type == IMAGE_MODEL_TYPE)
        .map(|model| ModelDescriptor::from_remote_id(&model.id))
        .collect();

    debug!("Translated model list: {} of {} entries are image models", models.len(), total);
    models
}

pub fn translate_styles(list: StyleList) -> Vec<StyleDescriptor> {
    list.data
        .into_iter()
        .map(|model_name| StyleDescriptor { model_name })
        .collect()
}

/// Wrap Venice images in the txt2img envelope. `parameters` and `info` stay empty.
pub fn translate_response(resp: ImageGenerateResponse) -> Txt2ImgResponse {
    Txt2ImgResponse {
        images: resp.images,
        parameters: Map::new(),
        info: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_image_models_dropped() {
        let list: ModelList = serde_json::from_value(json!({
            "data": [{ "id": "a", "type": "image" }, { "id": "b", "type": "text" }]
        }))
        .unwrap();

        let models = translate_models(list);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].title, "a");
        assert_eq!(models[0].model_name, "a");
    }

    #[test]
    fn test_model_order_preserved() {
        let list: ModelList = serde_json::from_value(json!({
            "data": [
                { "id": "z-model", "type": "image" },
                { "id": "embed", "type": "embedding" },
                { "id": "a-model", "type": "image" }
            ]
        }))
        .unwrap();

        let names: Vec<_> = translate_models(list).into_iter().map(|m| m.model_name).collect();
        assert_eq!(names, vec!["z-model", "a-model"]);
    }

    #[test]
    fn test_styles() {
        let list: StyleList =
            serde_json::from_value(json!({ "data": ["3D Model", "Anime", "Analog Film"] })).unwrap();

        let styles = translate_styles(list);
        assert_eq!(styles.len(), 3);
        assert_eq!(styles[1].model_name, "Anime");
    }

    #[test]
    fn test_txt2img_envelope() {
        let resp: ImageGenerateResponse =
            serde_json::from_value(json!({ "id": "gen-1", "images": ["aGVsbG8="] })).unwrap();

        let json = serde_json::to_value(translate_response(resp)).unwrap();
        assert_eq!(json, json!({ "images": ["aGVsbG8="], "parameters": {}, "info": "" }));
    }
}
