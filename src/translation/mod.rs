// Translation module - WebUI ↔ Venice API translation
// Author: kelexine (https://github.com/kelexine)

pub mod request;
pub mod response;

pub use request::translate_request;
pub use response::{translate_models, translate_response, translate_styles};
