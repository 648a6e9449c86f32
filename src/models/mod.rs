//! Data models for the WebUI and Venice APIs.
//!
//! This module contains the type definitions for request/response bodies used by:
//! - The inbound Stable Diffusion WebUI compatible API (`sdapi`)
//! - The upstream Venice image API (`venice`)

// Author: kelexine (https://github.com/kelexine)

pub mod sdapi;
pub mod venice;

pub use sdapi::{
    GenerationRequest, GenerationSettings, ModelDescriptor, OptionsUpdate, ProgressResponse,
    SamplerDescriptor, StyleDescriptor, Txt2ImgResponse,
};
pub use venice::{ImageGenerateRequest, ImageGenerateResponse, ModelList, StyleList};
