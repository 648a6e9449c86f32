//! Shared, in-memory generation settings.
//!
//! The WebUI API lets a client pick the active checkpoint through
//! `/sdapi/v1/options`; that choice must be visible to every later txt2img
//! call. [`SettingsStore`] is that single piece of mutable state. It is
//! cheap to clone and lives in the server's `AppState`.
//!
//! Concurrent writers are last-write-wins.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::models::{GenerationSettings, OptionsUpdate};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct SettingsStore {
    inner: Arc<RwLock<GenerationSettings>>,
}

impl SettingsStore {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Snapshot of the current settings.
    pub fn get(&self) -> GenerationSettings {
        self.inner.read().clone()
    }

    pub fn model_checkpoint(&self) -> String {
        self.inner.read().sd_model_checkpoint.clone()
    }

    /// Apply an options write and return the updated record.
    ///
    /// Only the checkpoint is writable. A missing or blank checkpoint keeps
    /// the current one.
    pub fn apply(&self, update: OptionsUpdate) -> GenerationSettings {
        let mut settings = self.inner.write();

        match update.sd_model_checkpoint {
            Some(model) if !model.trim().is_empty() => {
                info!(
                    "Model checkpoint changed: {} -> {}",
                    settings.sd_model_checkpoint, model
                );
                settings.sd_model_checkpoint = model;
            }
            _ => debug!("Options write without a checkpoint, keeping {}", settings.sd_model_checkpoint),
        }

        settings.clone()
    }
}
