//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and runs backend operations.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `content`: Content list operations (fetch, search, add, delete, share)
//! - `auth`: Routing, sign in / sign up / logout and session changes

mod input;
mod content;
mod auth;

use std::sync::Arc;
use std::time::Duration;

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::{AppModel, BrainApi};
use crate::session::Session;

/// Tunables the controller reads from the config
#[derive(Clone, Debug)]
pub struct ControllerSettings {
    pub search_limit: usize,
    pub add_close_delay: Duration,
}

impl ControllerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            search_limit: config.ui.search_limit,
            add_close_delay: config.add_close_delay(),
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) api: Arc<dyn BrainApi>,
    pub(crate) session: Arc<Session>,
    pub(crate) clipboard: Arc<dyn Clipboard>,
    settings: ControllerSettings,
}

impl AppController {
    pub fn new(
        model: Arc<AppModel>,
        api: Arc<dyn BrainApi>,
        session: Arc<Session>,
        clipboard: Arc<dyn Clipboard>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            model,
            api,
            session,
            clipboard,
            settings,
        }
    }

    /// A missing token fails the call like any other backend error
    pub(crate) async fn token(&self) -> Result<String, ApiError> {
        self.session.token().await.ok_or(ApiError::MissingSession)
    }
}
