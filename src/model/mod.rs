//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (content items, routes, UI state, etc.)
//! - `content`: Content list state (filter, search, in-flight deletions)
//! - `draft`: Add-content form and its submission state
//! - `router`: Route table and authentication guard
//! - `brain_client`: Second Brain REST API client
//! - `app_model`: Main application model with state management methods

mod types;
mod content;
mod draft;
pub mod router;
mod brain_client;
mod app_model;

pub use types::{
    AuthField, AuthForm, ContentItem, ContentType, Credentials, Focus, NewContent,
    Notice, NoticeLevel, Route, UiState,
};

pub use content::ContentState;

pub use draft::{AddContentForm, DraftField, FormMessage, SubmitState};

pub use brain_client::{BrainApi, BrainClient};

#[cfg(test)]
pub use brain_client::MockBrainApi;

pub use app_model::AppModel;
