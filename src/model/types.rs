//! Core type definitions for the application

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Kind of a saved item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Audio,
    Video,
    Image,
    Article,
}

impl ContentType {
    /// Sidebar order
    pub const ALL: [ContentType; 4] = [
        ContentType::Audio,
        ContentType::Video,
        ContentType::Image,
        ContentType::Article,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Audio => "Audio",
            ContentType::Video => "Video",
            ContentType::Image => "Image",
            ContentType::Article => "Article",
        }
    }

    pub fn color(self) -> Color {
        match self {
            ContentType::Audio => Color::Blue,
            ContentType::Video => Color::Yellow,
            ContentType::Image => Color::Green,
            ContentType::Article => Color::Red,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ContentType::Audio => ContentType::Video,
            ContentType::Video => ContentType::Image,
            ContentType::Image => ContentType::Article,
            ContentType::Article => ContentType::Audio,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ContentType::Audio => ContentType::Article,
            ContentType::Video => ContentType::Audio,
            ContentType::Image => ContentType::Video,
            ContentType::Article => ContentType::Image,
        }
    }
}

/// A saved bookmark as displayed by the client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub link: String,
    pub content_type: ContentType,
}

/// Username and password for the auth endpoints
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of a new content item as the backend expects it
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewContent {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub link: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

/// Screens of the client
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    SignIn,
    SignUp,
    Dashboard,
}

/// Which dashboard section is currently focused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    Search,
    Sidebar,
    #[default]
    Content,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Sidebar,
            Focus::Sidebar => Focus::Content,
            Focus::Content => Focus::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Search => Focus::Content,
            Focus::Sidebar => Focus::Search,
            Focus::Content => Focus::Sidebar,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient message shown over the current screen
#[derive(Clone, Debug)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            created_at: Instant::now(),
        }
    }
}

/// Which field of a sign in / sign up form has the cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Username,
    Password,
}

/// Sign in / sign up form state
#[derive(Clone, Debug, Default)]
pub struct AuthForm {
    pub username: String,
    pub password: String,
    pub focused: AuthField,
    pub submitting: bool,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn toggle_field(&mut self) {
        self.focused = match self.focused {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        };
    }

    pub fn push(&mut self, c: char) {
        match self.focused {
            AuthField::Username => self.username.push(c),
            AuthField::Password => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focused {
            AuthField::Username => self.username.pop(),
            AuthField::Password => self.password.pop(),
        };
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub route: Route,
    pub focus: Focus,
    pub search_query: String,
    /// 0 is "All", 1.. map onto `ContentType::ALL`
    pub sidebar_selected: usize,
    pub notice: Option<Notice>,
    pub confirm_delete: Option<i64>,
    pub show_add_dialog: bool,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            route: Route::Landing,
            focus: Focus::Content,
            search_query: String::new(),
            sidebar_selected: 0,
            notice: None,
            confirm_delete: None,
            show_add_dialog: false,
            show_help_popup: false,
        }
    }
}

impl UiState {
    pub fn sidebar_len() -> usize {
        ContentType::ALL.len() + 1
    }

    /// Filter the sidebar row stands for; `None` is the "All" row
    pub fn sidebar_filter(&self) -> Option<ContentType> {
        self.sidebar_selected
            .checked_sub(1)
            .and_then(|i| ContentType::ALL.get(i).copied())
    }
}
