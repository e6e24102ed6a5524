//! Add-content form: the draft being edited and its submission state

use crate::error::DraftError;

use super::types::{ContentType, NewContent};

/// Fields of a content item being composed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentDraft {
    pub url: String,
    pub content_type: Option<ContentType>,
    pub title: String,
    pub description: String,
    pub tag_input: String,
    pub tags: Vec<String>,
}

impl ContentDraft {
    /// Move the tag input into the tag list. Blank input and duplicates are ignored.
    pub fn add_tag(&mut self) -> bool {
        let tag = self.tag_input.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        self.tag_input.clear();
        true
    }

    pub fn remove_last_tag(&mut self) -> Option<String> {
        self.tags.pop()
    }

    pub fn cycle_type(&mut self, forward: bool) {
        self.content_type = Some(match (self.content_type, forward) {
            (None, true) => ContentType::Audio,
            (None, false) => ContentType::Article,
            (Some(t), true) => t.next(),
            (Some(t), false) => t.prev(),
        });
    }

    /// Every field except tags is required.
    pub fn validate(&self) -> Result<NewContent, DraftError> {
        let url = required(&self.url, "URL")?;
        let content_type = self.content_type.ok_or(DraftError::MissingField("Content type"))?;
        let title = required(&self.title, "Title")?;
        let description = required(&self.description, "Description")?;

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        Ok(NewContent {
            title,
            description,
            tags,
            link: url,
            content_type,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, DraftError> {
    let value = value.trim();
    if value.is_empty() {
        Err(DraftError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

/// Which input of the add dialog has the cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Url,
    Type,
    Title,
    Description,
    Tags,
    Submit,
}

impl DraftField {
    pub fn next(self) -> Self {
        match self {
            Self::Url => Self::Type,
            Self::Type => Self::Title,
            Self::Title => Self::Description,
            Self::Description => Self::Tags,
            Self::Tags => Self::Submit,
            Self::Submit => Self::Url,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Url => Self::Submit,
            Self::Type => Self::Url,
            Self::Title => Self::Type,
            Self::Description => Self::Title,
            Self::Tags => Self::Description,
            Self::Submit => Self::Tags,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    /// Saved; the dialog closes after a short delay
    Succeeded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

/// State of the add-content dialog
#[derive(Clone, Debug, Default)]
pub struct AddContentForm {
    pub draft: ContentDraft,
    pub focused: DraftField,
    pub state: SubmitState,
    pub message: Option<FormMessage>,
}

impl AddContentForm {
    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Edits are ignored unless the form is idle
    pub fn is_editable(&self) -> bool {
        self.state == SubmitState::Idle
    }

    pub fn push(&mut self, c: char) {
        if !self.is_editable() {
            return;
        }
        match self.focused {
            DraftField::Url => self.draft.url.push(c),
            DraftField::Title => self.draft.title.push(c),
            DraftField::Description => self.draft.description.push(c),
            DraftField::Tags => self.draft.tag_input.push(c),
            DraftField::Type | DraftField::Submit => {}
        }
    }

    pub fn backspace(&mut self) {
        if !self.is_editable() {
            return;
        }
        match self.focused {
            DraftField::Url => {
                self.draft.url.pop();
            }
            DraftField::Title => {
                self.draft.title.pop();
            }
            DraftField::Description => {
                self.draft.description.pop();
            }
            DraftField::Tags => {
                if self.draft.tag_input.is_empty() {
                    self.draft.remove_last_tag();
                } else {
                    self.draft.tag_input.pop();
                }
            }
            DraftField::Type => self.draft.content_type = None,
            DraftField::Submit => {}
        }
    }

    /// Validate and move to `Submitting`. On a validation failure the error is
    /// shown inline and the form stays idle.
    pub fn begin_submit(&mut self) -> Option<NewContent> {
        if !self.is_editable() {
            return None;
        }
        match self.draft.validate() {
            Ok(new_content) => {
                self.state = SubmitState::Submitting;
                self.message = None;
                Some(new_content)
            }
            Err(e) => {
                self.message = Some(FormMessage::Error(e.to_string()));
                None
            }
        }
    }

    pub fn submit_succeeded(&mut self, message: impl Into<String>) {
        self.draft = ContentDraft::default();
        self.focused = DraftField::Url;
        self.state = SubmitState::Succeeded;
        self.message = Some(FormMessage::Success(message.into()));
    }

    pub fn submit_failed(&mut self, message: impl Into<String>) {
        self.state = SubmitState::Idle;
        self.message = Some(FormMessage::Error(message.into()));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
