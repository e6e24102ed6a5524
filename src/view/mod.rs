//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared helpers (scrollable lists, centering, truncation)
//! - `pages`: Landing and sign in / sign up pages
//! - `layout`: Dashboard structure (navbar, sidebar)
//! - `content`: Dashboard content list
//! - `overlays`: Notices, delete confirmation, add dialog, help

mod utils;
mod pages;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{AddContentForm, AuthForm, ContentState, Route, UiState};

/// Everything one frame needs, snapshotted from the model
pub struct ViewState {
    pub ui: UiState,
    pub content: ContentState,
    pub auth_form: AuthForm,
    pub add_form: AddContentForm,
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &ViewState) {
        let ui_state = &state.ui;
        match ui_state.route {
            Route::Landing => pages::render_landing(frame),
            Route::SignIn | Route::SignUp => {
                pages::render_auth_page(frame, ui_state.route, &state.auth_form)
            }
            Route::Dashboard => Self::render_dashboard(frame, state),
        }

        if let Some(notice) = &ui_state.notice {
            overlays::render_notice(frame, notice);
        }
    }

    fn render_dashboard(frame: &mut Frame, state: &ViewState) {
        let ui_state = &state.ui;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Navbar
                Constraint::Min(0),    // Sidebar + content
            ])
            .split(frame.area());

        layout::render_navbar(frame, chunks[0], ui_state);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(18), // Sidebar
                Constraint::Min(0),     // Content list
            ])
            .split(chunks[1]);

        layout::render_sidebar(frame, main_chunks[0], ui_state, &state.content);
        content::render_content_list(frame, main_chunks[1], ui_state, &state.content);

        if ui_state.show_add_dialog {
            overlays::render_add_dialog(frame, &state.add_form);
        }

        if ui_state.confirm_delete.is_some() {
            overlays::render_delete_confirmation(frame);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::model::{ContentItem, ContentType, Notice};

    fn state(route: Route) -> ViewState {
        ViewState {
            ui: UiState {
                route,
                ..UiState::default()
            },
            content: ContentState::default(),
            auth_form: AuthForm::default(),
            add_form: AddContentForm::default(),
        }
    }

    fn draw(state: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|frame| AppView::render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn landing_offers_sign_up_and_sign_in() {
        let screen = draw(&state(Route::Landing));
        assert!(screen.contains("Start for Free"));
        assert!(screen.contains("Sign In"));
    }

    #[test]
    fn search_header_counts_results() {
        let mut view = state(Route::Dashboard);
        view.content.is_searching = true;
        view.content.search_results = vec![ContentItem {
            id: 1,
            title: "Ownership".into(),
            description: Some("talk".into()),
            tags: vec!["rust".into()],
            link: "https://example.com".into(),
            content_type: ContentType::Video,
        }];
        let screen = draw(&view);
        assert!(screen.contains("Search Results (1)"));
        assert!(screen.contains("Ownership"));
        assert!(screen.contains("#rust"));
    }

    #[test]
    fn dashboard_shows_loading_and_overlays() {
        let mut view = state(Route::Dashboard);
        view.content.is_loading = true;
        view.ui.confirm_delete = Some(1);
        view.ui.notice = Some(Notice::error("Failed to delete content!"));
        let screen = draw(&view);
        assert!(screen.contains("Loading contents..."));
        assert!(screen.contains("Failed to delete content!"));
    }
}
