//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{DraftField, Focus, NoticeLevel, Route};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.model.set_should_quit(true).await;
            return Ok(());
        }

        // Error notices swallow the key that dismisses them
        if let Some(notice) = self.model.get_ui_state().await.notice {
            self.model.clear_notice().await;
            if notice.level == NoticeLevel::Error {
                return Ok(());
            }
        }

        match self.model.route().await {
            Route::Landing => self.handle_landing_key(key).await,
            Route::SignIn | Route::SignUp => self.handle_auth_key(key).await,
            Route::Dashboard => self.handle_dashboard_key(key).await,
        }
        Ok(())
    }

    async fn handle_landing_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.navigate(Route::SignIn).await;
            }
            KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Enter => {
                self.navigate(Route::SignUp).await;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.model.set_should_quit(true).await;
            }
            _ => {}
        }
    }

    async fn handle_auth_key(&self, key: KeyEvent) {
        let route = self.model.route().await;
        match key.code {
            KeyCode::Esc => {
                self.navigate(Route::Landing).await;
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let other = if route == Route::SignIn {
                    Route::SignUp
                } else {
                    Route::SignIn
                };
                self.navigate(other).await;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.model.auth_toggle_field().await;
            }
            KeyCode::Enter => {
                let controller = self.clone();
                tokio::spawn(async move {
                    if route == Route::SignIn {
                        controller.sign_in().await;
                    } else {
                        controller.sign_up().await;
                    }
                });
            }
            KeyCode::Backspace => {
                self.model.auth_backspace().await;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.model.auth_push(c).await;
            }
            _ => {}
        }
    }

    async fn handle_dashboard_key(&self, key: KeyEvent) {
        let ui_state = self.model.get_ui_state().await;

        if ui_state.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.model.hide_help_popup().await;
            }
            return;
        }

        if ui_state.confirm_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_delete().await,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.cancel_delete().await
                }
                _ => {}
            }
            return;
        }

        if ui_state.show_add_dialog {
            self.handle_add_dialog_key(key).await;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.model.cycle_focus_backward().await;
                } else {
                    self.model.cycle_focus_forward().await;
                }
                return;
            }
            KeyCode::BackTab => {
                self.model.cycle_focus_backward().await;
                return;
            }
            _ => {}
        }

        match ui_state.focus {
            Focus::Search => match key.code {
                KeyCode::Enter => {
                    let query = ui_state.search_query.clone();
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.search(&query).await;
                    });
                }
                KeyCode::Esc => {
                    self.model.update_search_query(String::new()).await;
                    self.search("").await;
                }
                KeyCode::Backspace => {
                    self.model.backspace_search().await;
                }
                KeyCode::Char(c) => {
                    self.model.append_to_search(c).await;
                }
                _ => {}
            },
            Focus::Sidebar => match key.code {
                KeyCode::Up => self.model.sidebar_move_up().await,
                KeyCode::Down => self.model.sidebar_move_down().await,
                KeyCode::Enter | KeyCode::Char(' ') => self.select_sidebar_filter().await,
                _ => self.handle_dashboard_global_key(key).await,
            },
            Focus::Content => match key.code {
                KeyCode::Up => self.model.content_move_up().await,
                KeyCode::Down => self.model.content_move_down().await,
                KeyCode::Char('s') | KeyCode::Char('S') => self.share_selected().await,
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                    self.request_delete().await
                }
                _ => self.handle_dashboard_global_key(key).await,
            },
        }
    }

    /// Keys that work from the sidebar and the list but not while typing a query
    async fn handle_dashboard_global_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.model.set_should_quit(true).await;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.model.open_add_dialog().await;
            }
            KeyCode::Char('L') => {
                self.logout().await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.model.show_help_popup().await;
            }
            KeyCode::Char('/') => {
                self.model.set_focus(Focus::Search).await;
            }
            _ => {}
        }
    }

    async fn handle_add_dialog_key(&self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('s') {
                self.spawn_add_submit();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if !self.model.close_add_dialog().await {
                    tracing::debug!("Add dialog stays open while submitting");
                }
            }
            KeyCode::Tab => {
                self.model.edit_add_form(|form| form.focused = form.focused.next()).await;
            }
            KeyCode::BackTab => {
                self.model.edit_add_form(|form| form.focused = form.focused.prev()).await;
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                self.model
                    .edit_add_form(|form| {
                        if form.is_editable() && form.focused == DraftField::Type {
                            form.draft.cycle_type(forward);
                        }
                    })
                    .await;
            }
            KeyCode::Enter => {
                let focused = self.model.get_add_form().await.focused;
                match focused {
                    DraftField::Tags => {
                        self.model
                            .edit_add_form(|form| {
                                if form.is_editable() {
                                    form.draft.add_tag();
                                }
                            })
                            .await;
                    }
                    DraftField::Submit => self.spawn_add_submit(),
                    _ => {
                        self.model.edit_add_form(|form| form.focused = form.focused.next()).await;
                    }
                }
            }
            KeyCode::Backspace => {
                self.model.edit_add_form(|form| form.backspace()).await;
            }
            KeyCode::Char(c) => {
                self.model.edit_add_form(|form| form.push(c)).await;
            }
            _ => {}
        }
    }

    fn spawn_add_submit(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.submit_new_content().await;
        });
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::controller::testing::{harness, item};
    use crate::model::{ContentType, MockBrainApi};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn dashboard_api() -> MockBrainApi {
        let mut api = MockBrainApi::new();
        api.expect_list_content()
            .returning(|_| Ok(vec![item(1, ContentType::Audio), item(2, ContentType::Video)]));
        api
    }

    #[tokio::test]
    async fn key_releases_are_ignored() {
        let h = harness(MockBrainApi::new(), None);
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        h.controller.handle_key_event(release).await.unwrap();
        assert!(!h.model.should_quit().await);
    }

    #[tokio::test]
    async fn landing_keys_open_auth_pages() {
        let h = harness(MockBrainApi::new(), None);
        h.controller.handle_key_event(press(KeyCode::Char('s'))).await.unwrap();
        assert_eq!(h.model.route().await, Route::SignIn);

        h.controller.handle_key_event(ctrl('n')).await.unwrap();
        assert_eq!(h.model.route().await, Route::SignUp);

        h.controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert_eq!(h.model.route().await, Route::Landing);

        h.controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        assert_eq!(h.model.route().await, Route::SignUp);
    }

    #[tokio::test]
    async fn auth_form_takes_typed_text() {
        let h = harness(MockBrainApi::new(), None);
        h.controller.navigate(Route::SignIn).await;
        for code in [KeyCode::Char('q'), KeyCode::Char('x'), KeyCode::Backspace, KeyCode::Tab, KeyCode::Char('p')] {
            h.controller.handle_key_event(press(code)).await.unwrap();
        }
        let form = h.model.get_auth_form().await;
        assert_eq!(form.username, "q");
        assert_eq!(form.password, "p");
        assert!(!h.model.should_quit().await);
    }

    #[tokio::test]
    async fn error_notice_swallows_next_key() {
        let h = harness(MockBrainApi::new(), None);
        h.model.set_error("boom").await;
        h.controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(h.model.get_ui_state().await.notice.is_none());
        assert!(!h.model.should_quit().await);

        h.controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(h.model.should_quit().await);
    }

    #[tokio::test]
    async fn search_focus_collects_query_and_esc_clears_it() {
        let h = harness(dashboard_api(), Some("tok"));
        h.controller.navigate(Route::Dashboard).await;
        h.controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        assert_eq!(h.model.get_ui_state().await.focus, Focus::Search);

        for c in "qa".chars() {
            h.controller.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
        assert_eq!(h.model.get_ui_state().await.search_query, "qa");
        assert!(!h.model.should_quit().await);

        h.controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert!(h.model.get_ui_state().await.search_query.is_empty());
        assert!(!h.model.get_content_state().await.is_searching);
    }

    #[tokio::test]
    async fn delete_is_cancelled_with_n() {
        let mut api = dashboard_api();
        api.expect_delete_content().times(0);
        let h = harness(api, Some("tok"));
        h.controller.navigate(Route::Dashboard).await;

        h.controller.handle_key_event(press(KeyCode::Char('d'))).await.unwrap();
        assert_eq!(h.model.get_ui_state().await.confirm_delete, Some(1));
        // Other keys are ignored while the question is open
        h.controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(!h.model.should_quit().await);

        h.controller.handle_key_event(press(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(h.model.get_ui_state().await.confirm_delete, None);
        assert_eq!(h.model.get_content_state().await.items.len(), 2);
    }

    #[tokio::test]
    async fn sidebar_enter_filters_by_type() {
        let h = harness(dashboard_api(), Some("tok"));
        h.controller.navigate(Route::Dashboard).await;
        h.model.set_focus(Focus::Sidebar).await;

        for code in [KeyCode::Down, KeyCode::Down, KeyCode::Enter] {
            h.controller.handle_key_event(press(code)).await.unwrap();
        }

        let state = h.model.get_content_state().await;
        assert_eq!(state.filter, Some(ContentType::Video));
        assert_eq!(state.visible_items().len(), 1);
        assert_eq!(h.model.get_ui_state().await.focus, Focus::Content);
    }

    #[tokio::test]
    async fn add_dialog_edits_draft() {
        let h = harness(dashboard_api(), Some("tok"));
        h.controller.navigate(Route::Dashboard).await;
        h.controller.handle_key_event(press(KeyCode::Char('a'))).await.unwrap();
        assert!(h.model.is_add_dialog_open().await);

        let keys = [
            KeyCode::Char('u'),
            KeyCode::Tab,
            KeyCode::Right,
            KeyCode::Right,
            KeyCode::Tab,
            KeyCode::Tab,
            KeyCode::Tab,
            KeyCode::Char('a'),
            KeyCode::Enter,
            KeyCode::Char('b'),
            KeyCode::Enter,
            KeyCode::Char('a'),
            KeyCode::Enter,
            KeyCode::Backspace,
            KeyCode::Backspace,
        ];
        for code in keys {
            h.controller.handle_key_event(press(code)).await.unwrap();
        }

        let form = h.model.get_add_form().await;
        assert_eq!(form.draft.url, "u");
        assert_eq!(form.draft.content_type, Some(ContentType::Video));
        assert_eq!(form.draft.tags, vec!["a".to_string()]);
        assert!(form.draft.tag_input.is_empty());

        h.controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert!(!h.model.is_add_dialog_open().await);
    }

    #[tokio::test]
    async fn help_popup_blocks_other_keys() {
        let h = harness(dashboard_api(), Some("tok"));
        h.controller.navigate(Route::Dashboard).await;
        h.controller.handle_key_event(press(KeyCode::Char('h'))).await.unwrap();
        h.controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(!h.model.should_quit().await);
        h.controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert!(!h.model.get_ui_state().await.show_help_popup);
    }
}
