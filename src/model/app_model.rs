//! Main application model with state management

use std::time::Duration;
use tokio::sync::Mutex;

use super::content::ContentState;
use super::draft::{AddContentForm, SubmitState};
use super::types::{AuthForm, ContentItem, ContentType, Credentials, Focus, NewContent, Notice, Route, UiState};

/// Main application model containing all state
pub struct AppModel {
    ui_state: Mutex<UiState>,
    content_state: Mutex<ContentState>,
    auth_form: Mutex<AuthForm>,
    add_form: Mutex<AddContentForm>,
    should_quit: Mutex<bool>,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Mutex::new(UiState::default()),
            content_state: Mutex::new(ContentState::default()),
            auth_form: Mutex::new(AuthForm::default()),
            add_form: Mutex::new(AddContentForm::default()),
            should_quit: Mutex::new(false),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Routing & UI State
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn route(&self) -> Route {
        self.ui_state.lock().await.route
    }

    /// Switch screens and drop per-screen transient state. Returns the previous route.
    pub async fn set_route(&self, route: Route) -> Route {
        let mut state = self.ui_state.lock().await;
        let previous = state.route;
        if previous != route {
            state.route = route;
            state.focus = Focus::Content;
            state.search_query.clear();
            state.sidebar_selected = 0;
            state.confirm_delete = None;
            state.show_add_dialog = false;
            state.show_help_popup = false;
            drop(state);
            *self.auth_form.lock().await = AuthForm::default();
            self.add_form.lock().await.reset();
        }
        previous
    }

    pub async fn cycle_focus_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.focus = state.focus.next();
    }

    pub async fn cycle_focus_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.focus = state.focus.prev();
    }

    pub async fn set_focus(&self, focus: Focus) {
        self.ui_state.lock().await.focus = focus;
    }

    pub async fn append_to_search(&self, c: char) {
        self.ui_state.lock().await.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        self.ui_state.lock().await.search_query.pop();
    }

    pub async fn update_search_query(&self, query: String) {
        self.ui_state.lock().await.search_query = query;
    }

    pub async fn sidebar_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        state.sidebar_selected = state.sidebar_selected.saturating_sub(1);
    }

    pub async fn sidebar_move_down(&self) {
        let mut state = self.ui_state.lock().await;
        if state.sidebar_selected + 1 < UiState::sidebar_len() {
            state.sidebar_selected += 1;
        }
    }

    pub async fn set_notice(&self, notice: Notice) {
        self.ui_state.lock().await.notice = Some(notice);
    }

    pub async fn set_error(&self, message: impl Into<String>) {
        self.set_notice(Notice::error(message)).await;
    }

    pub async fn set_info(&self, message: impl Into<String>) {
        self.set_notice(Notice::info(message)).await;
    }

    pub async fn clear_notice(&self) {
        self.ui_state.lock().await.notice = None;
    }

    pub async fn auto_clear_old_notices(&self, timeout: Duration) {
        let mut state = self.ui_state.lock().await;
        if let Some(notice) = &state.notice {
            if notice.created_at.elapsed() > timeout {
                state.notice = None;
            }
        }
    }

    pub async fn request_delete_confirmation(&self, id: i64) {
        self.ui_state.lock().await.confirm_delete = Some(id);
    }

    pub async fn take_delete_confirmation(&self) -> Option<i64> {
        self.ui_state.lock().await.confirm_delete.take()
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    // ========================================================================
    // Content List
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn reset_content(&self) {
        *self.content_state.lock().await = ContentState::default();
    }

    pub async fn begin_load(&self) {
        self.content_state.lock().await.begin_load();
    }

    pub async fn set_contents(&self, items: Vec<ContentItem>) {
        self.content_state.lock().await.set_items(items);
    }

    pub async fn fail_contents(&self) {
        self.content_state.lock().await.fail_load();
    }

    pub async fn toggle_filter(&self, content_type: ContentType) {
        self.content_state.lock().await.toggle_filter(content_type);
    }

    pub async fn set_filter(&self, filter: Option<ContentType>) {
        self.content_state.lock().await.set_filter(filter);
    }

    pub async fn begin_search(&self) -> u64 {
        self.content_state.lock().await.begin_search()
    }

    pub async fn apply_search(&self, seq: u64, results: Vec<ContentItem>, limit: usize) -> bool {
        self.content_state.lock().await.apply_search(seq, results, limit)
    }

    pub async fn fail_search(&self, seq: u64) {
        self.content_state.lock().await.fail_search(seq);
    }

    pub async fn clear_search(&self) {
        self.content_state.lock().await.clear_search();
    }

    pub async fn content_move_up(&self) {
        self.content_state.lock().await.move_up();
    }

    pub async fn content_move_down(&self) {
        self.content_state.lock().await.move_down();
    }

    /// Selected item, unless a delete for it is in flight
    pub async fn actionable_selected_item(&self) -> Option<ContentItem> {
        let state = self.content_state.lock().await;
        state
            .selected_item()
            .filter(|item| !state.is_deleting(item.id))
            .cloned()
    }

    pub async fn mark_deleting(&self, id: i64) -> bool {
        self.content_state.lock().await.mark_deleting(id)
    }

    pub async fn finish_delete(&self, id: i64, removed: bool) {
        self.content_state.lock().await.finish_delete(id, removed);
    }

    // ========================================================================
    // Sign In / Sign Up Form
    // ========================================================================

    pub async fn get_auth_form(&self) -> AuthForm {
        self.auth_form.lock().await.clone()
    }

    pub async fn auth_push(&self, c: char) {
        let mut form = self.auth_form.lock().await;
        if !form.submitting {
            form.push(c);
        }
    }

    pub async fn auth_backspace(&self) {
        let mut form = self.auth_form.lock().await;
        if !form.submitting {
            form.backspace();
        }
    }

    pub async fn auth_toggle_field(&self) {
        self.auth_form.lock().await.toggle_field();
    }

    /// None while a submission is already running
    pub async fn begin_auth_submit(&self) -> Option<Credentials> {
        let mut form = self.auth_form.lock().await;
        if form.submitting {
            return None;
        }
        form.submitting = true;
        form.error = None;
        Some(form.credentials())
    }

    pub async fn finish_auth_submit(&self, error: Option<String>) {
        let mut form = self.auth_form.lock().await;
        form.submitting = false;
        form.error = error;
    }

    // ========================================================================
    // Add Content Dialog
    // ========================================================================

    pub async fn get_add_form(&self) -> AddContentForm {
        self.add_form.lock().await.clone()
    }

    pub async fn open_add_dialog(&self) {
        self.ui_state.lock().await.show_add_dialog = true;
    }

    /// Refused while a submission is running
    pub async fn close_add_dialog(&self) -> bool {
        let mut form = self.add_form.lock().await;
        if form.is_submitting() {
            return false;
        }
        form.reset();
        drop(form);
        self.ui_state.lock().await.show_add_dialog = false;
        true
    }

    pub async fn is_add_dialog_open(&self) -> bool {
        self.ui_state.lock().await.show_add_dialog
    }

    pub async fn edit_add_form<F>(&self, edit: F)
    where
        F: FnOnce(&mut AddContentForm),
    {
        let mut form = self.add_form.lock().await;
        edit(&mut form);
    }

    pub async fn begin_add_submit(&self) -> Option<NewContent> {
        self.add_form.lock().await.begin_submit()
    }

    pub async fn add_submit_succeeded(&self, message: &str) {
        self.add_form.lock().await.submit_succeeded(message);
    }

    pub async fn add_submit_failed(&self, message: &str) {
        self.add_form.lock().await.submit_failed(message);
    }

    /// Close the dialog after a successful add, unless the user already moved on
    pub async fn finish_add_success(&self) {
        let mut form = self.add_form.lock().await;
        if form.state != SubmitState::Succeeded {
            return;
        }
        form.reset();
        drop(form);
        self.ui_state.lock().await.show_add_dialog = false;
    }
}
