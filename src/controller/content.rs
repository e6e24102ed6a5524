//! Content list operations: fetch, search, add, delete, share and filter

use crate::model::Focus;

use super::AppController;

const FETCH_FAILED: &str = "Could not load your content.";
const SEARCH_FAILED: &str = "Search failed.";
const ADD_SUCCEEDED: &str = "Content added successfully!";
const ADD_FAILED: &str = "Something went wrong. Try again.";
const DELETE_FAILED: &str = "Failed to delete content!";
const LINK_COPIED: &str = "Link copied to clipboard!";
const COPY_FAILED: &str = "Failed to copy link!";

impl AppController {
    /// Replace the list with the backend's. On failure the list is emptied.
    pub async fn load_contents(&self) {
        tracing::debug!("Fetching contents");
        self.model.begin_load().await;

        let result = match self.token().await {
            Ok(token) => self.api.list_content(&token).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(items) => {
                tracing::info!(count = items.len(), "Contents loaded");
                self.model.set_contents(items).await;
            }
            Err(e) => {
                tracing::error!(status = ?e.status(), error = %e, "Error fetching contents");
                self.model.fail_contents().await;
                self.model.set_error(FETCH_FAILED).await;
            }
        }
    }

    /// An empty query leaves search mode. Responses to superseded searches are dropped.
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("Search cleared");
            self.model.clear_search().await;
            return;
        }

        let token = match self.token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(query, error = %e, "Search error");
                self.model.set_error(SEARCH_FAILED).await;
                return;
            }
        };

        let seq = self.model.begin_search().await;
        tracing::debug!(query, seq, "Performing search");

        match self.api.search(&token, query).await {
            Ok(results) => {
                let total = results.len();
                if self.model.apply_search(seq, results, self.settings.search_limit).await {
                    tracing::info!(query, total, "Search completed");
                } else {
                    tracing::debug!(query, seq, "Discarding stale search response");
                }
            }
            Err(e) => {
                tracing::error!(query, error = %e, "Search error");
                self.model.fail_search(seq).await;
                self.model.set_error(SEARCH_FAILED).await;
            }
        }
    }

    /// Submit the add dialog. On success the list is refetched and the dialog
    /// closes after the configured delay; on failure it stays open with an error.
    pub async fn submit_new_content(&self) {
        let Some(new_content) = self.model.begin_add_submit().await else {
            return;
        };

        let result = match self.token().await {
            Ok(token) => self.api.add_content(&token, &new_content).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!(title = %new_content.title, "Content added");
                self.model.add_submit_succeeded(ADD_SUCCEEDED).await;
                self.load_contents().await;

                let model = self.model.clone();
                let delay = self.settings.add_close_delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    model.finish_add_success().await;
                });
            }
            Err(e) => {
                tracing::error!(status = ?e.status(), error = %e, "Error saving content");
                self.model.add_submit_failed(ADD_FAILED).await;
            }
        }
    }

    /// Ask for confirmation before deleting the selected item
    pub async fn request_delete(&self) {
        if let Some(item) = self.model.actionable_selected_item().await {
            self.model.request_delete_confirmation(item.id).await;
        }
    }

    /// Start the confirmed delete in the background so several can overlap
    pub async fn confirm_delete(&self) {
        if let Some(id) = self.model.take_delete_confirmation().await {
            let controller = self.clone();
            tokio::spawn(async move {
                controller.delete_content(id).await;
            });
        }
    }

    pub async fn cancel_delete(&self) {
        self.model.take_delete_confirmation().await;
    }

    pub async fn delete_content(&self, id: i64) {
        if !self.model.mark_deleting(id).await {
            tracing::debug!(id, "Delete already in flight");
            return;
        }

        let result = match self.token().await {
            Ok(token) => self.api.delete_content(&token, id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!(id, "Content deleted");
                self.model.finish_delete(id, true).await;
            }
            Err(e) => {
                tracing::error!(id, status = ?e.status(), error = %e, "Error deleting content");
                self.model.finish_delete(id, false).await;
                self.model.set_error(DELETE_FAILED).await;
            }
        }
    }

    pub async fn share_selected(&self) {
        if let Some(item) = self.model.actionable_selected_item().await {
            self.share(&item.link).await;
        }
    }

    pub async fn share(&self, link: &str) {
        match self.clipboard.copy(link) {
            Ok(()) => self.model.set_info(LINK_COPIED).await,
            Err(e) => {
                tracing::error!(error = %e, "Clipboard error");
                self.model.set_error(COPY_FAILED).await;
            }
        }
    }

    /// Apply the highlighted sidebar row: "All" clears, a type toggles
    pub async fn select_sidebar_filter(&self) {
        let ui_state = self.model.get_ui_state().await;
        match ui_state.sidebar_filter() {
            Some(content_type) => self.model.toggle_filter(content_type).await,
            None => self.model.set_filter(None).await,
        }
        self.model.set_focus(Focus::Content).await;
    }
}
