//! Content list state: the saved items, filter, search results and in-flight deletions

use std::collections::HashSet;

use super::types::{ContentItem, ContentType};

/// Items to show given the list, filter and search state.
///
/// Search results take precedence over the type filter, which takes
/// precedence over the unfiltered list.
pub fn visible_set<'a>(
    items: &'a [ContentItem],
    filter: Option<ContentType>,
    search_results: &'a [ContentItem],
    is_searching: bool,
) -> Vec<&'a ContentItem> {
    if is_searching {
        search_results.iter().collect()
    } else if let Some(filter) = filter {
        items.iter().filter(|c| c.content_type == filter).collect()
    } else {
        items.iter().collect()
    }
}

/// State behind the dashboard content list
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub items: Vec<ContentItem>,
    pub filter: Option<ContentType>,
    pub search_results: Vec<ContentItem>,
    pub is_searching: bool,
    /// A list fetch is in flight
    pub is_loading: bool,
    /// The current search request has not answered yet
    pub search_pending: bool,
    pub deleting: HashSet<i64>,
    pub selected: usize,
    search_seq: u64,
}

impl ContentState {
    /// Whether the source the visible set comes from is still loading
    pub fn is_busy(&self) -> bool {
        if self.is_searching {
            self.search_pending
        } else {
            self.is_loading
        }
    }

    pub fn visible_items(&self) -> Vec<&ContentItem> {
        visible_set(&self.items, self.filter, &self.search_results, self.is_searching)
    }

    pub fn selected_item(&self) -> Option<&ContentItem> {
        self.visible_items().get(self.selected).copied()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.visible_items().len() {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_items().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    // ========================================================================
    // Full list
    // ========================================================================

    pub fn begin_load(&mut self) {
        self.is_loading = true;
    }

    pub fn set_items(&mut self, items: Vec<ContentItem>) {
        self.items = items;
        self.is_loading = false;
        self.clamp_selection();
    }

    /// A failed fetch leaves an empty list rather than stale data
    pub fn fail_load(&mut self) {
        self.items.clear();
        self.is_loading = false;
        self.selected = 0;
    }

    // ========================================================================
    // Filter
    // ========================================================================

    pub fn set_filter(&mut self, filter: Option<ContentType>) {
        self.filter = filter;
        self.selected = 0;
    }

    /// Selecting the active type again clears the filter
    pub fn toggle_filter(&mut self, content_type: ContentType) {
        if self.filter == Some(content_type) {
            self.set_filter(None);
        } else {
            self.set_filter(Some(content_type));
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Enter search mode and return the sequence number of the new request.
    pub fn begin_search(&mut self) -> u64 {
        self.search_seq += 1;
        self.is_searching = true;
        self.search_pending = true;
        self.search_seq
    }

    /// Apply a search response. Returns false when a newer search (or a clear)
    /// superseded the request and the response was dropped.
    pub fn apply_search(&mut self, seq: u64, mut results: Vec<ContentItem>, limit: usize) -> bool {
        if seq != self.search_seq || !self.is_searching {
            return false;
        }
        results.truncate(limit);
        self.search_results = results;
        self.search_pending = false;
        self.selected = 0;
        true
    }

    pub fn fail_search(&mut self, seq: u64) {
        if seq == self.search_seq {
            self.search_pending = false;
        }
    }

    pub fn clear_search(&mut self) {
        // Bumping the sequence drops any response still in flight
        self.search_seq += 1;
        self.search_pending = false;
        self.is_searching = false;
        self.search_results.clear();
        self.clamp_selection();
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Returns false when a delete for `id` is already in flight.
    pub fn mark_deleting(&mut self, id: i64) -> bool {
        self.deleting.insert(id)
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(&id)
    }

    pub fn finish_delete(&mut self, id: i64, removed: bool) {
        self.deleting.remove(&id);
        if removed {
            self.items.retain(|c| c.id != id);
            self.search_results.retain(|c| c.id != id);
            self.clamp_selection();
        }
    }

    pub fn empty_message(&self) -> String {
        if self.is_searching {
            "No matching results found.".to_string()
        } else if let Some(filter) = self.filter {
            format!("No {} content available.", filter.label().to_lowercase())
        } else {
            "No content yet. Add one!".to_string()
        }
    }
}
