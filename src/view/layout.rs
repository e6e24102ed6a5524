//! Dashboard layout rendering (navbar, sidebar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ContentState, ContentType, Focus, UiState};
use super::utils::{border_style, render_scrollable_list};

pub fn render_navbar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Brand
            Constraint::Min(0),     // Search input
            Constraint::Length(32), // Actions
        ])
        .split(area);

    let brand = Paragraph::new(Line::from(Span::styled(
        "🧠 Second Brain",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(brand, chunks[0]);

    let search_focused = ui_state.focus == Focus::Search;
    let (search_text, search_style) = if ui_state.search_query.is_empty() {
        ("Search your content...", Style::default().fg(Color::DarkGray))
    } else if search_focused {
        (ui_state.search_query.as_str(), Style::default().fg(Color::Green))
    } else {
        (ui_state.search_query.as_str(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(border_style(search_focused)),
    );
    frame.render_widget(search, chunks[1]);

    let key_style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let actions = Paragraph::new(Line::from(vec![
        Span::styled("a", key_style),
        Span::raw(" Add Content  "),
        Span::styled("L", key_style),
        Span::raw(" Logout"),
    ]))
    .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(actions, chunks[2]);
}

/// "All" followed by one row per content type. The active filter is marked.
pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState, content_state: &ContentState) {
    let is_focused = ui_state.focus == Focus::Sidebar;

    let rows = std::iter::once(("All", None, Color::White)).chain(
        ContentType::ALL
            .iter()
            .map(|t| (t.label(), Some(*t), t.color())),
    );

    let items: Vec<ListItem> = rows
        .enumerate()
        .map(|(i, (label, filter, color))| {
            let active = content_state.filter == filter;
            let marker = if active { "● " } else { "  " };

            let style = if i == ui_state.sidebar_selected && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if active {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            ListItem::new(format!("{}{}", marker, label)).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filter ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    render_scrollable_list(frame, area, items, ui_state.sidebar_selected, block);
}
