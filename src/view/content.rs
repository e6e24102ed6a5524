//! Dashboard content list rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ContentItem, ContentState, Focus, UiState};
use super::utils::{border_style, render_scrollable_list, truncate_string};

pub fn render_content_list(frame: &mut Frame, area: Rect, ui_state: &UiState, content_state: &ContentState) {
    let is_focused = ui_state.focus == Focus::Content;
    let visible = content_state.visible_items();

    let title = if content_state.is_searching {
        format!(" Search Results ({}) ", visible.len())
    } else if let Some(filter) = content_state.filter {
        format!(" {} ", filter.label())
    } else {
        " All Content ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    if content_state.is_busy() {
        let loading = Paragraph::new("Loading contents...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if visible.is_empty() {
        let empty = Paragraph::new(content_state.empty_message())
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_selected = i == content_state.selected;
            let is_deleting = content_state.is_deleting(item.id);
            render_item(item, is_selected && is_focused, is_deleting, content_width)
        })
        .collect();

    render_scrollable_list(frame, area, items, content_state.selected, block);
}

/// One card: badge and title, description, then tags and link
fn render_item(item: &ContentItem, highlighted: bool, deleting: bool, width: usize) -> ListItem<'static> {
    let badge = format!(" {} ", item.content_type.label());
    let badge_style = Style::default()
        .fg(Color::Black)
        .bg(item.content_type.color())
        .add_modifier(Modifier::BOLD);

    let title_style = if deleting {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else if highlighted {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let title_width = width.saturating_sub(badge.chars().count() + 14);
    let mut header = vec![
        Span::styled(badge, badge_style),
        Span::raw(" "),
        Span::styled(truncate_string(&item.title, title_width), title_style),
    ];
    if deleting {
        header.push(Span::styled("  deleting...", Style::default().fg(Color::Red)));
    }

    let description = item.description.as_deref().unwrap_or("");
    let mut footer: Vec<Span> = item
        .tags
        .iter()
        .map(|tag| Span::styled(format!("#{} ", tag), Style::default().fg(Color::Cyan)))
        .collect();
    if !item.link.is_empty() {
        footer.push(Span::styled(
            truncate_string(&item.link, width / 2),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        ));
    }

    let mut lines = vec![
        Line::from(header),
        Line::from(Span::styled(
            format!("  {}", truncate_string(description, width.saturating_sub(2))),
            Style::default().fg(Color::Gray),
        )),
        Line::from(footer),
        Line::from(""),
    ];
    if highlighted {
        lines[0].spans.insert(0, Span::styled("▶ ", Style::default().fg(Color::Green)));
    }

    ListItem::new(lines)
}
