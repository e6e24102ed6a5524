//! Overlay rendering (notice, delete confirmation, add dialog, help popup)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{AddContentForm, ContentType, DraftField, FormMessage, Notice, NoticeLevel, SubmitState};
use super::utils::{border_style, centered_rect, wrapped_line_count};

pub fn render_notice(frame: &mut Frame, notice: &Notice) {
    let area = frame.area();

    let (color, title) = match notice.level {
        NoticeLevel::Info => (Color::Cyan, " Info "),
        NoticeLevel::Error => (Color::Red, " Error (any key to dismiss) "),
    };

    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4) as usize;
    let popup_height = 2 + wrapped_line_count(&notice.message, inner_width);

    // Top right, so the list underneath stays readable
    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width + 1),
        y: area.y + 1,
        width: popup_width,
        height: popup_height.min(area.height.saturating_sub(2)),
    };

    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(notice.message.as_str())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title)
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .padding(Padding::horizontal(1))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}

pub fn render_delete_confirmation(frame: &mut Frame) {
    let popup_area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from("Are you sure you want to delete this content?"),
        Line::from(vec![
            Span::styled("y", key_style),
            Span::raw(" delete   "),
            Span::styled("n", key_style),
            Span::raw(" cancel"),
        ]),
    ];

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Delete ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .padding(Padding::horizontal(1))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}

pub fn render_add_dialog(frame: &mut Frame, form: &AddContentForm) {
    let popup_area = centered_rect(64, 24, frame.area());
    frame.render_widget(Clear, popup_area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Add New Content ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black));
    let inner = outer.inner(popup_area);
    frame.render_widget(outer, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(3), // URL
            Constraint::Length(3), // Type
            Constraint::Length(3), // Title
            Constraint::Length(3), // Description
            Constraint::Length(4), // Tags
            Constraint::Length(1), // Message
            Constraint::Length(1), // Submit
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new("Provide details about your content below.")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    let draft = &form.draft;
    render_text_field(frame, chunks[1], "URL", &draft.url, "https://...", form.focused == DraftField::Url);
    render_type_field(frame, chunks[2], draft.content_type, form.focused == DraftField::Type);
    render_text_field(frame, chunks[3], "Title", &draft.title, "Enter a title", form.focused == DraftField::Title);
    render_text_field(
        frame,
        chunks[4],
        "Description",
        &draft.description,
        "What is it about?",
        form.focused == DraftField::Description,
    );
    render_tags_field(frame, chunks[5], &draft.tags, &draft.tag_input, form.focused == DraftField::Tags);

    if let Some(message) = &form.message {
        let (text, color) = match message {
            FormMessage::Success(text) => (text.as_str(), Color::Green),
            FormMessage::Error(text) => (text.as_str(), Color::Red),
        };
        frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), chunks[6]);
    }

    let submit_label = match form.state {
        SubmitState::Idle => "[ Add Content ]",
        SubmitState::Submitting => "[ Adding... ]",
        SubmitState::Succeeded => "[ Added ]",
    };
    let submit_style = if form.focused == DraftField::Submit {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(submit_label, submit_style),
            Span::styled("   Ctrl+S submit · Esc close", Style::default().fg(Color::DarkGray)),
        ])),
        chunks[7],
    );
}

fn field_block(label: &str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", label))
        .border_style(border_style(focused))
}

fn render_text_field(frame: &mut Frame, area: Rect, label: &str, value: &str, placeholder: &str, focused: bool) {
    let (text, style) = if value.is_empty() {
        (placeholder, Style::default().fg(Color::DarkGray))
    } else {
        (value, Style::default().fg(Color::White))
    };
    let cursor = if focused { "▏" } else { "" };
    let widget = Paragraph::new(Line::from(vec![
        Span::styled(text.to_string(), style),
        Span::styled(cursor, Style::default().fg(Color::Green)),
    ]))
    .block(field_block(label, focused));
    frame.render_widget(widget, area);
}

fn render_type_field(frame: &mut Frame, area: Rect, selected: Option<ContentType>, focused: bool) {
    let mut spans = vec![Span::styled("← ", Style::default().fg(Color::DarkGray))];
    for content_type in ContentType::ALL {
        let style = if selected == Some(content_type) {
            Style::default()
                .fg(Color::Black)
                .bg(content_type.color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(content_type.color())
        };
        spans.push(Span::styled(format!(" {} ", content_type.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("→", Style::default().fg(Color::DarkGray)));

    let widget = Paragraph::new(Line::from(spans)).block(field_block("Type", focused));
    frame.render_widget(widget, area);
}

fn render_tags_field(frame: &mut Frame, area: Rect, tags: &[String], input: &str, focused: bool) {
    let mut chips: Vec<Span> = tags
        .iter()
        .map(|tag| Span::styled(format!("#{} ", tag), Style::default().fg(Color::Cyan)))
        .collect();
    if chips.is_empty() {
        chips.push(Span::styled("No tags yet", Style::default().fg(Color::DarkGray)));
    }

    let input_line = if input.is_empty() && !focused {
        Line::from(Span::styled("Type a tag and press Enter", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![
            Span::raw(input.to_string()),
            Span::styled(if focused { "▏" } else { "" }, Style::default().fg(Color::Green)),
        ])
    };

    let widget = Paragraph::new(vec![Line::from(chips), input_line]).block(field_block("Tags", focused));
    frame.render_widget(widget, area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle search, filters, content"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Search / apply filter"),
        ("Esc", "Clear search"),
        ("/", "Focus search"),
        ("", ""),
        ("", "── Content ──"),
        ("A", "Add content"),
        ("S", "Copy link"),
        ("D / Delete", "Delete content"),
        ("", ""),
        ("", "── General ──"),
        ("L", "Logout"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered_rect(62, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
