//! Full-screen pages shown before sign in (landing, sign in, sign up)

use chrono::{Datelike, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{AuthField, AuthForm, Route};
use super::utils::{border_style, centered_rect};

const FEATURES: [(&str, &str); 3] = [
    ("Save anything", "Keep videos, articles, audio and images in one place."),
    ("Find it fast", "Filter by type or search across everything you saved."),
    ("Share easily", "Copy a link to any item and send it along."),
];

pub fn render_landing(frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(9),  // Hero
            Constraint::Length(7),  // Feature cards
            Constraint::Min(0),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);

    let key_style = Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD);
    let hero = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Your Second Brain",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Capture the links worth keeping and find them again when you need them.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" u ", key_style),
            Span::raw(" Start for Free    "),
            Span::styled(" s ", key_style),
            Span::raw(" Sign In    "),
            Span::styled(" q ", key_style),
            Span::raw(" Quit"),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(hero, chunks[1]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[2]);

    for ((title, body), area) in FEATURES.iter().zip(cards.iter()) {
        let card = Paragraph::new(*body)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", title))
                    .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
                    .padding(Padding::uniform(1)),
            );
        frame.render_widget(card, *area);
    }
}

/// Header, centered form, footer with the current year
pub fn render_auth_page(frame: &mut Frame, route: Route, form: &AuthForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_auth_form(frame, chunks[1], route, form);

    let footer = Paragraph::new(format!("© {} Second Brain. All rights reserved.", Local::now().year()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        "🧠 Second Brain",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::BOTTOM).padding(Padding::horizontal(1)));
    frame.render_widget(header, area);
}

fn render_auth_form(frame: &mut Frame, area: Rect, route: Route, form: &AuthForm) {
    let (title, action, switch_hint) = if route == Route::SignUp {
        (" Create your account ", "Sign Up", "Already have an account? Ctrl+N to sign in")
    } else {
        (" Welcome back ", "Sign In", "Don't have an account? Ctrl+N to sign up")
    };

    let popup_area = centered_rect(48, 14, area);
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(title)
        .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1));
    let inner = outer.inner(popup_area);
    frame.render_widget(outer, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(1), // Error
            Constraint::Length(1), // Action
            Constraint::Length(1), // Switch hint
            Constraint::Min(0),
        ])
        .split(inner);

    let masked = "•".repeat(form.password.chars().count());
    let fields = [
        ("Username", form.username.as_str(), AuthField::Username),
        ("Password", masked.as_str(), AuthField::Password),
    ];
    for ((label, value, field), chunk) in fields.into_iter().zip(chunks.iter()) {
        let focused = form.focused == field;
        let cursor = if focused { "▏" } else { "" };
        let widget = Paragraph::new(Line::from(vec![
            Span::raw(value),
            Span::styled(cursor, Style::default().fg(Color::Green)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", label))
                .border_style(border_style(focused)),
        );
        frame.render_widget(widget, *chunk);
    }

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[2],
        );
    }

    let action_text = if form.submitting {
        format!("{}...", action)
    } else {
        format!("Enter to {}", action)
    };
    frame.render_widget(
        Paragraph::new(action_text)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(format!("{} · Esc back", switch_hint))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[4],
    );
}
