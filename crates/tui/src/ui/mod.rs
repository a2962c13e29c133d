pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Screen, Section, TransactionsMode};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    match app.state.screen {
        Screen::Login => {
            screens::login::render(frame, area, &app.state);
            components::toast::render(frame, area, app.state.toast.as_ref());
        }
        Screen::Register => {
            screens::register::render(frame, area, &app.state);
            components::toast::render(frame, area, app.state.toast.as_ref());
        }
        Screen::Home => render_shell(frame, area, app),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], app, &theme);
    components::tabs::render_tabs(frame, layout[1], app.state.section, &theme);

    match app.state.section {
        Section::Overview => screens::overview::render(frame, layout[2], app),
        Section::Transactions => screens::transactions::render(frame, layout[2], app),
    }

    render_bottom_bar(frame, layout[3], app, &theme);
    components::toast::render(frame, area, app.state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let user = app
        .session
        .user()
        .map(|u| u.name.as_str())
        .unwrap_or("-");
    let status = if app.ledger.loading {
        Span::styled("loading…", Style::default().fg(theme.accent))
    } else {
        Span::styled("idle", Style::default().fg(theme.dim))
    };

    let line = Line::from(vec![
        Span::styled("User", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Server", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", app.state.base_url)),
        status,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(app, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("Ctrl+L", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" logout"));
    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    let bar = Paragraph::new(Line::from(parts));
    frame.render_widget(bar, area);
}

/// Returns context-specific keyboard hints for the current section and mode.
fn get_context_hints(app: &App, theme: &Theme) -> Vec<Span<'static>> {
    match app.state.section {
        Section::Overview => vec![
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" refresh  "),
            Span::styled("t", Style::default().fg(theme.accent)),
            Span::raw(" transactions"),
        ],
        Section::Transactions => match app.state.transactions.mode {
            TransactionsMode::List => vec![
                Span::styled("a", Style::default().fg(theme.accent)),
                Span::raw(" add  "),
                Span::styled("e", Style::default().fg(theme.accent)),
                Span::raw(" edit  "),
                Span::styled("d", Style::default().fg(theme.accent)),
                Span::raw(" delete  "),
                Span::styled("r", Style::default().fg(theme.accent)),
                Span::raw(" refresh  "),
                Span::styled("j", Style::default().fg(theme.accent)),
                Span::raw("/"),
                Span::styled("k", Style::default().fg(theme.accent)),
                Span::raw(" move"),
            ],
            TransactionsMode::Form => vec![
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" save  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" cancel"),
            ],
            TransactionsMode::ConfirmDelete => vec![
                Span::styled("y", Style::default().fg(theme.accent)),
                Span::raw("/"),
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(" confirm"),
            ],
        },
    }
}
