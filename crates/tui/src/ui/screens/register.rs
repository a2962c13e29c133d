use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, RegisterField},
    ui::theme::Theme,
};

use super::login::{centered_box, render_input};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let box_width = 40;
    let box_height = 9;
    let card_area = centered_box(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" register ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Email
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hint
        ])
        .margin(1)
        .split(inner);

    let register = &state.register;

    render_input(
        frame,
        rows[0],
        "name",
        &register.name,
        false,
        register.focus == RegisterField::Name,
        &theme,
    );
    render_input(
        frame,
        rows[2],
        "email",
        &register.email,
        false,
        register.focus == RegisterField::Email,
        &theme,
    );
    render_input(
        frame,
        rows[4],
        "password",
        &register.password,
        true,
        register.focus == RegisterField::Password,
        &theme,
    );

    let hint = Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" create  "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" back"),
    ]);
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rows[6]);

    if let Some(message) = &register.message {
        let message_area = Rect {
            x: area.x,
            y: card_area.y + card_area.height + 1,
            width: area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            message_area,
        );
    }
}
