use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use api_types::Currency;

use crate::{
    app::{App, FormField, TransactionsMode},
    ui::{
        components::money::{signed_minor, styled_amount},
        theme::Theme,
    },
};

use super::login::{centered_box, render_input};

pub fn render(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let theme = Theme::default();

    render_list(frame, area, app, &theme);

    match app.state.transactions.mode {
        TransactionsMode::List => {}
        TransactionsMode::Form => render_form(frame, area, app, &theme),
        TransactionsMode::ConfirmDelete => render_confirm(frame, area, app, &theme),
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let currency = Currency::default();

    let block = Block::default()
        .title(" Transactions ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if app.ledger.items.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No transactions. Press a to add one.",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let items = app
        .ledger
        .items
        .iter()
        .map(|tx| {
            let date = tx.occurred_on.format("%Y-%m-%d").to_string();
            let kind = tx.kind.as_str();
            let amount = styled_amount(signed_minor(tx.kind, tx.amount_minor), currency, theme);
            let line = Line::from(vec![
                Span::styled(format!("{date}  "), Style::default().fg(theme.dim)),
                Span::styled(format!("{kind:<8}"), Style::default().fg(theme.text_muted)),
                Span::styled(
                    format!("{:<12}", tx.category.as_str()),
                    Style::default().fg(theme.text_muted),
                ),
                amount,
                Span::raw("  "),
                Span::styled(tx.description.clone(), Style::default().fg(theme.text)),
            ]);
            ListItem::new(line)
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(app.state.transactions.selected));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let form = &app.state.transactions.form;

    let box_width = 48;
    let box_height = 13;
    let card_area = centered_box(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let title = if form.editing.is_some() {
        " edit transaction "
    } else {
        " new transaction "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Description
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Kind
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Category
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Date
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hint
        ])
        .margin(1)
        .split(inner);

    render_input(
        frame,
        rows[0],
        "what",
        &form.description,
        false,
        form.focus == FormField::Description,
        theme,
    );
    render_input(
        frame,
        rows[2],
        "amount",
        &form.amount,
        false,
        form.focus == FormField::Amount,
        theme,
    );
    render_choice(
        frame,
        rows[4],
        "kind",
        form.kind.as_str(),
        form.focus == FormField::Kind,
        theme,
    );
    render_choice(
        frame,
        rows[6],
        "category",
        form.selected_category().as_str(),
        form.focus == FormField::Category,
        theme,
    );
    render_input(
        frame,
        rows[8],
        "date",
        &form.date,
        false,
        form.focus == FormField::Date,
        theme,
    );

    let hint = Line::from(vec![
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" next  "),
        Span::styled("↑↓", Style::default().fg(theme.accent)),
        Span::raw(" choose  "),
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" save  "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" cancel"),
    ]);
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rows[10]);

    if let Some(message) = &form.message {
        let message_area = Rect {
            x: area.x,
            y: card_area.y + card_area.height,
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

/// Renders a closed-choice field; the value cycles instead of taking input.
fn render_choice(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let value_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let marker = if focused { " ↕" } else { "" };

    let line = Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(theme.dim)),
        Span::styled(format!("‹{value}›{marker}"), value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let selected = app.state.transactions.selected;
    let Some(tx) = app.ledger.items.get(selected) else {
        return;
    };

    let box_width = 44;
    let box_height = 5;
    let card_area = centered_box(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" delete ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let lines = vec![
        Line::from(Span::styled(
            format!("Delete \"{}\"?", tx.description),
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error)),
            Span::raw(" delete  "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" keep"),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}
