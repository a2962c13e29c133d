use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use api_types::{Currency, Money};

use crate::{
    app::App,
    ui::{
        components::{
            card::{Card, StatCard},
            money::{signed_minor, styled_amount, styled_amount_bold},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stat cards
            Constraint::Min(5),    // Recent transactions
        ])
        .split(area);

    render_stat_cards(frame, layout[0], app, &theme);
    render_recent(frame, layout[1], app, &theme);
}

fn render_stat_cards(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let currency = Currency::default();
    let stats = app.ledger.stats;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    StatCard::new(
        "Income",
        Span::styled(
            format!("+{}", Money::new(stats.total_income_minor).format(currency)),
            Style::default().fg(theme.positive),
        ),
        theme,
    )
    .render(frame, cols[0]);

    StatCard::new(
        "Expenses",
        Span::styled(
            format!("-{}", Money::new(stats.total_expense_minor).format(currency)),
            Style::default().fg(theme.negative),
        ),
        theme,
    )
    .render(frame, cols[1]);

    StatCard::new(
        "Balance",
        styled_amount_bold(stats.balance_minor, currency, theme),
        theme,
    )
    .render(frame, cols[2]);
}

fn render_recent(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let currency = Currency::default();
    let card = Card::new("Recent", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if app.ledger.items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No transactions yet. Press t, then a to add one.",
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
        .rev()
        .take(inner.height as usize)
        .map(|tx| {
            let date = tx.occurred_on.format("%d %b").to_string();
            let amount = styled_amount(signed_minor(tx.kind, tx.amount_minor), currency, theme);
            let line = Line::from(vec![
                Span::styled(format!("{date}  "), Style::default().fg(theme.dim)),
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

    frame.render_widget(List::new(items), inner);
}
