use api_types::{Currency, Money, transaction::TransactionKind};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// The signed contribution of a record: incomes count up, expenses down.
#[must_use]
pub fn signed_minor(kind: TransactionKind, amount_minor: i64) -> i64 {
    match kind {
        TransactionKind::Income => amount_minor,
        TransactionKind::Expense => -amount_minor,
    }
}

/// Creates a styled span for a money amount with semantic coloring.
///
/// - Positive amounts: green with `+` prefix
/// - Negative amounts: red (no prefix, negative sign shown)
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount_minor: i64, currency: Currency, theme: &Theme) -> Span<'static> {
    let formatted = Money::new(amount_minor).format(currency);

    let (color, prefix) = if amount_minor > 0 {
        (theme.positive, "+")
    } else if amount_minor < 0 {
        (theme.negative, "")
    } else {
        (theme.text, "")
    };

    Span::styled(format!("{prefix}{formatted}"), Style::default().fg(color))
}

/// Creates a styled span with bold modifier for emphasis (e.g. totals).
#[must_use]
pub fn styled_amount_bold(amount_minor: i64, currency: Currency, theme: &Theme) -> Span<'static> {
    let span = styled_amount(amount_minor, currency, theme);
    let style = span.style.add_modifier(Modifier::BOLD);
    Span::styled(span.content, style)
}
