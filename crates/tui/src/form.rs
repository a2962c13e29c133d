use api_types::{
    Money,
    transaction::{Category, TransactionKind, TransactionNew},
};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates the transaction form fields and builds the request body.
///
/// Validation happens entirely locally; nothing reaches the network until
/// every field passes.
pub fn parse_transaction(
    description: &str,
    amount: &str,
    kind: TransactionKind,
    category: Category,
    date: &str,
) -> Result<TransactionNew, String> {
    let description = description.trim();
    if description.is_empty() {
        return Err("Enter a description.".to_string());
    }

    let amount: Money = amount
        .trim()
        .parse()
        .map_err(|_| "Invalid amount.".to_string())?;
    if !amount.is_positive() {
        return Err("Amount must be greater than zero.".to_string());
    }

    let occurred_on = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| "Invalid date, expected YYYY-MM-DD.".to_string())?;

    Ok(TransactionNew {
        description: description.to_string(),
        amount_minor: amount.minor(),
        kind,
        category,
        occurred_on,
    })
}

pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err("Fill in all fields.".to_string());
    }
    Ok(())
}

pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), String> {
    if name.trim().is_empty() || email.trim().is_empty() || password.trim().is_empty() {
        return Err("Fill in all fields.".to_string());
    }
    let email = email.trim();
    if !email.contains('@') || !email.contains('.') {
        return Err("Enter a valid email address.".to_string());
    }
    if password.len() < 6 {
        return Err("Password must be at least 6 characters.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_complete_form() {
        let parsed = parse_transaction(
            "  Groceries ",
            "12,50",
            TransactionKind::Expense,
            Category::Food,
            "2024-06-01",
        )
        .unwrap();

        assert_eq!(parsed.description, "Groceries");
        assert_eq!(parsed.amount_minor, 1250);
        assert_eq!(parsed.kind, TransactionKind::Expense);
        assert_eq!(parsed.category, Category::Food);
        assert_eq!(
            parsed.occurred_on,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn rejects_empty_description() {
        let err = parse_transaction(
            "   ",
            "10",
            TransactionKind::Income,
            Category::Salary,
            "2024-06-01",
        )
        .unwrap_err();
        assert_eq!(err, "Enter a description.");
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        for amount in ["0", "0.00", "-5"] {
            assert!(
                parse_transaction(
                    "x",
                    amount,
                    TransactionKind::Expense,
                    Category::Others,
                    "2024-06-01",
                )
                .is_err()
            );
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(
            parse_transaction(
                "x",
                "10",
                TransactionKind::Income,
                Category::Salary,
                "01/06/2024",
            )
            .is_err()
        );
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(validate_login("", "secret").is_err());
        assert!(validate_login("a@b.c", "").is_err());
        assert!(validate_login("a@b.c", "secret").is_ok());
    }

    #[test]
    fn registration_checks_email_and_password_length() {
        assert!(validate_registration("Alice", "not-an-email", "secret1").is_err());
        assert!(validate_registration("Alice", "a@b.c", "short").is_err());
        assert!(validate_registration("Alice", "a@b.c", "secret1").is_ok());
    }
}
