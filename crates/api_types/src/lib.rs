use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod money;

pub use money::{Money, MoneyError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
}

pub mod user {
    use super::*;

    /// Account record as returned by the auth endpoints.
    ///
    /// The id is an opaque server-assigned string.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub id: String,
        pub name: String,
        pub email: String,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    /// Response body for both register and login.
    ///
    /// The token is an opaque bearer credential; the client never builds one.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub token: String,
        pub user: user::User,
    }

    /// Response body for the token verification endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VerifyResponse {
        pub user: user::User,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    impl TransactionKind {
        /// Returns the canonical kind string used on the wire.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }
    }

    /// Closed category set; the server rejects anything else.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Category {
        Food,
        Transport,
        Salary,
        Investment,
        Others,
    }

    impl Category {
        pub const ALL: [Category; 5] = [
            Self::Food,
            Self::Transport,
            Self::Salary,
            Self::Investment,
            Self::Others,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                Self::Food => "food",
                Self::Transport => "transport",
                Self::Salary => "salary",
                Self::Investment => "investment",
                Self::Others => "others",
            }
        }
    }

    /// A single ledger record.
    ///
    /// `amount_minor` is always positive; the kind carries the sign.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub description: String,
        pub amount_minor: i64,
        pub kind: TransactionKind,
        pub category: Category,
        pub occurred_on: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }

    /// Request body for creating a transaction.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub description: String,
        pub amount_minor: i64,
        pub kind: TransactionKind,
        pub category: Category,
        pub occurred_on: NaiveDate,
    }

    /// Request body for a full-record update (PUT semantics).
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub description: String,
        pub amount_minor: i64,
        pub kind: TransactionKind,
        pub category: Category,
        pub occurred_on: NaiveDate,
    }
}

pub mod stats {
    use super::*;

    /// Server-computed aggregate over all of a user's transactions.
    ///
    /// Once reconciled, `balance_minor` equals
    /// `total_income_minor - total_expense_minor`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionStats {
        pub total_income_minor: i64,
        pub total_expense_minor: i64,
        pub balance_minor: i64,
    }
}
