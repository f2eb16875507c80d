use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    models::{DatabaseID, UserID},
    Error,
};

/// Whether a transaction brings money in or takes money out.
///
/// Only expenses are checked against the user's budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g., wages.
    Income,
    /// Money spent, e.g., groceries.
    Expense,
}

impl TransactionKind {
    /// The kind as the string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(Error::InvalidKind(other.to_string())),
        }
    }
}

/// A single recorded income or expense event for a user.
///
/// New instances should be created through
/// [`TransactionService::add_transaction`](crate::services::TransactionService::add_transaction)
/// so that expenses are validated against the user's budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: DatabaseID,
    user_id: UserID,
    kind: TransactionKind,
    amount: f64,
    category_id: DatabaseID,
    date: NaiveDate,
    note: String,
}

impl Transaction {
    /// Create a new `Transaction`.
    ///
    /// Note that this does *not* add the transaction to the application database.
    pub fn new(
        id: DatabaseID,
        user_id: UserID,
        kind: TransactionKind,
        amount: f64,
        category_id: DatabaseID,
        date: NaiveDate,
        note: String,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            amount,
            category_id,
            date,
            note,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The ID of the user that recorded the transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// Whether the transaction is an income or an expense.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// The amount of money earned or spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The ID of the category the transaction belongs to.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// The date the transaction occurred.
    pub fn date(&self) -> &NaiveDate {
        &self.date
    }

    /// A free-text note attached to the transaction.
    pub fn note(&self) -> &str {
        &self.note
    }
}

/// Data for creating a new transaction.
///
/// Validated on construction: amounts must be strictly positive for both
/// incomes and expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    user_id: UserID,
    kind: TransactionKind,
    amount: f64,
    category_id: DatabaseID,
    date: NaiveDate,
    note: String,
}

impl NewTransaction {
    /// Validate the data for a new transaction.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidAmount] if `amount` is not
    /// greater than zero.
    pub fn new(
        user_id: UserID,
        kind: TransactionKind,
        amount: f64,
        category_id: DatabaseID,
        date: NaiveDate,
        note: String,
    ) -> Result<Self, Error> {
        // The comparison is written so that NaN also fails validation.
        if !(amount > 0.0) {
            return Err(Error::InvalidAmount(amount));
        }

        Ok(Self {
            user_id,
            kind,
            amount,
            category_id,
            date,
            note,
        })
    }

    /// The ID of the user recording the transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// Whether the transaction is an income or an expense.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// The amount of money earned or spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The ID of the category the transaction belongs to.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// The date the transaction occurred.
    pub fn date(&self) -> &NaiveDate {
        &self.date
    }

    /// A free-text note attached to the transaction.
    pub fn note(&self) -> &str {
        &self.note
    }
}
