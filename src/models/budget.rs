use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    models::{DatabaseID, UserID},
    Error,
};

/// A user-defined spending ceiling for a category over a date range.
///
/// Expense transactions for the same user and category are rejected when
/// their amount exceeds the budget's limit. The date range is stored for
/// the user's reference but is not consulted during that check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    id: DatabaseID,
    user_id: UserID,
    category_id: DatabaseID,
    limit: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Budget {
    /// Create a new `Budget`.
    ///
    /// Note that this does *not* add the budget to the application database.
    pub fn new(
        id: DatabaseID,
        user_id: UserID,
        category_id: DatabaseID,
        limit: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            user_id,
            category_id,
            limit,
            start_date,
            end_date,
        }
    }

    /// The ID of the budget.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The ID of the user that owns the budget.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The ID of the category the budget applies to.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// The maximum amount a single expense in this category may be.
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// The first day of the budget period.
    pub fn start_date(&self) -> &NaiveDate {
        &self.start_date
    }

    /// The last day of the budget period.
    pub fn end_date(&self) -> &NaiveDate {
        &self.end_date
    }
}

/// Data for creating or updating a budget.
///
/// Validated on construction: the limit must be strictly positive and the end
/// date must not precede the start date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    user_id: UserID,
    category_id: DatabaseID,
    limit: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl NewBudget {
    /// Validate the data for a new budget.
    ///
    /// # Errors
    ///
    /// This function will return:
    /// - an [Error::InvalidLimit] if `limit` is not greater than zero,
    /// - or an [Error::InvalidDateRange] if `end_date` is before `start_date`.
    pub fn new(
        user_id: UserID,
        category_id: DatabaseID,
        limit: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, Error> {
        // The comparison is written so that NaN also fails validation.
        if !(limit > 0.0) {
            return Err(Error::InvalidLimit(limit));
        }

        if end_date < start_date {
            return Err(Error::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            user_id,
            category_id,
            limit,
            start_date,
            end_date,
        })
    }

    /// The ID of the user that owns the budget.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The ID of the category the budget applies to.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// The maximum amount a single expense in this category may be.
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// The first day of the budget period.
    pub fn start_date(&self) -> &NaiveDate {
        &self.start_date
    }

    /// The last day of the budget period.
    pub fn end_date(&self) -> &NaiveDate {
        &self.end_date
    }
}
