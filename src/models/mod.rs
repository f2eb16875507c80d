//! The domain types: users, categories, transactions, budgets and payment
//! methods, along with the validating constructors for creating new rows.

mod budget;
mod category;
mod password;
mod payment_method;
mod transaction;
mod user;

pub use budget::{Budget, NewBudget};
pub use category::{Category, CategoryName, NewCategory};
pub use password::{PasswordHash, RawPassword};
pub use payment_method::{NewPaymentMethod, PaymentMethod};
pub use transaction::{NewTransaction, Transaction, TransactionKind};
pub use user::{NewUser, User, UserID};

/// Alias for the integer type used for database primary keys.
pub type DatabaseID = i64;
