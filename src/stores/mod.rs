//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).
//!
//! Each entity gets its own trait so that consumers (the route handlers and
//! [TransactionService](crate::services::TransactionService)) only depend on
//! the operations they actually use, and tests can substitute in-memory fakes.

mod budget;
mod category;
mod payment_method;
mod transaction;
mod user;

pub mod sqlite;

pub use budget::BudgetStore;
pub use category::CategoryStore;
pub use payment_method::PaymentMethodStore;
pub use transaction::TransactionStore;
pub use user::UserStore;
