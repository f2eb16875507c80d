//! The transaction recording service, which validates new transactions
//! against the user's budgets before anything is persisted.

use crate::{
    models::{DatabaseID, NewTransaction, Transaction, TransactionKind, UserID},
    stores::{BudgetStore, TransactionStore},
    Error,
};

/// Records transactions, gating expenses behind the user's category budgets.
///
/// The service composes two collaborators injected at construction time: a
/// [BudgetStore] that it only ever reads from, and a [TransactionStore] that
/// receives at most one write per call. It holds no state of its own between
/// calls and performs no locking; consistency between the budget read and the
/// transaction write is left to the backing store.
#[derive(Debug)]
pub struct TransactionService<B, T> {
    budget_store: B,
    transaction_store: T,
}

impl<B, T> TransactionService<B, T>
where
    B: BudgetStore,
    T: TransactionStore,
{
    /// Create a new service from its two collaborators.
    pub fn new(budget_store: B, transaction_store: T) -> Self {
        Self {
            budget_store,
            transaction_store,
        }
    }

    /// Validate `new_transaction` against the user's budgets and persist it.
    ///
    /// Income transactions are persisted unconditionally. Expense transactions
    /// are checked against every budget that belongs to the same user and
    /// category, in the order the budget store returns them: the first budget
    /// whose limit is strictly exceeded rejects the transaction, and no
    /// further budgets are checked. The budget's start and end dates are not
    /// consulted.
    ///
    /// On any rejection path nothing is written to the transaction store.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::BudgetLookup] if the budgets could not be fetched,
    /// - [Error::BudgetExceeded] if the transaction is an expense whose amount
    ///   exceeds a matching budget's limit,
    /// - or any error from the transaction store if persisting fails.
    pub fn add_transaction(
        &mut self,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let budgets = self
            .budget_store
            .get_by_user(new_transaction.user_id())
            .map_err(|error| Error::BudgetLookup(Box::new(error)))?;

        if new_transaction.kind() == TransactionKind::Expense {
            for budget in &budgets {
                if budget.category_id() == new_transaction.category_id()
                    && new_transaction.amount() > budget.limit()
                {
                    return Err(Error::BudgetExceeded {
                        amount: new_transaction.amount(),
                        limit: budget.limit(),
                    });
                }
            }
        }

        self.transaction_store.create(new_transaction)
    }

    /// Retrieve all transactions recorded by the user `user_id`.
    pub fn transactions_for_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.transaction_store.get_by_user(user_id)
    }

    /// Delete the transaction with `id` belonging to the user `user_id`.
    ///
    /// Deleting is never guarded by budget rules; removing an over-budget
    /// transaction is always allowed.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `id` does not refer to a transaction
    /// recorded by `user_id`.
    pub fn delete_transaction(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error> {
        self.transaction_store.delete(id, user_id)
    }
}

#[cfg(test)]
mod transaction_service_tests {
    use chrono::NaiveDate;

    use crate::{
        models::{
            Budget, DatabaseID, NewBudget, NewTransaction, Transaction, TransactionKind, UserID,
        },
        stores::{BudgetStore, TransactionStore},
        Error,
    };

    use super::TransactionService;

    /// An in-memory budget store that can be told to fail its lookups.
    #[derive(Default)]
    struct FakeBudgetStore {
        budgets: Vec<Budget>,
        fail_lookups: bool,
    }

    impl BudgetStore for FakeBudgetStore {
        fn create(&mut self, new_budget: NewBudget) -> Result<Budget, Error> {
            let budget = Budget::new(
                self.budgets.len() as DatabaseID + 1,
                new_budget.user_id(),
                new_budget.category_id(),
                new_budget.limit(),
                *new_budget.start_date(),
                *new_budget.end_date(),
            );
            self.budgets.push(budget.clone());

            Ok(budget)
        }

        fn get_by_user(&self, user_id: UserID) -> Result<Vec<Budget>, Error> {
            if self.fail_lookups {
                return Err(Error::SqlError(rusqlite::Error::InvalidQuery));
            }

            Ok(self
                .budgets
                .iter()
                .filter(|budget| budget.user_id() == user_id)
                .cloned()
                .collect())
        }

        fn update(&mut self, _: DatabaseID, _: NewBudget) -> Result<Budget, Error> {
            unreachable!("the transaction service never updates budgets")
        }

        fn delete(&mut self, _: DatabaseID, _: UserID) -> Result<(), Error> {
            unreachable!("the transaction service never deletes budgets")
        }
    }

    /// An in-memory transaction store that records every save.
    #[derive(Default)]
    struct FakeTransactionStore {
        transactions: Vec<Transaction>,
    }

    impl TransactionStore for FakeTransactionStore {
        fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
            let transaction = Transaction::new(
                self.transactions.len() as DatabaseID + 1,
                new_transaction.user_id(),
                new_transaction.kind(),
                new_transaction.amount(),
                new_transaction.category_id(),
                *new_transaction.date(),
                new_transaction.note().to_owned(),
            );
            self.transactions.push(transaction.clone());

            Ok(transaction)
        }

        fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
            Ok(self
                .transactions
                .iter()
                .filter(|transaction| transaction.user_id() == user_id)
                .cloned()
                .collect())
        }

        fn delete(&mut self, id: DatabaseID, user_id: UserID) -> Result<(), Error> {
            let index = self
                .transactions
                .iter()
                .position(|transaction| {
                    transaction.id() == id && transaction.user_id() == user_id
                })
                .ok_or(Error::NotFound)?;
            self.transactions.remove(index);

            Ok(())
        }
    }

    fn budget(user_id: i64, category_id: DatabaseID, limit: f64) -> Budget {
        Budget::new(
            0,
            UserID::new(user_id),
            category_id,
            limit,
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
        )
    }

    fn transaction(
        user_id: i64,
        category_id: DatabaseID,
        kind: TransactionKind,
        amount: f64,
    ) -> NewTransaction {
        NewTransaction::new(
            UserID::new(user_id),
            kind,
            amount,
            category_id,
            NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            String::new(),
        )
        .unwrap()
    }

    fn service_with_budgets(
        budgets: Vec<Budget>,
    ) -> TransactionService<FakeBudgetStore, FakeTransactionStore> {
        TransactionService::new(
            FakeBudgetStore {
                budgets,
                fail_lookups: false,
            },
            FakeTransactionStore::default(),
        )
    }

    #[test]
    fn expense_over_budget_is_rejected_and_nothing_is_saved() {
        let mut service = service_with_budgets(vec![budget(1, 2, 1000.0)]);

        let result =
            service.add_transaction(transaction(1, 2, TransactionKind::Expense, 1200.0));

        assert_eq!(
            result,
            Err(Error::BudgetExceeded {
                amount: 1200.0,
                limit: 1000.0
            })
        );
        assert!(service.transaction_store.transactions.is_empty());
    }

    #[test]
    fn expense_within_budget_is_persisted() {
        let mut service = service_with_budgets(vec![budget(1, 2, 1000.0)]);

        let result = service.add_transaction(transaction(1, 2, TransactionKind::Expense, 800.0));

        assert!(result.is_ok());
        assert_eq!(service.transaction_store.transactions.len(), 1);
        assert_eq!(service.transaction_store.transactions[0].amount(), 800.0);
    }

    #[test]
    fn expense_equal_to_the_limit_is_persisted() {
        let mut service = service_with_budgets(vec![budget(1, 2, 1000.0)]);

        let result =
            service.add_transaction(transaction(1, 2, TransactionKind::Expense, 1000.0));

        assert!(result.is_ok());
        assert_eq!(service.transaction_store.transactions.len(), 1);
    }

    #[test]
    fn expense_with_no_matching_category_budget_is_persisted() {
        let mut service = service_with_budgets(vec![budget(1, 2, 10.0)]);

        let result = service.add_transaction(transaction(1, 5, TransactionKind::Expense, 50.0));

        assert!(result.is_ok());
        assert_eq!(service.transaction_store.transactions.len(), 1);
    }

    #[test]
    fn expense_with_no_budgets_at_all_is_persisted() {
        let mut service = service_with_budgets(vec![]);

        let result = service.add_transaction(transaction(1, 5, TransactionKind::Expense, 50.0));

        assert!(result.is_ok());
        assert_eq!(service.transaction_store.transactions.len(), 1);
    }

    #[test]
    fn income_skips_the_budget_check() {
        let mut service = service_with_budgets(vec![budget(1, 2, 1000.0)]);

        let result =
            service.add_transaction(transaction(1, 2, TransactionKind::Income, 5000.0));

        assert!(result.is_ok());
        assert_eq!(service.transaction_store.transactions.len(), 1);
    }

    #[test]
    fn another_users_budget_does_not_apply() {
        let mut service = service_with_budgets(vec![budget(7, 2, 10.0)]);

        let result = service.add_transaction(transaction(1, 2, TransactionKind::Expense, 50.0));

        assert!(result.is_ok());
        assert_eq!(service.transaction_store.transactions.len(), 1);
    }

    #[test]
    fn first_matching_budget_in_store_order_rejects() {
        // Two budgets cover category 2; only the first one returned by the
        // store decides, even though the second would allow the amount.
        let mut service = service_with_budgets(vec![budget(1, 2, 100.0), budget(1, 2, 1000.0)]);

        let result = service.add_transaction(transaction(1, 2, TransactionKind::Expense, 500.0));

        assert_eq!(
            result,
            Err(Error::BudgetExceeded {
                amount: 500.0,
                limit: 100.0
            })
        );
        assert!(service.transaction_store.transactions.is_empty());
    }

    #[test]
    fn budget_lookup_failure_propagates_and_nothing_is_saved() {
        let mut service = TransactionService::new(
            FakeBudgetStore {
                budgets: vec![],
                fail_lookups: true,
            },
            FakeTransactionStore::default(),
        );

        let result = service.add_transaction(transaction(1, 2, TransactionKind::Expense, 50.0));

        assert_eq!(
            result,
            Err(Error::BudgetLookup(Box::new(Error::SqlError(
                rusqlite::Error::InvalidQuery
            ))))
        );
        assert!(service.transaction_store.transactions.is_empty());
    }

    #[test]
    fn budget_lookup_failure_also_blocks_income() {
        // The lookup happens before the kind is inspected, so a failing
        // budget store blocks income transactions too.
        let mut service = TransactionService::new(
            FakeBudgetStore {
                budgets: vec![],
                fail_lookups: true,
            },
            FakeTransactionStore::default(),
        );

        let result = service.add_transaction(transaction(1, 2, TransactionKind::Income, 50.0));

        assert!(matches!(result, Err(Error::BudgetLookup(_))));
        assert!(service.transaction_store.transactions.is_empty());
    }

    #[test]
    fn transactions_for_user_returns_only_that_users_transactions() {
        let mut service = service_with_budgets(vec![]);

        service
            .add_transaction(transaction(1, 2, TransactionKind::Expense, 50.0))
            .unwrap();
        service
            .add_transaction(transaction(7, 2, TransactionKind::Expense, 60.0))
            .unwrap();

        let transactions = service.transactions_for_user(UserID::new(1)).unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].user_id(), UserID::new(1));
    }

    #[test]
    fn delete_transaction_succeeds_even_when_over_budget() {
        // A budget added after the fact makes the stored transaction
        // over-budget; deleting it must still work.
        let mut service = service_with_budgets(vec![]);
        let stored = service
            .add_transaction(transaction(1, 2, TransactionKind::Expense, 50.0))
            .unwrap();
        service.budget_store.budgets.push(budget(1, 2, 10.0));

        assert_eq!(
            service.delete_transaction(stored.id(), stored.user_id()),
            Ok(())
        );
        assert!(service.transaction_store.transactions.is_empty());
    }

    #[test]
    fn delete_missing_transaction_returns_not_found() {
        let mut service = service_with_budgets(vec![budget(1, 2, 1000.0)]);

        assert_eq!(
            service.delete_transaction(1337, UserID::new(1)),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_another_users_transaction_returns_not_found() {
        let mut service = service_with_budgets(vec![]);
        let stored = service
            .add_transaction(transaction(1, 2, TransactionKind::Expense, 50.0))
            .unwrap();

        assert_eq!(
            service.delete_transaction(stored.id(), UserID::new(7)),
            Err(Error::NotFound)
        );
        assert_eq!(service.transaction_store.transactions.len(), 1);
    }
}
