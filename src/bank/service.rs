use crate::bank::account::{AccountKind, SAVINGS_MINIMUM, Subscription, TransactionError};
use crate::bank::amount::Amount;
use crate::bank::customer::Customer;
use crate::bank::error::ServiceError;
use crate::bank::snapshot::AccountSnapshot;
use crate::bank::store::Store;
use crate::bank::{AccountId, CustomerId};

/// Requested shape of a new account.
#[derive(Debug, Clone, Copy)]
pub struct AccountSpec {
    pub kind: AccountKind,
    pub initial_balance: Amount,
}

/// Orchestrates account operations against the store. Every balance change
/// is a synchronous read-modify-write; exclusive access to the store
/// serializes concurrent operations on the same account.
pub struct SubscriptionService<S: Store> {
    store: S,
}

impl<S: Store> SubscriptionService<S> {
    pub fn new(store: S) -> Self {
        SubscriptionService { store }
    }

    pub fn get(&self, account_id: AccountId) -> Option<&Subscription> {
        self.store.account(account_id)
    }

    /// Opens an account for an existing customer. The savings floor applies
    /// at creation: a savings account cannot start below 100.
    pub fn create_account(
        &mut self,
        customer_id: CustomerId,
        spec: AccountSpec,
    ) -> Result<AccountId, ServiceError> {
        if self.store.customer(customer_id).is_none() {
            return Err(ServiceError::CustomerNotFound(customer_id));
        }
        if spec.initial_balance < Amount::ZERO {
            return Err(TransactionError::NonPositiveAmount.into());
        }
        if spec.kind == AccountKind::Savings && spec.initial_balance < SAVINGS_MINIMUM {
            return Err(TransactionError::BelowSavingsMinimum.into());
        }

        let id = self.store.next_account_id();
        self.store
            .save_account(Subscription::new(id, customer_id, spec.kind, spec.initial_balance));
        if let Some(customer) = self.store.customer_mut(customer_id) {
            customer.attach(id);
        }

        log::debug!(
            "opened {} account {id} for customer {customer_id} with balance {}",
            spec.kind,
            spec.initial_balance
        );
        Ok(id)
    }

    pub fn deposit(
        &mut self,
        account_id: AccountId,
        customer_id: CustomerId,
        amount: Amount,
    ) -> Result<(), ServiceError> {
        let account = self.owned_account_mut(account_id, customer_id)?;
        account.deposit(amount)?;
        log::debug!("deposited {amount} into account {account_id}");
        Ok(())
    }

    pub fn withdraw(
        &mut self,
        account_id: AccountId,
        customer_id: CustomerId,
        amount: Amount,
    ) -> Result<(), ServiceError> {
        let account = self.owned_account_mut(account_id, customer_id)?;
        account.withdraw(amount)?;
        log::debug!("withdrew {amount} from account {account_id}");
        Ok(())
    }

    pub fn close(
        &mut self,
        account_id: AccountId,
        customer_id: CustomerId,
    ) -> Result<(), ServiceError> {
        let account = self.owned_account_mut(account_id, customer_id)?;
        account.close()?;
        log::debug!("closed account {account_id}");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // An account owned by someone else reads as absent, so one customer
    // cannot probe for another's account ids.
    fn owned_account_mut(
        &mut self,
        account_id: AccountId,
        customer_id: CustomerId,
    ) -> Result<&mut Subscription, ServiceError> {
        match self.store.account_mut(account_id) {
            Some(account) if account.owner() == customer_id => Ok(account),
            _ => Err(ServiceError::AccountNotFound(account_id)),
        }
    }
}

/// Customer-facing operations. Account creation and closing run through the
/// subscription service; the customer record keeps listing closed accounts.
pub struct UserService<S: Store> {
    subscriptions: SubscriptionService<S>,
}

impl<S: Store> UserService<S> {
    pub fn new(store: S) -> Self {
        UserService {
            subscriptions: SubscriptionService::new(store),
        }
    }

    pub fn get(&self, customer_id: CustomerId) -> Option<&Customer> {
        self.subscriptions.store().customer(customer_id)
    }

    pub fn add_account(
        &mut self,
        customer_id: CustomerId,
        spec: AccountSpec,
    ) -> Result<AccountId, ServiceError> {
        self.subscriptions.create_account(customer_id, spec)
    }

    pub fn close_account(
        &mut self,
        customer_id: CustomerId,
        account_id: AccountId,
    ) -> Result<(), ServiceError> {
        if self.get(customer_id).is_none() {
            return Err(ServiceError::CustomerNotFound(customer_id));
        }
        self.subscriptions.close(account_id, customer_id)
    }

    /// All accounts of a customer, open and closed, in opening order.
    pub fn list_accounts(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<&Subscription>, ServiceError> {
        let customer = self
            .get(customer_id)
            .ok_or(ServiceError::CustomerNotFound(customer_id))?;
        Ok(customer
            .accounts()
            .iter()
            .filter_map(|id| self.subscriptions.get(*id))
            .collect())
    }

    /// A single account, with the same ownership opacity as the transaction
    /// operations.
    pub fn get_account(
        &self,
        customer_id: CustomerId,
        account_id: AccountId,
    ) -> Result<&Subscription, ServiceError> {
        match self.subscriptions.get(account_id) {
            Some(account) if account.owner() == customer_id => Ok(account),
            _ => Err(ServiceError::AccountNotFound(account_id)),
        }
    }

    /// Snapshots of every account in the store, sorted by account id.
    pub fn account_snapshots(&self) -> Vec<AccountSnapshot> {
        let mut snapshots: Vec<AccountSnapshot> = self
            .subscriptions
            .store()
            .accounts()
            .into_iter()
            .map(AccountSnapshot::from)
            .collect();
        snapshots.sort();
        snapshots
    }

    pub fn subscriptions(&self) -> &SubscriptionService<S> {
        &self.subscriptions
    }

    pub fn subscriptions_mut(&mut self) -> &mut SubscriptionService<S> {
        &mut self.subscriptions
    }

    pub(crate) fn store_mut(&mut self) -> &mut S {
        self.subscriptions.store_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::account::AccountStatus;
    use crate::bank::store::MemStore;

    fn service_with_customers(ids: &[CustomerId]) -> UserService<MemStore> {
        let mut store = MemStore::new();
        for id in ids {
            store.save_customer(Customer::new(*id));
        }
        UserService::new(store)
    }

    fn checking(balance: i64) -> AccountSpec {
        AccountSpec {
            kind: AccountKind::Checking,
            initial_balance: Amount::from_units(balance),
        }
    }

    fn savings(balance: i64) -> AccountSpec {
        AccountSpec {
            kind: AccountKind::Savings,
            initial_balance: Amount::from_units(balance),
        }
    }

    #[test]
    fn create_account_requires_a_known_customer() {
        let mut service = service_with_customers(&[]);
        assert_eq!(
            service.add_account(9, checking(0)),
            Err(ServiceError::CustomerNotFound(9))
        );
    }

    #[test]
    fn create_account_attaches_to_the_customer() {
        let mut service = service_with_customers(&[1]);
        let id = service.add_account(1, checking(25)).unwrap();

        assert_eq!(service.get(1).unwrap().accounts(), &[id]);
        let account = service.subscriptions().get(id).unwrap();
        assert_eq!(account.owner(), 1);
        assert_eq!(account.balance(), Amount::from_units(25));
        assert!(account.is_open());
    }

    #[test]
    fn savings_account_cannot_start_below_the_floor() {
        let mut service = service_with_customers(&[1]);
        assert_eq!(
            service.add_account(1, savings(99)),
            Err(ServiceError::TransactionInvalid(
                TransactionError::BelowSavingsMinimum
            ))
        );
        assert_eq!(service.add_account(1, savings(100)), Ok(1));
    }

    #[test]
    fn deposit_and_withdraw_round_trip() {
        let mut service = service_with_customers(&[1]);
        let id = service.add_account(1, checking(0)).unwrap();

        let subs = service.subscriptions_mut();
        subs.deposit(id, 1, Amount::from_units(50)).unwrap();
        subs.withdraw(id, 1, Amount::from_units(50)).unwrap();

        assert!(service.subscriptions().get(id).unwrap().balance().is_zero());
        service.close_account(1, id).unwrap();
        assert_eq!(
            service.subscriptions().get(id).unwrap().status(),
            AccountStatus::Closed
        );
    }

    #[test]
    fn foreign_accounts_read_as_not_found() {
        let mut service = service_with_customers(&[1, 2]);
        let id = service.add_account(2, checking(10)).unwrap();

        assert_eq!(
            service
                .subscriptions_mut()
                .deposit(id, 1, Amount::from_units(5)),
            Err(ServiceError::AccountNotFound(id))
        );
        assert_eq!(
            service
                .subscriptions_mut()
                .withdraw(id, 1, Amount::from_units(5)),
            Err(ServiceError::AccountNotFound(id))
        );
        assert_eq!(
            service.close_account(1, id),
            Err(ServiceError::AccountNotFound(id))
        );
        assert_eq!(
            service.get_account(1, id),
            Err(ServiceError::AccountNotFound(id))
        );

        // Untouched by the failed attempts
        let account = service.get_account(2, id).unwrap();
        assert_eq!(account.balance(), Amount::from_units(10));
        assert!(account.is_open());
    }

    #[test]
    fn close_account_distinguishes_customer_and_account() {
        let mut service = service_with_customers(&[1]);
        let id = service.add_account(1, checking(20)).unwrap();

        assert_eq!(
            service.close_account(9, id),
            Err(ServiceError::CustomerNotFound(9))
        );
        assert_eq!(
            service.close_account(1, 99),
            Err(ServiceError::AccountNotFound(99))
        );
        assert_eq!(
            service.close_account(1, id),
            Err(ServiceError::TransactionInvalid(
                TransactionError::FundsRemaining
            ))
        );
        assert!(service.subscriptions().get(id).unwrap().is_open());
    }

    #[test]
    fn closed_accounts_stay_listed() {
        let mut service = service_with_customers(&[1]);
        let id = service.add_account(1, checking(0)).unwrap();
        service.close_account(1, id).unwrap();

        assert_eq!(service.get(1).unwrap().accounts(), &[id]);
        let accounts = service.list_accounts(1).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].status(), AccountStatus::Closed);
    }

    #[test]
    fn list_accounts_requires_a_known_customer() {
        let service = service_with_customers(&[]);
        assert_eq!(
            service.list_accounts(5),
            Err(ServiceError::CustomerNotFound(5))
        );
    }

    #[test]
    fn savings_scenario_from_floor_to_closed() {
        let mut service = service_with_customers(&[1]);
        let id = service.add_account(1, savings(100)).unwrap();

        assert_eq!(
            service
                .subscriptions_mut()
                .withdraw(id, 1, Amount::from_units(1)),
            Err(ServiceError::TransactionInvalid(
                TransactionError::BelowSavingsMinimum
            ))
        );
        service
            .subscriptions_mut()
            .withdraw(id, 1, Amount::from_units(100))
            .unwrap();
        service.close_account(1, id).unwrap();
        assert_eq!(
            service.subscriptions().get(id).unwrap().status(),
            AccountStatus::Closed
        );
    }

    #[test]
    fn snapshots_are_sorted_by_account_id() {
        let mut service = service_with_customers(&[1, 2]);
        service.add_account(1, checking(5)).unwrap();
        service.add_account(2, savings(200)).unwrap();

        let snapshots = service.account_snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].account, 1);
        assert_eq!(snapshots[0].balance, "5.0000");
        assert_eq!(snapshots[1].account, 2);
        assert_eq!(snapshots[1].kind, "savings");
        assert_eq!(snapshots[1].status, "open");
    }
}
