use std::collections::HashMap;

use crate::bank::account::Subscription;
use crate::bank::customer::Customer;
use crate::bank::{AccountId, CustomerId};

/// Narrow persistence contract the services run against. Implementations
/// must apply each save atomically per entity; the services assume the
/// record is durable once the call returns.
pub trait Store {
    fn customer(&self, id: CustomerId) -> Option<&Customer>;
    fn customer_mut(&mut self, id: CustomerId) -> Option<&mut Customer>;
    fn save_customer(&mut self, customer: Customer);

    fn account(&self, id: AccountId) -> Option<&Subscription>;
    fn account_mut(&mut self, id: AccountId) -> Option<&mut Subscription>;
    fn save_account(&mut self, account: Subscription);

    /// Reserves the id for the next account to be saved.
    fn next_account_id(&mut self) -> AccountId;

    fn accounts(&self) -> Vec<&Subscription>;
}

/// HashMap-backed store for the batch driver and tests.
#[derive(Debug)]
pub struct MemStore {
    customers: HashMap<CustomerId, Customer>,
    accounts: HashMap<AccountId, Subscription>,
    next_account: AccountId,
}

impl MemStore {
    pub fn new() -> Self {
        MemStore {
            customers: HashMap::new(),
            accounts: HashMap::new(),
            next_account: 1,
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        MemStore::new()
    }
}

impl Store for MemStore {
    fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    fn customer_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        self.customers.get_mut(&id)
    }

    fn save_customer(&mut self, customer: Customer) {
        self.customers.insert(customer.id(), customer);
    }

    fn account(&self, id: AccountId) -> Option<&Subscription> {
        self.accounts.get(&id)
    }

    fn account_mut(&mut self, id: AccountId) -> Option<&mut Subscription> {
        self.accounts.get_mut(&id)
    }

    fn save_account(&mut self, account: Subscription) {
        self.accounts.insert(account.id(), account);
    }

    fn next_account_id(&mut self) -> AccountId {
        let id = self.next_account;
        self.next_account += 1;
        id
    }

    fn accounts(&self) -> Vec<&Subscription> {
        self.accounts.values().collect()
    }
}
