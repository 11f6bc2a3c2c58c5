use crate::bank::{AccountId, CustomerId};

/// An account owner. Customers are created outside the service layer;
/// closed accounts stay listed here, only their status changes.
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    accounts: Vec<AccountId>,
}

impl Customer {
    pub fn new(id: CustomerId) -> Self {
        Customer {
            id,
            accounts: Vec::new(),
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Owned account ids, in the order the accounts were opened.
    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub(crate) fn attach(&mut self, account: AccountId) {
        self.accounts.push(account);
    }
}
