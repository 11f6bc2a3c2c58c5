use serde::{Deserialize, Serialize};

use crate::bank::account::Subscription;

/// A flat view of an account for export. Decouples the CSV output from the
/// entity and keeps serialisation trivial; ordering is by account id.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountSnapshot {
    pub account: u32,
    pub customer: u32,
    pub kind: String,
    pub balance: String,
    pub status: String,
}

impl From<&Subscription> for AccountSnapshot {
    fn from(account: &Subscription) -> Self {
        AccountSnapshot {
            account: account.id(),
            customer: account.owner(),
            kind: account.kind().to_string(),
            balance: account.balance().to_string(),
            status: account.status().to_string(),
        }
    }
}
