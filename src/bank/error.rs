use thiserror::Error;

use crate::bank::account::TransactionError;
use crate::bank::{AccountId, CustomerId};

/// Failure surfaced to adapters. All variants are expected conditions the
/// caller can recover from; a REST adapter would map the first two to 404
/// and the last to 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    /// Also reported for accounts that exist but belong to another customer,
    /// so callers cannot probe for foreign account ids.
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("invalid transaction: {0}")]
    TransactionInvalid(#[from] TransactionError),
}
