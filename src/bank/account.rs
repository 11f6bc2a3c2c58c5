use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::bank::amount::{Amount, AmountError};
use crate::bank::{AccountId, CustomerId};

/// Balance floor for savings accounts, enforced at creation and on every
/// withdrawal that leaves funds in the account.
pub const SAVINGS_MINIMUM: Amount = Amount::from_units(100);

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Checking => write!(f, "checking"),
            AccountKind::Savings => write!(f, "savings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Open,
    Closed,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Open => write!(f, "open"),
            AccountStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Business-rule violation on a single account operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction amount must be positive")]
    NonPositiveAmount,

    #[error("amount is over the current balance")]
    InsufficientBalance,

    #[error("savings account must keep a minimum balance of 100")]
    BelowSavingsMinimum,

    #[error("account is closed")]
    AccountClosed,

    #[error("account still has funds")]
    FundsRemaining,

    #[error("balance arithmetic failed: {0}")]
    Balance(#[from] AmountError),
}

/// A customer's bank account record. Closing is terminal: once the status
/// flips to `Closed` no further operation is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    id: AccountId,
    owner: CustomerId,
    kind: AccountKind,
    balance: Amount,
    status: AccountStatus,
}

impl Subscription {
    pub fn new(id: AccountId, owner: CustomerId, kind: AccountKind, balance: Amount) -> Self {
        Subscription {
            id,
            owner,
            kind,
            balance,
            status: AccountStatus::Open,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == AccountStatus::Open
    }

    /// Adds `amount` to the balance. There is no upper bound beyond the
    /// capacity of [`Amount`] itself.
    pub fn deposit(&mut self, amount: Amount) -> Result<(), TransactionError> {
        self.ensure_open()?;
        if !amount.is_positive() {
            return Err(TransactionError::NonPositiveAmount);
        }
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }

    /// Removes `amount` from the balance. A savings account may be emptied
    /// entirely (so it can be closed) but must otherwise stay at or above
    /// [`SAVINGS_MINIMUM`].
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), TransactionError> {
        self.ensure_open()?;
        if !amount.is_positive() {
            return Err(TransactionError::NonPositiveAmount);
        }
        if amount > self.balance {
            return Err(TransactionError::InsufficientBalance);
        }
        let remaining = self.balance.checked_sub(amount)?;
        if self.kind == AccountKind::Savings
            && !remaining.is_zero()
            && remaining < SAVINGS_MINIMUM
        {
            return Err(TransactionError::BelowSavingsMinimum);
        }
        self.balance = remaining;
        Ok(())
    }

    /// Marks the account closed. Funds must be fully withdrawn first.
    pub fn close(&mut self) -> Result<(), TransactionError> {
        self.ensure_open()?;
        if !self.balance.is_zero() {
            return Err(TransactionError::FundsRemaining);
        }
        self.status = AccountStatus::Closed;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), TransactionError> {
        match self.status {
            AccountStatus::Open => Ok(()),
            AccountStatus::Closed => Err(TransactionError::AccountClosed),
        }
    }
}
