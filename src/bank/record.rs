use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

use crate::bank::account::AccountKind;
use crate::bank::amount::{Amount, AmountError};
use crate::bank::service::AccountSpec;
use crate::bank::{AccountId, CustomerId};

/// One row of an operations file, before validation.
#[derive(Deserialize, Debug, Clone)]
pub struct InputRecord {
    #[serde(rename = "type")]
    pub typ: RecordType,
    pub customer: CustomerId,
    pub account: Option<AccountId>,
    pub kind: Option<AccountKind>,
    pub amount: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Register,
    Open,
    Deposit,
    Withdraw,
    Close,
}

/// Rejected before any service call; the row is reported and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("amount `{0}` must be positive")]
    NonPositive(String),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// A validated operation, ready for the service layer.
#[derive(Debug, Clone)]
pub enum Operation {
    Register {
        customer: CustomerId,
    },
    Open {
        customer: CustomerId,
        spec: AccountSpec,
    },
    Deposit {
        customer: CustomerId,
        account: AccountId,
        amount: Amount,
    },
    Withdraw {
        customer: CustomerId,
        account: AccountId,
        amount: Amount,
    },
    Close {
        customer: CustomerId,
        account: AccountId,
    },
}

impl InputRecord {
    pub fn to_operation(&self) -> Result<Operation, RecordError> {
        match self.typ {
            RecordType::Register => Ok(Operation::Register {
                customer: self.customer,
            }),
            RecordType::Open => {
                let kind = self.kind.ok_or(RecordError::Missing("kind"))?;
                Ok(Operation::Open {
                    customer: self.customer,
                    spec: AccountSpec {
                        kind,
                        initial_balance: self.initial_balance()?,
                    },
                })
            }
            RecordType::Deposit => Ok(Operation::Deposit {
                customer: self.customer,
                account: self.account()?,
                amount: self.transaction_amount()?,
            }),
            RecordType::Withdraw => Ok(Operation::Withdraw {
                customer: self.customer,
                account: self.account()?,
                amount: self.transaction_amount()?,
            }),
            RecordType::Close => Ok(Operation::Close {
                customer: self.customer,
                account: self.account()?,
            }),
        }
    }

    fn account(&self) -> Result<AccountId, RecordError> {
        self.account.ok_or(RecordError::Missing("account"))
    }

    // Transaction amounts are always submitted positive; the operation type
    // decides the sign of the balance change.
    fn transaction_amount(&self) -> Result<Amount, RecordError> {
        let raw = self
            .amount
            .as_deref()
            .ok_or(RecordError::Missing("amount"))?;
        let amount = Amount::from_str(raw)?;
        if !amount.is_positive() {
            return Err(RecordError::NonPositive(raw.to_owned()));
        }
        Ok(amount)
    }

    // An absent opening amount means an empty account.
    fn initial_balance(&self) -> Result<Amount, RecordError> {
        match self.amount.as_deref() {
            None => Ok(Amount::ZERO),
            Some(raw) => {
                let amount = Amount::from_str(raw)?;
                if amount < Amount::ZERO {
                    return Err(RecordError::NonPositive(raw.to_owned()));
                }
                Ok(amount)
            }
        }
    }
}
