mod account;
mod amount;
mod customer;
mod error;
mod record;
mod service;
mod snapshot;
mod store;

pub use account::{AccountKind, AccountStatus, SAVINGS_MINIMUM, Subscription, TransactionError};
pub use amount::{Amount, AmountError};
pub use customer::Customer;
pub use error::ServiceError;
pub use record::{InputRecord, Operation, RecordError, RecordType};
pub use service::{AccountSpec, SubscriptionService, UserService};
pub use snapshot::AccountSnapshot;
pub use store::{MemStore, Store};

pub type CustomerId = u32;
pub type AccountId = u32;
