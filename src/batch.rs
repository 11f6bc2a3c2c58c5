//! File-driven operation processor. Stands in for the web and REST adapters:
//! it validates each row at the boundary, calls the services, and maps
//! failures to warnings instead of HTTP statuses.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::Result;
use csv::Trim;

use crate::bank::{
    Customer, InputRecord, MemStore, Operation, ServiceError, Store, UserService,
};

/// Replays an operations file against a fresh in-memory store.
///
/// Rows that fail validation or a business rule are logged and skipped; the
/// run itself only fails on I/O or CSV-level errors.
pub fn process_file(path: &Path) -> Result<UserService<MemStore>> {
    log::debug!("processing operations from {path:?}");
    let file = File::open(path)?;
    process_reader(file)
}

pub fn process_reader<R: Read>(input: R) -> Result<UserService<MemStore>> {
    let mut rdr = csv::ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let mut service = UserService::new(MemStore::new());

    for (row, result) in rdr.deserialize::<InputRecord>().enumerate() {
        let line = row + 2; // header is line 1
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("line {line}: skipping undecodable row: {e}");
                continue;
            }
        };
        log::debug!("line {line}: {record:?}");

        let operation = match record.to_operation() {
            Ok(operation) => operation,
            Err(e) => {
                log::warn!("line {line}: invalid row: {e}");
                continue;
            }
        };

        if let Err(e) = apply(&mut service, operation) {
            log::warn!("line {line}: operation rejected: {e}");
        }
    }

    Ok(service)
}

fn apply(
    service: &mut UserService<MemStore>,
    operation: Operation,
) -> Result<(), ServiceError> {
    match operation {
        Operation::Register { customer } => {
            // Customer creation happens outside the service layer; the
            // driver plays that external role by writing to the store.
            service.store_mut().save_customer(Customer::new(customer));
            log::debug!("registered customer {customer}");
            Ok(())
        }
        Operation::Open { customer, spec } => {
            service.add_account(customer, spec).map(|_| ())
        }
        Operation::Deposit {
            customer,
            account,
            amount,
        } => service.subscriptions_mut().deposit(account, customer, amount),
        Operation::Withdraw {
            customer,
            account,
            amount,
        } => service.subscriptions_mut().withdraw(account, customer, amount),
        Operation::Close { customer, account } => service.close_account(customer, account),
    }
}

/// Writes the account snapshots as CSV, sorted by account id.
pub fn write_snapshots<W: Write>(service: &UserService<MemStore>, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for snapshot in service.account_snapshots() {
        wtr.serialize(snapshot)?;
    }
    wtr.flush()?;
    Ok(())
}
