use anyhow::{Context, Result};
use simple_logger::SimpleLogger;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use subledger::batch;

fn main() -> Result<()> {
    SimpleLogger::new().env().init()?;

    log::debug!("Application started");

    let path = PathBuf::from(first_arg()?);
    log::debug!("Extracted filepath from args: {path:?}");

    let service = batch::process_file(&path)?;
    log::debug!("Operations processing: Done");

    batch::write_snapshots(&service, std::io::stdout())?;
    log::debug!("Account snapshot export: Done");

    Ok(())
}

fn first_arg() -> Result<OsString> {
    env::args_os()
        .nth(1)
        .context("expected 1 argument, but got none")
}
