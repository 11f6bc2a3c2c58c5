pub mod bank;
pub mod batch;
