//! I/O handling for the transaction importer
//!
//! This module contains the CSV format definitions and the streaming
//! asynchronous reader used by the parse phase of the pipeline.

pub mod async_reader;
pub mod csv_format;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_row, write_transactions_csv, CsvRow};
