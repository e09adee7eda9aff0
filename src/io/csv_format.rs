//! CSV format handling for import rows and transaction output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRow structure for deserialization
//! - Conversion from CSV rows to validated candidates
//! - Persisted-transaction output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{CandidateTransaction, Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV row structure for deserialization
///
/// Matches the input CSV format with columns: title, type, value, category.
/// All fields are kept as raw strings here; parsing and validation happen
/// in [`convert_csv_row`] so that malformed rows can be skipped instead of
/// failing deserialization.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRow {
    pub title: String,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub value: String,
    pub category: String,
}

/// Convert a CsvRow to a CandidateTransaction
///
/// Validation is permissive: a row that cannot become a candidate is
/// dropped, never reported as an error. A row is dropped when:
/// - title, type, or value is empty after trimming
/// - the type token is not `income`/`outcome` (case-insensitive)
/// - the value does not parse as a decimal number
///
/// # Returns
///
/// * `Some(CandidateTransaction)` - the row passed validation
/// * `None` - the row was malformed and must be excluded from the run
pub fn convert_csv_row(row: CsvRow) -> Option<CandidateTransaction> {
    let title = row.title.trim();
    let type_token = row.tx_type.trim();
    let value_str = row.value.trim();

    if title.is_empty() || type_token.is_empty() || value_str.is_empty() {
        return None;
    }

    let tx_type = TransactionType::from_token(type_token)?;
    let value = Decimal::from_str(value_str).ok()?;

    Some(CandidateTransaction {
        title: title.to_string(),
        tx_type,
        value,
        category_name: row.category.trim().to_string(),
    })
}

/// Write persisted transactions to CSV format
///
/// Writes transactions in CSV format with columns: id, title, type, value,
/// category_id. Rows are written in the order given, which for pipeline
/// output is the order of the valid input rows.
///
/// # Arguments
///
/// * `transactions` - Slice of persisted transactions to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "title", "type", "value", "category_id"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for transaction in transactions {
        writer
            .write_record(&[
                transaction.id.to_string(),
                transaction.title.clone(),
                transaction.tx_type.as_token().to_string(),
                transaction.value.to_string(),
                transaction.category_id.to_string(),
            ])
            .map_err(|e| format!("Failed to write transaction record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
