//! Transaction Importer CLI
//!
//! Command-line interface for importing financial transactions from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > imported.csv
//! cargo run -- --keep-source transactions.csv > imported.csv
//! cargo run -- --batch-size 2000 transactions.csv > imported.csv
//! ```
//!
//! The program reads transaction rows from the input CSV file, reconciles
//! referenced categories against an in-memory store, and writes the persisted
//! transactions to stdout in input order. By default the source file is
//! deleted after a successful import; pass `--keep-source` to retain it.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, stream failure, store failure, etc.)

use std::process;
use std::sync::Arc;
use transaction_importer::cli;
use transaction_importer::io::write_transactions_csv;
use transaction_importer::{MemoryStore, TransactionImporter};

#[tokio::main]
async fn main() {
    let args = cli::parse_args();
    let config = args.to_import_config();

    let store = Arc::new(MemoryStore::new());
    let importer = TransactionImporter::new(Arc::clone(&store), Arc::clone(&store), config);

    let transactions = match importer.import(&args.input_file).await {
        Ok(transactions) => transactions,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut output = std::io::stdout();
    if let Err(e) = write_transactions_csv(&transactions, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
