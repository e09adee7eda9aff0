//! Pipeline orchestration
//!
//! Sequences the import pipeline end to end: open the source file, drain
//! and validate the row stream, reconcile category names against the store,
//! materialize and persist the final records, and clean up the source file.
//!
//! # Phase boundaries
//!
//! The phases are strictly sequential within one run: the stream is fully
//! drained before category names are known, and category resolution fully
//! completes before any transaction is materialized. Concurrent runs are
//! safe; the only contended region is category creation, handled by the
//! reconciler's conflict recovery.
//!
//! # Cleanup contract
//!
//! The source file is removed only after successful persistence (and only
//! when configured to). On any failure the file is left intact for
//! diagnosis or retry, and no partial transaction set is returned. A
//! failed removal after successful persistence is logged, not surfaced:
//! the persisted records are returned regardless.

use crate::core::collector::collect_candidates;
use crate::core::reconciler::{CategoryReconciler, DEFAULT_MAX_CREATE_RETRIES};
use crate::core::traits::{CategoryStore, TransactionStore};
use crate::core::persister;
use crate::io::AsyncReader;
use crate::types::{ImportError, Transaction};
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;

/// Configuration for an import run
#[derive(Clone, Debug)]
pub struct ImportConfig {
    /// Rows pulled from the stream per read during the parse phase
    pub batch_size: usize,

    /// Uniqueness conflicts absorbed during category creation before the
    /// run fails with [`ImportError::CategoryConflict`]
    pub max_create_retries: usize,

    /// Whether to delete the source file after successful persistence
    pub remove_source: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_create_retries: DEFAULT_MAX_CREATE_RETRIES,
            remove_source: true,
        }
    }
}

/// The import pipeline orchestrator
///
/// Owns the end-to-end error and resource contract. Store interfaces are
/// injected at construction; the importer itself keeps no state between
/// runs, so one instance can serve many (including concurrent) imports.
pub struct TransactionImporter<C, T> {
    categories: C,
    transactions: T,
    config: ImportConfig,
}

impl<C, T> TransactionImporter<C, T>
where
    C: CategoryStore,
    T: TransactionStore,
{
    /// Create an importer over the given stores
    pub fn new(categories: C, transactions: T, config: ImportConfig) -> Self {
        Self {
            categories,
            transactions,
            config,
        }
    }

    /// Import a CSV file, returning the persisted transactions in input order
    ///
    /// Runs the full pipeline: parse → validate/collect → reconcile →
    /// materialize/persist → cleanup. Malformed rows are skipped (and
    /// counted to stderr); everything else that goes wrong aborts the run
    /// with a distinguishable [`ImportError`] and leaves the source file
    /// in place.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV source: a header row followed by data
    ///   rows of title, type, value, category
    pub async fn import(&self, path: &Path) -> Result<Vec<Transaction>, ImportError> {
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ImportError::file_not_found(&path.display().to_string())
            } else {
                ImportError::stream_read(e.to_string())
            }
        })?;

        // Wrap the tokio file in a compatibility layer for csv-async
        let mut reader = AsyncReader::new(file.compat());

        // Phase 1+2: drain the stream completely before touching the store
        let collected = collect_candidates(&mut reader, self.config.batch_size).await?;
        if collected.skipped_rows > 0 {
            eprintln!("Skipped {} malformed row(s)", collected.skipped_rows);
        }

        // Phase 3: one batched lookup/create pass for every referenced name
        let reconciler =
            CategoryReconciler::new(&self.categories, self.config.max_create_retries);
        let categories = reconciler.resolve(&collected.category_names).await?;

        // Phase 4: bind and persist in one batched write
        let persisted =
            persister::persist(&self.transactions, &collected.candidates, &categories).await?;

        // Cleanup runs only after successful persistence. A cleanup failure
        // cannot invalidate the persisted batch, so it is reported to stderr
        // and the records are still returned.
        if self.config.remove_source {
            if let Err(e) = tokio::fs::remove_file(path).await {
                eprintln!(
                    "Warning: failed to remove source file '{}': {}",
                    path.display(),
                    e
                );
            }
        }

        Ok(persisted)
    }
}
