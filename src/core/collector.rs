//! Record validation and collection
//!
//! The collector sits between the streaming reader and the reconciler. It
//! fully drains the row stream (later stages need the complete set of
//! referenced category names), validates each row, and accumulates the
//! ordered candidate list alongside the raw category-name list.
//!
//! Validation is permissive: a malformed row is excluded from the run and
//! logged to stderr, never surfaced as an error. A skipped row contributes
//! neither a candidate nor a category name.

use crate::io::csv_format::convert_csv_row;
use crate::io::AsyncReader;
use crate::types::{CandidateTransaction, ImportError};
use futures::io::AsyncRead;

/// Result of draining and validating the input stream
#[derive(Debug, Default)]
pub struct Collected {
    /// Validated candidates in input order
    pub candidates: Vec<CandidateTransaction>,

    /// Category names referenced by the candidates, duplicates retained
    ///
    /// Deduplication happens during reconciliation; keeping the raw list
    /// here preserves the one-name-per-candidate correspondence.
    pub category_names: Vec<String>,

    /// Number of rows dropped by validation
    pub skipped_rows: usize,
}

/// Drain the reader to end of stream, validating every row
///
/// This is the suspension point of the pipeline: the function only returns
/// once the stream is exhausted, so the caller holds the complete
/// category-name set before reconciliation begins. Memory stays bounded by
/// the batch size during reading; only validated candidates accumulate.
///
/// # Arguments
///
/// * `reader` - The streaming CSV reader to drain
/// * `batch_size` - Rows to pull from the stream per read
///
/// # Returns
///
/// * `Ok(Collected)` - candidates in input order, raw category names,
///   and the skip count
/// * `Err(ImportError::StreamRead)` - the underlying stream failed;
///   partially collected rows are discarded
pub async fn collect_candidates<R>(
    reader: &mut AsyncReader<R>,
    batch_size: usize,
) -> Result<Collected, ImportError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut collected = Collected::default();

    loop {
        let batch = reader.read_batch(batch_size).await?;
        if batch.is_empty() {
            break;
        }

        for row in batch {
            match convert_csv_row(row) {
                Some(candidate) => {
                    collected.category_names.push(candidate.category_name.clone());
                    collected.candidates.push(candidate);
                }
                None => {
                    collected.skipped_rows += 1;
                }
            }
        }
    }

    Ok(collected)
}
