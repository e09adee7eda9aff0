//! Transaction materialization and persistence
//!
//! The final stage of the pipeline: binds each validated candidate to its
//! resolved category entity, builds the records to persist, and writes them
//! through the store in a single batched call. Candidate order is preserved
//! end to end, so the persisted output matches the order of the valid input
//! rows.

use crate::core::traits::TransactionStore;
use crate::types::{CandidateTransaction, Category, ImportError, NewTransaction, Transaction};
use std::collections::HashMap;

/// Bind candidates to their resolved categories
///
/// Every candidate's category name must appear in `categories`; the
/// reconciler guarantees this for any name set it resolved. A missing
/// mapping is therefore an invariant violation, not a data problem, and is
/// surfaced as [`ImportError::ReconciliationGap`].
///
/// # Returns
///
/// Records ready for persistence, in the same order as `candidates`.
pub fn materialize(
    candidates: &[CandidateTransaction],
    categories: &HashMap<String, Category>,
) -> Result<Vec<NewTransaction>, ImportError> {
    candidates
        .iter()
        .map(|candidate| {
            let category = categories
                .get(&candidate.category_name)
                .ok_or_else(|| ImportError::reconciliation_gap(&candidate.category_name))?;

            Ok(NewTransaction {
                title: candidate.title.clone(),
                tx_type: candidate.tx_type,
                value: candidate.value,
                category_id: category.id,
            })
        })
        .collect()
}

/// Materialize and persist all candidates in one batched write
///
/// # Arguments
///
/// * `store` - The transaction store to write through
/// * `candidates` - Validated candidates in input order
/// * `categories` - Title-to-entity mapping from reconciliation
///
/// # Returns
///
/// * `Ok(transactions)` - persisted records with store-assigned identities,
///   in input order
/// * `Err(ImportError::ReconciliationGap)` - a candidate had no mapping
/// * `Err(ImportError::Persistence)` - the batched write failed; nothing
///   from the batch was persisted
pub async fn persist<S: TransactionStore + ?Sized>(
    store: &S,
    candidates: &[CandidateTransaction],
    categories: &HashMap<String, Category>,
) -> Result<Vec<Transaction>, ImportError> {
    let records = materialize(candidates, categories)?;
    let persisted = store.create(&records).await?;
    Ok(persisted)
}
