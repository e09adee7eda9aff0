//! Asynchronous CSV reader with stream interface
//!
//! Provides a streaming interface over import rows from a CSV source.
//! Supports batch reading so the pipeline never buffers the whole file.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing (header row consumed, fields trimmed)
//! - tokio/futures for async I/O
//! - Batch reading to bound memory during the parse phase
//!
//! # Error policy
//!
//! An I/O failure from the underlying stream is fatal: the batch in progress
//! is discarded and [`ImportError::StreamRead`] is returned, terminating the
//! sequence. Row-level deserialization failures (wrong field count, invalid
//! UTF-8) are logged to stderr and skipped, consistent with the pipeline's
//! permissive validation policy.

use crate::io::csv_format::CsvRow;
use crate::types::ImportError;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Provides batch reading over raw import rows. The sequence is read-once:
/// rows already consumed are never re-emitted, and the header line is never
/// emitted at all.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async byte source
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data, header line first
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of raw import rows
    ///
    /// Reads up to `batch_size` rows from the source. Rows that fail to
    /// deserialize are logged to stderr and skipped; an underlying I/O
    /// failure aborts the read.
    ///
    /// # Arguments
    ///
    /// * `batch_size` - Maximum number of rows to read
    ///
    /// # Returns
    ///
    /// * `Ok(rows)` - up to `batch_size` rows; an empty vector signals
    ///   end of stream
    /// * `Err(ImportError::StreamRead)` - the underlying stream failed
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<CsvRow>, ImportError> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut rows = self.csv_reader.deserialize::<CsvRow>();

        while batch.len() < batch_size {
            match rows.next().await {
                Some(Ok(row)) => batch.push(row),
                Some(Err(e)) => {
                    if let csv_async::ErrorKind::Io(io_err) = e.kind() {
                        return Err(ImportError::stream_read(io_err.to_string()));
                    }
                    eprintln!("CSV parse error: {}", e);
                }
                None => break,
            }
        }

        Ok(batch)
    }
}
