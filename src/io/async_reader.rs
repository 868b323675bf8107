//! Asynchronous CSV reader with batch interface
//!
//! Provides batched reads of participant rows from any `futures` AsyncRead.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Result<SessionRow, RowRejection>
//!                  ↓
//!           csv_format module
//!           (CsvParticipantRecord, convert_csv_record)
//! ```
//!
//! Unlike a transaction stream, rejected rows are returned alongside good
//! ones: a rejected row must poison its session, so the caller needs to see it.

use crate::io::csv_format::{convert_csv_record, CsvParticipantRecord, RowRejection, SessionRow};
use crate::types::SettlementError;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
        }
    }

    /// Read a batch of participant rows
    ///
    /// Reads up to `batch_size` rows. Returns an empty vector once the end of
    /// the input is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Result<SessionRow, RowRejection>> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvParticipantRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(record)) => {
                    self.line_num += 1;
                    batch.push(convert_csv_record(record, Some(self.line_num)));
                }
                Some(Err(e)) => {
                    self.line_num += 1;
                    batch.push(Err(RowRejection {
                        session: None,
                        error: SettlementError::ParseError {
                            line: Some(self.line_num),
                            message: e.to_string(),
                        },
                    }));
                }
                None => break,
            }
        }

        batch
    }
}
