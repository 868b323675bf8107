//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over participant rows from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<SessionRow, RowRejection>` for each CSV row:
//!
//! ```no_run
//! use rust_settlement_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("balances.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(row) => println!("{} in session {}", row.participant.display_name, row.session),
//!         Err(rejection) => eprintln!("Rejected row: {}", rejection.error),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator
//! - Line numbers are attached to every row error

use crate::io::csv_format::{convert_csv_record, CsvParticipantRecord, RowRejection, SessionRow};
use crate::types::SettlementError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Provides an iterator interface over participant rows.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (for the optional session column)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(SettlementError::FileNotFound)` if the file does not exist
    /// * `Err(SettlementError::IoError)` if it exists but could not be opened
    pub fn new(path: &Path) -> Result<Self, SettlementError> {
        let file = File::open(path).map_err(|e| SettlementError::open_failed(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<SessionRow, RowRejection>;

    /// Get the next participant row from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(SessionRow))` - Successfully parsed row
    /// * `Some(Err(RowRejection))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvParticipantRecord>();
        let next = deserializer.next()?;

        // Header occupies line 1
        self.line_num += 1;

        Some(match next {
            Ok(record) => convert_csv_record(record, Some(self.line_num)),
            Err(e) => Err(RowRejection {
                session: None,
                error: SettlementError::ParseError {
                    line: Some(self.line_num),
                    message: e.to_string(),
                },
            }),
        })
    }
}
