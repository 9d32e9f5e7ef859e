//! Synchronous SMS export reader with iterator interface
//!
//! Provides a streaming iterator over transaction records parsed from a
//! plain-text SMS export: one message per line, blank lines skipped.
//! Delegates message interpretation to the parse module.
//!
//! # Iterator Interface
//!
//! MessageReader implements the Iterator trait, yielding
//! Result<TransactionRecord, String> for each non-blank line:
//!
//! ```no_run
//! use sms_ledger_engine::io::message_reader::MessageReader;
//! use std::path::Path;
//!
//! let reader = MessageReader::new(Path::new("messages.txt")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Parsed transaction: {:?}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors on open) are returned from `new()`
//! - Individual message parse failures are yielded as Err variants
//! - Line numbers are included in error messages for debugging
//!
//! # Memory Efficiency
//!
//! The reader streams line by line and never loads the whole export into
//! memory; usage is O(1) per message.

use crate::parse::SmsParser;
use crate::types::TransactionRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Synchronous SMS export reader
///
/// Provides an iterator interface over parsed transaction records.
/// Maintains streaming behavior with constant memory usage.
#[derive(Debug)]
pub struct MessageReader {
    lines: Lines<BufReader<File>>,
    parser: SmsParser,
    line_num: usize,
}

impl MessageReader {
    /// Create a new MessageReader from a file path
    ///
    /// Opens the export file and prepares it for streaming iteration with
    /// a default-configured parser.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SMS export file (one message per line)
    ///
    /// # Returns
    ///
    /// * `Ok(MessageReader)` if the file opened successfully
    /// * `Err(String)` if the file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        Self::with_parser(path, SmsParser::new())
    }

    /// Create a new MessageReader with an explicitly configured parser
    pub fn with_parser(path: &Path, parser: SmsParser) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        Ok(Self {
            lines: BufReader::new(file).lines(),
            parser,
            line_num: 0,
        })
    }
}

impl Iterator for MessageReader {
    type Item = Result<TransactionRecord, String>;

    /// Get the next transaction record from the export file
    ///
    /// Skips blank lines, parses the next message, and attaches a line
    /// number to any failure.
    ///
    /// # Returns
    ///
    /// * `Some(Ok(TransactionRecord))` - Successfully parsed message
    /// * `Some(Err(String))` - Read or parse error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_num += 1;

            match line {
                Ok(text) => {
                    // Blank lines separate messages in exports; not an error
                    if text.trim().is_empty() {
                        continue;
                    }
                    return Some(
                        self.parser
                            .parse(&text)
                            .map_err(|e| format!("Line {}: {}", self.line_num, e)),
                    );
                }
                Err(e) => {
                    return Some(Err(format!("Line {}: read error: {}", self.line_num, e)));
                }
            }
        }
    }
}
