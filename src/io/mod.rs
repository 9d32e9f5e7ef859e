//! Input/output: SMS export reading and CSV export writing

pub mod csv_format;
pub mod message_reader;

pub use csv_format::write_records_csv;
pub use message_reader::MessageReader;
