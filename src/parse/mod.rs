//! SMS message parsing: field extraction and record assembly

pub mod extract;
pub mod parser;

pub use extract::{MerchantCapture, Patterns};
pub use parser::{ParserConfig, SmsParser};
