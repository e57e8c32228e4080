//! Configuration types and the embedded config parser

pub mod parse;
pub mod types;

pub use parse::{parse_config, parse_pin_string, ParseError};
pub use types::*;
