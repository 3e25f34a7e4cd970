mod parse_select;
mod select;

pub use parse_select::{MAX_DEPTH, SPREAD, SelectParseError, parse_select};
pub use select::{RawField, RawSelect};
