mod header;
mod raw;

pub use header::Header;
pub use raw::{RawToken, Stage, parse_token};
