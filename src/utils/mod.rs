pub mod sanitize;
pub mod time;

pub use sanitize::sanitize_filename;
pub use time::{format_timestamp, parse_timestamp};
