mod format;

pub use format::{format_size, format_timestamp, format_timestamp_rfc3339, now_timestamp};
