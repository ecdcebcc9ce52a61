use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

const UNITS: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Format a signed byte count as a human-readable string (B, KB, MB, ... EB)
///
/// Uses 1024-based units with one decimal place. The unit is picked so the
/// mantissa stays below 1024 after rounding, and the sign of the input is
/// kept. `i64::MIN` is handled through `unsigned_abs`.
pub fn format_size(bytes: i64) -> String {
    let abs = bytes.unsigned_abs();
    if abs < 1024 {
        return format!("{} B", bytes);
    }

    // Thresholds sit just under 1023.95 of the next unit so that a value
    // which would round up to "1024.0" moves to the larger unit instead.
    let mut value = abs;
    let mut unit = 0;
    let mut shift = 40;
    while abs > 0x0fff_cccc_cccc_cccc_u64 >> shift {
        value >>= 10;
        unit += 1;
        if shift == 0 {
            break;
        }
        shift -= 10;
    }

    let sign = if bytes < 0 { "-" } else { "" };
    format!("{}{:.1} {}B", sign, value as f64 / 1024.0, UNITS[unit])
}

/// Format a Unix timestamp as a local-agnostic `YYYY-MM-DD HH:MM:SS` string
pub fn format_timestamp(timestamp: i64) -> String {
    if timestamp == 0 {
        return "unknown".to_string();
    }

    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|dt| {
            let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
            dt.format(&format).ok()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Format a Unix timestamp as RFC 3339 (UTC)
pub fn format_timestamp_rfc3339(timestamp: i64) -> String {
    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Current time as a Unix timestamp
pub fn now_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
