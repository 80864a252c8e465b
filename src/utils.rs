use aws_sdk_s3::primitives::{DateTime, DateTimeFormat};

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

pub fn format_timestamp(timestamp: &DateTime) -> String {
    timestamp
        .fmt(DateTimeFormat::DateTime)
        .unwrap_or_else(|_| timestamp.to_string())
}
