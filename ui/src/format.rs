//! Display formatting: Brazilian currency, dates in the display offset, sizes

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Offset from minutes east of UTC, falling back to UTC when out of range
#[must_use]
pub fn utc_offset(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Format an amount in reais: `R$ 1.234,56`
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Rounded, non-negative cents
pub fn brl(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {},{:02}", group_thousands(cents / 100), cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

/// `dd/mm/yyyy`
#[must_use]
pub fn date(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%d/%m/%Y").to_string()
}

/// `HH:MM`
#[must_use]
pub fn time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%H:%M").to_string()
}

/// `dd/mm/yyyy HH:MM`
#[must_use]
pub fn date_time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%d/%m/%Y %H:%M").to_string()
}

/// Event schedule, collapsing the date when start and end share a day
#[must_use]
pub fn schedule(start: DateTime<Utc>, end: DateTime<Utc>, offset: FixedOffset) -> String {
    if start.with_timezone(&offset).date_naive() == end.with_timezone(&offset).date_naive() {
        format!(
            "{}, {} - {}",
            date(start, offset),
            time(start, offset),
            time(end, offset)
        )
    } else {
        format!("{} - {}", date_time(start, offset), date_time(end, offset))
    }
}

/// Human file size: `512 B`, `12,5 KB`, `4,8 MB`
#[must_use]
#[allow(clippy::cast_precision_loss)] // Display only
pub fn file_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    let size = bytes as f64;
    if size >= MB {
        format!("{:.1} MB", size / MB).replace('.', ",")
    } else if size >= KB {
        format!("{:.1} KB", size / KB).replace('.', ",")
    } else {
        format!("{bytes} B")
    }
}
