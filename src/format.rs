//! German-locale display formatting.
//!
//! Pure string helpers: dot thousands grouping, decimal comma, dd.mm.yyyy
//! dates. Rendering-only — never used for the wire format.

use chrono::{Datelike, NaiveDate};

/// German month names, indexed by month number - 1.
const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Groups an integer with dot thousands separators ("1234567" → "1.234.567").
fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    let first = digits.len() % 3;
    if first > 0 {
        out.push_str(&digits[..first]);
    }
    for (i, chunk) in digits[first..].as_bytes().chunks(3).enumerate() {
        if first > 0 || i > 0 {
            out.push('.');
        }
        out.push_str(std::str::from_utf8(chunk).unwrap_or(""));
    }
    out
}

/// Rounds to a whole number and formats with thousands separators.
pub fn format_number(value: f64) -> String {
    group_thousands(value.round() as i64)
}

/// Formats an amount in Euro without decimals ("2.850.000 €").
pub fn format_currency(value: f64) -> String {
    format!("{} €", format_number(value))
}

/// Formats an amount in millions of Euro ("2,85 Mio. €").
pub fn format_currency_millions(value: f64) -> String {
    let millions = value / 1_000_000.0;
    format!("{:.2} Mio. €", millions).replace('.', ",")
}

/// Formats a percentage with one decimal ("8,5%").
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%").replace('.', ",")
}

/// Formats a percentage with two decimals ("8,52%").
pub fn format_percentage_precise(value: f64) -> String {
    format!("{value:.2}%").replace('.', ",")
}

/// Formats an energy value in kWh without decimals ("1.234.567 kWh").
pub fn format_energy_kwh(value: f64) -> String {
    format!("{} kWh", format_number(value))
}

/// Formats a date in the short German form ("15.03.2023").
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{}", date.day(), date.month(), date.year())
}

/// Formats an optional date, rendering `None` as "-".
pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), format_date)
}

/// Formats a date in the long German form ("15. März 2023").
pub fn format_date_long(date: NaiveDate) -> String {
    let month = MONTH_NAMES[(date.month0() as usize).min(11)];
    format!("{}. {} {}", date.day(), month, date.year())
}

/// Truncates to `max_length` characters, appending "..." when cut.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_length).collect();
    format!("{cut}...")
}
