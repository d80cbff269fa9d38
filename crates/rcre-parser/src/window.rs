//! Duration grammar for rule windows.
//!
//! Windows use the suffix grammar `[0-9]+(ns|us|µs|ms|s|m|h)`, with
//! multiple segments allowed (`1m30s`). General-purpose duration crates
//! accept units like days that rules must reject, so the grammar is
//! parsed by hand.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a window string. `None` on any deviation from the grammar.
pub(crate) fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    let mut total_ns: u128 = 0;

    while i < chars.len() {
        let digits_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i == digits_start {
            return None;
        }
        let value: u128 = chars[digits_start..i].iter().collect::<String>().parse().ok()?;

        let unit_start = i;
        while i < chars.len() && !chars[i].is_ascii_digit() {
            i += 1;
        }
        let unit: String = chars[unit_start..i].iter().collect();
        let mult: u128 = match unit.as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            _ => return None,
        };

        total_ns = total_ns.checked_add(value.checked_mul(mult)?)?;
    }

    Some(Duration::from_nanos(u64::try_from(total_ns).ok()?))
}

/// Render a duration in the same grammar `parse_duration` accepts.
pub(crate) fn format_duration(d: Duration) -> String {
    let mut ns = d.as_nanos();
    if ns == 0 {
        return "0s".to_string();
    }

    let units: [(&str, u128); 6] = [
        ("h", 3_600 * NANOS_PER_SEC),
        ("m", 60 * NANOS_PER_SEC),
        ("s", NANOS_PER_SEC),
        ("ms", 1_000_000),
        ("us", 1_000),
        ("ns", 1),
    ];

    let mut out = String::new();
    for (suffix, mult) in units {
        let count = ns / mult;
        if count > 0 {
            out.push_str(&count.to_string());
            out.push_str(suffix);
            ns -= count * mult;
        }
    }
    out
}
