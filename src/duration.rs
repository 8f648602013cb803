// src/duration.rs

//! Bidirectional conversion between human duration strings ("1d 2h") and
//! millisecond counts.
//!
//! `decode` accepts either a plain (optionally signed) integer, taken
//! verbatim as milliseconds, or any number of `<number><unit>` terms which
//! are converted independently and summed. `encode` decomposes a
//! millisecond count into week/day/hour/minute/second/millisecond buckets
//! and renders them.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One `<number><unit>` term of the duration grammar. Longest unit
    /// spellings come first so the alternation never truncates a match.
    static ref DURATION_TERM_RE: Regex = Regex::new(
        r"(?i)(-?\d*\.?\d+)\s*(years?|yrs?|weeks?|days?|hours?|hrs?|minutes?|mins?|seconds?|secs?|milliseconds?|msecs?|ms|[smhdwy])"
    )
    .unwrap();
    static ref PLAIN_INTEGER_RE: Regex = Regex::new(r"^[+-]?\d+$").unwrap();
}

const MS_PER_SECOND: f64 = 1000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3.6e6;
const MS_PER_DAY: f64 = 8.64e7;
const MS_PER_WEEK: f64 = 6.048e8;
const MS_PER_YEAR: f64 = 3.154e10;

/// Rendering options for [`encode`].
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Render buckets as `1d` instead of `1 day`.
    pub compact: bool,
    /// Keep every non-zero bucket instead of only the largest one.
    pub full: bool,
    /// Unit short-codes (`"ms"`, `"s"`, ...) to drop from full output.
    pub avoid_units: Vec<String>,
}

/// Decodes a duration string into milliseconds.
///
/// Returns `None` when the string is neither a plain integer nor contains
/// any term of the duration grammar.
pub fn decode(text: &str) -> Option<i64> {
    if PLAIN_INTEGER_RE.is_match(text) {
        return text.parse::<i64>().ok();
    }

    let mut total = 0.0f64;
    let mut matched = false;
    for caps in DURATION_TERM_RE.captures_iter(text) {
        let number: f64 = caps.get(1)?.as_str().parse().ok()?;
        let unit = caps.get(2)?.as_str().to_ascii_lowercase();
        total += number * unit_multiplier(&unit);
        matched = true;
    }

    if matched {
        // Fractional terms like "1.5s" sum to a fractional millisecond
        // count; round to the nearest whole millisecond.
        Some(total.round() as i64)
    } else {
        None
    }
}

fn unit_multiplier(unit: &str) -> f64 {
    // `ms` and its long spellings must be probed before minutes.
    if unit == "ms" || unit.starts_with("millisecond") || unit.starts_with("msec") {
        return 1.0;
    }
    match unit.chars().next() {
        Some('y') => MS_PER_YEAR,
        Some('w') => MS_PER_WEEK,
        Some('d') => MS_PER_DAY,
        Some('h') => MS_PER_HOUR,
        Some('m') => MS_PER_MINUTE,
        Some('s') => MS_PER_SECOND,
        _ => 0.0,
    }
}

struct Bucket {
    short: &'static str,
    long: &'static str,
    count: u64,
}

/// Encodes a millisecond count as a duration string.
///
/// Buckets are produced by modulo chaining from weeks down to
/// milliseconds; zero buckets are dropped. With `full` every surviving
/// bucket is joined (space-separated when compact, comma-separated
/// otherwise), else only the largest one is kept. A negative input yields
/// a single leading `-`. When nothing survives the raw millisecond count
/// is returned as text.
pub fn encode(ms: i64, options: &EncodeOptions) -> String {
    let abs = ms.unsigned_abs();
    let buckets = [
        Bucket { short: "w", long: "week", count: abs / 604_800_000 },
        Bucket { short: "d", long: "day", count: (abs / 86_400_000) % 7 },
        Bucket { short: "h", long: "hour", count: (abs / 3_600_000) % 24 },
        Bucket { short: "m", long: "minute", count: (abs / 60_000) % 60 },
        Bucket { short: "s", long: "second", count: (abs / 1_000) % 60 },
        Bucket { short: "ms", long: "millisecond", count: abs % 1_000 },
    ];

    let avoided: Vec<String> = options
        .avoid_units
        .iter()
        .map(|u| u.to_ascii_lowercase())
        .collect();

    let rendered: Vec<String> = buckets
        .iter()
        .filter(|b| {
            if b.count == 0 {
                return false;
            }
            if avoided.is_empty() {
                true
            } else {
                options.full && !avoided.iter().any(|u| u == b.short)
            }
        })
        .map(|b| {
            if options.compact {
                format!("{}{}", b.count, b.short)
            } else {
                let plural = if b.count == 1 { "" } else { "s" };
                format!("{} {}{}", b.count, b.long, plural)
            }
        })
        .collect();

    let body = if options.full {
        let sep = if options.compact { " " } else { ", " };
        rendered.join(sep)
    } else {
        rendered.into_iter().next().unwrap_or_default()
    };

    if body.is_empty() {
        abs.to_string()
    } else if ms < 0 {
        format!("-{body}")
    } else {
        body
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    fn compact_full() -> EncodeOptions {
        EncodeOptions {
            compact: true,
            full: true,
            avoid_units: Vec::new(),
        }
    }

    #[test]
    fn decode_plain_integer_is_verbatim_milliseconds() {
        assert_eq!(decode("4000"), Some(4000));
        assert_eq!(decode("-250"), Some(-250));
        assert_eq!(decode("0"), Some(0));
    }

    #[test]
    fn decode_single_terms() {
        assert_eq!(decode("1s"), Some(1000));
        assert_eq!(decode("2 mins"), Some(120_000));
        assert_eq!(decode("1h"), Some(3_600_000));
        assert_eq!(decode("1y"), Some(31_540_000_000));
    }

    #[test]
    fn decode_ms_is_milliseconds_not_minutes() {
        assert_eq!(decode("100ms"), Some(100));
        assert_eq!(decode("3 msecs"), Some(3));
        assert_eq!(decode("5 milliseconds"), Some(5));
    }

    #[test]
    fn decode_sums_multiple_terms() {
        assert_eq!(decode("1d 2h"), Some(93_600_000));
        assert_eq!(decode("1m30s"), Some(90_000));
    }

    #[test]
    fn decode_fractional_and_signed_terms() {
        assert_eq!(decode("1.5h"), Some(5_400_000));
        assert_eq!(decode(".5s"), Some(500));
        assert_eq!(decode("-2s"), Some(-2000));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(decode("soon"), None);
        assert_eq!(decode("10 potatoes"), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn encode_compact_full() {
        assert_eq!(encode(93_600_000, &compact_full()), "1d 2h");
        assert_eq!(encode(90_000, &compact_full()), "1m 30s");
    }

    #[test]
    fn encode_keeps_only_largest_bucket_by_default() {
        let options = EncodeOptions {
            compact: true,
            ..EncodeOptions::default()
        };
        assert_eq!(encode(93_600_000, &options), "1d");
    }

    #[test]
    fn encode_long_form_pluralizes() {
        let options = EncodeOptions {
            compact: false,
            full: true,
            avoid_units: Vec::new(),
        };
        assert_eq!(encode(3_661_000, &options), "1 hour, 1 minute, 1 second");
        assert_eq!(encode(2_000, &options), "2 seconds");
    }

    #[test]
    fn encode_negative_gets_single_leading_sign() {
        assert_eq!(encode(-1_500, &compact_full()), "-1s 500ms");
    }

    #[test]
    fn encode_avoided_units_are_dropped_from_full_output() {
        let options = EncodeOptions {
            compact: true,
            full: true,
            avoid_units: vec!["ms".to_string()],
        };
        assert_eq!(encode(1_500, &options), "1s");
    }

    #[test]
    fn encode_zero_falls_back_to_raw_count() {
        assert_eq!(encode(0, &compact_full()), "0");
    }

    #[test]
    fn round_trip_at_bucket_granularity() {
        for ms in [1_000, 90_000, 93_600_000, 604_800_000 + 1_234] {
            let text = encode(ms, &compact_full());
            assert_eq!(decode(&text), Some(ms), "round trip failed for {text}");
        }
    }
}
