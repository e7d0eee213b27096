// Field parsers and console formatting helpers.
//
// Everything here is total: malformed text becomes `None` rather than an
// error, so the rest of the pipeline only sees typed values or the
// missing-value marker.
use num_format::{Locale, ToFormattedString};
use once_cell::sync::Lazy;
use regex::Regex;

const SQ_METER_TO_SQFT: f64 = 10.764;
const ACRE_TO_SQFT: f64 = 43560.0;

static SQ_METER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.?\d*\s*Sq. Meter").expect("valid regex"));
static ACRES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\d*\s*Acres").expect("valid regex"));
static PLAIN_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\d*$").expect("valid regex"));
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.?\d*").expect("valid regex"));

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces, text).
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Bedroom count from free text such as `"4 BHK"` or `"1 RK"`: every
/// non-digit is dropped and whatever is left is read as an integer.
pub fn parse_bedroom(s: Option<&str>) -> Option<u32> {
    let digits: String = s?.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u32>().ok()
}

/// Convert a mixed-unit area value to square feet.
///
/// Rules are tried in order: `a - b` ranges (mean of both ends), square
/// meters, acres, then a bare number. Anything else is `None`.
pub fn parse_total_sqft(s: Option<&str>) -> Option<f64> {
    let s = s?;
    let value = if s.contains('-') {
        parse_range_mean(s)?
    } else if SQ_METER.is_match(s) {
        leading_number(s)? * SQ_METER_TO_SQFT
    } else if ACRES.is_match(s) {
        leading_number(s)? * ACRE_TO_SQFT
    } else if PLAIN_NUMBER.is_match(s) {
        s.parse::<f64>().ok()?
    } else {
        return None;
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn parse_range_mean(s: &str) -> Option<f64> {
    let mut parts = s.split('-');
    let lower = parts.next()?.trim().parse::<f64>().ok()?;
    let upper = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((lower + upper) / 2.0)
}

fn leading_number(s: &str) -> Option<f64> {
    LEADING_NUMBER.find(s)?.as_str().parse::<f64>().ok()
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for counts in console messages
    // (e.g., `13,320 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map(|v| (v - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn sqft_range_is_averaged() {
        assert_eq!(parse_total_sqft(Some("1200 - 1800")), Some(1500.0));
        assert_eq!(parse_total_sqft(Some("1000-1100")), Some(1050.0));
    }

    #[test]
    fn sqft_units_are_converted() {
        assert!(approx(parse_total_sqft(Some("600 Sq. Meter")), 6458.4));
        assert!(approx(parse_total_sqft(Some("2 Acres")), 87120.0));
        assert!(approx(parse_total_sqft(Some("1.5Acres")), 65340.0));
    }

    #[test]
    fn sqft_plain_numbers_parse() {
        assert_eq!(parse_total_sqft(Some("1250")), Some(1250.0));
        assert_eq!(parse_total_sqft(Some("1250.5")), Some(1250.5));
    }

    #[test]
    fn sqft_unrecognized_is_missing() {
        for junk in [
            "junk",
            "",
            "142.84Sq. Yards",
            "1Grounds",
            "- 1200",
            "1 - 2 - 3",
            "abc - def",
            "inf",
            "NaN",
            " 1250",
        ] {
            assert_eq!(parse_total_sqft(Some(junk)), None, "input {:?}", junk);
        }
        assert_eq!(parse_total_sqft(None), None);
    }

    #[test]
    fn sqft_never_negative_or_infinite() {
        let inputs = ["0", "0 - 0", "5 Acres", "1e400 - 1", "99999999999999999999"];
        for input in inputs {
            if let Some(v) = parse_total_sqft(Some(input)) {
                assert!(v.is_finite() && v >= 0.0, "input {:?} gave {}", input, v);
            }
        }
    }

    #[test]
    fn bedroom_digits_are_extracted() {
        assert_eq!(parse_bedroom(Some("4 BHK")), Some(4));
        assert_eq!(parse_bedroom(Some("1 RK")), Some(1));
        assert_eq!(parse_bedroom(Some("11 Bedroom")), Some(11));
        assert_eq!(parse_bedroom(Some("Studio")), None);
        assert_eq!(parse_bedroom(Some("")), None);
        assert_eq!(parse_bedroom(None), None);
        assert_eq!(parse_bedroom(Some("99999999999 BHK")), None);
    }

    #[test]
    fn f64_safe_handles_common_noise() {
        assert_eq!(parse_f64_safe(Some(" 39.07 ")), Some(39.07));
        assert_eq!(parse_f64_safe(Some("1,200")), Some(1200.0));
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn format_int_groups_thousands() {
        assert_eq!(format_int(13320usize), "13,320");
    }
}
