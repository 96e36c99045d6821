/// Integer parsing for query strings that tolerates junk after the number:
/// `"12abc"` reads as 12, `"2.9"` as 2, `"abc"` as nothing.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate instead of failing on absurdly long inputs.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Reads an optional query value leniently. Missing, non-numeric and zero
/// inputs fall back to `default`; the result is clamped into `min..=max`.
pub fn lenient_int(raw: Option<&str>, default: i64, min: i64, max: i64) -> i64 {
    raw.and_then(parse_leading_int)
        .filter(|v| *v != 0)
        .unwrap_or(default)
        .clamp(min, max)
}

/// Trimmed, non-empty text parameter.
pub fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
