use chrono::NaiveDate;

/// Optionally signed decimal integer (`-12`, `+3`, `0042`).
pub fn is_int(s: &str) -> bool {
    regex!(r"^[+-]?[0-9]+$").is_match(s)
}

pub fn is_uint(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_alpha(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

pub fn is_slug(s: &str) -> bool {
    regex!(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").is_match(s)
}

pub fn is_uuid(s: &str) -> bool {
    regex!(r"^(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").is_match(s)
}

/// ISO calendar date; the day must exist (`2023-02-29` is rejected).
pub fn is_date(s: &str) -> bool {
    regex!(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Year, month and day in three consecutive segments.
pub fn is_ymd(values: &[&str]) -> bool {
    let [year, month, day] = values else {
        return false;
    };
    if !(is_uint(year) && is_uint(month) && is_uint(day)) {
        return false;
    }
    match (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>()) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d).is_some(),
        _ => false,
    }
}
