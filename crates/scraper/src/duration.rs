//! ISO-8601 duration parsing for schema.org time fields.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `P[nD][T[nH][nM][nS]]`, e.g. `PT1H30M`, `P1DT2H`, `PT45.5S`.
static ISO_DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^P(?:(\d+(?:\.\d+)?)D)?(?:T(?:(\d+(?:\.\d+)?)H)?(?:(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("Invalid ISO duration regex")
});

/// Parse an ISO-8601 duration into whole minutes, rounding seconds.
///
/// Returns `None` for anything that is not a duration, including the bare
/// `P`/`PT` forms with no components.
pub fn parse_iso_minutes(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let caps = ISO_DURATION_REGEX.captures(raw)?;

    let part = |idx: usize| -> Option<f64> { caps.get(idx).and_then(|m| m.as_str().parse().ok()) };

    let (days, hours, minutes, seconds) = (part(1), part(2), part(3), part(4));
    if days.is_none() && hours.is_none() && minutes.is_none() && seconds.is_none() {
        return None;
    }

    let total = days.unwrap_or(0.0) * 1440.0
        + hours.unwrap_or(0.0) * 60.0
        + minutes.unwrap_or(0.0)
        + seconds.unwrap_or(0.0) / 60.0;

    Some(total.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_and_minutes() {
        assert_eq!(parse_iso_minutes("PT1H30M"), Some(90));
        assert_eq!(parse_iso_minutes("PT45M"), Some(45));
        assert_eq!(parse_iso_minutes("pt2h"), Some(120));
    }

    #[test]
    fn days_and_seconds() {
        assert_eq!(parse_iso_minutes("P1DT2H"), Some(1560));
        assert_eq!(parse_iso_minutes("PT90S"), Some(2));
        assert_eq!(parse_iso_minutes("PT0.5H"), Some(30));
    }

    #[test]
    fn rejects_non_durations() {
        assert_eq!(parse_iso_minutes(""), None);
        assert_eq!(parse_iso_minutes("P"), None);
        assert_eq!(parse_iso_minutes("PT"), None);
        assert_eq!(parse_iso_minutes("30 minutes"), None);
    }
}
