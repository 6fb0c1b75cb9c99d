use crate::model::NOT_PROVIDED;

/// Convert an ISO 8601 duration such as `PT1H30M` into a compact label
/// (`1 h 30 min`).
///
/// Empty input yields [`NOT_PROVIDED`]. Anything that is not exactly
/// `PT[nH][nM][nS]` is returned untouched, so free-form values like
/// "about an hour" and ranges like `PT15-20M` survive.
pub fn normalize_duration(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NOT_PROVIDED.to_string();
    }

    match parse_hours_minutes(trimmed) {
        Some((hours, minutes)) => format_label(hours, minutes),
        None => raw.to_string(),
    }
}

fn parse_hours_minutes(duration: &str) -> Option<(u64, u64)> {
    let rest = duration
        .strip_prefix("PT")
        .or_else(|| duration.strip_prefix("pt"))?;

    let (hours, rest) = take_component(rest, 'H');
    let (minutes, rest) = take_component(rest, 'M');
    let (_seconds, rest) = take_component(rest, 'S');

    // Ranges, fractions or anything else left over are not ours to reword
    if !rest.is_empty() {
        return None;
    }

    Some((hours.unwrap_or(0), minutes.unwrap_or(0)))
}

/// Read `<digits><unit>` from the front of `input`.
fn take_component(input: &str, unit: char) -> (Option<u64>, &str) {
    let digits_end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if digits_end == 0 {
        return (None, input);
    }

    let rest = &input[digits_end..];
    let Some(after_unit) = rest
        .strip_prefix(unit)
        .or_else(|| rest.strip_prefix(unit.to_ascii_lowercase()))
    else {
        return (None, input);
    };

    match input[..digits_end].parse::<u64>() {
        Ok(value) => (Some(value), after_unit),
        Err(_) => (None, input),
    }
}

fn format_label(hours: u64, minutes: u64) -> String {
    // 90 minutes reads better as "1 h 30 min"
    let total = hours.saturating_mul(60).saturating_add(minutes);
    let (hours, minutes) = (total / 60, total % 60);

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours} h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} min"));
    }

    if parts.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(normalize_duration("PT1H30M"), "1 h 30 min");
        assert_eq!(normalize_duration("PT45M"), "45 min");
        assert_eq!(normalize_duration("PT2H"), "2 h");
    }

    #[test]
    fn test_empty_is_not_provided() {
        assert_eq!(normalize_duration(""), "not provided");
        assert_eq!(normalize_duration("   "), "not provided");
    }

    #[test]
    fn test_unrecognized_passes_through() {
        assert_eq!(normalize_duration("bogus"), "bogus");
        assert_eq!(normalize_duration("20 minutes"), "20 minutes");
        assert_eq!(normalize_duration("P1D"), "P1D");
    }

    #[test]
    fn test_zero_components_are_not_provided() {
        assert_eq!(normalize_duration("PT0M"), "not provided");
        assert_eq!(normalize_duration("PT0H0M"), "not provided");
        assert_eq!(normalize_duration("PT"), "not provided");
    }

    #[test]
    fn test_minutes_carry_into_hours() {
        assert_eq!(normalize_duration("PT90M"), "1 h 30 min");
        assert_eq!(normalize_duration("PT180M"), "3 h");
        assert_eq!(normalize_duration("PT1H75M"), "2 h 15 min");
    }

    #[test]
    fn test_trailing_seconds_are_ignored() {
        assert_eq!(normalize_duration("PT1H5M30S"), "1 h 5 min");
        assert_eq!(normalize_duration("PT30S"), "not provided");
    }

    #[test]
    fn test_malformed_iso_passes_through() {
        assert_eq!(normalize_duration("PT15-20M"), "PT15-20M");
        assert_eq!(normalize_duration("PT1.5H"), "PT1.5H");
        assert_eq!(normalize_duration("PTfoo"), "PTfoo");
        assert_eq!(normalize_duration("PT5400.0S"), "PT5400.0S");
        assert_eq!(normalize_duration("PT20M and more"), "PT20M and more");
    }
}
