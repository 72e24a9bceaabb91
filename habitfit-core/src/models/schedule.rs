use std::collections::BTreeSet;
use thiserror::Error;

const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const DAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Errors produced while parsing a schedule from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Unknown weekday '{0}'. Use names (mon, tue, ...) or numbers 0-6 (0 = Sunday).")]
    UnknownDay(String),

    #[error("A habit must be scheduled on at least one day")]
    Empty,
}

/// Every weekday, 0 (Sunday) through 6 (Saturday).
pub fn all_days() -> BTreeSet<u8> {
    (0..7).collect()
}

/// Parses a schedule such as `all`, `weekdays`, `weekends`, `mon,wed,fri`
/// or `1,3,5`.
///
/// This is the editing collaborator's validation; the habit store itself
/// accepts whatever set it is given.
pub fn parse_schedule(input: &str) -> Result<BTreeSet<u8>, ScheduleError> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "all" | "daily" | "everyday" => return Ok(all_days()),
        "weekdays" => return Ok((1..=5).collect()),
        "weekends" => return Ok([0, 6].into_iter().collect()),
        _ => {}
    }

    let mut days = BTreeSet::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        days.insert(parse_day(token)?);
    }

    if days.is_empty() {
        return Err(ScheduleError::Empty);
    }
    Ok(days)
}

fn parse_day(token: &str) -> Result<u8, ScheduleError> {
    if let Ok(n) = token.parse::<u8>() {
        return if n < 7 {
            Ok(n)
        } else {
            Err(ScheduleError::UnknownDay(token.to_string()))
        };
    }

    if token.len() >= 2 {
        if let Some(index) = DAY_NAMES.iter().position(|name| name.starts_with(token)) {
            return Ok(index as u8);
        }
    }

    Err(ScheduleError::UnknownDay(token.to_string()))
}

/// Formats a schedule for display: `every day` or `Mon, Wed, Fri`.
pub fn format_schedule(days: &BTreeSet<u8>) -> String {
    if days.len() == 7 {
        return "every day".to_string();
    }

    days.iter()
        .filter_map(|d| DAY_ABBREVIATIONS.get(usize::from(*d)))
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(days: &[u8]) -> BTreeSet<u8> {
        days.iter().copied().collect()
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_schedule("all").unwrap(), all_days());
        assert_eq!(parse_schedule("Weekdays").unwrap(), set(&[1, 2, 3, 4, 5]));
        assert_eq!(parse_schedule("weekends").unwrap(), set(&[0, 6]));
    }

    #[test]
    fn test_parse_names_and_numbers() {
        assert_eq!(parse_schedule("mon,wed,fri").unwrap(), set(&[1, 3, 5]));
        assert_eq!(parse_schedule("Tuesday thu").unwrap(), set(&[2, 4]));
        assert_eq!(parse_schedule("0, 6").unwrap(), set(&[0, 6]));
        assert_eq!(parse_schedule("su,sa,su").unwrap(), set(&[0, 6]));
    }

    #[test]
    fn test_parse_rejects_unknown_day() {
        assert_eq!(
            parse_schedule("mon,funday"),
            Err(ScheduleError::UnknownDay("funday".to_string()))
        );
        assert_eq!(
            parse_schedule("7"),
            Err(ScheduleError::UnknownDay("7".to_string()))
        );
        // Ambiguous single letter
        assert!(parse_schedule("t").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(parse_schedule(""), Err(ScheduleError::Empty));
        assert_eq!(parse_schedule(" , "), Err(ScheduleError::Empty));
    }

    #[test]
    fn test_format_schedule() {
        assert_eq!(format_schedule(&all_days()), "every day");
        assert_eq!(format_schedule(&set(&[1, 3, 5])), "Mon, Wed, Fri");
    }
}
