use crate::error::{Result, ScheduleError};

/// Rounds to the precision hours are stored with in the ledger.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Parses an hour amount from user input.
///
/// Accepts a plain number (`1.5`) or a single-suffix duration
/// (`90m`, `2h`), so `work Lernen 90m` and `work Lernen 1.5` mean the
/// same thing.
pub fn parse_hours(input: &str) -> Result<f64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScheduleError::InvalidHours(input.to_string()));
    }

    if let Ok(hours) = input.parse::<f64>() {
        return Ok(hours);
    }

    // Split off the final char by its boundary, the suffix may be
    // any (multi-byte) character in bad input.
    let (num_str, unit) = match input.char_indices().last() {
        Some((idx, unit)) => (&input[..idx], unit),
        None => return Err(ScheduleError::InvalidHours(input.to_string())),
    };
    let num: f64 = num_str
        .parse()
        .map_err(|_| ScheduleError::InvalidHours(input.to_string()))?;

    match unit.to_ascii_lowercase() {
        'm' => Ok(num / 60.0),
        'h' => Ok(num),
        _ => Err(ScheduleError::InvalidHours(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_hours(1.0 / 3.0), 0.33);
        assert_eq!(round_hours(1.006), 1.01);
        assert_eq!(round_hours(-1.504), -1.5);
        assert_eq!(round_hours(6.5), 6.5);
    }

    #[test]
    fn parses_plain_floats() {
        assert_eq!(parse_hours("1.5").unwrap(), 1.5);
        assert_eq!(parse_hours("14").unwrap(), 14.0);
    }

    #[test]
    fn parses_suffixed_durations() {
        assert_eq!(parse_hours("90m").unwrap(), 1.5);
        assert_eq!(parse_hours("2h").unwrap(), 2.0);
        assert_eq!(parse_hours("30M").unwrap(), 0.5);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_hours("").is_err());
        assert!(parse_hours("h").is_err());
        assert!(parse_hours("viel").is_err());
        assert!(parse_hours("2d").is_err());
    }

    #[test]
    fn rejects_multi_byte_suffixes_without_panicking() {
        assert!(matches!(
            parse_hours("2д"),
            Err(ScheduleError::InvalidHours(_))
        ));
        assert!(matches!(
            parse_hours("1.5ü"),
            Err(ScheduleError::InvalidHours(_))
        ));
        assert!(matches!(parse_hours("ü"), Err(ScheduleError::InvalidHours(_))));
    }
}
