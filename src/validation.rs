use crate::error::{DuesError, DuesResult};
use crate::model::WEEK_COUNT;

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> DuesResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(DuesError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates a 0-based week index. Out-of-range values are rejected, never clamped.
pub fn week_index(index: usize) -> DuesResult<usize> {
    if index < WEEK_COUNT {
        Ok(index)
    } else {
        Err(DuesError::WeekOutOfRange {
            index,
            weeks: WEEK_COUNT,
        })
    }
}

/// Parses a 1-based week number as typed by the user into a 0-based index.
pub fn week_number(input: &str) -> DuesResult<usize> {
    let n: usize = input
        .trim()
        .parse()
        .map_err(|_| DuesError::Other(format!("'{}' is not a week number (1-{})", input.trim(), WEEK_COUNT)))?;
    if n == 0 {
        return Err(DuesError::Other(format!("weeks are numbered 1-{}", WEEK_COUNT)));
    }
    week_index(n - 1)
}

/// Parses a 1-based row number.
pub fn row_number(input: &str) -> DuesResult<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(DuesError::Other(format!("'{}' is not a row number", input.trim()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  out.json  ", "path").unwrap(), "out.json");
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("   ", "path").is_err());
    }

    #[test]
    fn week_index_accepts_last_week() {
        assert_eq!(week_index(4).unwrap(), 4);
    }

    #[test]
    fn week_index_rejects_five() {
        assert!(matches!(
            week_index(5),
            Err(DuesError::WeekOutOfRange { index: 5, weeks: 5 })
        ));
    }

    #[test]
    fn week_number_is_one_based() {
        assert_eq!(week_number("1").unwrap(), 0);
        assert_eq!(week_number(" 5 ").unwrap(), 4);
    }

    #[test]
    fn week_number_rejects_zero_and_six() {
        assert!(week_number("0").is_err());
        assert!(week_number("6").is_err());
        assert!(week_number("two").is_err());
    }

    #[test]
    fn row_number_rejects_zero() {
        assert!(row_number("0").is_err());
        assert_eq!(row_number("12").unwrap(), 12);
    }
}
