//! Parsing of the comma separated pickup date measure.

use chrono::NaiveDate;

use ekonovus_core::ports::PortError;

/// Parse a date measure such as `2024-01-05.,2024-01-12.` into dates, keeping
/// the order the backend listed them in.
///
/// Tokens are split on commas; each token holds year, month and day separated by
/// hyphens (or periods in the dotted `2024.03.01` form). Stray periods and blank
/// tokens are ignored.
///
/// # Errors
///
/// Returns [`PortError::InvalidDate`] for a token that is not a calendar date.
pub fn parse_pickup_dates(raw: &str) -> Result<Vec<NaiveDate>, PortError> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.trim_matches('.').is_empty())
        .map(parse_date_token)
        .collect()
}

fn parse_date_token(token: &str) -> Result<NaiveDate, PortError> {
    let invalid = || PortError::InvalidDate(token.to_owned());

    let mut components = token
        .split(['-', '.'])
        .map(str::trim)
        .filter(|component| !component.is_empty());

    let mut next_number = || {
        components
            .next()
            .and_then(|component| component.parse::<u32>().ok())
            .ok_or_else(invalid)
    };

    let year = i32::try_from(next_number()?).map_err(|_err| invalid())?;
    let month = next_number()?;
    let day = next_number()?;

    if components.next().is_some() {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn parses_hyphenated_dates_in_order() {
        let dates = parse_pickup_dates("2024-01-05,2024-01-12").expect("dates");

        assert_eq!(dates, vec![date(2024, 1, 5), date(2024, 1, 12)], "two dates");
    }

    #[test]
    fn trailing_periods_are_ignored() {
        assert_eq!(
            parse_pickup_dates("2024-01-05.,2024-01-12.").expect("dates"),
            parse_pickup_dates("2024-01-05,2024-01-12").expect("dates"),
            "periods stripped"
        );
    }

    #[test]
    fn parses_dotted_dates() {
        let dates = parse_pickup_dates("2024.03.01,2024.03.15").expect("dates");

        assert_eq!(dates, vec![date(2024, 3, 1), date(2024, 3, 15)], "dotted form");
    }

    #[test]
    fn keeps_backend_order() {
        let dates = parse_pickup_dates("2024-02-20, 2024-01-09").expect("dates");

        assert_eq!(dates, vec![date(2024, 2, 20), date(2024, 1, 9)], "not re-sorted");
    }

    #[test]
    fn blank_measure_has_no_dates() {
        assert!(parse_pickup_dates("").expect("dates").is_empty(), "empty");
        assert_eq!(
            parse_pickup_dates("2024-01-05,").expect("dates").len(),
            1,
            "trailing comma"
        );
    }

    #[test]
    fn rejects_impossible_dates() {
        let result = parse_pickup_dates("2024-02-30");

        assert!(
            matches!(result, Err(PortError::InvalidDate(ref token)) if token == "2024-02-30"),
            "invalid calendar date: {result:?}"
        );
    }

    #[test]
    fn rejects_incomplete_tokens() {
        assert!(parse_pickup_dates("2024-01").is_err(), "missing day");
        assert!(parse_pickup_dates("2024-01-05-07").is_err(), "extra component");
        assert!(parse_pickup_dates("sausio 5").is_err(), "not numeric");
    }
}
