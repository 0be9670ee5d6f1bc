use chrono::{NaiveDate, TimeDelta, Utc};

/// Add `payment_term_days` calendar days to the invoice date.
///
/// Negative terms move the date backwards. Results outside the range chrono
/// can represent saturate to [`NaiveDate::MIN`] / [`NaiveDate::MAX`].
pub fn compute_due_date(invoice_date: NaiveDate, payment_term_days: i64) -> NaiveDate {
    TimeDelta::try_days(payment_term_days)
        .and_then(|delta| invoice_date.checked_add_signed(delta))
        .unwrap_or(if payment_term_days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Short US-style display date, e.g. "Mar 5, 2024".
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Today's date in UTC, the calendar invoice ids are stamped with.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn crosses_month_boundary() {
        assert_eq!(compute_due_date(date(2024, 1, 28), 5), date(2024, 2, 2));
    }

    #[test]
    fn crosses_year_boundary() {
        assert_eq!(compute_due_date(date(2024, 12, 15), 30), date(2025, 1, 14));
    }

    #[test]
    fn leap_day() {
        assert_eq!(compute_due_date(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(compute_due_date(date(2023, 2, 28), 1), date(2023, 3, 1));
    }

    #[test]
    fn zero_terms_is_invoice_date() {
        assert_eq!(compute_due_date(date(2024, 6, 15), 0), date(2024, 6, 15));
    }

    #[test]
    fn negative_terms_go_backwards() {
        assert_eq!(compute_due_date(date(2024, 3, 1), -1), date(2024, 2, 29));
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(compute_due_date(date(2024, 1, 1), i64::MAX), NaiveDate::MAX);
        assert_eq!(compute_due_date(date(2024, 1, 1), i64::MIN), NaiveDate::MIN);
    }

    #[test]
    fn display_format() {
        assert_eq!(format_display_date(date(2024, 3, 5)), "Mar 5, 2024");
        assert_eq!(format_display_date(date(2024, 12, 25)), "Dec 25, 2024");
    }
}
