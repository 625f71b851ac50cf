//! Business-day arithmetic for document dating.
//!
//! Procurement records are dated a fixed number of business days before the
//! invoice: the meeting minutes two days earlier, the price research
//! fifteen. Weekends and the fixed national holiday dates are skipped; the
//! holiday table is year-independent, so a holiday falling on a weekend is
//! simply skipped twice.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Fixed national holidays as (month, day) codes.
const FIXED_HOLIDAYS: [(u32, u32); 8] = [
    (1, 1),
    (4, 21),
    (5, 1),
    (9, 7),
    (10, 12),
    (11, 2),
    (11, 15),
    (12, 25),
];

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
        && !FIXED_HOLIDAYS.contains(&(date.month(), date.day()))
}

/// Steps backward one calendar day at a time until `days` business days
/// have been consumed. `days = 0` returns the input unchanged.
pub fn subtract_business_days(date: NaiveDate, days: u32) -> NaiveDate {
    let mut result = date;
    let mut count = 0;
    while count < days {
        result -= Duration::days(1);
        if is_business_day(result) {
            count += 1;
        }
    }
    result
}

/// Date printed on the meeting minutes: two business days before the invoice.
pub fn document_date(invoice_date: NaiveDate) -> NaiveDate {
    subtract_business_days(invoice_date, 2)
}

/// Date printed on the price research sheets: fifteen business days before
/// the invoice.
pub fn price_research_date(invoice_date: NaiveDate) -> NaiveDate {
    subtract_business_days(invoice_date, 15)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_days_returns_input() {
        let monday = date(2025, 6, 9);
        assert_eq!(subtract_business_days(monday, 0), monday);
    }

    #[test]
    fn test_monday_minus_one_is_previous_friday() {
        // 2025-06-09 is a Monday with no holiday in between.
        assert_eq!(subtract_business_days(date(2025, 6, 9), 1), date(2025, 6, 6));
    }

    #[test]
    fn test_holiday_is_skipped() {
        // 2025-05-01 (Thursday) is a fixed holiday; the business day before
        // Friday 2025-05-02 is Wednesday 2025-04-30.
        assert_eq!(subtract_business_days(date(2025, 5, 2), 1), date(2025, 4, 30));
    }

    #[test]
    fn test_weekend_holiday_skipped_twice() {
        // 2025-09-07 falls on a Sunday; stepping back from Monday 2025-09-08
        // crosses the holiday, the weekend, and lands on Friday.
        assert_eq!(subtract_business_days(date(2025, 9, 8), 1), date(2025, 9, 5));
    }

    #[test]
    fn test_research_date_consumes_fifteen_business_days() {
        let invoice = date(2025, 6, 20);
        let research = price_research_date(invoice);
        assert!(research < invoice);

        let mut cursor = research;
        let mut business_days = 0;
        while cursor < invoice {
            cursor += Duration::days(1);
            if is_business_day(cursor) && cursor <= invoice {
                business_days += 1;
            }
        }
        assert_eq!(business_days, 15);
    }

    #[test]
    fn test_document_date_is_two_business_days() {
        assert_eq!(document_date(date(2025, 6, 11)), date(2025, 6, 9));
    }
}
