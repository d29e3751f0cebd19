use chrono::{Duration, Local, NaiveDate};

/// Returns today's date plus `days_ahead`, formatted as `YYYY-MM-DD` — the
/// exact form Booking.com uses in its calendar `data-date` attributes.
///
/// Negative offsets yield past dates; month and year boundaries roll over.
pub fn future_date(days_ahead: i64) -> String {
    offset_from(Local::now().date_naive(), days_ahead)
}

fn offset_from(base: NaiveDate, days: i64) -> String {
    (base + Duration::days(days)).format("%Y-%m-%d").to_string()
}
