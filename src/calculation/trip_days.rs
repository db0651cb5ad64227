//! Trip-day counting.
//!
//! Per-diem rates scale with the inclusive number of calendar days a trip
//! touches. Times of day never change the count.

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

/// Calculates the inclusive trip-day count.
///
/// The count is `(end_date - start_date) + 1` calendar days, never less than
/// one. A same-day trip is one day; an end before the start also yields one.
/// The function never fails: if the count cannot be represented it falls
/// back to a single day.
///
/// # Examples
///
/// ```
/// use trip_paperwork::calculation::calculate_trip_days;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let six = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
///
/// assert_eq!(calculate_trip_days(start, nine, end, six), 3);
/// assert_eq!(calculate_trip_days(start, nine, start, six), 1);
/// ```
pub fn calculate_trip_days(
    start_date: NaiveDate,
    start_time: NaiveTime,
    end_date: NaiveDate,
    end_time: NaiveTime,
) -> u32 {
    // Times only appear in the fallback log.
    let days_diff = (end_date - start_date).num_days();

    match days_diff
        .checked_add(1)
        .and_then(|days| u32::try_from(days.max(1)).ok())
    {
        Some(days) => days,
        None => {
            warn!(
                start = %start_date.and_time(start_time),
                end = %end_date.and_time(end_time),
                "Trip-day count out of range, falling back to 1 day"
            );
            1
        }
    }
}

/// Formats the trip period printed on the application form.
///
/// # Examples
///
/// ```
/// use trip_paperwork::calculation::format_trip_period;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();
/// assert_eq!(format_trip_period(start, end), "2025.03.04 ~ 03.06(2박 3일)");
/// ```
pub fn format_trip_period(start_date: NaiveDate, end_date: NaiveDate) -> String {
    let duration = (end_date - start_date).num_days() + 1;
    format!(
        "{} ~ {}({}박 {}일)",
        start_date.format("%Y.%m.%d"),
        end_date.format("%m.%d"),
        duration - 1,
        duration
    )
}
