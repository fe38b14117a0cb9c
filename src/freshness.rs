//! "Last updated" labels for refreshed listings.

use chrono::{DateTime, Datelike, Utc};

/// Describes how long ago `last_updated` was, relative to `now`.
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use pustaka::freshness::format_last_updated;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap();
/// assert_eq!(format_last_updated(now, now), "Baru saja diperbarui");
/// assert_eq!(
///     format_last_updated(now - Duration::minutes(5), now),
///     "Diperbarui 5 menit yang lalu"
/// );
/// assert_eq!(format_last_updated(now - Duration::days(3), now), "14/5/2024");
/// ```
pub fn format_last_updated(last_updated: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - last_updated).num_minutes();

    if minutes < 1 {
        return "Baru saja diperbarui".to_string();
    }
    if minutes < 60 {
        return format!("Diperbarui {minutes} menit yang lalu");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("Diperbarui {hours} jam yang lalu");
    }

    format!(
        "{}/{}/{}",
        last_updated.day(),
        last_updated.month(),
        last_updated.year()
    )
}
