//! Display formatting rules for client-facing strings.
//!
//! Distances, expiry windows, and posting ages are rendered server-side
//! with fixed tier thresholds so every client shows the same text.

use chrono::{DateTime, Utc};

/// Format a distance for display.
///
/// Under one kilometer the value is rounded to whole meters; otherwise
/// it is shown in kilometers with one decimal place.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else {
        format!("{km:.1}km")
    }
}

/// Format the time remaining until `expiry` as a tiered relative string.
///
/// Hours are rounded up, whole days are rounded down, and the week and
/// month tiers round their day counts up. Anything at or past expiry
/// renders as "Expired".
pub fn format_time_remaining(expiry: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining_secs = (expiry - now).num_seconds();
    let hours = div_ceil_i64(remaining_secs, 3600);

    if hours <= 0 {
        return "Expired".to_string();
    }
    if hours < 24 {
        return format!("{hours} hours");
    }

    let days = hours / 24;
    if days == 1 {
        return "1 day".to_string();
    }
    if days < 7 {
        return format!("{days} days");
    }
    if days < 30 {
        return format!("{} weeks", div_ceil_i64(days, 7));
    }
    format!("{} months", div_ceil_i64(days, 30))
}

/// Format the elapsed time since `created` as a tiered "ago" string.
pub fn format_posted_ago(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_secs = (now - created).num_seconds().max(0);
    let minutes = elapsed_secs / 60;
    let hours = elapsed_secs / 3600;
    let days = elapsed_secs / 86400;

    if minutes < 60 {
        return format!("{minutes} minutes ago");
    }
    if hours < 24 {
        return format!("{hours} hours ago");
    }
    if days == 1 {
        return "1 day ago".to_string();
    }
    format!("{days} days ago")
}

/// Integer division rounding toward positive infinity.
fn div_ceil_i64(value: i64, divisor: i64) -> i64 {
    if value <= 0 {
        return value / divisor;
    }
    (value + divisor - 1) / divisor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-01-15T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_format_distance_meters_under_one_km() {
        assert_eq!(format_distance(0.5), "500m");
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(0.999), "999m");
    }

    #[test]
    fn test_format_distance_km_with_one_decimal() {
        assert_eq!(format_distance(2.3), "2.3km");
        assert_eq!(format_distance(1.0), "1.0km");
        assert_eq!(format_distance(50.25), "50.2km");
    }

    #[test]
    fn test_time_remaining_expired() {
        assert_eq!(format_time_remaining(now(), now()), "Expired");
        assert_eq!(
            format_time_remaining(now() - Duration::hours(3), now()),
            "Expired"
        );
    }

    #[test]
    fn test_time_remaining_hours_tier() {
        assert_eq!(
            format_time_remaining(now() + Duration::hours(5), now()),
            "5 hours"
        );
        // Partial hours round up.
        assert_eq!(
            format_time_remaining(now() + Duration::minutes(90), now()),
            "2 hours"
        );
    }

    #[test]
    fn test_time_remaining_day_boundary() {
        // 36 hours remaining is one whole day.
        assert_eq!(
            format_time_remaining(now() + Duration::hours(36), now()),
            "1 day"
        );
        assert_eq!(
            format_time_remaining(now() + Duration::hours(24), now()),
            "1 day"
        );
        assert_eq!(
            format_time_remaining(now() + Duration::hours(49), now()),
            "2 days"
        );
    }

    #[test]
    fn test_time_remaining_weeks_and_months() {
        assert_eq!(
            format_time_remaining(now() + Duration::days(10), now()),
            "2 weeks"
        );
        assert_eq!(
            format_time_remaining(now() + Duration::days(45), now()),
            "2 months"
        );
    }

    #[test]
    fn test_posted_ago_tiers() {
        assert_eq!(
            format_posted_ago(now() - Duration::minutes(10), now()),
            "10 minutes ago"
        );
        assert_eq!(
            format_posted_ago(now() - Duration::hours(5), now()),
            "5 hours ago"
        );
        assert_eq!(
            format_posted_ago(now() - Duration::hours(30), now()),
            "1 day ago"
        );
        assert_eq!(
            format_posted_ago(now() - Duration::days(4), now()),
            "4 days ago"
        );
    }
}
