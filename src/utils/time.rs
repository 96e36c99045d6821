use chrono::{DateTime, Duration, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Longest window honoured; anything wider already covers every posting.
const MAX_WINDOW_DAYS: i64 = 36_500;

/// Start of a "posted within N days" window ending at `now`.
pub fn days_before(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days.clamp(0, MAX_WINDOW_DAYS))
}
