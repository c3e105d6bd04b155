use std::fmt;
use std::time::Duration;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Minutes in one day.
pub const MINUTES_PER_DAY: f64 = 24.0 * MINUTES_PER_HOUR;

// ── DurationBreakdown ─────────────────────────────────────────────────────────

/// A trip-duration aggregate split into days, hours and minutes.
///
/// The input value is treated as minutes: hours are `value / 60` and days
/// `value / 1440`, with the remainder carried down. Values below one day
/// have no day component. Fractional minutes are truncated; negative and
/// NaN inputs clamp to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBreakdown {
    pub days: Option<u64>,
    pub hours: u64,
    pub minutes: u64,
}

impl DurationBreakdown {
    pub fn from_minutes(value: f64) -> Self {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };

        let (days, rest) = if value < MINUTES_PER_DAY {
            (None, value)
        } else {
            let days = (value / MINUTES_PER_DAY).floor();
            (Some(days as u64), value - days * MINUTES_PER_DAY)
        };

        Self {
            days,
            hours: (rest / MINUTES_PER_HOUR).floor() as u64,
            minutes: (rest % MINUTES_PER_HOUR).floor() as u64,
        }
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days {
            Some(days) => write!(
                f,
                "{} days {} hours and {} minutes",
                days, self.hours, self.minutes
            ),
            None => write!(f, "{} hours and {} minutes", self.hours, self.minutes),
        }
    }
}

/// Render a duration aggregate with [`DurationBreakdown`].
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_duration;
///
/// assert_eq!(format_duration(90.0),   "1 hours and 30 minutes");
/// assert_eq!(format_duration(1500.0), "1 days 1 hours and 0 minutes");
/// ```
pub fn format_duration(value: f64) -> String {
    DurationBreakdown::from_minutes(value).to_string()
}

/// Render a pass's wall-clock time in seconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use bikeshare_core::formatting::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.500000");
/// ```
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.6}", elapsed.as_secs_f64())
}

/// A horizontal rule of `*` used to frame report sections.
pub fn rule() -> String {
    "*".repeat(40)
}
