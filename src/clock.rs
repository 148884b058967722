use time::{macros::format_description, Date, OffsetDateTime, UtcOffset};

/// Source of "now" in the server's local time zone.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;

    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Wall clock pinned to the UTC offset captured at process start.
///
/// The offset has to be read before the runtime spawns worker threads,
/// `time` refuses to query it from a multi-threaded process.
#[derive(Debug, Clone, Copy)]
pub struct LocalClock {
    offset: UtcOffset,
}

impl LocalClock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn detect() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "local offset unavailable; falling back to UTC");
            UtcOffset::UTC
        });
        Self::new(offset)
    }
}

impl Clock for LocalClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// `YYYY-MM-DD`, the key used for grouping log entries.
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).ok()
}

/// `YYYY-MM-DD HH:MM:SS`, matching SQLite's `datetime('now', 'localtime')`.
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_default()
}

#[cfg(test)]
pub struct FixedClock(pub OffsetDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn formats_date_and_timestamp() {
        assert_eq!(format_date(date!(2024 - 03 - 07)), "2024-03-07");
        assert_eq!(
            format_timestamp(datetime!(2024-03-07 09:05:01 +02:00)),
            "2024-03-07 09:05:01"
        );
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date("2024-12-31"), Some(date!(2024 - 12 - 31)));
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn local_clock_applies_offset() {
        let clock = LocalClock::new(UtcOffset::from_hms(5, 30, 0).unwrap());
        assert_eq!(clock.now().offset(), UtcOffset::from_hms(5, 30, 0).unwrap());
    }

    #[test]
    fn fixed_clock_today() {
        let clock = FixedClock(datetime!(2024-01-31 23:59:59 -05:00));
        assert_eq!(clock.today(), date!(2024 - 01 - 31));
    }
}
