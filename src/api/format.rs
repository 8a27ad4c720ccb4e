use chrono::{DateTime, Local, TimeZone};

/// Wall-clock layout used in every response envelope and mock payload
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in envelope format
pub fn now_display() -> String {
    display_time(&Local::now())
}

pub fn display_time<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    time.format(DISPLAY_TIME_FORMAT).to_string()
}

/// Local time `offset` in the past, formatted for mock "last active" style fields
pub fn display_ago(offset: chrono::Duration) -> String {
    display_time(&(Local::now() - offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn formats_without_fractional_seconds() {
        let time = Utc.with_ymd_and_hms(2024, 1, 15, 8, 5, 9).unwrap();
        assert_eq!(display_time(&time), "2024-01-15 08:05:09");
    }

    #[test]
    fn now_display_has_fixed_width() {
        assert_eq!(now_display().len(), "2024-01-01 12:00:00".len());
    }
}
