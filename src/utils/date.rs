use std::fmt::Display;

use chrono::{DateTime, Locale, TimeZone};

/// Format a date the way Turkish readers expect it, `5 Ocak 2024`
pub fn format_date_tr<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format_localized("%-d %B %Y", Locale::tr_TR).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_turkish_long_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        assert_eq!(format_date_tr(&date), "5 Ocak 2024");

        let date = Utc.with_ymd_and_hms(2023, 8, 31, 0, 0, 0).unwrap();
        assert_eq!(format_date_tr(&date), "31 Ağustos 2023");

        let date = Utc.with_ymd_and_hms(2022, 12, 1, 23, 59, 0).unwrap();
        assert_eq!(format_date_tr(&date), "1 Aralık 2022");
    }
}
