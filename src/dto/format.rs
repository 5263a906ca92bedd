//! Display formats for dates embedded in detail representations.

pub mod day_month_year {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }
}

pub mod day_month_year_time {
    use chrono::{DateTime, FixedOffset};
    use serde::Serializer;

    pub const FORMAT: &str = "%d-%m-%Y %H:%M";

    pub fn serialize<S: Serializer>(
        value: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }
}
