use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::super::traits::SqlGenerator;

pub struct SqliteGenerator;

impl SqlGenerator for SqliteGenerator {
    fn bool_literal(&self, val: bool) -> String {
        if val {
            "1".to_string()
        } else {
            "0".to_string()
        }
    }

    // SQLite has no date types; ISO-8601 text compares correctly.
    fn date_literal(&self, date: &NaiveDate) -> String {
        date.format("'%Y-%m-%d'").to_string()
    }

    fn datetime_literal(&self, datetime: &NaiveDateTime) -> String {
        datetime.format("'%Y-%m-%d %H:%M:%S'").to_string()
    }

    fn time_literal(&self, time: &NaiveTime) -> String {
        time.format("'%H:%M:%S'").to_string()
    }
}
