use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::transpiler::traits::SqlGenerator;

pub struct PostgresGenerator;

impl Default for PostgresGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PostgresGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SqlGenerator for PostgresGenerator {
    fn bool_literal(&self, val: bool) -> String {
        if val {
            "true".to_string()
        } else {
            "false".to_string()
        }
    }

    fn date_literal(&self, date: &NaiveDate) -> String {
        date.format("date '%Y-%m-%d'").to_string()
    }

    fn datetime_literal(&self, datetime: &NaiveDateTime) -> String {
        datetime.format("timestamp '%Y-%m-%d %H:%M:%S'").to_string()
    }

    fn time_literal(&self, time: &NaiveTime) -> String {
        time.format("time '%H:%M:%S'").to_string()
    }
}
