use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::super::traits::SqlGenerator;

pub struct OracleGenerator;

impl SqlGenerator for OracleGenerator {
    fn bool_literal(&self, val: bool) -> String {
        // No BOOLEAN in Oracle SQL (only PL/SQL).
        if val { "1".to_string() } else { "0".to_string() }
    }

    // Default NLS_DATE_FORMAT is DD-MON-YYYY, month names upper case.
    fn date_literal(&self, date: &NaiveDate) -> String {
        date.format("'%d-%b-%Y'").to_string().to_uppercase()
    }

    fn datetime_literal(&self, datetime: &NaiveDateTime) -> String {
        datetime
            .format("'%d-%b-%Y %H:%M:%S'")
            .to_string()
            .to_uppercase()
    }

    fn time_literal(&self, time: &NaiveTime) -> String {
        time.format("'%H:%M:%S'").to_string()
    }

    fn folds_identifiers_upper(&self) -> bool {
        true
    }
}
