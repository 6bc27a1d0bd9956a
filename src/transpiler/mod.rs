//! SQL Transpiler for checks.
//!
//! Converts validated checks into `CONSTRAINT "name" CHECK (...)` clauses.

pub mod conditions;
pub mod dialect;
pub mod sql;
pub mod traits;

use crate::check::Check;
use crate::error::CheckResult;
pub use conditions::ConditionToSql;
pub use dialect::Dialect;
pub use traits::SqlGenerator;

/// Trait for converting checks to SQL.
pub trait ToSql {
    /// Convert to SQL for an engine identifier such as `sqlite3`.
    fn to_sql(&self, engine: &str, case_insensitive_names: bool) -> CheckResult<String> {
        self.to_sql_with_dialect(Dialect::from_engine(engine)?, case_insensitive_names)
    }
    /// Convert to SQL with a specific dialect.
    fn to_sql_with_dialect(
        &self,
        dialect: Dialect,
        case_insensitive_names: bool,
    ) -> CheckResult<String>;
}

impl ToSql for Check {
    fn to_sql_with_dialect(
        &self,
        dialect: Dialect,
        case_insensitive_names: bool,
    ) -> CheckResult<String> {
        let generator = dialect.generator();
        let mut sql = String::from("CONSTRAINT ");
        sql.push_str(&generator.quote_identifier(self.name()));
        sql.push_str(" CHECK ");

        let conditions = self.conditions();
        match conditions {
            [single] if !self.is_cascaded() => {
                sql.push_str(&single.to_sql(generator.as_ref())?);
            }
            [] => sql.push_str("( )"),
            _ => {
                // Flat: connectors are emitted in order, no precedence grouping.
                let last = conditions.len() - 1;
                let mut segments: Vec<String> = Vec::with_capacity(conditions.len());
                for (i, cond) in conditions.iter().enumerate() {
                    let mut segment = cond.to_sql(generator.as_ref())?;
                    if i < last {
                        if let Some(keyword) = cond.connector.sql_keyword() {
                            segment.push(' ');
                            segment.push_str(keyword);
                        }
                    }
                    segments.push(segment);
                }
                sql.push_str("( ");
                sql.push_str(&segments.join(" "));
                sql.push_str(" )");
            }
        }

        if case_insensitive_names {
            sql = sql.to_uppercase();
        }

        tracing::trace!(dialect = ?dialect, "rendered {}", sql);
        Ok(sql)
    }
}

#[cfg(test)]
mod tests;
