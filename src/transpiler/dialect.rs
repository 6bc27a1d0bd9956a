use serde::{Deserialize, Serialize};

use crate::error::{CheckError, CheckResult};
use crate::transpiler::sql::oracle::OracleGenerator;
use crate::transpiler::sql::postgres::PostgresGenerator;
use crate::transpiler::sql::sqlite::SqliteGenerator;
use crate::transpiler::traits::SqlGenerator;

/// Supported SQL Dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    Postgres,
    SQLite,
    Oracle,
}

/// Engine identifiers accepted for check constraints.
pub const ENGINES: &[(&str, Dialect)] = &[
    ("postgresql", Dialect::Postgres),
    ("postgresql_psycopg2", Dialect::Postgres),
    ("sqlite3", Dialect::SQLite),
    ("oracle", Dialect::Oracle),
];

impl Dialect {
    /// Resolve an engine identifier such as `postgresql_psycopg2`.
    pub fn from_engine(engine: &str) -> CheckResult<Self> {
        ENGINES
            .iter()
            .find(|(name, _)| *name == engine)
            .map(|(_, dialect)| *dialect)
            .ok_or_else(|| CheckError::UnsupportedEngine(engine.to_string()))
    }

    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::Postgres => Box::new(PostgresGenerator),
            Dialect::SQLite => Box::new(SqliteGenerator),
            Dialect::Oracle => Box::new(OracleGenerator),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_engine(s)
    }
}
