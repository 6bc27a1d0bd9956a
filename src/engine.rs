//! Database engine descriptor.
//!
//! Checks never talk to a database; they only need to know which engine
//! the SQL is for and whether it folds identifiers to upper case.
//!
//! ```toml
//! [database]
//! engine = "oracle"
//! case_insensitive_names = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::check::Check;
use crate::error::{CheckError, CheckResult};
use crate::transpiler::{Dialect, ToSql};

/// The target database, as seen by check rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Connection {
    /// Engine identifier: `postgresql`, `postgresql_psycopg2`, `sqlite3` or `oracle`.
    pub engine: String,

    /// Uppercase the whole statement. Defaults to the engine's own folding.
    #[serde(default)]
    pub case_insensitive_names: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    database: Connection,
}

impl Connection {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            case_insensitive_names: None,
        }
    }

    /// Override identifier folding.
    pub fn case_insensitive_names(mut self, fold: bool) -> Self {
        self.case_insensitive_names = Some(fold);
        self
    }

    /// Parse the `[database]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> CheckResult<Self> {
        let config: ConfigFile =
            toml::from_str(content).map_err(|e| CheckError::Config(e.to_string()))?;
        Ok(config.database)
    }

    /// Load the `[database]` table from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> CheckResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let connection = Self::from_toml_str(&content)?;
        tracing::debug!(engine = %connection.engine, "loaded connection from {}", path.display());
        Ok(connection)
    }

    pub fn dialect(&self) -> CheckResult<Dialect> {
        Dialect::from_engine(&self.engine)
    }

    pub fn uses_case_insensitive_names(&self) -> CheckResult<bool> {
        match self.case_insensitive_names {
            Some(fold) => Ok(fold),
            None => Ok(self.dialect()?.generator().folds_identifiers_upper()),
        }
    }

    /// Render a check for this connection.
    pub fn render(&self, check: &Check) -> CheckResult<String> {
        check.to_sql_with_dialect(self.dialect()?, self.uses_case_insensitive_names()?)
    }
}
