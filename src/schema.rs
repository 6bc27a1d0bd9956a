//! Model schema: the field universe checks are validated against, and the
//! model definition hook that validates constraints as the model is built.

use std::collections::{BTreeSet, HashSet};

use strsim::levenshtein;

use crate::ast::Connector;
use crate::check::Check;
use crate::engine::Connection;
use crate::error::{CheckError, CheckResult};
use crate::transpiler::ToSql;
use crate::validator::FieldValidator;

/// A set of field names a check may reference.
pub trait FieldSet {
    /// All field names, in definition order where there is one.
    fn field_names(&self) -> Vec<&str>;

    fn has_field(&self, name: &str) -> bool {
        self.field_names().contains(&name)
    }

    /// Check a field exists. If not, returns an error with a suggestion.
    fn require_field(&self, name: &str) -> CheckResult<()> {
        if self.has_field(name) {
            Ok(())
        } else {
            let suggestion = did_you_mean(name, &self.field_names());
            Err(CheckError::missing_field(name, suggestion))
        }
    }
}

impl<S: AsRef<str>> FieldSet for [S] {
    fn field_names(&self) -> Vec<&str> {
        self.iter().map(|s| s.as_ref()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> FieldSet for [S; N] {
    fn field_names(&self) -> Vec<&str> {
        self.as_slice().field_names()
    }
}

impl<S: AsRef<str>> FieldSet for Vec<S> {
    fn field_names(&self) -> Vec<&str> {
        self.as_slice().field_names()
    }
}

impl FieldSet for HashSet<String> {
    fn field_names(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl FieldSet for BTreeSet<String> {
    fn field_names(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Find the best match with Levenshtein distance within threshold.
pub fn did_you_mean(input: &str, candidates: &[impl AsRef<str>]) -> Option<String> {
    let mut best_match = None;
    let mut min_dist = usize::MAX;

    let threshold = match input.len() {
        0..=2 => 0,
        3..=5 => 2,
        _ => 3,
    };

    for cand in candidates {
        let cand_str = cand.as_ref();
        let dist = levenshtein(input, cand_str);
        if dist <= threshold && dist < min_dist {
            min_dist = dist;
            best_match = Some(cand_str.to_string());
        }
    }

    best_match
}

/// Storage kind of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Char,
    Integer,
    PositiveInteger,
    Float,
    Boolean,
    Date,
    DateTime,
    Time,
    ForeignKey,
}

/// A model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Attribute name checks refer to. Foreign keys are stored as `<name>_id`.
    pub fn attname(&self) -> String {
        match self.kind {
            FieldKind::ForeignKey => format!("{}_id", self.name),
            _ => self.name.clone(),
        }
    }
}

/// A model definition with validated check constraints.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    fields: Vec<Field>,
    attnames: Vec<String>,
    constraints: Vec<Check>,
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            fields: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn constraints(&self) -> &[Check] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&Check> {
        self.constraints.iter().find(|c| c.name() == name)
    }

    /// Per-value validators for one field, taken from every constraint whose
    /// conditions are all joined with `AND`. Cross-field comparisons are skipped.
    pub fn field_validators(&self, field: &str) -> CheckResult<Vec<FieldValidator>> {
        let mut validators = Vec::new();
        for check in &self.constraints {
            let conditions = check.conditions();
            if conditions.iter().any(|c| c.connector == Connector::Or) {
                continue;
            }
            for cond in conditions.iter().filter(|c| c.field == field) {
                if let Some(validator) = FieldValidator::from_condition(cond)? {
                    validators.push(validator);
                }
            }
        }
        Ok(validators)
    }

    /// Render every constraint for the given connection, in definition order.
    pub fn constraint_sql(&self, connection: &Connection) -> CheckResult<Vec<String>> {
        let dialect = connection.dialect()?;
        let case_insensitive = connection.uses_case_insensitive_names()?;
        self.constraints
            .iter()
            .map(|check| check.to_sql_with_dialect(dialect, case_insensitive))
            .collect()
    }
}

impl FieldSet for Model {
    fn field_names(&self) -> Vec<&str> {
        self.attnames.iter().map(String::as_str).collect()
    }
}

/// Builder for [`Model`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<Field>,
    constraints: Vec<(String, Check)>,
}

impl ModelBuilder {
    /// Add a field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(Field::new(name, kind));
        self
    }

    /// Attach a named check constraint.
    pub fn constraint(mut self, name: impl Into<String>, check: Check) -> Self {
        self.constraints.push((name.into(), check));
        self
    }

    /// Build the model, naming and validating each constraint once.
    ///
    /// Any invalid constraint aborts the build; no `Model` is produced.
    pub fn build(self) -> CheckResult<Model> {
        let attnames: Vec<String> = self.fields.iter().map(Field::attname).collect();
        let mut constraints = Vec::with_capacity(self.constraints.len());

        for (name, mut check) in self.constraints {
            check.set_name(name);
            check.validate(&attnames)?;
            constraints.push(check);
        }

        tracing::debug!(
            model = %self.name,
            constraints = constraints.len(),
            "registered model constraints"
        );

        Ok(Model {
            name: self.name,
            fields: self.fields,
            attnames,
            constraints,
        })
    }
}
