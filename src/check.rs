//! The check builder.
//!
//! A [`Check`] holds an ordered list of conditions joined by `AND`/`OR`
//! connectors. It is built from lookups, combined with `&` and `|`,
//! validated against a model's fields, then rendered to SQL.

use std::ops::{BitAnd, BitOr};

use crate::ast::{Bound, Condition, Connector, Operand, Value};
use crate::error::{CheckError, CheckResult};
use crate::parser::parse_lookup;
use crate::schema::FieldSet;
use crate::transpiler::ToSql;

/// A named check constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Check {
    name: String,
    conditions: Vec<Condition>,
    cascaded: bool,
    validated: bool,
}

impl Check {
    /// Build a check from `(lookup, value)` pairs, in order.
    ///
    /// Every lookup in one call is joined to the next with `AND`.
    ///
    /// ```
    /// use check_constraints::Check;
    ///
    /// let check = Check::new([("price__gte", 0), ("price__lte", 100)]).unwrap();
    /// assert!(check.is_cascaded());
    /// ```
    pub fn new<I, K, V>(lookups: I) -> CheckResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let conditions = lookups
            .into_iter()
            .map(|(key, value)| parse_lookup(key.as_ref(), value.into()))
            .collect::<CheckResult<Vec<_>>>()?;
        Self::from_conditions(conditions)
    }

    /// Build a check from a single lookup.
    pub fn lookup(key: &str, value: impl Into<Value>) -> CheckResult<Self> {
        let value: Value = value.into();
        Self::new([(key, value)])
    }

    /// Build a check from already-parsed conditions, joined with `AND`.
    pub fn from_conditions(mut conditions: Vec<Condition>) -> CheckResult<Self> {
        if conditions.is_empty() {
            return Err(CheckError::NoArguments);
        }

        let last = conditions.len() - 1;
        for (i, cond) in conditions.iter_mut().enumerate() {
            cond.connector = if i < last {
                Connector::And
            } else {
                Connector::None
            };
        }

        Ok(Self {
            name: String::new(),
            cascaded: conditions.len() > 1,
            conditions,
            validated: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Builder-style [`Check::set_name`].
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// True once more than one condition is chained.
    pub fn is_cascaded(&self) -> bool {
        self.cascaded
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Join `other` after this check with `AND`.
    pub fn combine_and(&mut self, other: Check) -> &mut Self {
        self.combine(Connector::And, other)
    }

    /// Join `other` after this check with `OR`.
    pub fn combine_or(&mut self, other: Check) -> &mut Self {
        self.combine(Connector::Or, other)
    }

    fn combine(&mut self, connector: Connector, other: Check) -> &mut Self {
        tracing::debug!(
            ?connector,
            left = self.conditions.len(),
            right = other.conditions.len(),
            "combining checks"
        );
        self.cascaded = true;
        if let Some(last) = self.conditions.last_mut() {
            last.connector = connector;
        }
        self.conditions.extend(other.conditions);
        self.validated = self.validated && other.validated;
        self
    }

    /// Check every referenced field against `fields` and every value against
    /// its operator. Safe to call more than once.
    pub fn validate<F: FieldSet + ?Sized>(&mut self, fields: &F) -> CheckResult<()> {
        for cond in &self.conditions {
            fields.require_field(&cond.field)?;
            match cond.operand()? {
                Operand::FieldRef(other) => fields.require_field(other)?,
                Operand::Range(low, high) => {
                    for bound in [low, high] {
                        if let Bound::FieldRef(other) = bound {
                            fields.require_field(other)?;
                        }
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(
            check = %self.name,
            conditions = self.conditions.len(),
            "validated check"
        );
        self.validated = true;
        Ok(())
    }

    /// Render as `CONSTRAINT "name" CHECK (...)` for an engine identifier.
    pub fn render(&self, engine: &str, case_insensitive_names: bool) -> CheckResult<String> {
        self.to_sql(engine, case_insensitive_names)
    }
}

impl BitAnd for Check {
    type Output = Check;

    fn bitand(mut self, rhs: Check) -> Check {
        self.combine_and(rhs);
        self
    }
}

impl BitOr for Check {
    type Output = Check;

    fn bitor(mut self, rhs: Check) -> Check {
        self.combine_or(rhs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let lookups: Vec<(&str, i64)> = Vec::new();
        assert!(matches!(Check::new(lookups), Err(CheckError::NoArguments)));
    }

    #[test]
    fn test_single_lookup_not_cascaded() {
        let check = Check::lookup("price__gte", 10).unwrap();
        assert!(!check.is_cascaded());
        assert_eq!(check.name(), "");
        assert_eq!(check.conditions()[0].connector, Connector::None);
    }

    #[test]
    fn test_multiple_lookups_are_anded() {
        let check = Check::new([("price__gte", 0), ("price__lte", 100), ("discount__lt", 50)])
            .unwrap();
        assert!(check.is_cascaded());
        let connectors: Vec<Connector> = check.conditions().iter().map(|c| c.connector).collect();
        assert_eq!(
            connectors,
            vec![Connector::And, Connector::And, Connector::None]
        );
    }

    #[test]
    fn test_combine_sets_last_connector() {
        let check = Check::lookup("tax_percent__gte", 10).unwrap()
            & Check::lookup("vat_percent__lte", 20).unwrap()
            | Check::lookup("price__gte", 0).unwrap();

        assert!(check.is_cascaded());
        let connectors: Vec<Connector> = check.conditions().iter().map(|c| c.connector).collect();
        assert_eq!(
            connectors,
            vec![Connector::And, Connector::Or, Connector::None]
        );
    }

    #[test]
    fn test_combine_in_place() {
        let mut check = Check::lookup("price__gte", 0).unwrap();
        check
            .combine_or(Check::lookup("price__lte", 100).unwrap())
            .combine_and(Check::lookup("discount__gte", 0).unwrap());
        let fields: Vec<&str> = check.conditions().iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["price", "price", "discount"]);
        assert_eq!(check.conditions()[0].connector, Connector::Or);
        assert_eq!(check.conditions()[1].connector, Connector::And);
    }

    #[test]
    fn test_validate_field_reference() {
        let mut check = Check::lookup("price__gte", "discount").unwrap();
        assert!(check.validate(&["price", "discount"]).is_ok());
        assert!(check.is_validated());

        let mut check = Check::lookup("price__gte", "discont").unwrap();
        let err = check.validate(&["price", "discount"]).unwrap_err();
        assert!(matches!(
            err,
            CheckError::NonExistentField { ref field, suggestion: Some(ref s) }
                if field == "discont" && s == "discount"
        ));
    }

    #[test]
    fn test_validate_between_field_bound() {
        let mut check = Check::lookup("discount__between", (0, "price")).unwrap();
        assert!(check.validate(&["discount", "price"]).is_ok());

        let mut check = Check::lookup("discount__between", (0, "cost")).unwrap();
        assert!(check.validate(&["discount", "price"]).is_err());
    }

    #[test]
    fn test_validate_empty_check_is_noop() {
        let mut check = Check::default();
        assert!(check.validate(&["price"]).is_ok());
    }
}
