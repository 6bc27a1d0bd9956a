//! Field-level validators.
//!
//! Each check operator has an in-process counterpart, so a form or API
//! layer can reject a value before the database does.

use std::cmp::Ordering;

use regex::Regex;

use crate::ast::{Bound, CaseFold, Condition, Operand, Operator, Value};
use crate::error::{CheckError, CheckResult};

/// A value that failed a field validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// What a validator tests a value against.
#[derive(Debug, Clone)]
pub enum Rule {
    GreaterThan(Value),
    LessThan(Value),
    GreaterOrEqual(Value),
    LessOrEqual(Value),
    NotEqual(Value),
    Equal(Value),
    InList(Vec<Value>),
    NotInList(Vec<Value>),
    /// Inclusive on both ends, as SQL `BETWEEN` is.
    Range(Value, Value),
    Like(Regex),
    NotLike(Regex),
}

/// In-process mirror of a single condition.
///
/// A folded condition (`name__like__upper`) folds string inputs the same
/// way the rendered SQL folds the column, so both accept the same values.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    pub rule: Rule,
    pub fold: Option<CaseFold>,
}

impl FieldValidator {
    pub fn new(rule: Rule) -> Self {
        Self { rule, fold: None }
    }

    /// Build the validator for a condition.
    ///
    /// Returns `Ok(None)` when the condition compares against another field,
    /// which cannot be checked one value at a time.
    pub fn from_condition(cond: &Condition) -> CheckResult<Option<Self>> {
        let rule = match cond.operand()? {
            Operand::FieldRef(_) => return Ok(None),
            Operand::Range(Bound::Literal(low), Bound::Literal(high)) => {
                Rule::Range(low.clone(), high.clone())
            }
            Operand::Range(..) => return Ok(None),
            Operand::List(items) if cond.op == Operator::In => Rule::InList(items.to_vec()),
            Operand::List(items) => Rule::NotInList(items.to_vec()),
            Operand::Pattern(pattern) if cond.op == Operator::Like => {
                Rule::Like(like_regex(&pattern)?)
            }
            Operand::Pattern(pattern) => Rule::NotLike(like_regex(&pattern)?),
            Operand::Literal(v) => match cond.op {
                Operator::Gt => Rule::GreaterThan(v.clone()),
                Operator::Lt => Rule::LessThan(v.clone()),
                Operator::Gte => Rule::GreaterOrEqual(v.clone()),
                Operator::Lte => Rule::LessOrEqual(v.clone()),
                Operator::Neq => Rule::NotEqual(v.clone()),
                Operator::Eq => Rule::Equal(v.clone()),
                op => {
                    return Err(CheckError::syntax(format!(
                        "No validator for '{}' with a {}",
                        op,
                        v.kind()
                    )));
                }
            },
        };
        Ok(Some(Self {
            rule,
            fold: cond.fold,
        }))
    }

    /// Check a value, returning a message describing the failure.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let folded;
        let value = match (self.fold, value) {
            (Some(fold), Value::Str(s)) => {
                folded = Value::Str(fold_str(fold, s));
                &folded
            }
            _ => value,
        };

        let ok = match &self.rule {
            Rule::GreaterThan(limit) => compare(value, limit) == Some(Ordering::Greater),
            Rule::LessThan(limit) => compare(value, limit) == Some(Ordering::Less),
            Rule::GreaterOrEqual(limit) => matches!(
                compare(value, limit),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Rule::LessOrEqual(limit) => matches!(
                compare(value, limit),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Rule::NotEqual(limit) => compare(value, limit) != Some(Ordering::Equal),
            Rule::Equal(limit) => compare(value, limit) == Some(Ordering::Equal),
            Rule::InList(items) => contains(items, value),
            Rule::NotInList(items) => !contains(items, value),
            Rule::Range(low, high) => {
                matches!(
                    compare(value, low),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(
                    compare(value, high),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            Rule::Like(re) => matches!(value, Value::Str(s) if re.is_match(s)),
            Rule::NotLike(re) => !matches!(value, Value::Str(s) if re.is_match(s)),
        };

        if ok {
            Ok(())
        } else {
            Err(ValidationError {
                message: self.message(),
            })
        }
    }

    pub fn message(&self) -> String {
        match &self.rule {
            Rule::GreaterThan(v) => format!("Ensure this value is greater than {}.", v),
            Rule::LessThan(v) => format!("Ensure this value is less than {}.", v),
            Rule::GreaterOrEqual(v) => {
                format!("Ensure this value is greater than or equal to {}.", v)
            }
            Rule::LessOrEqual(v) => format!("Ensure this value is less than or equal to {}.", v),
            Rule::NotEqual(v) => format!("Ensure this value is not equal to {}.", v),
            Rule::Equal(v) => format!("Ensure this value is equal to {}.", v),
            Rule::InList(items) => {
                format!("Ensure this value is in {}.", Value::List(items.clone()))
            }
            Rule::NotInList(items) => {
                format!("Ensure this value is not in {}.", Value::List(items.clone()))
            }
            Rule::Range(low, high) => {
                format!("Ensure this value is in range {} to {}.", low, high)
            }
            Rule::Like(re) => format!("Ensure this value matches the pattern {}.", re.as_str()),
            Rule::NotLike(re) => {
                format!("Ensure this value does not match the pattern {}.", re.as_str())
            }
        }
    }
}

fn fold_str(fold: CaseFold, s: &str) -> String {
    match fold {
        CaseFold::Upper => s.to_uppercase(),
        CaseFold::Lower => s.to_lowercase(),
    }
}

/// Translate a rewritten `like` pattern into an anchored regex.
fn like_regex(pattern: &str) -> CheckResult<Regex> {
    let mut re = String::from("^");
    for c in pattern.chars() {
        match c {
            '%' => re.push_str(".*"),
            '_' => re.push('.'),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re)
        .map_err(|e| CheckError::syntax(format!("Invalid pattern '{}': {}", pattern, e)))
}

fn contains(items: &[Value], value: &Value) -> bool {
    items
        .iter()
        .any(|item| compare(value, item) == Some(Ordering::Equal))
}

/// Order two values of compatible kinds. Integers and floats compare numerically.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Int(x), Value::Float(y)) => (*x as f64).partial_cmp(y),
        (Value::Float(x), Value::Int(y)) => x.partial_cmp(&(*y as f64)),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
        (Value::DateTime(x), Value::DateTime(y)) => Some(x.cmp(y)),
        (Value::Time(x), Value::Time(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
