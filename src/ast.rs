//! Condition AST: operators, values and the (field, op, value, connector)
//! triples a check is made of.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CheckError, CheckResult};

/// Comparison operator selected by a lookup suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Gte,
    Lte,
    Gt,
    Lt,
    Neq,
    Eq,
    In,
    NotIn,
    Like,
    Unlike,
    Between,
}

/// Lookup suffix table. Each suffix maps to exactly one operator.
pub const LOOKUP_TABLE: &[(&str, Operator)] = &[
    ("gte", Operator::Gte),
    ("lte", Operator::Lte),
    ("gt", Operator::Gt),
    ("lt", Operator::Lt),
    ("neq", Operator::Neq),
    ("eq", Operator::Eq),
    ("in", Operator::In),
    ("not_in", Operator::NotIn),
    ("like", Operator::Like),
    ("unlike", Operator::Unlike),
    ("between", Operator::Between),
];

impl Operator {
    /// Resolve a lookup suffix such as `gte` or `not_in`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        LOOKUP_TABLE
            .iter()
            .find(|(s, _)| *s == suffix)
            .map(|(_, op)| *op)
    }

    /// The SQL spelling of the operator.
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Neq => "<>",
            Operator::Eq => "=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Like => "like",
            Operator::Unlike => "not like",
            Operator::Between => "between",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Operator::Like | Operator::Unlike)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql_symbol())
    }
}

/// Case-folding function wrapped around the field reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseFold {
    Upper,
    Lower,
}

impl CaseFold {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "upper" => Some(CaseFold::Upper),
            "lower" => Some(CaseFold::Lower),
            _ => None,
        }
    }

    pub fn sql_function(&self) -> &'static str {
        match self {
            CaseFold::Upper => "UPPER",
            CaseFold::Lower => "LOWER",
        }
    }
}

/// Boolean connector between a condition and the one after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Connector {
    #[default]
    None,
    And,
    Or,
}

impl Connector {
    pub fn sql_keyword(&self) -> Option<&'static str> {
        match self {
            Connector::None => None,
            Connector::And => Some("AND"),
            Connector::Or => Some("OR"),
        }
    }
}

/// A raw lookup value, before it is turned into SQL literal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A field reference, or a pattern under `like`/`unlike`.
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    /// A sequence for `in`/`not_in`, or a pair for `between`.
    List(Vec<Value>),
}

impl Value {
    /// Short shape name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Time(_) => "time",
            Value::List(_) => "sequence",
        }
    }

    fn is_temporal(&self) -> bool {
        matches!(self, Value::Date(_) | Value::DateTime(_) | Value::Time(_))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:?}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(n as i64)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((low, high): (A, B)) -> Self {
        Value::List(vec![low.into(), high.into()])
    }
}

/// One comparison inside a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub op: Operator,
    pub value: Value,
    pub fold: Option<CaseFold>,
    /// Connector to the next condition; `None` on the last one.
    pub connector: Connector,
}

/// A condition's value classified by the shape its operator expects.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    /// Number, boolean or date/time literal.
    Literal(&'a Value),
    /// A `like` pattern with `*`/`.` already rewritten to `%`/`_`.
    Pattern(String),
    /// Another column of the same model, rendered unquoted.
    FieldRef(&'a str),
    /// Members of an `in`/`not in` list.
    List(&'a [Value]),
    /// Bounds of a `between` range.
    Range(Bound<'a>, Bound<'a>),
}

/// One side of a `between` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound<'a> {
    Literal(&'a Value),
    FieldRef(&'a str),
}

impl Condition {
    pub fn new(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
            fold: None,
            connector: Connector::None,
        }
    }

    /// Wrap the field in a case-folding function.
    pub fn fold(mut self, fold: CaseFold) -> Self {
        self.fold = Some(fold);
        self
    }

    /// Classify the value against the operator.
    pub fn operand(&self) -> CheckResult<Operand<'_>> {
        match (&self.value, self.op) {
            (Value::List(items), op) if op.is_list() => {
                if items.is_empty() {
                    return Err(CheckError::syntax(format!(
                        "'{}' on field '{}' needs at least one value",
                        op, self.field
                    )));
                }
                if let Some(bad) = items.iter().find(|v| matches!(v, Value::List(_))) {
                    return Err(CheckError::syntax(format!(
                        "'{}' list for field '{}' cannot contain a {}",
                        op, self.field, bad.kind()
                    )));
                }
                for item in items {
                    self.finite(item)?;
                }
                Ok(Operand::List(items))
            }
            (Value::List(items), Operator::Between) => {
                if items.len() != 2 {
                    return Err(CheckError::syntax(format!(
                        "'between' for field '{}' needs exactly two values, got {}",
                        self.field,
                        items.len()
                    )));
                }
                Ok(Operand::Range(
                    self.bound(&items[0])?,
                    self.bound(&items[1])?,
                ))
            }
            (Value::List(_), op) => Err(CheckError::syntax(format!(
                "Was expecting an 'in', 'not in' or 'between' lookup for the sequence on '{}', got '{}'",
                self.field, op
            ))),
            (value, op) if op.is_list() || op == Operator::Between => {
                Err(CheckError::syntax(format!(
                    "'{}' on field '{}' needs a sequence, got a {}",
                    op,
                    self.field,
                    value.kind()
                )))
            }
            (Value::Str(s), op) if op.is_pattern() => {
                Ok(Operand::Pattern(s.replace('*', "%").replace('.', "_")))
            }
            (value, op) if op.is_pattern() => Err(CheckError::syntax(format!(
                "'{}' on field '{}' needs a string pattern, got a {}",
                op,
                self.field,
                value.kind()
            ))),
            (Value::Str(s), _) => Ok(Operand::FieldRef(s)),
            (value, _) => {
                self.finite(value)?;
                Ok(Operand::Literal(value))
            }
        }
    }

    /// NaN and infinities have no SQL literal.
    fn finite(&self, value: &Value) -> CheckResult<()> {
        match value {
            Value::Float(f) if !f.is_finite() => Err(CheckError::syntax(format!(
                "Field '{}' cannot be compared with the non-finite number {}",
                self.field, f
            ))),
            _ => Ok(()),
        }
    }

    fn bound<'a>(&self, value: &'a Value) -> CheckResult<Bound<'a>> {
        match value {
            Value::Str(s) => Ok(Bound::FieldRef(s)),
            Value::Int(_) | Value::Float(_) => {
                self.finite(value)?;
                Ok(Bound::Literal(value))
            }
            v if v.is_temporal() => Ok(Bound::Literal(value)),
            other => Err(CheckError::syntax(format!(
                "'between' on field '{}' does not support a {} bound",
                self.field,
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table_is_one_to_one() {
        for (suffix, op) in LOOKUP_TABLE {
            assert_eq!(Operator::from_suffix(suffix), Some(*op));
        }
        assert_eq!(Operator::from_suffix("gre"), None);
        assert_eq!(Operator::NotIn.sql_symbol(), "not in");
        assert_eq!(Operator::Unlike.sql_symbol(), "not like");
    }

    #[test]
    fn test_pattern_rewrite() {
        let cond = Condition::new("name", Operator::Like, "Th*j.");
        assert_eq!(cond.operand().unwrap(), Operand::Pattern("Th%j_".to_string()));
    }

    #[test]
    fn test_string_is_field_reference() {
        let cond = Condition::new("price", Operator::Gte, "discount");
        assert_eq!(cond.operand().unwrap(), Operand::FieldRef("discount"));
    }

    #[test]
    fn test_shape_mismatch() {
        let cond = Condition::new("gender", Operator::In, "Male");
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));

        let cond = Condition::new("price", Operator::Gte, vec![1, 2]);
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));

        let cond = Condition::new("name", Operator::Like, 5);
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));

        let cond = Condition::new("discount", Operator::Between, vec![1, 2, 3]);
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));

        let cond = Condition::new("discount", Operator::Between, (true, 3));
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));
    }

    #[test]
    fn test_non_finite_float() {
        let cond = Condition::new("price", Operator::Lt, f64::NAN);
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));

        let cond = Condition::new("price", Operator::Gte, f64::INFINITY);
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));

        let cond = Condition::new("price", Operator::In, vec![1.5, f64::NEG_INFINITY]);
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));

        let cond = Condition::new("price", Operator::Between, (0.0, f64::NAN));
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));

        let cond = Condition::new("price", Operator::Lt, 99.5);
        assert_eq!(cond.operand().unwrap(), Operand::Literal(&Value::Float(99.5)));
    }

    #[test]
    fn test_empty_list() {
        let cond = Condition::new("gender", Operator::In, Vec::<i32>::new());
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));

        let cond = Condition::new("age", Operator::NotIn, Vec::<i32>::new());
        assert!(matches!(cond.operand(), Err(CheckError::Syntax(_))));
    }

    #[test]
    fn test_between_bounds() {
        let cond = Condition::new("discount", Operator::Between, (10, "price"));
        assert_eq!(
            cond.operand().unwrap(),
            Operand::Range(Bound::Literal(&Value::Int(10)), Bound::FieldRef("price"))
        );
    }
}
