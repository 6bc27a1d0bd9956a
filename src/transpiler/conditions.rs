//! Condition-level SQL: field references and literal text.

use crate::ast::{Bound, Condition, Operand, Value};
use crate::error::CheckResult;
use crate::transpiler::traits::SqlGenerator;

/// Render a single condition as `( "field" op literal )`.
pub trait ConditionToSql {
    fn to_sql(&self, generator: &dyn SqlGenerator) -> CheckResult<String>;
}

impl ConditionToSql for Condition {
    fn to_sql(&self, generator: &dyn SqlGenerator) -> CheckResult<String> {
        let column = generator.quote_identifier(&self.field);
        let left = match self.fold {
            Some(fold) => format!("{}({})", fold.sql_function(), column),
            None => column,
        };
        let right = operand_sql(&self.operand()?, generator);
        Ok(format!("( {} {} {} )", left, self.op, right))
    }
}

/// SQL text for the right-hand side of a comparison.
pub fn operand_sql(operand: &Operand<'_>, generator: &dyn SqlGenerator) -> String {
    match operand {
        Operand::Literal(value) => value_literal(value, generator),
        Operand::Pattern(pattern) => generator.string_literal(pattern),
        Operand::FieldRef(field) => field.to_string(),
        Operand::List(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|v| value_literal(v, generator))
                .collect();
            format!("( {} )", parts.join(", "))
        }
        Operand::Range(low, high) => format!(
            "{} AND {}",
            bound_sql(low, generator),
            bound_sql(high, generator)
        ),
    }
}

fn bound_sql(bound: &Bound<'_>, generator: &dyn SqlGenerator) -> String {
    match bound {
        Bound::Literal(value) => value_literal(value, generator),
        Bound::FieldRef(field) => field.to_string(),
    }
}

/// Literal text for a single value. Strings here are data, not field references.
pub fn value_literal(value: &Value, generator: &dyn SqlGenerator) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Float(n) => format!("{:?}", n),
        Value::Bool(b) => generator.bool_literal(*b),
        Value::Str(s) => generator.string_literal(s),
        Value::Date(d) => generator.date_literal(d),
        Value::DateTime(dt) => generator.datetime_literal(dt),
        Value::Time(t) => generator.time_literal(t),
        Value::List(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|v| value_literal(v, generator))
                .collect();
            format!("( {} )", parts.join(", "))
        }
    }
}
