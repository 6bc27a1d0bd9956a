//! Lookup key parser using nom.
//!
//! # Syntax Overview
//!
//! ```text
//! name__like__upper
//! ─┬── ─┬── ──┬──
//!  │    │     └── Case fold (optional: upper, lower)
//!  │    └── Operator suffix (gte, lte, in, between, ...)
//!  └── Field name
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    combinator::{opt, rest},
    sequence::preceded,
    IResult,
};

use crate::ast::{CaseFold, Condition, Operator, Value};
use crate::error::{CheckError, CheckResult};

/// Separator between the parts of a lookup key.
pub const SEPARATOR: &str = "__";

/// A lookup key split into its raw tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupKey<'a> {
    pub field: &'a str,
    pub suffix: &'a str,
    pub fold: Option<&'a str>,
}

/// Parse a lookup key and its value into a condition.
pub fn parse_lookup(key: &str, value: Value) -> CheckResult<Condition> {
    let lookup = parse_key(key)?;

    let op = Operator::from_suffix(lookup.suffix)
        .ok_or_else(|| CheckError::LookupNotFound(lookup.suffix.to_string()))?;

    let fold = match lookup.fold {
        None => None,
        Some(token) => Some(CaseFold::from_token(token).ok_or_else(|| {
            CheckError::syntax(format!(
                "Was expecting 'upper' or 'lower' in '{}', got '{}'",
                key, token
            ))
        })?),
    };

    if op == Operator::Between {
        if let Value::List(items) = &value {
            if items.len() != 2 {
                return Err(CheckError::syntax(format!(
                    "'between' data for '{}' must have a length of two",
                    key
                )));
            }
        }
    }

    tracing::debug!(field = lookup.field, op = %op, "parsed lookup '{}'", key);

    Ok(Condition {
        field: lookup.field.to_string(),
        op,
        value,
        fold,
        connector: Default::default(),
    })
}

/// Split a lookup key into field, operator suffix and optional fold token.
pub fn parse_key(key: &str) -> CheckResult<LookupKey<'_>> {
    match lookup_key(key) {
        Ok(("", lookup)) if !lookup.field.is_empty() && !lookup.suffix.is_empty() => Ok(lookup),
        Ok((_, lookup)) if lookup.field.is_empty() || lookup.suffix.is_empty() => Err(
            CheckError::syntax(format!("Lookup '{}' needs a field and an operator", key)),
        ),
        Ok((remaining, _)) => Err(CheckError::syntax(format!(
            "Unexpected trailing content in '{}': '{}'",
            key, remaining
        ))),
        Err(_) => Err(CheckError::syntax(format!(
            "Invalid syntax in '{}'. Lookups must contain \"{}\"",
            key, SEPARATOR
        ))),
    }
}

fn lookup_key(input: &str) -> IResult<&str, LookupKey<'_>> {
    let (input, field) = take_until(SEPARATOR)(input)?;
    let (input, _) = tag(SEPARATOR)(input)?;
    let (input, suffix) = alt((take_until(SEPARATOR), rest))(input)?;
    let (input, fold) = opt(preceded(tag(SEPARATOR), rest))(input)?;

    Ok((input, LookupKey { field, suffix, fold }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_key() {
        let key = parse_key("price__gte").unwrap();
        assert_eq!(key.field, "price");
        assert_eq!(key.suffix, "gte");
        assert_eq!(key.fold, None);
    }

    #[test]
    fn test_underscored_names() {
        let key = parse_key("tax_percent__not_in").unwrap();
        assert_eq!(key.field, "tax_percent");
        assert_eq!(key.suffix, "not_in");
    }

    #[test]
    fn test_fold_token() {
        let key = parse_key("name__like__upper").unwrap();
        assert_eq!(key.fold, Some("upper"));

        let cond = parse_lookup("name__like__lower", "thej%".into()).unwrap();
        assert_eq!(cond.fold, Some(CaseFold::Lower));
    }

    #[test]
    fn test_missing_separator() {
        let err = parse_key("price_gte").unwrap_err();
        assert!(matches!(err, CheckError::Syntax(_)));
    }

    #[test]
    fn test_empty_parts() {
        assert!(matches!(parse_key("__gte"), Err(CheckError::Syntax(_))));
        assert!(matches!(parse_key("price__"), Err(CheckError::Syntax(_))));
    }

    #[test]
    fn test_bad_fold_token() {
        let err = parse_lookup("name__like__title", "x".into()).unwrap_err();
        assert!(matches!(err, CheckError::Syntax(_)));

        let err = parse_lookup("name__like__upper__lower", "x".into()).unwrap_err();
        assert!(matches!(err, CheckError::Syntax(_)));
    }

    #[test]
    fn test_unknown_suffix() {
        let err = parse_lookup("price__gre", 10.into()).unwrap_err();
        assert!(matches!(err, CheckError::LookupNotFound(ref s) if s == "gre"));
    }

    #[test]
    fn test_between_length() {
        let err = parse_lookup("discount__between", vec![10, 20, 30].into()).unwrap_err();
        assert!(matches!(err, CheckError::Syntax(_)));

        let cond = parse_lookup("discount__between", vec![10, 20].into()).unwrap();
        assert_eq!(cond.op, Operator::Between);
    }
}
