//! Core rendering tests.

use pretty_assertions::assert_eq;

use crate::check::Check;
use crate::error::CheckError;
use crate::transpiler::ToSql;

#[test]
fn test_single_condition() {
    let check = Check::lookup("price__gte", 10).unwrap().named("check_price");
    assert_eq!(
        check.render("postgresql", false).unwrap(),
        "CONSTRAINT \"check_price\" CHECK ( \"price\" >= 10 )"
    );
    assert_eq!(
        check.render("sqlite3", false).unwrap(),
        "CONSTRAINT \"check_price\" CHECK ( \"price\" >= 10 )"
    );
}

#[test]
fn test_like_with_case_fold() {
    let mut check = Check::lookup("name__like__upper", "THEJ%")
        .unwrap()
        .named("check_name");
    check.validate(&["name", "age"]).unwrap();
    assert_eq!(
        check.render("postgresql", false).unwrap(),
        "CONSTRAINT \"check_name\" CHECK ( UPPER(\"name\") like 'THEJ%' )"
    );
}

#[test]
fn test_cascade_keeps_each_fold() {
    let mut check = Check::lookup("name__like__upper", "THEJ%").unwrap()
        & Check::lookup("gender__in__lower", ("male", "female")).unwrap();
    check.set_name("check_folds");
    check.validate(&["name", "gender"]).unwrap();
    assert_eq!(
        check.render("postgresql", false).unwrap(),
        "CONSTRAINT \"check_folds\" CHECK ( ( UPPER(\"name\") like 'THEJ%' ) AND ( LOWER(\"gender\") in ( 'male', 'female' ) ) )"
    );
}

#[test]
fn test_non_finite_float_fails_render() {
    let check = Check::lookup("price__lt", f64::NAN).unwrap().named("check_price");
    assert!(matches!(
        check.render("postgresql", false),
        Err(CheckError::Syntax(_))
    ));

    let check = Check::lookup("gender__in", Vec::<i32>::new()).unwrap();
    assert!(matches!(check.render("sqlite3", false), Err(CheckError::Syntax(_))));
}

#[test]
fn test_like_wildcards() {
    let check = Check::lookup("name__like", "Th*j.").unwrap().named("check_name");
    assert_eq!(
        check.render("sqlite3", false).unwrap(),
        "CONSTRAINT \"check_name\" CHECK ( \"name\" like 'Th%j_' )"
    );

    let check = Check::lookup("name__unlike__lower", "admin*")
        .unwrap()
        .named("check_name");
    assert_eq!(
        check.render("sqlite3", false).unwrap(),
        "CONSTRAINT \"check_name\" CHECK ( LOWER(\"name\") not like 'admin%' )"
    );
}

#[test]
fn test_between() {
    let check = Check::lookup("discount__between", vec![10, 20])
        .unwrap()
        .named("check_discount");
    assert_eq!(
        check.render("postgresql", false).unwrap(),
        "CONSTRAINT \"check_discount\" CHECK ( \"discount\" between 10 AND 20 )"
    );
}

#[test]
fn test_between_field_bound() {
    let check = Check::lookup("discount__between", (0, "price"))
        .unwrap()
        .named("check_discount");
    assert_eq!(
        check.render("postgresql", false).unwrap(),
        "CONSTRAINT \"check_discount\" CHECK ( \"discount\" between 0 AND price )"
    );
}

#[test]
fn test_in_list() {
    let check = Check::lookup("gender__in", ("Male", "Female"))
        .unwrap()
        .named("check_gender");
    assert_eq!(
        check.render("postgresql", false).unwrap(),
        "CONSTRAINT \"check_gender\" CHECK ( \"gender\" in ( 'Male', 'Female' ) )"
    );
}

#[test]
fn test_not_in_list_quotes() {
    let check = Check::lookup("name__not_in", vec!["O'Brien", "Smith"])
        .unwrap()
        .named("check_name");
    assert_eq!(
        check.render("sqlite3", false).unwrap(),
        "CONSTRAINT \"check_name\" CHECK ( \"name\" not in ( 'O''Brien', 'Smith' ) )"
    );

    let check = Check::lookup("age__not_in", [13, 17]).unwrap().named("check_age");
    assert_eq!(
        check.render("sqlite3", false).unwrap(),
        "CONSTRAINT \"check_age\" CHECK ( \"age\" not in ( 13, 17 ) )"
    );
}

#[test]
fn test_combined_checks() {
    let check = (Check::lookup("price__gte", 0).unwrap()
        & Check::lookup("price__gte", "discount").unwrap()
        | Check::lookup("price__lte", 100).unwrap())
    .named("check_name_price");
    assert_eq!(
        check.render("postgresql", false).unwrap(),
        "CONSTRAINT \"check_name_price\" CHECK ( ( \"price\" >= 0 ) AND ( \"price\" >= discount ) OR ( \"price\" <= 100 ) )"
    );
}

#[test]
fn test_connectors_follow_written_order() {
    let or_then_and = (Check::lookup("age__gte", 18).unwrap()
        | Check::lookup("age__lte", 12).unwrap()
        & Check::lookup("gender__eq", "gender").unwrap())
    .named("check_age");
    // `&` binds tighter in Rust, so build the left-to-right order explicitly.
    let mut left_to_right = Check::lookup("age__gte", 18).unwrap().named("check_age");
    left_to_right
        .combine_or(Check::lookup("age__lte", 12).unwrap())
        .combine_and(Check::lookup("gender__eq", "gender").unwrap());

    assert_eq!(
        left_to_right.render("sqlite3", false).unwrap(),
        "CONSTRAINT \"check_age\" CHECK ( ( \"age\" >= 18 ) OR ( \"age\" <= 12 ) AND ( \"gender\" = gender ) )"
    );
    assert_eq!(
        or_then_and.render("sqlite3", false).unwrap(),
        "CONSTRAINT \"check_age\" CHECK ( ( \"age\" >= 18 ) OR ( \"age\" <= 12 ) AND ( \"gender\" = gender ) )"
    );
}

#[test]
fn test_multiple_lookups_in_one_call() {
    let check = Check::new([("price__gte", 0), ("price__lte", 100)])
        .unwrap()
        .named("check_price");
    assert_eq!(
        check.render("postgresql", false).unwrap(),
        "CONSTRAINT \"check_price\" CHECK ( ( \"price\" >= 0 ) AND ( \"price\" <= 100 ) )"
    );
}

#[test]
fn test_validate_is_idempotent() {
    let mut check = (Check::lookup("price__gte", "discount").unwrap()
        & Check::lookup("name__like", "a*").unwrap())
    .named("check_twice");
    check.validate(&["price", "discount", "name"]).unwrap();
    let first = check.render("postgresql", false).unwrap();
    check.validate(&["price", "discount", "name"]).unwrap();
    assert_eq!(check.render("postgresql", false).unwrap(), first);
}

#[test]
fn test_render_does_not_mutate() {
    let check = Check::lookup("price__neq", 0).unwrap().named("check_price");
    let before = check.clone();
    let sql = check.to_sql("postgresql", false).unwrap();
    assert_eq!(sql, "CONSTRAINT \"check_price\" CHECK ( \"price\" <> 0 )");
    assert_eq!(check, before);
}

#[test]
fn test_empty_check() {
    let check = Check::default().named("check_empty");
    assert_eq!(
        check.render("sqlite3", false).unwrap(),
        "CONSTRAINT \"check_empty\" CHECK ( )"
    );
}

#[test]
fn test_unsupported_engine() {
    let check = Check::lookup("price__gte", 10).unwrap();
    let err = check.render("mysql", false).unwrap_err();
    assert!(matches!(err, CheckError::UnsupportedEngine(ref e) if e == "mysql"));
}

#[test]
fn test_shape_mismatch_on_render() {
    let check = Check::lookup("gender__in", "Male").unwrap();
    assert!(matches!(
        check.render("postgresql", false),
        Err(CheckError::Syntax(_))
    ));
}
