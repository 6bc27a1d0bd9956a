//! # check-constraints
//!
//! Declarative SQL `CHECK` constraints for model definitions.
//!
//! Conditions are written as lookups, `field__operator[__casefold]`, checked
//! against the model's fields, and rendered for PostgreSQL, SQLite or Oracle.
//!
//! ## Quick Example
//!
//! ```
//! use check_constraints::prelude::*;
//!
//! let mut check = Check::lookup("price__gte", 0)?
//!     & Check::lookup("price__gte", "discount")?
//!     | Check::lookup("price__lte", 100)?;
//! check.set_name("check_name_price");
//! check.validate(&["price", "discount"])?;
//!
//! assert_eq!(
//!     check.render("postgresql", false)?,
//!     "CONSTRAINT \"check_name_price\" CHECK ( ( \"price\" >= 0 ) AND ( \"price\" >= discount ) OR ( \"price\" <= 100 ) )"
//! );
//! # Ok::<(), check_constraints::CheckError>(())
//! ```
//!
//! ## Lookups
//!
//! | Suffix    | SQL        | Value                        |
//! |-----------|------------|------------------------------|
//! | `gte`     | `>=`       | literal or field name        |
//! | `lte`     | `<=`       | literal or field name        |
//! | `gt`      | `>`        | literal or field name        |
//! | `lt`      | `<`        | literal or field name        |
//! | `neq`     | `<>`       | literal or field name        |
//! | `eq`      | `=`        | literal or field name        |
//! | `in`      | `in`       | sequence                     |
//! | `not_in`  | `not in`   | sequence                     |
//! | `like`    | `like`     | pattern (`*` any, `.` one)   |
//! | `unlike`  | `not like` | pattern                      |
//! | `between` | `between`  | two bounds                   |
//!
//! A bare string under a comparison is another column of the same model.

pub mod ast;
pub mod check;
pub mod engine;
pub mod error;
pub mod parser;
pub mod schema;
pub mod transpiler;
pub mod validator;

pub use check::Check;
pub use error::{CheckError, CheckResult};

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::check::Check;
    pub use crate::engine::Connection;
    pub use crate::error::*;
    pub use crate::schema::{Field, FieldKind, FieldSet, Model};
    pub use crate::transpiler::{Dialect, ToSql};
    pub use crate::validator::{FieldValidator, Rule, ValidationError};
}
