//! Cross-dialect database functions.
//!
//! Each node wraps a [`Func`](crate::Func) holding its function name, template
//! and source expressions, validates its arguments on construction, and
//! implements [`DialectRender`](crate::DialectRender) for backends whose SQL
//! differs from the default.

mod cast;
mod coalesce;
mod collate;
mod greatest;
mod json_object;
mod json_remove;
mod json_set;
mod nullif;

pub use cast::Cast;
pub use coalesce::Coalesce;
pub use collate::Collate;
pub use greatest::{Greatest, Least};
pub use json_object::JsonObject;
pub use json_remove::JsonRemove;
pub use json_set::JsonSet;
pub use nullif::NullIf;

use crate::expr::Expr;
use crate::json_path::JsonPath;
use sqlfunc_core::{Error, Result, ValidationErrorKind};

fn require_at_least_two(function: &'static str, expressions: &[Expr]) -> Result<()> {
    if expressions.len() < 2 {
        return Err(Error::validation(
            function,
            ValidationErrorKind::TooFewArguments,
            format!("{function} must take at least two expressions"),
        ));
    }
    Ok(())
}

fn parse_path(function: &'static str, key: &str) -> Result<JsonPath> {
    JsonPath::parse(key).map_err(|mut err| {
        err.function = function;
        Error::Validation(err)
    })
}
