//! `GREATEST` and `LEAST`.
//!
//! NULL handling differs by backend and is left as is: PostgreSQL ignores
//! NULL arguments, while MySQL, Oracle and SQLite return NULL if any argument
//! is NULL.

use super::require_at_least_two;
use crate::compiler::SqlCompiler;
use crate::dispatch::DialectRender;
use crate::expr::Expr;
use crate::func::{Func, RenderOptions};
use sqlfunc_core::{FieldType, Result};

/// Return the maximum expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Greatest {
    func: Func,
}

impl Greatest {
    /// Fails with `TooFewArguments` for fewer than two expressions.
    pub fn new(expressions: Vec<Expr>) -> Result<Self> {
        require_at_least_two(Self::NAME, &expressions)?;
        Ok(Self {
            func: Func::new("GREATEST", expressions),
        })
    }

    pub fn output_field(&self) -> Option<FieldType> {
        self.func.resolve_output_field()
    }
}

impl DialectRender for Greatest {
    const NAME: &'static str = "Greatest";

    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.func.render(compiler, RenderOptions::default())
    }

    /// SQLite's multi-argument `MAX`.
    fn as_sqlite(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.func.render(compiler, RenderOptions::new().function("MAX"))
    }
}

/// Return the minimum expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Least {
    func: Func,
}

impl Least {
    /// Fails with `TooFewArguments` for fewer than two expressions.
    pub fn new(expressions: Vec<Expr>) -> Result<Self> {
        require_at_least_two(Self::NAME, &expressions)?;
        Ok(Self {
            func: Func::new("LEAST", expressions),
        })
    }

    pub fn output_field(&self) -> Option<FieldType> {
        self.func.resolve_output_field()
    }
}

impl DialectRender for Least {
    const NAME: &'static str = "Least";

    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.func.render(compiler, RenderOptions::default())
    }

    /// SQLite's multi-argument `MIN`.
    fn as_sqlite(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.func.render(compiler, RenderOptions::new().function("MIN"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use sqlfunc_core::{ConnectionInfo, Error, Value, ValidationErrorKind};

    fn args() -> Vec<Expr> {
        vec![Expr::col("a"), Expr::lit(3), Expr::col("b")]
    }

    #[test]
    fn test_greatest_per_vendor() {
        let expr: Expr = Greatest::new(args()).unwrap().into();
        let sqlite = compile(&expr, &ConnectionInfo::sqlite()).unwrap();
        assert_eq!(sqlite.sql, "MAX(\"a\", ?1, \"b\")");
        assert_eq!(sqlite.params, vec![Value::Int(3)]);

        let pg = compile(&expr, &ConnectionInfo::postgres()).unwrap();
        assert_eq!(pg.sql, "GREATEST(\"a\", $1, \"b\")");

        let mysql = compile(&expr, &ConnectionInfo::mysql()).unwrap();
        assert_eq!(mysql.sql, "GREATEST(`a`, ?, `b`)");
    }

    #[test]
    fn test_least_per_vendor() {
        let expr: Expr = Least::new(args()).unwrap().into();
        assert_eq!(
            compile(&expr, &ConnectionInfo::sqlite()).unwrap().sql,
            "MIN(\"a\", ?1, \"b\")"
        );
        assert_eq!(
            compile(&expr, &ConnectionInfo::oracle()).unwrap().sql,
            "LEAST(\"A\", :1, \"B\")"
        );
    }

    #[test]
    fn test_require_two_expressions() {
        for err in [
            Greatest::new(vec![Expr::col("a")]).unwrap_err(),
            Least::new(vec![Expr::col("a")]).unwrap_err(),
        ] {
            match err {
                Error::Validation(v) => assert_eq!(v.kind, ValidationErrorKind::TooFewArguments),
                other => panic!("unexpected error: {other}"),
            }
        }
        let err = Least::new(Vec::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Least: Least must take at least two expressions"
        );
    }

    #[test]
    fn test_output_field_from_sources() {
        let greatest = Greatest::new(vec![Expr::lit(1), Expr::lit(2)]).unwrap();
        assert_eq!(greatest.output_field(), Some(FieldType::Integer));
    }
}
