use crate::compiler::SqlCompiler;
use crate::dispatch::DialectRender;
use crate::expr::Expr;
use crate::func::{Func, RenderOptions};
use sqlfunc_core::{Error, FieldType, Result, ValidationErrorKind};

/// `NULLIF(a, b)`: NULL when both are equal, else `a`.
#[derive(Debug, Clone, PartialEq)]
pub struct NullIf {
    func: Func,
}

impl NullIf {
    pub fn new(expression1: impl Into<Expr>, expression2: impl Into<Expr>) -> Self {
        Self {
            func: Func::new("NULLIF", vec![expression1.into(), expression2.into()]),
        }
    }

    /// Build from a list that must hold exactly two expressions.
    pub fn from_expressions(expressions: Vec<Expr>) -> Result<Self> {
        if expressions.len() != 2 {
            return Err(Error::validation(
                Self::NAME,
                ValidationErrorKind::WrongArity,
                format!(
                    "NullIf takes exactly 2 arguments ({} given)",
                    expressions.len()
                ),
            ));
        }
        Ok(Self {
            func: Func::new("NULLIF", expressions),
        })
    }

    pub fn output_field(&self) -> Option<FieldType> {
        self.func.resolve_output_field()
    }
}

impl DialectRender for NullIf {
    const NAME: &'static str = "NullIf";

    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.func.render(compiler, RenderOptions::default())
    }

    fn as_oracle(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        if self.func.source_expressions()[0].is_null_literal() {
            return Err(Error::validation(
                Self::NAME,
                ValidationErrorKind::NullArgument,
                "Oracle does not allow a NULL literal as the first expression.",
            ));
        }
        self.as_sql(compiler)
    }
}
