use super::require_at_least_two;
use crate::compiler::SqlCompiler;
use crate::dispatch::DialectRender;
use crate::expr::{EmptyResult, Expr};
use crate::func::{Func, RenderOptions};
use sqlfunc_core::{FieldType, Result, Value};

/// Return, from left to right, the first non-null expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Coalesce {
    func: Func,
}

impl Coalesce {
    /// Fails with `TooFewArguments` for fewer than two expressions.
    pub fn new(expressions: Vec<Expr>) -> Result<Self> {
        require_at_least_two(Self::NAME, &expressions)?;
        Ok(Self {
            func: Func::new("COALESCE", expressions),
        })
    }

    pub fn with_output_field(mut self, output_field: FieldType) -> Self {
        self.func.output_field = Some(output_field);
        self
    }

    pub fn source_expressions(&self) -> &[Expr] {
        self.func.source_expressions()
    }

    pub fn output_field(&self) -> Option<FieldType> {
        self.func.resolve_output_field()
    }

    /// The first source whose empty-result value is undetermined or non-null;
    /// `NULL` if every source is `NULL`.
    pub fn empty_result_set_value(&self) -> EmptyResult {
        for expr in self.func.source_expressions() {
            match expr.empty_result_set_value() {
                EmptyResult::Value(Value::Null) => {}
                result => return result,
            }
        }
        EmptyResult::Value(Value::Null)
    }
}

impl DialectRender for Coalesce {
    const NAME: &'static str = "Coalesce";

    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.func.render(compiler, RenderOptions::default())
    }

    fn as_oracle(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        // NCLOB and NVARCHAR2 cannot be mixed in one COALESCE.
        if self.output_field() == Some(FieldType::Text) {
            tracing::warn!(
                function = Self::NAME,
                "Converting every COALESCE argument to NCLOB on Oracle"
            );
            let wrapped = self
                .func
                .source_expressions()
                .iter()
                .map(|expr| Expr::from(Func::new("TO_NCLOB", vec![expr.clone()])))
                .collect();
            return self
                .func
                .with_source_expressions(wrapped)
                .render(compiler, RenderOptions::default());
        }
        self.as_sql(compiler)
    }
}
