use crate::compiler::SqlCompiler;
use crate::dispatch::DialectRender;
use crate::expr::Expr;
use crate::func::{Func, RenderOptions};
use sqlfunc_core::{FieldType, Result};

const TEMPLATE: &str = "{function}({expressions} AS {db_type})";

/// Coerce an expression to a new field type.
///
/// Renders `CAST(<expr> AS <db_type>)` where `db_type` is the backend's cast
/// type name for the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    func: Func,
    target: FieldType,
}

impl Cast {
    pub fn new(expression: impl Into<Expr>, output_field: FieldType) -> Self {
        Self {
            func: Func::new("CAST", vec![expression.into()])
                .with_template(TEMPLATE)
                .with_output_field(output_field.clone()),
            target: output_field,
        }
    }

    /// The expression being cast.
    pub fn expression(&self) -> &Expr {
        &self.func.source_expressions[0]
    }

    pub fn target(&self) -> &FieldType {
        &self.target
    }

    pub fn output_field(&self) -> Option<FieldType> {
        Some(self.target.clone())
    }

    fn render_with(&self, compiler: &mut SqlCompiler<'_>, template: Option<&str>) -> Result<String> {
        let db_type = self.target.cast_db_type(compiler.vendor());
        let mut options = RenderOptions::new().extra("db_type", db_type);
        options.template = template;
        self.func.render(compiler, options)
    }
}

impl DialectRender for Cast {
    const NAME: &'static str = "Cast";

    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.render_with(compiler, None)
    }

    fn as_sqlite(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        if !self.target.is_temporal() {
            return self.as_sql(compiler);
        }
        // datetime() and time() drop fractional seconds.
        let format = match self.target {
            FieldType::Date => return self.render_with(compiler, Some("date({expressions})")),
            FieldType::Time => "%H:%M:%f",
            _ => "%Y-%m-%d %H:%M:%f",
        };
        Func::new("strftime", vec![Expr::lit(format), self.expression().clone()])
            .render(compiler, RenderOptions::default())
    }

    fn as_postgresql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        // The inner expression may be compound, so it is always parenthesized.
        self.render_with(compiler, Some("({expressions})::{db_type}"))
    }

    fn as_mysql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        match self.target {
            FieldType::Float => self.render_with(compiler, Some("({expressions} + 0.0)")),
            FieldType::Json if compiler.features().is_mariadb => {
                tracing::warn!(
                    function = Self::NAME,
                    "MariaDB has no JSON cast, extracting the document root instead"
                );
                self.render_with(compiler, Some("JSON_EXTRACT({expressions}, '$')"))
            }
            _ => self.as_sql(compiler),
        }
    }

    fn as_oracle(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        if self.target == FieldType::Json {
            return self.render_with(compiler, Some("JSON_QUERY({expressions}, '$')"));
        }
        self.as_sql(compiler)
    }
}
