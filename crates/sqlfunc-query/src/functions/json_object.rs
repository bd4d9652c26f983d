use super::Cast;
use crate::compiler::SqlCompiler;
use crate::dispatch::DialectRender;
use crate::expr::Expr;
use crate::func::{ArgJoiner, Func, RenderOptions};
use sqlfunc_core::{Error, FieldType, NotSupportedKind, Result, Value};

/// Build a JSON object from key/value pairs.
///
/// Keys become bound text parameters; the sources are stored interleaved as
/// `[key1, value1, key2, value2, ...]` in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject {
    func: Func,
}

impl JsonObject {
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, Expr)>) -> Self {
        let mut expressions = Vec::new();
        for (key, value) in fields {
            expressions.push(Expr::Literal(Value::Text(key.into())));
            expressions.push(value);
        }
        Self {
            func: Func::new("JSON_OBJECT", expressions).with_output_field(FieldType::Json),
        }
    }

    pub fn source_expressions(&self) -> &[Expr] {
        self.func.source_expressions()
    }

    pub fn output_field(&self) -> Option<FieldType> {
        Some(FieldType::Json)
    }

    fn check_supported(compiler: &SqlCompiler<'_>) -> Result<()> {
        if !compiler.features().has_json_object_function {
            return Err(Error::not_supported(
                Self::NAME,
                compiler.vendor(),
                NotSupportedKind::MissingFeature,
                "JSONObject() is not supported on this database backend.",
            ));
        }
        Ok(())
    }

    /// SQL/JSON constructor: `JSON_OBJECT(k VALUE v, ... RETURNING <type>)`.
    fn as_native(&self, compiler: &mut SqlCompiler<'_>, returning: &str) -> Result<String> {
        let template = if self.func.source_expressions().is_empty() {
            format!("{{function}}(RETURNING {returning})")
        } else {
            format!("{{function}}({{expressions}} RETURNING {returning})")
        };
        self.func.render(
            compiler,
            RenderOptions::new()
                .arg_joiner(ArgJoiner::KeyValue)
                .template(&template),
        )
    }
}

impl DialectRender for JsonObject {
    const NAME: &'static str = "JSONObject";

    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        Self::check_supported(compiler)?;
        self.func.render(compiler, RenderOptions::default())
    }

    fn as_postgresql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        Self::check_supported(compiler)?;
        let features = compiler.features();
        if !features.is_postgresql_16 || features.uses_server_side_binding {
            tracing::warn!(
                function = Self::NAME,
                is_postgresql_16 = features.is_postgresql_16,
                uses_server_side_binding = features.uses_server_side_binding,
                "Falling back to JSONB_BUILD_OBJECT"
            );
            // Untyped key parameters need an explicit type.
            let keys_as_text = self
                .func
                .source_expressions()
                .iter()
                .enumerate()
                .map(|(index, expr)| {
                    if index % 2 == 0 {
                        Expr::from(Cast::new(expr.clone(), FieldType::Text))
                    } else {
                        expr.clone()
                    }
                })
                .collect();
            return self
                .func
                .with_source_expressions(keys_as_text)
                .render(compiler, RenderOptions::new().function("JSONB_BUILD_OBJECT"));
        }
        self.as_native(compiler, "JSONB")
    }

    fn as_oracle(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        Self::check_supported(compiler)?;
        self.as_native(compiler, "CLOB")
    }
}
