use super::{Cast, parse_path};
use crate::compiler::SqlCompiler;
use crate::dispatch::DialectRender;
use crate::expr::Expr;
use crate::func::Func;
use crate::json_path::JsonPath;
use sqlfunc_core::{Error, FieldType, NotSupportedKind, Result, Value, ValidationErrorKind};

/// Update values inside a JSON document.
///
/// Updates are applied in order, each one wrapping the result of the previous
/// ones, so setting the same key twice keeps the last value.
///
/// A NULL literal value stores JSON `null` on every backend. A value
/// *expression* that evaluates to NULL differs: SQLite stores JSON `null`,
/// while PostgreSQL's `jsonb_set` returns NULL for the whole document. Wrap
/// such values in [`Coalesce`](crate::Coalesce) when that matters.
///
/// # Example
///
/// ```
/// use sqlfunc_core::ConnectionInfo;
/// use sqlfunc_query::{Expr, JsonSet, compile};
///
/// let update = JsonSet::new("data", [("profession__specialization__1", Expr::lit("flips"))]).unwrap();
/// let fragment = compile(&update.into(), &ConnectionInfo::sqlite()).unwrap();
/// assert_eq!(fragment.sql, "JSON_SET(CAST(\"data\" AS text), ?1, ?2)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSet {
    /// Sources: `[target, path1, value1, path2, value2, ...]`
    func: Func,
    paths: Vec<JsonPath>,
    field: Option<String>,
}

impl JsonSet {
    /// Update the JSON column `field`.
    ///
    /// Keys use the double-underscore path notation. Fails with `NoUpdates`
    /// when `updates` is empty and `InvalidPath` for a malformed key.
    pub fn new<K: AsRef<str>>(
        field: impl Into<String>,
        updates: impl IntoIterator<Item = (K, Expr)>,
    ) -> Result<Self> {
        let field = field.into();
        let target = Cast::new(Expr::col(field.clone()), FieldType::Text);
        Self::build(target.into(), Some(field), updates)
    }

    /// Update the document produced by any JSON expression.
    pub fn from_expression<K: AsRef<str>>(
        expression: impl Into<Expr>,
        updates: impl IntoIterator<Item = (K, Expr)>,
    ) -> Result<Self> {
        Self::build(expression.into(), None, updates)
    }

    fn build<K: AsRef<str>>(
        target: Expr,
        field: Option<String>,
        updates: impl IntoIterator<Item = (K, Expr)>,
    ) -> Result<Self> {
        let mut expressions = vec![target];
        let mut paths = Vec::new();
        for (key, value) in updates {
            let path = parse_path(Self::NAME, key.as_ref())?;
            expressions.push(Expr::lit(path.to_generic()));
            expressions.push(value);
            paths.push(path);
        }
        if paths.is_empty() {
            return Err(Error::validation(
                Self::NAME,
                ValidationErrorKind::NoUpdates,
                "JSONSet requires at least one update.",
            ));
        }
        Ok(Self {
            func: Func::new("JSON_SET", expressions).with_output_field(FieldType::Json),
            paths,
            field,
        })
    }

    /// The JSON column being updated, when built with [`JsonSet::new`].
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn paths(&self) -> &[JsonPath] {
        &self.paths
    }

    pub fn source_expressions(&self) -> &[Expr] {
        self.func.source_expressions()
    }

    pub fn output_field(&self) -> Option<FieldType> {
        Some(FieldType::Json)
    }

    fn target(&self) -> &Expr {
        &self.func.source_expressions()[0]
    }

    /// `(path, bound path literal, value)` per update, in order.
    fn updates(&self) -> impl Iterator<Item = (&JsonPath, &Expr, &Expr)> {
        self.paths
            .iter()
            .zip(self.func.source_expressions()[1..].chunks_exact(2))
            .map(|(path, pair)| (path, &pair[0], &pair[1]))
    }

    fn check_supported(compiler: &SqlCompiler<'_>) -> Result<()> {
        if !compiler.features().has_json_set_function {
            return Err(Error::not_supported(
                Self::NAME,
                compiler.vendor(),
                NotSupportedKind::MissingFeature,
                "JSONSet is not supported on this database backend.",
            ));
        }
        Ok(())
    }

    /// The target as `jsonb`. A column target is cast to `jsonb` directly
    /// instead of going through text.
    fn postgres_target(&self) -> Expr {
        match (self.field.as_ref(), self.target()) {
            (Some(field), _) => Cast::new(Expr::col(field.clone()), FieldType::Json).into(),
            (None, target) if target.output_field() == Some(FieldType::Json) => target.clone(),
            (None, target) => Cast::new(target.clone(), FieldType::Json).into(),
        }
    }

    /// SQLite stores booleans as 0/1, so boolean values are turned back into
    /// JSON `true`/`false` before they reach `JSON_SET`.
    fn sqlite_value(compiler: &mut SqlCompiler<'_>, value: &Expr) -> Result<String> {
        match (value, value.output_field()) {
            (Expr::Literal(Value::Bool(b)), _) => Ok(format!("json('{b}')")),
            (_, Some(FieldType::Boolean)) => Ok(format!(
                "json(CASE {} WHEN 0 THEN 'false' WHEN 1 THEN 'true' END)",
                compiler.compile(value)?
            )),
            (_, Some(FieldType::Json)) => Ok(format!("json({})", compiler.compile(value)?)),
            _ => compiler.compile(value),
        }
    }

    /// Literal values get an explicit type so `to_jsonb` can resolve it.
    fn postgres_value(value: &Expr) -> Expr {
        match value {
            _ if value.is_null_literal() => Expr::raw("'null'::jsonb"),
            Expr::Literal(literal) => match literal.inferred_field_type() {
                Some(field_type) => Cast::new(value.clone(), field_type).into(),
                None => value.clone(),
            },
            _ => value.clone(),
        }
    }
}

impl DialectRender for JsonSet {
    const NAME: &'static str = "JSONSet";

    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        let vendor = compiler.vendor();
        Err(Error::not_supported(
            Self::NAME,
            vendor,
            NotSupportedKind::UnsupportedBackend,
            format!("JSONSet is not supported for {vendor}."),
        ))
    }

    /// `JSON_SET(JSON_SET(target, path1, value1), path2, value2)`.
    fn as_sqlite(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        Self::check_supported(compiler)?;
        let mut lhs = compiler.compile(self.target())?;
        for (_, key, value) in self.updates() {
            let key_sql = compiler.compile(key)?;
            let value_sql = Self::sqlite_value(compiler, value)?;
            lhs = format!("JSON_SET({lhs}, {key_sql}, {value_sql})");
        }
        Ok(lhs)
    }

    /// `jsonb_set(jsonb_set(target, '{..}', to_jsonb(v1), true), ...)`.
    ///
    /// Paths are inlined; only values are bound.
    fn as_postgresql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        Self::check_supported(compiler)?;
        let mut lhs = compiler.compile(&self.postgres_target())?;
        for (path, _, value) in self.updates() {
            let value_sql = compiler.compile(&Self::postgres_value(value))?;
            lhs = format!(
                "jsonb_set({lhs}, {}, to_jsonb({value_sql}), true)",
                path.to_postgres_literal()
            );
        }
        Ok(lhs)
    }

    fn as_oracle(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        Err(Error::not_supported(
            Self::NAME,
            compiler.vendor(),
            NotSupportedKind::NotImplemented,
            "JSONSet for oracle is not implemented yet.",
        ))
    }
}
