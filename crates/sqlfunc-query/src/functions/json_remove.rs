use super::parse_path;
use crate::compiler::SqlCompiler;
use crate::dispatch::DialectRender;
use crate::expr::Expr;
use crate::func::{Func, RenderOptions};
use crate::json_path::{JsonPath, sql_string_literal};
use sqlfunc_core::{Error, FieldType, Result, ValidationErrorKind};

/// Remove keys or array elements from a JSON document.
///
/// Paths use the same double-underscore notation as [`JsonSet`](super::JsonSet).
/// Removing a path that does not exist leaves the document unchanged, except
/// on PostgreSQL: the result there goes through `jsonb_strip_nulls`, which
/// drops every null-valued object key at any depth, missing path or not.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRemove {
    /// Sources: `[target, path1, path2, ...]`
    func: Func,
    paths: Vec<JsonPath>,
}

impl JsonRemove {
    /// Fails with `TooFewArguments` when `paths` is empty and `InvalidPath`
    /// for a malformed key or one containing the append marker.
    pub fn new<K: AsRef<str>>(
        expression: impl Into<Expr>,
        paths: impl IntoIterator<Item = K>,
    ) -> Result<Self> {
        let mut expressions = vec![expression.into()];
        let mut parsed = Vec::new();
        for key in paths {
            let path = parse_path(Self::NAME, key.as_ref())?;
            if path.has_append() {
                return Err(Error::validation(
                    Self::NAME,
                    ValidationErrorKind::InvalidPath,
                    format!("Cannot remove the append position in {:?}.", key.as_ref()),
                ));
            }
            expressions.push(Expr::lit(path.to_generic()));
            parsed.push(path);
        }
        if parsed.is_empty() {
            return Err(Error::validation(
                Self::NAME,
                ValidationErrorKind::TooFewArguments,
                "JSONRemove requires at least one path.",
            ));
        }
        Ok(Self {
            func: Func::new("JSON_REMOVE", expressions).with_output_field(FieldType::Json),
            paths: parsed,
        })
    }

    pub fn paths(&self) -> &[JsonPath] {
        &self.paths
    }

    pub fn output_field(&self) -> Option<FieldType> {
        Some(FieldType::Json)
    }

    fn target(&self) -> &Expr {
        &self.func.source_expressions()[0]
    }
}

impl DialectRender for JsonRemove {
    const NAME: &'static str = "JSONRemove";

    /// `JSON_REMOVE(target, path1, path2, ...)` with bound paths.
    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.func.render(compiler, RenderOptions::default())
    }

    /// `jsonb_strip_nulls((target) #- '{..}' #- '{..}')`.
    fn as_postgresql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        let mut sql = format!("({})", compiler.compile(self.target())?);
        for path in &self.paths {
            sql.push_str(" #- ");
            sql.push_str(&path.to_postgres_literal());
        }
        Ok(format!("jsonb_strip_nulls({sql})"))
    }

    /// `JSON_TRANSFORM(target, REMOVE '<path>', ...)`. Oracle requires the
    /// paths as literals.
    fn as_oracle(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        let target = compiler.compile(self.target())?;
        let operations: Vec<String> = self
            .paths
            .iter()
            .map(|path| format!("REMOVE {}", sql_string_literal(&path.to_generic())))
            .collect();
        Ok(format!("JSON_TRANSFORM({target}, {})", operations.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use sqlfunc_core::{ConnectionInfo, Value};

    fn remove() -> Expr {
        JsonRemove::new(Expr::col("circus"), ["name", "profession__specialization__0"])
            .unwrap()
            .into()
    }

    #[test]
    fn test_sqlite_and_mysql() {
        let sqlite = compile(&remove(), &ConnectionInfo::sqlite()).unwrap();
        assert_eq!(sqlite.sql, "JSON_REMOVE(\"circus\", ?1, ?2)");
        assert_eq!(
            sqlite.params,
            vec![
                Value::Text("$.\"name\"".to_string()),
                Value::Text("$.\"profession\".\"specialization\"[0]".to_string()),
            ]
        );

        let mysql = compile(&remove(), &ConnectionInfo::mysql()).unwrap();
        assert_eq!(mysql.sql, "JSON_REMOVE(`circus`, ?, ?)");
        assert_eq!(mysql.params.len(), 2);
    }

    #[test]
    fn test_postgresql_chains_path_deletes() {
        let fragment = compile(&remove(), &ConnectionInfo::postgres()).unwrap();
        assert_eq!(
            fragment.sql,
            "jsonb_strip_nulls((\"circus\") #- '{\"name\"}' \
             #- '{\"profession\",\"specialization\",0}')"
        );
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn test_postgresql_strips_nulls_even_for_missing_path() {
        let remove: Expr = JsonRemove::new(Expr::col("circus"), ["nope"]).unwrap().into();
        let fragment = compile(&remove, &ConnectionInfo::postgres()).unwrap();
        assert_eq!(fragment.sql, "jsonb_strip_nulls((\"circus\") #- '{\"nope\"}')");
    }

    #[test]
    fn test_oracle_json_transform() {
        let fragment = compile(&remove(), &ConnectionInfo::oracle()).unwrap();
        assert_eq!(
            fragment.sql,
            "JSON_TRANSFORM(\"CIRCUS\", REMOVE '$.\"name\"', \
             REMOVE '$.\"profession\".\"specialization\"[0]')"
        );
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn test_oracle_escapes_quotes_in_paths() {
        let expr: Expr = JsonRemove::new(Expr::col("doc"), ["it's"]).unwrap().into();
        let fragment = compile(&expr, &ConnectionInfo::oracle()).unwrap();
        assert_eq!(fragment.sql, "JSON_TRANSFORM(\"DOC\", REMOVE '$.\"it''s\"')");
    }

    #[test]
    fn test_requires_a_path() {
        match JsonRemove::new(Expr::col("doc"), Vec::<&str>::new()).unwrap_err() {
            Error::Validation(v) => assert_eq!(v.kind, ValidationErrorKind::TooFewArguments),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_append_marker() {
        match JsonRemove::new(Expr::col("doc"), ["tags__#"]).unwrap_err() {
            Error::Validation(v) => {
                assert_eq!(v.kind, ValidationErrorKind::InvalidPath);
                assert_eq!(v.function, "JSONRemove");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_target_params_come_first() {
        let target = Expr::lit(serde_json::json!({"a": 1, "b": 2}));
        let expr: Expr = JsonRemove::new(target, ["a"]).unwrap().into();
        let fragment = compile(&expr, &ConnectionInfo::sqlite()).unwrap();
        assert_eq!(fragment.sql, "JSON_REMOVE(?1, ?2)");
        assert_eq!(fragment.params[1], Value::Text("$.\"a\"".to_string()));
    }
}
