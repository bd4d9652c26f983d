//! SQL expression trees.
//!
//! An [`Expr`] is an owned tree: every node exclusively owns its children, so
//! cloning a tree yields a fully independent copy. Dialect rewrites build new
//! nodes from clones and never touch the tree they were handed.

use crate::func::Func;
use crate::functions::{
    Cast, Coalesce, Collate, Greatest, JsonObject, JsonRemove, JsonSet, Least, NullIf,
};
use sqlfunc_core::{FieldType, Value};

/// A SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference with optional table qualifier
    Column {
        /// Optional table name or alias
        table: Option<String>,
        /// Column name
        name: String,
    },

    /// Literal value, always compiled to a bound parameter
    Literal(Value),

    /// Raw SQL fragment (escape hatch)
    Raw(String),

    /// Any expression with a declared output type
    Wrapped {
        expr: Box<Expr>,
        output_field: FieldType,
    },

    /// Generic templated function call
    Func(Func),

    Cast(Cast),
    Coalesce(Coalesce),
    Collate(Collate),
    Greatest(Greatest),
    Least(Least),
    JsonObject(JsonObject),
    JsonSet(JsonSet),
    JsonRemove(JsonRemove),
    NullIf(NullIf),
}

/// What an expression evaluates to when the enclosing query matches no rows.
#[derive(Debug, Clone, PartialEq)]
pub enum EmptyResult {
    /// Depends on the rows; cannot be predicted.
    Undetermined,
    /// Always this value.
    Value(Value),
}

impl Expr {
    // ==================== Constructors ====================

    /// Create a column reference expression.
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Create a qualified column reference (table.column).
    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Expr::Column {
            table: Some(table.into()),
            name: column.into(),
        }
    }

    /// Create a literal value expression.
    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// Create a NULL literal.
    pub fn null() -> Self {
        Expr::Literal(Value::Null)
    }

    /// Create a raw SQL expression (escape hatch).
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// Declare the output type of this expression.
    pub fn with_output_field(self, output_field: FieldType) -> Self {
        Expr::Wrapped {
            expr: Box::new(self),
            output_field,
        }
    }

    // ==================== Type resolution ====================

    /// The type this expression produces, if it can be determined.
    pub fn output_field(&self) -> Option<FieldType> {
        match self {
            Expr::Column { .. } | Expr::Raw(_) => None,
            Expr::Literal(value) => value.inferred_field_type(),
            Expr::Wrapped { output_field, .. } => Some(output_field.clone()),
            Expr::Func(func) => func.resolve_output_field(),
            Expr::Cast(node) => node.output_field(),
            Expr::Coalesce(node) => node.output_field(),
            Expr::Collate(node) => node.output_field(),
            Expr::Greatest(node) => node.output_field(),
            Expr::Least(node) => node.output_field(),
            Expr::JsonObject(node) => node.output_field(),
            Expr::JsonSet(node) => node.output_field(),
            Expr::JsonRemove(node) => node.output_field(),
            Expr::NullIf(node) => node.output_field(),
        }
    }

    /// The value of this expression over an empty result set.
    pub fn empty_result_set_value(&self) -> EmptyResult {
        match self {
            Expr::Literal(value) => EmptyResult::Value(value.clone()),
            Expr::Wrapped { expr, .. } => expr.empty_result_set_value(),
            Expr::Func(func) => func
                .empty_result
                .clone()
                .map_or(EmptyResult::Undetermined, EmptyResult::Value),
            Expr::Coalesce(node) => node.empty_result_set_value(),
            _ => EmptyResult::Undetermined,
        }
    }

    /// Is this a NULL literal? A typed NULL (`Expr::null().with_output_field(..)`)
    /// counts as one.
    pub fn is_null_literal(&self) -> bool {
        match self {
            Expr::Literal(value) => value.is_null(),
            Expr::Wrapped { expr, .. } => expr.is_null_literal(),
            _ => false,
        }
    }
}

// ==================== Conversions ====================

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Literal(Value::Text(s.to_string()))
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Literal(Value::Text(s))
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::Literal(Value::Int(n))
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::Literal(Value::BigInt(n))
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Literal(Value::Bool(b))
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::Literal(Value::Double(n))
    }
}

impl From<f32> for Expr {
    fn from(n: f32) -> Self {
        Expr::Literal(Value::Double(f64::from(n)))
    }
}

impl From<serde_json::Value> for Expr {
    fn from(v: serde_json::Value) -> Self {
        Expr::Literal(Value::Json(v))
    }
}

macro_rules! impl_from_node {
    ($($node:ident),* $(,)?) => {
        $(
            impl From<$node> for Expr {
                fn from(node: $node) -> Self {
                    Expr::$node(node)
                }
            }
        )*
    };
}

impl_from_node!(
    Func, Cast, Coalesce, Collate, Greatest, Least, JsonObject, JsonSet, JsonRemove, NullIf,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use sqlfunc_core::ConnectionInfo;

    // ==================== Column Tests ====================

    #[test]
    fn test_column_simple() {
        let fragment = compile(&Expr::col("name"), &ConnectionInfo::postgres()).unwrap();
        assert_eq!(fragment.sql, "\"name\"");
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn test_column_qualified() {
        let fragment =
            compile(&Expr::qualified("users", "name"), &ConnectionInfo::mysql()).unwrap();
        assert_eq!(fragment.sql, "`users`.`name`");
    }

    // ==================== Literal Tests ====================

    #[test]
    fn test_literal_int() {
        let fragment = compile(&Expr::lit(42), &ConnectionInfo::postgres()).unwrap();
        assert_eq!(fragment.sql, "$1");
        assert_eq!(fragment.params, vec![Value::Int(42)]);
    }

    #[test]
    fn test_literal_null() {
        let fragment = compile(&Expr::null(), &ConnectionInfo::sqlite()).unwrap();
        assert_eq!(fragment.sql, "?1");
        assert_eq!(fragment.params, vec![Value::Null]);
    }

    #[test]
    fn test_raw_passthrough() {
        let fragment = compile(&Expr::raw("CURRENT_DATE"), &ConnectionInfo::oracle()).unwrap();
        assert_eq!(fragment.sql, "CURRENT_DATE");
        assert!(fragment.params.is_empty());
    }

    // ==================== Type Resolution ====================

    #[test]
    fn test_output_field() {
        assert_eq!(Expr::col("x").output_field(), None);
        assert_eq!(Expr::lit(1.5).output_field(), Some(FieldType::Float));
        assert_eq!(
            Expr::col("x").with_output_field(FieldType::Text).output_field(),
            Some(FieldType::Text)
        );
    }

    #[test]
    fn test_wrapped_compiles_inner() {
        let expr = Expr::col("bio").with_output_field(FieldType::Text);
        let fragment = compile(&expr, &ConnectionInfo::sqlite()).unwrap();
        assert_eq!(fragment.sql, "\"bio\"");
    }

    #[test]
    fn test_empty_result_set_value() {
        assert_eq!(
            Expr::lit(3).empty_result_set_value(),
            EmptyResult::Value(Value::Int(3))
        );
        assert_eq!(
            Expr::col("x").empty_result_set_value(),
            EmptyResult::Undetermined
        );
        let count = Func::new("COUNT", vec![Expr::col("id")]).with_empty_result(0);
        assert_eq!(
            Expr::from(count).empty_result_set_value(),
            EmptyResult::Value(Value::Int(0))
        );
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Expr::from("a"), Expr::Literal(Value::Text("a".to_string())));
        assert_eq!(Expr::from(7_i64), Expr::Literal(Value::BigInt(7)));
        assert_eq!(Expr::from(true), Expr::Literal(Value::Bool(true)));
    }
}
