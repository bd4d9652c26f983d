//! Compiling expression trees to SQL text plus bound parameters.

use crate::dispatch;
use crate::expr::Expr;
use sqlfunc_core::{DatabaseConnection, Features, Result, Value, Vendor};

/// Compiled SQL with its positional parameters.
///
/// `params[i]` binds to the `i + 1`-th placeholder in `sql` (shifted by the
/// offset the fragment was compiled with).
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Recursive compiler state for one compilation.
///
/// Holds the target connection and the parameters bound so far. Placeholders
/// are numbered at bind time, so every caller must compile sub-expressions in
/// the order their SQL appears in the output.
pub struct SqlCompiler<'c> {
    connection: &'c dyn DatabaseConnection,
    params: Vec<Value>,
    offset: usize,
}

impl<'c> SqlCompiler<'c> {
    /// Create a compiler whose first placeholder is number 1.
    pub fn new(connection: &'c dyn DatabaseConnection) -> Self {
        Self::with_offset(connection, 0)
    }

    /// Create a compiler for a fragment that follows `offset` parameters
    /// already bound by the caller.
    pub fn with_offset(connection: &'c dyn DatabaseConnection, offset: usize) -> Self {
        Self {
            connection,
            params: Vec::new(),
            offset,
        }
    }

    pub fn connection(&self) -> &'c dyn DatabaseConnection {
        self.connection
    }

    pub fn vendor(&self) -> Vendor {
        self.connection.vendor()
    }

    pub fn features(&self) -> &'c Features {
        self.connection.features()
    }

    /// Parameters bound so far.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Bind a parameter and return its placeholder.
    pub fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        self.vendor().placeholder(self.offset + self.params.len())
    }

    /// Quote an identifier for the target connection.
    pub fn quote_name(&self, name: &str) -> String {
        self.connection.quote_name(name)
    }

    /// Compile one expression, appending its parameters.
    pub fn compile(&mut self, expr: &Expr) -> Result<String> {
        match expr {
            Expr::Column { table, name } => Ok(match table {
                Some(table) => format!("{}.{}", self.quote_name(table), self.quote_name(name)),
                None => self.quote_name(name),
            }),
            Expr::Literal(value) => Ok(self.bind(value.clone())),
            Expr::Raw(sql) => Ok(sql.clone()),
            Expr::Wrapped { expr, .. } => self.compile(expr),
            Expr::Func(node) => dispatch::render(node, self),
            Expr::Cast(node) => dispatch::render(node, self),
            Expr::Coalesce(node) => dispatch::render(node, self),
            Expr::Collate(node) => dispatch::render(node, self),
            Expr::Greatest(node) => dispatch::render(node, self),
            Expr::Least(node) => dispatch::render(node, self),
            Expr::JsonObject(node) => dispatch::render(node, self),
            Expr::JsonSet(node) => dispatch::render(node, self),
            Expr::JsonRemove(node) => dispatch::render(node, self),
            Expr::NullIf(node) => dispatch::render(node, self),
        }
    }

    /// Package compiled SQL with the parameters bound along the way.
    pub fn finish(self, sql: String) -> Fragment {
        Fragment {
            sql,
            params: self.params,
        }
    }
}

/// Compile an expression for a connection.
///
/// # Example
///
/// ```
/// use sqlfunc_core::ConnectionInfo;
/// use sqlfunc_query::{Coalesce, Expr, compile};
///
/// let expr = Coalesce::new(vec![Expr::col("nickname"), Expr::lit("anonymous")]).unwrap();
/// let fragment = compile(&expr.into(), &ConnectionInfo::postgres()).unwrap();
/// assert_eq!(fragment.sql, "COALESCE(\"nickname\", $1)");
/// ```
#[tracing::instrument(level = "trace", skip(connection), fields(vendor = %connection.vendor()))]
pub fn compile(expr: &Expr, connection: &dyn DatabaseConnection) -> Result<Fragment> {
    compile_with_offset(expr, connection, 0)
}

/// Compile an expression whose placeholders continue after `offset`
/// parameters that the caller has already bound.
pub fn compile_with_offset(
    expr: &Expr,
    connection: &dyn DatabaseConnection,
    offset: usize,
) -> Result<Fragment> {
    let mut compiler = SqlCompiler::with_offset(connection, offset);
    let sql = compiler.compile(expr)?;
    tracing::trace!(sql = %sql, params = compiler.params().len(), "Compiled expression");
    Ok(compiler.finish(sql))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::Func;
    use sqlfunc_core::ConnectionInfo;

    #[test]
    fn test_placeholders_per_vendor() {
        let expr: Expr = Func::new("F", vec![Expr::lit(1), Expr::lit(2)]).into();
        let cases = [
            (ConnectionInfo::postgres(), "F($1, $2)"),
            (ConnectionInfo::sqlite(), "F(?1, ?2)"),
            (ConnectionInfo::mysql(), "F(?, ?)"),
            (ConnectionInfo::oracle(), "F(:1, :2)"),
            (ConnectionInfo::new(Vendor::Other("duckdb")), "F(?, ?)"),
        ];
        for (conn, expected) in cases {
            assert_eq!(compile(&expr, &conn).unwrap().sql, expected);
        }
    }

    #[test]
    fn test_compile_with_offset() {
        let expr: Expr = Func::new("F", vec![Expr::lit("a")]).into();
        let fragment = compile_with_offset(&expr, &ConnectionInfo::postgres(), 3).unwrap();
        assert_eq!(fragment.sql, "F($4)");
        assert_eq!(fragment.params, vec![Value::Text("a".to_string())]);
    }

    #[test]
    fn test_compiler_accumulates_across_calls() {
        let conn = ConnectionInfo::sqlite();
        let mut compiler = SqlCompiler::new(&conn);
        let a = compiler.compile(&Expr::lit(1)).unwrap();
        let b = compiler.compile(&Expr::lit(2)).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("?1", "?2"));
        let fragment = compiler.finish(format!("{a} + {b}"));
        assert_eq!(fragment.params, vec![Value::Int(1), Value::Int(2)]);
    }
}
