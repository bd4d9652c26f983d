//! Per-dialect rendering of function nodes.
//!
//! Every node implements [`DialectRender`]. `as_sql` is the shared default;
//! a node overrides `as_sqlite`, `as_postgresql`, `as_mysql` or `as_oracle`
//! only where that backend needs different SQL. [`render`] picks the method
//! for the compiler's vendor.

use crate::compiler::SqlCompiler;
use sqlfunc_core::{Result, Vendor};

/// Rendering hooks for one function node kind.
pub trait DialectRender {
    /// Function name used in logs and error messages.
    const NAME: &'static str;

    /// Default rendering, used for any backend without an override.
    fn as_sql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String>;

    fn as_sqlite(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.as_sql(compiler)
    }

    fn as_postgresql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.as_sql(compiler)
    }

    fn as_mysql(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.as_sql(compiler)
    }

    fn as_oracle(&self, compiler: &mut SqlCompiler<'_>) -> Result<String> {
        self.as_sql(compiler)
    }
}

/// Render `node` for the compiler's vendor.
pub fn render<N: DialectRender>(node: &N, compiler: &mut SqlCompiler<'_>) -> Result<String> {
    let vendor = compiler.vendor();
    tracing::debug!(function = N::NAME, vendor = %vendor, "Rendering function");

    let sql = match vendor {
        Vendor::Sqlite => node.as_sqlite(compiler),
        Vendor::Postgresql => node.as_postgresql(compiler),
        Vendor::Mysql => node.as_mysql(compiler),
        Vendor::Oracle => node.as_oracle(compiler),
        Vendor::Other(_) => node.as_sql(compiler),
    }?;

    tracing::trace!(function = N::NAME, sql = %sql, "Rendered function");
    Ok(sql)
}
