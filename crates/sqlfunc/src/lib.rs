//! SQLFunc - cross-dialect SQL database functions for Rust.
//!
//! SQLFunc compiles small typed expression trees into SQL text plus bound
//! parameters for SQLite, PostgreSQL, MySQL/MariaDB and Oracle:
//!
//! - `CAST`, `COALESCE`, `COLLATE`, `GREATEST`/`LEAST` and `NULLIF`
//! - `JSON_OBJECT`, plus `JSON_SET`/`JSON_REMOVE` with nested key paths
//! - Per-backend rewrites where a dialect lacks the construct
//!
//! # Quick Start
//!
//! ```
//! use sqlfunc::prelude::*;
//!
//! // profession.specialization[1] = 'flips'
//! let update: Expr = JsonSet::new(
//!     "circus",
//!     [("profession__specialization__1", Expr::lit("flips"))],
//! )
//! .unwrap()
//! .into();
//!
//! let sqlite = compile(&update, &ConnectionInfo::sqlite()).unwrap();
//! assert_eq!(sqlite.sql, "JSON_SET(CAST(\"circus\" AS text), ?1, ?2)");
//!
//! let postgres = compile(&update, &ConnectionInfo::postgres()).unwrap();
//! assert_eq!(
//!     postgres.sql,
//!     "jsonb_set((\"circus\")::jsonb, '{\"profession\",\"specialization\",1}', \
//!      to_jsonb(($1)::varchar), true)"
//! );
//! ```
//!
//! # Backends
//!
//! Compilation only needs a [`DatabaseConnection`]: the backend's [`Vendor`]
//! and its [`Features`]. [`ConnectionInfo`] is an in-memory descriptor that can
//! be built in code or loaded from JSON; `sqlfunc-sqlite` provides a real
//! SQLite connection that implements the same trait.

pub use sqlfunc_core::{
    ConfigError, ConnectionError, ConnectionErrorKind, ConnectionInfo, DatabaseConnection, Error,
    Features, FieldType, NotSupportedError, NotSupportedKind, QueryError, QueryErrorKind, Result,
    ValidationError, ValidationErrorKind, Value, Vendor, quote_ident, quote_ident_mysql,
    quote_ident_oracle,
};

pub use sqlfunc_query::{
    ArgJoiner, Cast, Coalesce, Collate, DialectRender, EmptyResult, Expr, Fragment, Func,
    Greatest, JsonObject, JsonPath, JsonRemove, JsonSet, Least, NullIf, PathSegment,
    RenderOptions, SqlCompiler, compile, compile_with_offset, render_template,
};

/// Everything needed to build and compile expressions.
///
/// ```
/// use sqlfunc::prelude::*;
///
/// let expr: Expr = Greatest::new(vec![Expr::col("a"), Expr::col("b")]).unwrap().into();
/// assert_eq!(compile(&expr, &ConnectionInfo::sqlite()).unwrap().sql, "MAX(\"a\", \"b\")");
/// ```
pub mod prelude {
    pub use crate::{
        // Functions
        Cast,
        Coalesce,
        Collate,
        // Backends
        ConnectionInfo,
        DatabaseConnection,
        Error,
        // Expressions
        Expr,
        FieldType,
        Fragment,
        Func,
        Greatest,
        JsonObject,
        JsonRemove,
        JsonSet,
        Least,
        NullIf,
        Result,
        Value,
        Vendor,
        // Compilation
        compile,
        compile_with_offset,
    };
}
