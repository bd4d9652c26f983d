//! Expression trees and cross-dialect database functions for SQLFunc.
//!
//! `sqlfunc-query` is the **SQL generation layer**. It turns a tree of
//! [`Expr`] nodes into SQL text plus positional parameters for one backend.
//!
//! # Role In The Architecture
//!
//! - **Expression tree**: [`Expr`] holds columns, literals, raw SQL and function nodes.
//! - **Function nodes**: [`Cast`], [`Coalesce`], [`Collate`], [`Greatest`], [`Least`],
//!   [`JsonObject`], [`JsonSet`], [`JsonRemove`] and [`NullIf`].
//! - **Dialect dispatch**: [`DialectRender`] picks per-backend SQL using the
//!   connection's [`Vendor`](sqlfunc_core::Vendor) and
//!   [`Features`](sqlfunc_core::Features).
//!
//! Trees are immutable once built and can be compiled concurrently from any
//! number of threads.
//!
//! # Example
//!
//! ```
//! use sqlfunc_core::ConnectionInfo;
//! use sqlfunc_query::{Coalesce, Expr, compile};
//!
//! let expr: Expr = Coalesce::new(vec![Expr::col("nickname"), Expr::col("name")])
//!     .unwrap()
//!     .into();
//! let fragment = compile(&expr, &ConnectionInfo::postgres()).unwrap();
//! assert_eq!(fragment.sql, "COALESCE(\"nickname\", \"name\")");
//! ```

pub mod compiler;
pub mod dispatch;
pub mod expr;
pub mod func;
pub mod functions;
pub mod json_path;

pub use compiler::{Fragment, SqlCompiler, compile, compile_with_offset};
pub use dispatch::{DialectRender, render};
pub use expr::{EmptyResult, Expr};
pub use func::{ArgJoiner, DEFAULT_TEMPLATE, Func, RenderOptions, render_template};
pub use functions::{
    Cast, Coalesce, Collate, Greatest, JsonObject, JsonRemove, JsonSet, Least, NullIf,
};
pub use json_path::{JsonPath, PathSegment};

#[cfg(test)]
mod tests {
    use super::*;
    use sqlfunc_core::{ConnectionInfo, FieldType, Value};

    fn tree() -> Expr {
        let name = Coalesce::new(vec![
            Expr::col("nickname"),
            Collate::new(Expr::col("name"), "nocase").unwrap().into(),
        ])
        .unwrap();
        JsonSet::new(
            "data",
            [
                ("name", Expr::from(name)),
                ("rank", Cast::new(Expr::lit("7"), FieldType::Integer).into()),
            ],
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_compile_from_many_threads() {
        let expr = tree();
        let sqlite = ConnectionInfo::sqlite();
        let postgres = ConnectionInfo::postgres();
        let expected_sqlite = compile(&expr, &sqlite).unwrap();
        let expected_postgres = compile(&expr, &postgres).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let expr = &expr;
                    let conn = if i % 2 == 0 { &sqlite } else { &postgres };
                    scope.spawn(move || compile(expr, conn).unwrap())
                })
                .collect();
            for (i, handle) in handles.into_iter().enumerate() {
                let fragment = handle.join().unwrap();
                let expected = if i % 2 == 0 {
                    &expected_sqlite
                } else {
                    &expected_postgres
                };
                assert_eq!(&fragment, expected);
            }
        });
    }

    #[test]
    fn test_compile_does_not_mutate_tree() {
        let expr = tree();
        let before = expr.clone();
        compile(&expr, &ConnectionInfo::oracle()).unwrap_err();
        compile(&expr, &ConnectionInfo::postgres()).unwrap();
        assert_eq!(expr, before);
    }

    #[test]
    fn test_offset_shifts_placeholders() {
        let expr: Expr = NullIf::new(Expr::col("a"), Expr::lit(Value::Int(0))).into();
        let fragment = compile_with_offset(&expr, &ConnectionInfo::postgres(), 2).unwrap();
        assert_eq!(fragment.sql, "NULLIF(\"a\", $3)");
    }
}
