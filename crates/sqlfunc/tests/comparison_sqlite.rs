use sqlfunc::prelude::*;
use sqlfunc::{QueryErrorKind, SqlCompiler, ValidationErrorKind};
use sqlfunc_sqlite::SqliteConnection;

fn open() -> SqliteConnection {
    let conn = SqliteConnection::open_memory().expect("open sqlite memory db");
    conn.execute_raw(
        "CREATE TABLE people (id INTEGER PRIMARY KEY, nickname TEXT, name TEXT);
         INSERT INTO people (nickname, name) VALUES
             (NULL, 'alice'),
             ('Bobby', 'Bob'),
             (NULL, 'Carol');",
    )
    .expect("create table");
    conn
}

/// `SELECT <expr>` with no table.
fn scalar(conn: &SqliteConnection, expr: impl Into<Expr>) -> Value {
    let fragment = compile(&expr.into(), conn).expect("compile");
    let sql = format!("SELECT {}", fragment.sql);
    conn.query_scalar(&sql, &fragment.params)
        .unwrap_or_else(|e| panic!("{sql}: {e}"))
}

/// One value per row of `people`, ordered by id unless `order_by` is given.
fn column(conn: &SqliteConnection, expr: impl Into<Expr>, order_by: Option<Expr>) -> Vec<Value> {
    let mut compiler = SqlCompiler::new(conn);
    let select = compiler.compile(&expr.into()).expect("compile");
    let order = match order_by {
        Some(order) => compiler.compile(&order).expect("compile"),
        None => "id".to_string(),
    };
    let fragment = compiler.finish(format!("SELECT {select} FROM people ORDER BY {order}"));
    conn.query(&fragment.sql, &fragment.params)
        .unwrap_or_else(|e| panic!("{}: {e}", fragment.sql))
        .into_iter()
        .map(|mut row| row.remove(0))
        .collect()
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn coalesce_returns_first_non_null() {
    let conn = open();
    let expr = Coalesce::new(vec![Expr::col("nickname"), Expr::col("name")]).unwrap();
    assert_eq!(
        column(&conn, expr, None),
        vec![text("alice"), text("Bobby"), text("Carol")]
    );

    let expr = Coalesce::new(vec![Expr::null(), Expr::null(), Expr::lit(3)]).unwrap();
    assert_eq!(scalar(&conn, expr), Value::Int(3));

    let expr = Coalesce::new(vec![Expr::null(), Expr::null()]).unwrap();
    assert_eq!(scalar(&conn, expr), Value::Null);
}

#[test]
fn coalesce_requires_two_expressions() {
    for exprs in [vec![], vec![Expr::col("name")]] {
        let err = Coalesce::new(exprs).unwrap_err();
        assert!(err.is_validation());
    }
}

#[test]
fn greatest_and_least() {
    let conn = open();
    let numbers = || vec![Expr::lit(3), Expr::lit(9), Expr::lit(4)];
    assert_eq!(scalar(&conn, Greatest::new(numbers()).unwrap()), Value::Int(9));
    assert_eq!(scalar(&conn, Least::new(numbers()).unwrap()), Value::Int(3));

    let floats = || vec![Expr::lit(1.5), Expr::lit(-2.25)];
    assert_eq!(scalar(&conn, Greatest::new(floats()).unwrap()), Value::Double(1.5));
    assert_eq!(scalar(&conn, Least::new(floats()).unwrap()), Value::Double(-2.25));

    let words = || vec![Expr::lit("pear"), Expr::lit("apple"), Expr::lit("fig")];
    assert_eq!(scalar(&conn, Greatest::new(words()).unwrap()), text("pear"));
    assert_eq!(scalar(&conn, Least::new(words()).unwrap()), text("apple"));
}

#[test]
fn greatest_with_null_is_null_on_sqlite() {
    let conn = open();
    let expr = Greatest::new(vec![Expr::lit(1), Expr::null()]).unwrap();
    assert_eq!(scalar(&conn, expr), Value::Null);
}

#[test]
fn greatest_over_columns() {
    let conn = open();
    let expr = Greatest::new(vec![Expr::col("name"), Expr::lit("Bz")]).unwrap();
    assert_eq!(
        column(&conn, expr, None),
        vec![text("alice"), text("Bz"), text("Carol")]
    );
}

#[test]
fn nullif() {
    let conn = open();
    assert_eq!(scalar(&conn, NullIf::new(Expr::lit(1), Expr::lit(1))), Value::Null);
    assert_eq!(scalar(&conn, NullIf::new(Expr::lit(1), Expr::lit(2))), Value::Int(1));

    let expr = NullIf::new(Expr::col("name"), Expr::lit("Bob"));
    assert_eq!(
        column(&conn, expr, None),
        vec![text("alice"), Value::Null, text("Carol")]
    );
}

#[test]
fn cast() {
    let conn = open();
    assert_eq!(
        scalar(&conn, Cast::new(Expr::lit("42"), FieldType::Integer)),
        Value::Int(42)
    );
    assert_eq!(
        scalar(&conn, Cast::new(Expr::lit(3), FieldType::Float)),
        Value::Double(3.0)
    );
    assert_eq!(
        scalar(&conn, Cast::new(Expr::lit(12), FieldType::Text)),
        text("12")
    );
    assert_eq!(
        scalar(&conn, Cast::new(Expr::lit("2024-01-02 03:04:05"), FieldType::Date)),
        text("2024-01-02")
    );
    assert_eq!(
        scalar(
            &conn,
            Cast::new(Expr::lit("2024-01-02 03:04:05.678"), FieldType::DateTime)
        ),
        text("2024-01-02 03:04:05.678")
    );
    assert_eq!(
        scalar(&conn, Cast::new(Expr::lit("12:30:45.5"), FieldType::Time)),
        text("12:30:45.500")
    );
}

#[test]
fn cast_is_idempotent() {
    let conn = open();
    let cases = [
        (Expr::lit("7.9"), FieldType::Integer),
        (Expr::lit(7), FieldType::Float),
        (Expr::lit(2.5), FieldType::Text),
        (Expr::lit("2024-05-06 07:08:09.123"), FieldType::DateTime),
    ];
    for (value, target) in cases {
        let once = Cast::new(value.clone(), target.clone());
        let twice = Cast::new(Cast::new(value, target.clone()), target);
        assert_eq!(scalar(&conn, twice), scalar(&conn, once));
    }
}

#[test]
fn collate_changes_ordering() {
    let conn = open();
    let binary = column(&conn, Expr::col("name"), Some(Expr::col("name")));
    assert_eq!(binary, vec![text("Bob"), text("Carol"), text("alice")]);

    let nocase = Collate::new(Expr::col("name"), "nocase").unwrap();
    let ordered = column(&conn, Expr::col("name"), Some(nocase.into()));
    assert_eq!(ordered, vec![text("alice"), text("Bob"), text("Carol")]);
}

#[test]
fn collate_rejects_invalid_names() {
    for name in ["nocase; DROP TABLE people", "", "no case", "\"x\""] {
        let err = Collate::new(Expr::col("name"), name).unwrap_err();
        match err {
            Error::Validation(v) => assert_eq!(v.kind, ValidationErrorKind::InvalidCollation),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn unknown_collation_fails_at_execution() {
    let conn = open();
    let expr = Collate::new(Expr::col("name"), "no-such-collation").unwrap();
    let fragment = compile(&expr.into(), &conn).unwrap();
    let err = conn
        .query(
            &format!("SELECT name FROM people ORDER BY {}", fragment.sql),
            &[],
        )
        .unwrap_err();
    match err {
        Error::Query(q) => assert_eq!(q.kind, QueryErrorKind::Database),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn nested_functions_bind_in_order() {
    let conn = open();
    let expr = Coalesce::new(vec![
        NullIf::new(Expr::col("nickname"), Expr::lit("Bobby")).into(),
        Greatest::new(vec![Expr::col("name"), Expr::lit("B")]).unwrap().into(),
        Expr::lit("unused"),
    ])
    .unwrap();
    assert_eq!(
        column(&conn, expr, None),
        vec![text("alice"), text("Bob"), text("Carol")]
    );
}
