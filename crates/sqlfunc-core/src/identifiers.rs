//! SQL identifier quoting.
//!
//! Every identifier that reaches generated SQL (column names, table names,
//! collation names) goes through one of these functions.

/// Double-quote an identifier (SQLite, PostgreSQL and unknown backends).
///
/// Embedded `"` characters are doubled, so the result is always a single
/// identifier token.
///
/// ```
/// use sqlfunc_core::quote_ident;
///
/// assert_eq!(quote_ident("circus"), "\"circus\"");
/// assert_eq!(quote_ident("en\"US"), "\"en\"\"US\"");
/// ```
#[inline]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Backtick-quote an identifier for MySQL and MariaDB.
///
/// ```
/// use sqlfunc_core::quote_ident_mysql;
///
/// assert_eq!(quote_ident_mysql("utf8mb4_bin"), "`utf8mb4_bin`");
/// assert_eq!(quote_ident_mysql("user`name"), "`user``name`");
/// ```
#[inline]
pub fn quote_ident_mysql(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a SQL identifier the way Oracle stores unquoted names: upper-cased
/// and double-quoted.
///
/// ```
/// use sqlfunc_core::quote_ident_oracle;
///
/// assert_eq!(quote_ident_oracle("binary_ci"), "\"BINARY_CI\"");
/// ```
#[inline]
pub fn quote_ident_oracle(name: &str) -> String {
    quote_ident(&name.to_uppercase())
}
