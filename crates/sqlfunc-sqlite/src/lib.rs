//! SQLite execution harness for SQLFunc.
//!
// FFI bindings require unsafe code - this is expected for database drivers
#![allow(unsafe_code)]
//!
//! This crate runs compiled sqlfunc expressions against a real SQLite
//! database through `libsqlite3-sys`. The library is bundled, so the JSON
//! functions (`json_set`, `json_remove`, `json_object`) are always present.
//!
//! # Example
//!
//! ```rust
//! use sqlfunc_sqlite::SqliteConnection;
//! use sqlfunc_core::Value;
//!
//! let conn = SqliteConnection::open_memory().unwrap();
//! conn.execute_raw("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)").unwrap();
//! conn.execute("INSERT INTO users (name) VALUES (?1)", &[Value::Text("Alice".into())])
//!     .unwrap();
//! let name = conn.query_scalar("SELECT name FROM users", &[]).unwrap();
//! assert_eq!(name, Value::Text("Alice".into()));
//! ```
//!
//! # Type Mapping
//!
//! | Value | SQLite Type |
//! |-------|-------------|
//! | `Bool` | INTEGER (0/1) |
//! | `Int`, `BigInt` | INTEGER |
//! | `Double` | REAL |
//! | `Text`, `Decimal` | TEXT |
//! | `Bytes` | BLOB |
//! | `Json` | TEXT |
//!
//! # Thread Safety
//!
//! `SqliteConnection` is both `Send` and `Sync`, using internal mutex
//! synchronization to protect the underlying SQLite handle.

pub mod connection;
pub mod types;

pub use connection::{SqliteConfig, SqliteConnection};

use std::ffi::CStr;

/// The SQLite library version.
pub fn sqlite_version() -> &'static str {
    // SAFETY: sqlite3_libversion returns a static, NUL-terminated string
    unsafe { CStr::from_ptr(libsqlite3_sys::sqlite3_libversion()) }
        .to_str()
        .unwrap_or("unknown")
}

/// The SQLite library version number.
pub fn sqlite_version_number() -> i32 {
    // SAFETY: no preconditions
    unsafe { libsqlite3_sys::sqlite3_libversion_number() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_version() {
        let version = sqlite_version();
        assert!(
            version.starts_with('3'),
            "Expected SQLite 3.x, got {}",
            version
        );
    }

    #[test]
    fn test_sqlite_version_number() {
        let num = sqlite_version_number();
        // JSON functions are built in from 3.38
        assert!(num >= 3_038_000, "Expected SQLite >= 3.38, got {}", num);
    }
}
