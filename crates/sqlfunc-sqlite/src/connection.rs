//! SQLite connection implementation.
//!
//! A small synchronous wrapper around SQLite's C API. It implements
//! [`DatabaseConnection`] so expressions can be compiled against it and the
//! resulting SQL executed on the same handle.

// Allow casts in FFI code where we need to match C types exactly
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::borrow_as_ptr)]

use crate::types;
/// `libsqlite3-sys` omits `sqlite3_close_v2` from its generated bindings, but
/// the symbol is still exported by the bundled SQLite library.
mod ffi {
    pub use libsqlite3_sys::*;

    unsafe extern "C" {
        pub fn sqlite3_close_v2(db: *mut sqlite3) -> ::core::ffi::c_int;
    }
}
use sqlfunc_core::{
    ConnectionError, ConnectionErrorKind, DatabaseConnection, Error, Features, QueryError,
    QueryErrorKind, Result, Value, Vendor,
};
use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Configuration for opening SQLite connections.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to the database file, or ":memory:" for in-memory database.
    pub path: String,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
    /// Capability flags reported to the SQL compiler.
    pub features: Features,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: ":memory:".to_string(),
            busy_timeout_ms: 5000,
            features: Features::for_vendor(Vendor::Sqlite),
        }
    }
}

impl SqliteConfig {
    /// Create a new config for a file-based database.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a new config for an in-memory database.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Set busy timeout.
    pub fn busy_timeout(mut self, ms: u32) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    /// Override the reported capability flags.
    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }
}

struct SqliteInner {
    db: *mut ffi::sqlite3,
}

// SAFETY: the handle is only used while holding the connection's mutex.
unsafe impl Send for SqliteInner {}

/// A connection to a SQLite database.
///
/// All access to the handle goes through a mutex, so the connection can be
/// shared between threads.
pub struct SqliteConnection {
    inner: Mutex<SqliteInner>,
    path: String,
    features: Features,
}

impl SqliteConnection {
    /// Open a new SQLite connection with the given configuration.
    pub fn open(config: &SqliteConfig) -> Result<Self> {
        let c_path = CString::new(config.path.as_str()).map_err(|_| {
            Error::Connection(ConnectionError {
                kind: ConnectionErrorKind::Connect,
                message: "Invalid path: contains null byte".to_string(),
                source: None,
            })
        })?;

        let mut db: *mut ffi::sqlite3 = ptr::null_mut();
        let flags = ffi::SQLITE_OPEN_READWRITE | ffi::SQLITE_OPEN_CREATE | ffi::SQLITE_OPEN_URI;

        // SAFETY: We pass valid pointers and check the return value
        let rc = unsafe { ffi::sqlite3_open_v2(c_path.as_ptr(), &mut db, flags, ptr::null()) };

        if rc != ffi::SQLITE_OK {
            let msg = if db.is_null() {
                error_string(rc)
            } else {
                // SAFETY: db is valid even on failure and must still be closed
                unsafe {
                    let msg = errmsg(db);
                    ffi::sqlite3_close(db);
                    msg
                }
            };
            tracing::error!(path = %config.path, error = %msg, "Failed to open SQLite database");
            return Err(Error::Connection(ConnectionError {
                kind: ConnectionErrorKind::Connect,
                message: format!("Failed to open database: {}", msg),
                source: None,
            }));
        }

        if config.busy_timeout_ms > 0 {
            let timeout = c_int::try_from(config.busy_timeout_ms).unwrap_or(c_int::MAX);
            // SAFETY: db is valid
            unsafe {
                ffi::sqlite3_busy_timeout(db, timeout);
            }
        }

        tracing::debug!(path = %config.path, "Opened SQLite database");
        Ok(Self {
            inner: Mutex::new(SqliteInner { db }),
            path: config.path.clone(),
            features: config.features.clone(),
        })
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::open(&SqliteConfig::memory())
    }

    /// Open a file-based database.
    pub fn open_file(path: impl Into<String>) -> Result<Self> {
        Self::open(&SqliteConfig::file(path))
    }

    /// Get the database path.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, SqliteInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Execute SQL directly without preparing (for DDL, etc.)
    ///
    /// `sql` may hold several statements separated by semicolons.
    pub fn execute_raw(&self, sql: &str) -> Result<()> {
        let inner = self.lock();
        let c_sql = c_string(sql)?;
        let mut errmsg_ptr: *mut c_char = ptr::null_mut();

        tracing::trace!(sql = %sql, "Executing raw SQL");
        // SAFETY: All pointers are valid
        let rc = unsafe {
            ffi::sqlite3_exec(
                inner.db,
                c_sql.as_ptr(),
                None,
                ptr::null_mut(),
                &mut errmsg_ptr,
            )
        };

        if rc != ffi::SQLITE_OK {
            let msg = if errmsg_ptr.is_null() {
                error_string(rc)
            } else {
                // SAFETY: errmsg_ptr was allocated by SQLite and is freed once
                unsafe {
                    let msg = CStr::from_ptr(errmsg_ptr).to_string_lossy().into_owned();
                    ffi::sqlite3_free(errmsg_ptr.cast());
                    msg
                }
            };
            return Err(query_error(rc, sql, msg));
        }

        Ok(())
    }

    /// Prepare and execute a statement, returning rows affected.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<u64> {
        let inner = self.lock();
        let stmt = Statement::prepare(inner.db, sql)?;
        stmt.bind_all(params)?;

        // SAFETY: stmt is valid
        let rc = unsafe { ffi::sqlite3_step(stmt.raw) };
        match rc {
            ffi::SQLITE_DONE | ffi::SQLITE_ROW => {
                // SAFETY: db is valid
                let changes = unsafe { ffi::sqlite3_changes(inner.db) };
                tracing::trace!(sql = %sql, changes, "Executed statement");
                Ok(u64::try_from(changes).unwrap_or(0))
            }
            _ => Err(stmt.error()),
        }
    }

    /// Prepare and execute a query, returning all rows.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Vec<Value>>> {
        let inner = self.lock();
        let stmt = Statement::prepare(inner.db, sql)?;
        stmt.bind_all(params)?;

        // SAFETY: stmt is valid
        let col_count = unsafe { ffi::sqlite3_column_count(stmt.raw) };
        let mut rows = Vec::new();
        loop {
            // SAFETY: stmt is valid
            let rc = unsafe { ffi::sqlite3_step(stmt.raw) };
            match rc {
                ffi::SQLITE_ROW => {
                    let row = (0..col_count)
                        // SAFETY: stmt is valid, we just got SQLITE_ROW
                        .map(|i| unsafe { types::read_column(stmt.raw, i) })
                        .collect();
                    rows.push(row);
                }
                ffi::SQLITE_DONE => break,
                _ => return Err(stmt.error()),
            }
        }

        tracing::trace!(sql = %sql, params = params.len(), rows = rows.len(), "Executed query");
        Ok(rows)
    }

    /// Column names of the result of `sql`, without running it.
    pub fn columns(&self, sql: &str) -> Result<Vec<String>> {
        let inner = self.lock();
        let stmt = Statement::prepare(inner.db, sql)?;
        // SAFETY: stmt is valid
        let col_count = unsafe { ffi::sqlite3_column_count(stmt.raw) };
        Ok((0..col_count)
            // SAFETY: stmt is valid
            .map(|i| unsafe { types::column_name(stmt.raw, i) }.unwrap_or_else(|| format!("col{i}")))
            .collect())
    }

    /// First column of the first row.
    ///
    /// Fails with `NotFound` when the query returns no rows.
    pub fn query_scalar(&self, sql: &str, params: &[Value]) -> Result<Value> {
        self.query(sql, params)?
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .ok_or_else(|| {
                Error::Query(QueryError {
                    kind: QueryErrorKind::NotFound,
                    sql: Some(sql.to_string()),
                    message: "Query returned no rows".to_string(),
                    source: None,
                })
            })
    }
}

impl DatabaseConnection for SqliteConnection {
    fn vendor(&self) -> Vendor {
        Vendor::Sqlite
    }

    fn features(&self) -> &Features {
        &self.features
    }
}

impl Drop for SqliteConnection {
    fn drop(&mut self) {
        let inner = self.lock();
        if !inner.db.is_null() {
            // SAFETY: db is valid and no statement outlives the lock
            unsafe {
                ffi::sqlite3_close_v2(inner.db);
            }
        }
    }
}

/// A prepared statement, finalized on drop.
struct Statement<'a> {
    raw: *mut ffi::sqlite3_stmt,
    db: *mut ffi::sqlite3,
    sql: &'a str,
}

impl<'a> Statement<'a> {
    fn prepare(db: *mut ffi::sqlite3, sql: &'a str) -> Result<Self> {
        let c_sql = c_string(sql)?;
        let mut raw: *mut ffi::sqlite3_stmt = ptr::null_mut();

        // SAFETY: All pointers are valid
        let rc = unsafe {
            ffi::sqlite3_prepare_v2(
                db,
                c_sql.as_ptr(),
                c_sql.as_bytes().len() as c_int,
                &mut raw,
                ptr::null_mut(),
            )
        };

        let stmt = Self { raw, db, sql };
        if rc != ffi::SQLITE_OK {
            return Err(stmt.error());
        }
        Ok(stmt)
    }

    fn bind_all(&self, params: &[Value]) -> Result<()> {
        for (i, param) in params.iter().enumerate() {
            let index = c_int::try_from(i + 1).unwrap_or(c_int::MAX);
            // SAFETY: stmt is valid, index is 1-based
            let rc = unsafe { types::bind_value(self.raw, index, param) };
            if rc != ffi::SQLITE_OK {
                // SAFETY: db is valid
                let msg = unsafe { errmsg(self.db) };
                return Err(query_error(
                    rc,
                    self.sql,
                    format!("Failed to bind parameter {}: {}", i + 1, msg),
                ));
            }
        }
        Ok(())
    }

    fn error(&self) -> Error {
        // SAFETY: db is valid
        let (code, msg) = unsafe { (ffi::sqlite3_errcode(self.db), errmsg(self.db)) };
        query_error(code, self.sql, msg)
    }
}

impl Drop for Statement<'_> {
    fn drop(&mut self) {
        if !self.raw.is_null() {
            // SAFETY: raw came from sqlite3_prepare_v2 and is finalized once
            unsafe {
                ffi::sqlite3_finalize(self.raw);
            }
        }
    }
}

fn c_string(sql: &str) -> Result<CString> {
    CString::new(sql).map_err(|_| {
        Error::Query(QueryError {
            kind: QueryErrorKind::Syntax,
            sql: Some(sql.to_string()),
            message: "SQL contains null byte".to_string(),
            source: None,
        })
    })
}

/// # Safety
/// `db` must be a valid connection handle.
unsafe fn errmsg(db: *mut ffi::sqlite3) -> String {
    // SAFETY: guaranteed by the caller
    unsafe {
        let ptr = ffi::sqlite3_errmsg(db);
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

fn error_string(code: c_int) -> String {
    // SAFETY: sqlite3_errstr returns a static string for any code
    unsafe {
        let ptr = ffi::sqlite3_errstr(code);
        if ptr.is_null() {
            format!("SQLite error {code}")
        } else {
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    }
}

fn query_error(code: c_int, sql: &str, message: String) -> Error {
    tracing::debug!(code, sql = %sql, error = %message, "SQLite error");
    Error::Query(QueryError {
        kind: error_code_to_kind(code),
        sql: Some(sql.to_string()),
        message,
        source: None,
    })
}

fn error_code_to_kind(code: c_int) -> QueryErrorKind {
    match code & 0xff {
        ffi::SQLITE_CONSTRAINT => QueryErrorKind::Constraint,
        ffi::SQLITE_NOTFOUND => QueryErrorKind::NotFound,
        _ => QueryErrorKind::Database,
    }
}
