//! Value encoding and decoding between sqlfunc and SQLite.
//!
//! SQLite has five storage classes (INTEGER, REAL, TEXT, BLOB and NULL).
//! Booleans bind as 0/1, decimals and JSON documents bind as text. JSON
//! function results come back as text; use [`Value::to_json`] to decode them.

use libsqlite3_sys as ffi;
use sqlfunc_core::Value;
use std::ffi::{CStr, c_int};

/// Bind a Value to a prepared statement parameter.
///
/// # Safety
/// - `stmt` must be a valid, non-null prepared statement handle
/// - `index` must be a valid 1-based parameter index
pub unsafe fn bind_value(stmt: *mut ffi::sqlite3_stmt, index: c_int, value: &Value) -> c_int {
    // SAFETY: the caller guarantees `stmt` and `index`; SQLITE_TRANSIENT makes
    // SQLite copy text and blob buffers before returning.
    unsafe {
        match value {
            Value::Null => ffi::sqlite3_bind_null(stmt, index),
            Value::Bool(b) => ffi::sqlite3_bind_int(stmt, index, c_int::from(*b)),
            Value::Int(v) => ffi::sqlite3_bind_int(stmt, index, *v),
            Value::BigInt(v) => ffi::sqlite3_bind_int64(stmt, index, *v),
            Value::Double(v) => ffi::sqlite3_bind_double(stmt, index, *v),
            Value::Decimal(s) | Value::Text(s) => bind_text(stmt, index, s),
            Value::Json(json) => bind_text(stmt, index, &json.to_string()),
            Value::Bytes(b) => ffi::sqlite3_bind_blob(
                stmt,
                index,
                b.as_ptr().cast(),
                b.len() as c_int,
                ffi::SQLITE_TRANSIENT(),
            ),
        }
    }
}

unsafe fn bind_text(stmt: *mut ffi::sqlite3_stmt, index: c_int, text: &str) -> c_int {
    let bytes = text.as_bytes();
    // SAFETY: see `bind_value`
    unsafe {
        ffi::sqlite3_bind_text(
            stmt,
            index,
            bytes.as_ptr().cast(),
            bytes.len() as c_int,
            ffi::SQLITE_TRANSIENT(),
        )
    }
}

/// Read a column value from the current result row.
///
/// Integers come back as `Int` when they fit in 32 bits, else `BigInt`.
/// JSON functions return TEXT, so documents come back as `Text`.
///
/// # Safety
/// - `stmt` must be a valid statement positioned on a row (`SQLITE_ROW`)
/// - `index` must be a valid 0-based column index
pub unsafe fn read_column(stmt: *mut ffi::sqlite3_stmt, index: c_int) -> Value {
    // SAFETY: guaranteed by the caller
    unsafe {
        match ffi::sqlite3_column_type(stmt, index) {
            ffi::SQLITE_INTEGER => {
                let v = ffi::sqlite3_column_int64(stmt, index);
                i32::try_from(v).map_or(Value::BigInt(v), Value::Int)
            }
            ffi::SQLITE_FLOAT => Value::Double(ffi::sqlite3_column_double(stmt, index)),
            ffi::SQLITE_TEXT => {
                let ptr = ffi::sqlite3_column_text(stmt, index);
                let len = ffi::sqlite3_column_bytes(stmt, index);
                if ptr.is_null() {
                    Value::Null
                } else {
                    let slice = std::slice::from_raw_parts(ptr.cast::<u8>(), len as usize);
                    Value::Text(String::from_utf8_lossy(slice).into_owned())
                }
            }
            ffi::SQLITE_BLOB => {
                let ptr = ffi::sqlite3_column_blob(stmt, index);
                let len = ffi::sqlite3_column_bytes(stmt, index);
                if ptr.is_null() || len == 0 {
                    Value::Bytes(Vec::new())
                } else {
                    let slice = std::slice::from_raw_parts(ptr.cast::<u8>(), len as usize);
                    Value::Bytes(slice.to_vec())
                }
            }
            _ => Value::Null,
        }
    }
}

/// Get the column name from a result.
///
/// # Safety
/// `stmt` must be a valid prepared statement handle.
pub unsafe fn column_name(stmt: *mut ffi::sqlite3_stmt, index: c_int) -> Option<String> {
    // SAFETY: guaranteed by the caller; SQLite owns the returned string
    unsafe {
        let ptr = ffi::sqlite3_column_name(stmt, index);
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(String::from)
        }
    }
}
