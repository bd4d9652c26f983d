//! Core types for SQLFunc.
//!
//! This crate provides the pieces every other sqlfunc crate builds on:
//!
//! - `Value` for literals and bound parameters
//! - `FieldType` for declared output types and their per-backend names
//! - `DatabaseConnection` for the vendor and feature flags SQL generation needs
//! - `Error` with validation and not-supported categories

pub mod connection;
pub mod error;
pub mod identifiers;
pub mod types;
pub mod value;

pub use connection::{ConnectionInfo, DatabaseConnection, Features, Vendor};
pub use error::{
    ConfigError, ConnectionError, ConnectionErrorKind, Error, NotSupportedError, NotSupportedKind,
    QueryError, QueryErrorKind, Result, ValidationError, ValidationErrorKind,
};
pub use identifiers::{quote_ident, quote_ident_mysql, quote_ident_oracle};
pub use types::FieldType;
pub use value::Value;
