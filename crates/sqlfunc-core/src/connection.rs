//! Backend descriptors.
//!
//! Compiling an expression never talks to a server. All it needs from a
//! connection is:
//!
//! - [`Vendor`] - which SQL dialect to emit
//! - [`Features`] - capability flags that gate or reshape individual functions
//! - identifier quoting
//!
//! [`DatabaseConnection`] captures exactly that. [`ConnectionInfo`] is a
//! plain in-memory implementation for code that generates SQL without an
//! open connection.

use crate::error::{ConfigError, Error, Result};
use crate::identifiers::{quote_ident, quote_ident_mysql, quote_ident_oracle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL dialect of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// SQLite (uses ?1, ?2 placeholders)
    Sqlite,
    /// PostgreSQL (uses $1, $2 placeholders)
    Postgresql,
    /// MySQL and MariaDB (uses ? placeholders)
    Mysql,
    /// Oracle (uses :1, :2 placeholders)
    Oracle,
    /// Any other backend, identified by name
    Other(&'static str),
}

impl Vendor {
    /// Vendor identifier as reported by a connection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Vendor::Sqlite => "sqlite",
            Vendor::Postgresql => "postgresql",
            Vendor::Mysql => "mysql",
            Vendor::Oracle => "oracle",
            Vendor::Other(name) => name,
        }
    }

    /// Map a vendor name to one of the known dialects.
    ///
    /// Returns `None` for names that are not one of the four dialects.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Some(Vendor::Sqlite),
            "postgresql" | "postgres" => Some(Vendor::Postgresql),
            "mysql" | "mariadb" => Some(Vendor::Mysql),
            "oracle" => Some(Vendor::Oracle),
            _ => None,
        }
    }

    /// Generate a placeholder for the given parameter index (1-based).
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Vendor::Postgresql => format!("${index}"),
            Vendor::Sqlite => format!("?{index}"),
            Vendor::Oracle => format!(":{index}"),
            Vendor::Mysql | Vendor::Other(_) => "?".to_string(),
        }
    }

    /// Quote an identifier for this dialect.
    pub fn quote_name(self, name: &str) -> String {
        match self {
            Vendor::Mysql => quote_ident_mysql(name),
            Vendor::Oracle => quote_ident_oracle(name),
            Vendor::Sqlite | Vendor::Postgresql | Vendor::Other(_) => quote_ident(name),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability flags of a backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// The backend has a `JSON_OBJECT` constructor.
    pub has_json_object_function: bool,
    /// The backend can update documents in place through `JsonSet`.
    pub has_json_set_function: bool,
    /// PostgreSQL 16 or newer (SQL/JSON constructors available).
    pub is_postgresql_16: bool,
    /// Parameters are bound server side, so untyped parameters cannot be
    /// used where the server needs to infer a type.
    pub uses_server_side_binding: bool,
    /// The MySQL-family server is MariaDB.
    pub is_mariadb: bool,
}

impl Features {
    /// Defaults for a current release of each backend.
    pub fn for_vendor(vendor: Vendor) -> Self {
        match vendor {
            Vendor::Sqlite => Self {
                has_json_object_function: true,
                has_json_set_function: true,
                ..Self::default()
            },
            Vendor::Postgresql => Self {
                has_json_object_function: true,
                has_json_set_function: true,
                is_postgresql_16: true,
                ..Self::default()
            },
            Vendor::Mysql | Vendor::Oracle => Self {
                has_json_object_function: true,
                ..Self::default()
            },
            Vendor::Other(_) => Self::default(),
        }
    }
}

/// What SQL generation needs to know about a connection.
pub trait DatabaseConnection {
    /// The dialect of this connection.
    fn vendor(&self) -> Vendor;

    /// Capability flags of this connection.
    fn features(&self) -> &Features;

    /// Quote an identifier (table, column, collation name).
    fn quote_name(&self, name: &str) -> String {
        self.vendor().quote_name(name)
    }
}

/// Offline backend description.
///
/// # Example
///
/// ```
/// use sqlfunc_core::{ConnectionInfo, DatabaseConnection, Vendor};
///
/// let conn = ConnectionInfo::postgres().postgresql_16(false);
/// assert_eq!(conn.vendor(), Vendor::Postgresql);
/// assert!(!DatabaseConnection::features(&conn).is_postgresql_16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Dialect to generate SQL for
    pub vendor: Vendor,
    /// Capability flags
    pub features: Features,
}

#[derive(Deserialize)]
struct ConnectionInfoConfig {
    vendor: String,
    #[serde(default)]
    features: Option<Features>,
}

impl ConnectionInfo {
    /// Describe a backend with its default feature set.
    pub fn new(vendor: Vendor) -> Self {
        Self {
            vendor,
            features: Features::for_vendor(vendor),
        }
    }

    /// SQLite with default features.
    pub fn sqlite() -> Self {
        Self::new(Vendor::Sqlite)
    }

    /// PostgreSQL with default features.
    pub fn postgres() -> Self {
        Self::new(Vendor::Postgresql)
    }

    /// MySQL with default features.
    pub fn mysql() -> Self {
        Self::new(Vendor::Mysql)
    }

    /// MariaDB: the MySQL dialect with `is_mariadb` set.
    pub fn mariadb() -> Self {
        Self::mysql().mariadb_server(true)
    }

    /// Oracle with default features.
    pub fn oracle() -> Self {
        Self::new(Vendor::Oracle)
    }

    /// Replace the whole feature set.
    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Set whether `JSON_OBJECT` is available.
    pub fn json_object_function(mut self, enabled: bool) -> Self {
        self.features.has_json_object_function = enabled;
        self
    }

    /// Set whether the server is PostgreSQL 16 or newer.
    pub fn postgresql_16(mut self, enabled: bool) -> Self {
        self.features.is_postgresql_16 = enabled;
        self
    }

    /// Set whether parameters are bound server side.
    pub fn server_side_binding(mut self, enabled: bool) -> Self {
        self.features.uses_server_side_binding = enabled;
        self
    }

    /// Set whether the MySQL-family server is MariaDB.
    pub fn mariadb_server(mut self, enabled: bool) -> Self {
        self.features.is_mariadb = enabled;
        self
    }

    /// Load a backend description from JSON.
    ///
    /// ```json
    /// {"vendor": "postgresql", "features": {"uses_server_side_binding": true}}
    /// ```
    ///
    /// When `features` is present it replaces the vendor defaults entirely;
    /// missing flags default to `false`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ConnectionInfoConfig = serde_json::from_str(json).map_err(|e| {
            Error::Config(ConfigError {
                message: format!("Invalid connection description: {e}"),
                source: Some(Box::new(e)),
            })
        })?;
        let vendor = Vendor::parse(&config.vendor).ok_or_else(|| {
            Error::Config(ConfigError {
                message: format!("Unknown database vendor: {:?}", config.vendor),
                source: None,
            })
        })?;
        let mut info = Self::new(vendor);
        if config.vendor.eq_ignore_ascii_case("mariadb") {
            info.features.is_mariadb = true;
        }
        if let Some(features) = config.features {
            info.features = features;
        }
        tracing::debug!(vendor = %info.vendor, features = ?info.features, "Loaded connection description");
        Ok(info)
    }
}

impl DatabaseConnection for ConnectionInfo {
    fn vendor(&self) -> Vendor {
        self.vendor
    }

    fn features(&self) -> &Features {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_names() {
        assert_eq!(Vendor::Postgresql.as_str(), "postgresql");
        assert_eq!(Vendor::Other("duckdb").as_str(), "duckdb");
        assert_eq!(Vendor::parse("postgres"), Some(Vendor::Postgresql));
        assert_eq!(Vendor::parse("MariaDB"), Some(Vendor::Mysql));
        assert_eq!(Vendor::parse("duckdb"), None);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Vendor::Postgresql.placeholder(3), "$3");
        assert_eq!(Vendor::Sqlite.placeholder(3), "?3");
        assert_eq!(Vendor::Mysql.placeholder(3), "?");
        assert_eq!(Vendor::Oracle.placeholder(3), ":3");
    }

    #[test]
    fn test_quote_name_per_vendor() {
        assert_eq!(Vendor::Postgresql.quote_name("nocase"), "\"nocase\"");
        assert_eq!(Vendor::Mysql.quote_name("utf8mb4_bin"), "`utf8mb4_bin`");
        assert_eq!(Vendor::Oracle.quote_name("binary_ci"), "\"BINARY_CI\"");
    }

    #[test]
    fn test_default_features() {
        let pg = Features::for_vendor(Vendor::Postgresql);
        assert!(pg.has_json_object_function);
        assert!(pg.is_postgresql_16);
        assert!(!pg.uses_server_side_binding);

        let other = Features::for_vendor(Vendor::Other("duckdb"));
        assert!(!other.has_json_object_function);
    }

    #[test]
    fn test_builder_overrides() {
        let conn = ConnectionInfo::postgres()
            .postgresql_16(false)
            .server_side_binding(true);
        assert!(!DatabaseConnection::features(&conn).is_postgresql_16);
        assert!(DatabaseConnection::features(&conn).uses_server_side_binding);

        let maria = ConnectionInfo::mariadb();
        assert_eq!(maria.vendor(), Vendor::Mysql);
        assert!(DatabaseConnection::features(&maria).is_mariadb);
    }

    #[test]
    fn test_from_json() {
        let conn = ConnectionInfo::from_json(r#"{"vendor": "mariadb"}"#).unwrap();
        assert_eq!(conn.vendor, Vendor::Mysql);
        assert!(conn.features.is_mariadb);

        let conn = ConnectionInfo::from_json(
            r#"{"vendor": "postgres", "features": {"has_json_object_function": true}}"#,
        )
        .unwrap();
        assert!(conn.features.has_json_object_function);
        assert!(!conn.features.is_postgresql_16);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            ConnectionInfo::from_json(r#"{"vendor": "duckdb"}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ConnectionInfo::from_json("not json"),
            Err(Error::Config(_))
        ));
    }
}
