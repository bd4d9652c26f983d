//! Field type metadata used to pick column and cast target types.
//!
//! Function nodes only ever ask two questions of a declared output type: its
//! internal kind (to branch per target type) and the SQL type name a given
//! backend uses for it, either as a column type or as a `CAST` target.

use crate::connection::Vendor;

/// Declared output type of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Bounded or unbounded character data
    Char { max_length: Option<u32> },
    /// Large text
    Text,
    Integer,
    BigInteger,
    /// Double precision floating point
    Float,
    /// Fixed precision number
    Decimal {
        max_digits: Option<u8>,
        decimal_places: Option<u8>,
    },
    Boolean,
    Date,
    DateTime,
    Time,
    Json,
    Binary,
    Uuid,
}

impl FieldType {
    /// Shorthand for a `Char` with a maximum length.
    pub const fn char(max_length: u32) -> Self {
        FieldType::Char {
            max_length: Some(max_length),
        }
    }

    /// Shorthand for a `Decimal` with precision and scale.
    pub const fn decimal(max_digits: u8, decimal_places: u8) -> Self {
        FieldType::Decimal {
            max_digits: Some(max_digits),
            decimal_places: Some(decimal_places),
        }
    }

    /// Stable name of the field kind, used when a dialect branches on the
    /// declared target type.
    pub const fn internal_type(&self) -> &'static str {
        match self {
            FieldType::Char { .. } => "CharField",
            FieldType::Text => "TextField",
            FieldType::Integer => "IntegerField",
            FieldType::BigInteger => "BigIntegerField",
            FieldType::Float => "FloatField",
            FieldType::Decimal { .. } => "DecimalField",
            FieldType::Boolean => "BooleanField",
            FieldType::Date => "DateField",
            FieldType::DateTime => "DateTimeField",
            FieldType::Time => "TimeField",
            FieldType::Json => "JSONField",
            FieldType::Binary => "BinaryField",
            FieldType::Uuid => "UUIDField",
        }
    }

    /// Column type name on the given backend.
    pub fn db_type(&self, vendor: Vendor) -> String {
        match vendor {
            Vendor::Sqlite => self.sqlite_type(),
            Vendor::Postgresql => self.postgres_type(),
            Vendor::Mysql => self.mysql_type(),
            Vendor::Oracle => self.oracle_type(),
            Vendor::Other(_) => self.ansi_type(),
        }
    }

    /// Type name used as the target of `CAST(... AS <type>)`.
    ///
    /// Falls back to [`FieldType::db_type`] unless the backend has a
    /// dedicated cast type for this kind.
    pub fn cast_db_type(&self, vendor: Vendor) -> String {
        match (vendor, self) {
            (Vendor::Sqlite, FieldType::Char { max_length: None }) => "text".to_string(),
            (Vendor::Postgresql, FieldType::Char { max_length: None }) => "varchar".to_string(),
            (Vendor::Mysql, FieldType::Char { max_length: None } | FieldType::Text) => {
                "char".to_string()
            }
            (Vendor::Mysql, FieldType::Char { max_length: Some(n) }) => format!("char({n})"),
            (Vendor::Mysql, FieldType::Integer | FieldType::BigInteger) => {
                "signed integer".to_string()
            }
            (
                Vendor::Mysql,
                FieldType::Decimal {
                    max_digits: Some(digits),
                    decimal_places: Some(places),
                },
            ) => format!("decimal({digits}, {places})"),
            (Vendor::Oracle, FieldType::Char { max_length: None } | FieldType::Text) => {
                "NVARCHAR2(2000)".to_string()
            }
            _ => self.db_type(vendor),
        }
    }

    fn sqlite_type(&self) -> String {
        match self {
            FieldType::Char { max_length: Some(n) } => format!("varchar({n})"),
            FieldType::Char { max_length: None } => "varchar".to_string(),
            FieldType::Text | FieldType::Json => "text".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::BigInteger => "bigint".to_string(),
            FieldType::Float => "real".to_string(),
            FieldType::Decimal { .. } => "decimal".to_string(),
            FieldType::Boolean => "bool".to_string(),
            FieldType::Date => "date".to_string(),
            FieldType::DateTime => "datetime".to_string(),
            FieldType::Time => "time".to_string(),
            FieldType::Binary => "BLOB".to_string(),
            FieldType::Uuid => "char(32)".to_string(),
        }
    }

    fn postgres_type(&self) -> String {
        match self {
            FieldType::Char { max_length: Some(n) } => format!("varchar({n})"),
            FieldType::Char { max_length: None } => "varchar".to_string(),
            FieldType::Text => "text".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::BigInteger => "bigint".to_string(),
            FieldType::Float => "double precision".to_string(),
            FieldType::Decimal {
                max_digits: Some(digits),
                decimal_places: Some(places),
            } => format!("numeric({digits}, {places})"),
            FieldType::Decimal { .. } => "numeric".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Date => "date".to_string(),
            FieldType::DateTime => "timestamp with time zone".to_string(),
            FieldType::Time => "time".to_string(),
            FieldType::Json => "jsonb".to_string(),
            FieldType::Binary => "bytea".to_string(),
            FieldType::Uuid => "uuid".to_string(),
        }
    }

    fn mysql_type(&self) -> String {
        match self {
            FieldType::Char { max_length: Some(n) } => format!("varchar({n})"),
            FieldType::Char { max_length: None } | FieldType::Text => "longtext".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::BigInteger => "bigint".to_string(),
            FieldType::Float => "double precision".to_string(),
            FieldType::Decimal {
                max_digits: Some(digits),
                decimal_places: Some(places),
            } => format!("numeric({digits}, {places})"),
            FieldType::Decimal { .. } => "numeric".to_string(),
            FieldType::Boolean => "bool".to_string(),
            FieldType::Date => "date".to_string(),
            FieldType::DateTime => "datetime(6)".to_string(),
            FieldType::Time => "time(6)".to_string(),
            FieldType::Json => "json".to_string(),
            FieldType::Binary => "longblob".to_string(),
            FieldType::Uuid => "char(32)".to_string(),
        }
    }

    fn oracle_type(&self) -> String {
        match self {
            FieldType::Char { max_length: Some(n) } => format!("NVARCHAR2({n})"),
            FieldType::Char { max_length: None } => "NVARCHAR2(2000)".to_string(),
            FieldType::Text | FieldType::Json => "NCLOB".to_string(),
            FieldType::Integer => "NUMBER(11)".to_string(),
            FieldType::BigInteger => "NUMBER(19)".to_string(),
            FieldType::Float => "DOUBLE PRECISION".to_string(),
            FieldType::Decimal {
                max_digits: Some(digits),
                decimal_places: Some(places),
            } => format!("NUMBER({digits}, {places})"),
            FieldType::Decimal { .. } => "NUMBER".to_string(),
            FieldType::Boolean => "NUMBER(1)".to_string(),
            FieldType::Date => "DATE".to_string(),
            FieldType::DateTime | FieldType::Time => "TIMESTAMP".to_string(),
            FieldType::Binary => "BLOB".to_string(),
            FieldType::Uuid => "VARCHAR2(32)".to_string(),
        }
    }

    fn ansi_type(&self) -> String {
        match self {
            FieldType::Char { max_length: Some(n) } => format!("VARCHAR({n})"),
            FieldType::Char { max_length: None } => "VARCHAR".to_string(),
            FieldType::Text => "TEXT".to_string(),
            FieldType::Integer => "INTEGER".to_string(),
            FieldType::BigInteger => "BIGINT".to_string(),
            FieldType::Float => "DOUBLE PRECISION".to_string(),
            FieldType::Decimal {
                max_digits: Some(digits),
                decimal_places: Some(places),
            } => format!("NUMERIC({digits}, {places})"),
            FieldType::Decimal { .. } => "NUMERIC".to_string(),
            FieldType::Boolean => "BOOLEAN".to_string(),
            FieldType::Date => "DATE".to_string(),
            FieldType::DateTime => "TIMESTAMP".to_string(),
            FieldType::Time => "TIME".to_string(),
            FieldType::Json => "JSON".to_string(),
            FieldType::Binary => "BLOB".to_string(),
            FieldType::Uuid => "UUID".to_string(),
        }
    }

    /// Check if this type is a date/time type.
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            FieldType::Date | FieldType::DateTime | FieldType::Time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_type_names() {
        assert_eq!(FieldType::Float.internal_type(), "FloatField");
        assert_eq!(FieldType::Json.internal_type(), "JSONField");
        assert_eq!(FieldType::char(10).internal_type(), "CharField");
    }

    #[test]
    fn test_temporal_types() {
        for ty in [FieldType::Date, FieldType::DateTime, FieldType::Time] {
            assert!(ty.is_temporal());
        }
        assert!(!FieldType::Text.is_temporal());
        assert!(!FieldType::Integer.is_temporal());
    }

    #[test]
    fn test_db_type_per_vendor() {
        assert_eq!(FieldType::Json.db_type(Vendor::Postgresql), "jsonb");
        assert_eq!(FieldType::Json.db_type(Vendor::Sqlite), "text");
        assert_eq!(FieldType::Json.db_type(Vendor::Mysql), "json");
        assert_eq!(FieldType::Json.db_type(Vendor::Oracle), "NCLOB");
        assert_eq!(FieldType::DateTime.db_type(Vendor::Sqlite), "datetime");
        assert_eq!(
            FieldType::decimal(10, 2).db_type(Vendor::Postgresql),
            "numeric(10, 2)"
        );
    }

    #[test]
    fn test_cast_db_type_overrides() {
        assert_eq!(
            FieldType::Integer.cast_db_type(Vendor::Mysql),
            "signed integer"
        );
        assert_eq!(FieldType::Text.cast_db_type(Vendor::Mysql), "char");
        assert_eq!(FieldType::char(20).cast_db_type(Vendor::Mysql), "char(20)");
        assert_eq!(
            FieldType::Text.cast_db_type(Vendor::Oracle),
            "NVARCHAR2(2000)"
        );
        assert_eq!(
            FieldType::Char { max_length: None }.cast_db_type(Vendor::Sqlite),
            "text"
        );
        // No dedicated cast type: same as the column type.
        assert_eq!(FieldType::Text.cast_db_type(Vendor::Sqlite), "text");
        assert_eq!(
            FieldType::Integer.cast_db_type(Vendor::Postgresql),
            "integer"
        );
    }

    #[test]
    fn test_other_vendor_uses_ansi_names() {
        let vendor = Vendor::Other("duckdb");
        assert_eq!(FieldType::Text.db_type(vendor), "TEXT");
        assert_eq!(FieldType::char(5).cast_db_type(vendor), "VARCHAR(5)");
    }
}
