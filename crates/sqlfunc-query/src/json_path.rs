//! Nested JSON key paths.
//!
//! Keys use the double-underscore notation: `profession__specialization__1`
//! addresses `profession.specialization[1]`. A segment made only of ASCII
//! digits is an array index and `#` means "append to the array".
//!
//! A key is parsed once into a [`JsonPath`] and rendered either as a generic
//! SQL/JSON path (`$."profession"."specialization"[1]`) or as a PostgreSQL
//! text-array path literal (`'{"profession","specialization",1}'`).

use sqlfunc_core::{ValidationError, ValidationErrorKind};
use std::fmt;

/// Separator between key segments.
pub const SEPARATOR: &str = "__";

/// Segment that appends to an array instead of addressing an element.
pub const APPEND_MARKER: &str = "#";

/// Index used for [`PathSegment::Append`] in PostgreSQL paths. `jsonb_set`
/// with `create_missing` inserts past-the-end indexes at the end of the array.
pub const POSTGRES_APPEND_INDEX: i64 = i32::MAX as i64;

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member
    Key(String),
    /// Array element, below [`POSTGRES_APPEND_INDEX`]
    Index(u32),
    /// Past the last array element
    Append,
}

/// A parsed JSON key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Parse a double-underscore key.
    ///
    /// ```
    /// use sqlfunc_query::{JsonPath, PathSegment};
    ///
    /// let path = JsonPath::parse("tags__#").unwrap();
    /// assert_eq!(
    ///     path.segments(),
    ///     &[PathSegment::Key("tags".to_string()), PathSegment::Append]
    /// );
    /// assert_eq!(path.to_generic(), "$.\"tags\"[#]");
    /// ```
    pub fn parse(key: &str) -> Result<Self, ValidationError> {
        if key.is_empty() {
            return Err(invalid(key, "key is empty"));
        }
        let segments = key
            .split(SEPARATOR)
            .map(|part| parse_segment(key, part))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Does the path end in or pass through an append marker?
    pub fn has_append(&self) -> bool {
        self.segments.contains(&PathSegment::Append)
    }

    /// Generic SQL/JSON path, as used by `JSON_SET`, `JSON_REMOVE` and
    /// `JSON_TRANSFORM`.
    pub fn to_generic(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    path.push_str(".\"");
                    path.push_str(&key.replace('\\', "\\\\").replace('"', "\\\""));
                    path.push('"');
                }
                PathSegment::Index(index) => path.push_str(&format!("[{index}]")),
                PathSegment::Append => path.push_str("[#]"),
            }
        }
        path
    }

    /// PostgreSQL text-array path, unquoted: `{"a","b",1}`.
    pub fn to_postgres_array(&self) -> String {
        let elements: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Key(key) => {
                    format!("\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\""))
                }
                PathSegment::Index(index) => index.to_string(),
                PathSegment::Append => POSTGRES_APPEND_INDEX.to_string(),
            })
            .collect();
        format!("{{{}}}", elements.join(","))
    }

    /// PostgreSQL text-array path as a SQL string literal: `'{"a","b",1}'`.
    pub fn to_postgres_literal(&self) -> String {
        sql_string_literal(&self.to_postgres_array())
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_generic())
    }
}

/// Quote text as a SQL string literal, doubling embedded single quotes.
pub fn sql_string_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn parse_segment(key: &str, part: &str) -> Result<PathSegment, ValidationError> {
    if part.is_empty() {
        return Err(invalid(key, "empty path segment"));
    }
    if part == APPEND_MARKER {
        return Ok(PathSegment::Append);
    }
    if part.bytes().all(|b| b.is_ascii_digit()) {
        return match part.parse::<u32>() {
            Ok(index) if i64::from(index) < POSTGRES_APPEND_INDEX => Ok(PathSegment::Index(index)),
            _ => Err(invalid(key, "array index out of range")),
        };
    }
    Ok(PathSegment::Key(part.to_string()))
}

fn invalid(key: &str, reason: &str) -> ValidationError {
    ValidationError::new(
        "JSONPath",
        ValidationErrorKind::InvalidPath,
        format!("Invalid JSON key path {key:?}: {reason}."),
    )
}
