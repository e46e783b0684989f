#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts declared storage column types (e.g. `VARCHAR(255)`) into the host
//! language types used by generated code.
//!
//! Unrecognised storage types resolve to the text type instead of failing.
//! Generation must never stop because of an exotic column type; the operator
//! adjusts the emitted type by hand when the fallback is wrong.

use std::fmt::Display;

/// Host language types a storage column can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostType {
    /// `string`
    Text,
    /// `int`
    Integer,
    /// `int64`
    BigInteger,
    /// `float64`
    Float,
    /// `bool`
    Boolean,
    /// `time.Time`
    Temporal,
}

impl HostType {
    /// The type as written in generated source.
    pub fn host_name(&self) -> &'static str {
        match self {
            HostType::Text => "string",
            HostType::Integer => "int",
            HostType::BigInteger => "int64",
            HostType::Float => "float64",
            HostType::Boolean => "bool",
            HostType::Temporal => "time.Time",
        }
    }

    /// True if generated files using this type need the time import.
    pub fn is_temporal(&self) -> bool {
        matches!(self, HostType::Temporal)
    }

    /// True for integer and floating-point types.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            HostType::Integer | HostType::BigInteger | HostType::Float
        )
    }

    /// Placeholder value used in API documentation annotations.
    pub fn doc_example(&self) -> &'static str {
        match self {
            HostType::Text => "sample",
            HostType::Integer | HostType::BigInteger => "1",
            HostType::Float => "9.99",
            HostType::Boolean => "true",
            HostType::Temporal => "2024-01-01T10:00:00Z",
        }
    }
}

impl Display for HostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.host_name())
    }
}

/// Trait for resolving storage column types to host types.
pub trait TypeMapper {
    /// Maps an upper-cased storage type token (e.g. `DECIMAL(10,2)`) to a host type.
    ///
    /// This is total: every input produces a host type.
    fn resolve(&self, storage_type: &str) -> HostType;
}

/// Ordered prefix table for MySQL column types. First match wins.
const MYSQL_TYPE_PREFIXES: &[(&str, HostType)] = &[
    // Integers
    ("TINYINT", HostType::Integer),
    ("SMALLINT", HostType::Integer),
    ("MEDIUMINT", HostType::Integer),
    ("BIGINT", HostType::BigInteger),
    ("INT", HostType::Integer),
    // Strings
    ("VARCHAR", HostType::Text),
    ("CHAR", HostType::Text),
    ("TINYTEXT", HostType::Text),
    ("MEDIUMTEXT", HostType::Text),
    ("LONGTEXT", HostType::Text),
    ("TEXT", HostType::Text),
    // Real numbers
    ("FLOAT", HostType::Float),
    ("DOUBLE", HostType::Float),
    ("DECIMAL", HostType::Float),
    // Booleans
    ("BOOLEAN", HostType::Boolean),
    ("BOOL", HostType::Boolean),
    // Temporal
    ("DATETIME", HostType::Temporal),
    ("DATE", HostType::Temporal),
    ("TIMESTAMP", HostType::Temporal),
];

/// The default `TypeMapper` for MySQL column declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlTypeMapper;

impl TypeMapper for MySqlTypeMapper {
    fn resolve(&self, storage_type: &str) -> HostType {
        let token = storage_type.trim().to_uppercase();

        MYSQL_TYPE_PREFIXES
            .iter()
            .find(|(prefix, _)| token.starts_with(prefix))
            .map(|(_, host)| *host)
            .unwrap_or(HostType::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(t: &str) -> HostType {
        MySqlTypeMapper.resolve(t)
    }

    #[test]
    fn test_string_family() {
        for t in ["VARCHAR(255)", "CHAR(36)", "TEXT", "TINYTEXT", "MEDIUMTEXT", "LONGTEXT"] {
            assert_eq!(resolve(t), HostType::Text, "{}", t);
        }
    }

    #[test]
    fn test_integer_family() {
        for t in ["INT", "INT(11)", "INTEGER", "TINYINT(1)", "SMALLINT", "MEDIUMINT"] {
            assert_eq!(resolve(t), HostType::Integer, "{}", t);
        }
        assert_eq!(resolve("BIGINT"), HostType::BigInteger);
        assert_eq!(resolve("BIGINT UNSIGNED"), HostType::BigInteger);
    }

    #[test]
    fn test_real_family() {
        for t in ["FLOAT", "DOUBLE", "DECIMAL(10,2)"] {
            assert_eq!(resolve(t), HostType::Float, "{}", t);
        }
    }

    #[test]
    fn test_boolean_and_temporal_families() {
        assert_eq!(resolve("BOOL"), HostType::Boolean);
        assert_eq!(resolve("BOOLEAN"), HostType::Boolean);
        assert_eq!(resolve("DATE"), HostType::Temporal);
        assert_eq!(resolve("DATETIME"), HostType::Temporal);
        assert_eq!(resolve("TIMESTAMP"), HostType::Temporal);
    }

    #[test]
    fn test_lowercase_tokens_are_accepted() {
        assert_eq!(resolve("decimal(8,3)"), HostType::Float);
        assert_eq!(resolve("  varchar(10) "), HostType::Text);
    }

    #[test]
    fn test_unknown_types_fall_back_to_text() {
        for t in ["JSON", "BLOB", "ENUM('a','b')", "GEOMETRY", "", "UUID"] {
            assert_eq!(resolve(t), HostType::Text, "{}", t);
        }
    }

    #[test]
    fn test_host_names() {
        assert_eq!(HostType::Float.to_string(), "float64");
        assert_eq!(HostType::Temporal.to_string(), "time.Time");
        assert!(HostType::Temporal.is_temporal());
        assert!(HostType::BigInteger.is_numeric());
        assert!(!HostType::Boolean.is_numeric());
    }
}
