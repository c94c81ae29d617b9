use std::fmt;

/// A column's storage type in the wide-column store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Float,
    Inet,
    Int,
    Smallint,
    Text,
    Time,
    Timestamp,
    Timeuuid,
    Tinyint,
    Uuid,
    Varchar,
    Varint,

    /// A type name the mapper does not know; emitted verbatim.
    Custom(String),
}

impl Type {
    /// Maps a source scalar type name onto a column type.
    ///
    /// Both the neutral names used in tags (`string`, `int32`, `timestamp`,
    /// ...) and Rust type names (`String`, `i32`, `Timestamp`, ...) are
    /// recognized. Path prefixes are ignored. Names the table does not
    /// contain pass through as [`Type::Custom`].
    pub fn from_source(name: &str) -> Type {
        let name = name.trim();
        let base = name.rsplit("::").next().unwrap_or(name);

        match base {
            "string" | "String" | "str" => Type::Text,
            "int" | "int32" | "i32" => Type::Int,
            "int8" | "int16" | "i16" => Type::Smallint,
            "int64" | "i64" => Type::Bigint,
            "byte" | "i8" | "u8" => Type::Tinyint,
            "bool" => Type::Boolean,
            "uuid" | "Uuid" => Type::Uuid,
            "time" => Type::Time,
            "timestamp" | "Timestamp" => Type::Timestamp,
            "counter" => Type::Counter,
            "float32" | "f32" => Type::Float,
            "float64" | "f64" => Type::Double,
            _ => Type::from_cql(base).unwrap_or_else(|| Type::Custom(name.to_string())),
        }
    }

    /// Parses a store type keyword, case-insensitively.
    pub fn from_cql(name: &str) -> Option<Type> {
        Some(match name.to_ascii_lowercase().as_str() {
            "ascii" => Type::Ascii,
            "bigint" => Type::Bigint,
            "blob" => Type::Blob,
            "boolean" => Type::Boolean,
            "counter" => Type::Counter,
            "date" => Type::Date,
            "decimal" => Type::Decimal,
            "double" => Type::Double,
            "float" => Type::Float,
            "inet" => Type::Inet,
            "int" => Type::Int,
            "smallint" => Type::Smallint,
            "text" => Type::Text,
            "time" => Type::Time,
            "timestamp" => Type::Timestamp,
            "timeuuid" => Type::Timeuuid,
            "tinyint" => Type::Tinyint,
            "uuid" => Type::Uuid,
            "varchar" => Type::Varchar,
            "varint" => Type::Varint,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Type::Ascii => "ascii",
            Type::Bigint => "bigint",
            Type::Blob => "blob",
            Type::Boolean => "boolean",
            Type::Counter => "counter",
            Type::Date => "date",
            Type::Decimal => "decimal",
            Type::Double => "double",
            Type::Float => "float",
            Type::Inet => "inet",
            Type::Int => "int",
            Type::Smallint => "smallint",
            Type::Text => "text",
            Type::Time => "time",
            Type::Timestamp => "timestamp",
            Type::Timeuuid => "timeuuid",
            Type::Tinyint => "tinyint",
            Type::Uuid => "uuid",
            Type::Varchar => "varchar",
            Type::Varint => "varint",
            Type::Custom(name) => name,
        }
    }

    /// Values of these types are written as quoted string literals.
    pub fn is_textual(&self) -> bool {
        matches!(self, Type::Text | Type::Ascii | Type::Varchar | Type::Inet)
    }

    pub fn is_counter(&self) -> bool {
        matches!(self, Type::Counter)
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Type::Timestamp)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
