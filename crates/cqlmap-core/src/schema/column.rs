use super::Type;

use std::fmt;

/// Compiled metadata for one tagged field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Name of the field in the record type
    pub field_name: String,

    /// Ordinal of the field in the record type's field list. Generators and
    /// the binder address the record through this ordinal.
    pub field_index: usize,

    /// Lower-cased column name
    pub name: String,

    /// Storage type
    pub ty: ColumnType,

    /// Partition key ordinal, when the column is part of the partition key
    pub primary_key: Option<usize>,

    /// Clustering key ordinal, when the column is a clustering column
    pub clustering_key: Option<usize>,

    /// Clustering order entry
    pub order: Option<ClusteringOrder>,

    /// True when a secondary index is created for the column
    pub indexed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Scalar(Type),
    Collection(CollectionType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionType {
    pub kind: CollectionKind,

    /// Key type; only present for maps
    pub key: Option<Type>,

    /// Element type for lists and sets, value type for maps
    pub value: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Set,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusteringOrder {
    pub direction: Direction,
    pub ordinal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Column {
    pub fn is_partition_key(&self) -> bool {
        self.primary_key.is_some()
    }

    pub fn is_clustering_key(&self) -> bool {
        self.clustering_key.is_some()
    }

    /// True for partition and clustering key columns.
    pub fn is_key(&self) -> bool {
        self.is_partition_key() || self.is_clustering_key()
    }

    pub fn is_counter(&self) -> bool {
        matches!(&self.ty, ColumnType::Scalar(ty) if ty.is_counter())
    }

    pub fn collection(&self) -> Option<&CollectionType> {
        match &self.ty {
            ColumnType::Collection(collection) => Some(collection),
            ColumnType::Scalar(_) => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.collection().is_some()
    }
}

impl CollectionType {
    pub fn list(value: Type) -> CollectionType {
        CollectionType {
            kind: CollectionKind::List,
            key: None,
            value,
        }
    }

    pub fn set(value: Type) -> CollectionType {
        CollectionType {
            kind: CollectionKind::Set,
            key: None,
            value,
        }
    }

    pub fn map(key: Type, value: Type) -> CollectionType {
        CollectionType {
            kind: CollectionKind::Map,
            key: Some(key),
            value,
        }
    }
}

impl CollectionKind {
    pub fn from_name(name: &str) -> Option<CollectionKind> {
        match name.to_ascii_lowercase().as_str() {
            "list" => Some(CollectionKind::List),
            "set" => Some(CollectionKind::Set),
            "map" => Some(CollectionKind::Map),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::List => "list",
            CollectionKind::Set => "set",
            CollectionKind::Map => "map",
        }
    }
}

impl Direction {
    pub fn from_name(name: &str) -> Option<Direction> {
        match name.to_ascii_uppercase().as_str() {
            "ASC" => Some(Direction::Asc),
            "DESC" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Scalar(ty) => fmt::Display::fmt(ty, f),
            ColumnType::Collection(collection) => fmt::Display::fmt(collection, f),
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.key) {
            (CollectionKind::Map, Some(key)) => write!(f, "map<{key}, {}>", self.value),
            (kind, _) => write!(f, "{}<{}>", kind.as_str(), self.value),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
