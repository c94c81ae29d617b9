mod column;
pub use column::{ClusteringOrder, CollectionKind, CollectionType, Column, ColumnType, Direction};

mod entity;
pub use entity::Entity;

mod field;
pub use field::FieldDef;

mod tag;
pub use tag::Tag;

mod ty;
pub use ty::Type;
