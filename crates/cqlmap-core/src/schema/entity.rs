use super::{
    ClusteringOrder, CollectionKind, CollectionType, Column, ColumnType, Direction, FieldDef, Tag,
    Type,
};
use crate::{Error, Result};

/// The ordered column descriptors compiled from a record type.
///
/// An entity is compiled once per table and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    name: String,
    columns: Vec<Column>,
}

impl Entity {
    /// Compiles the tags of `fields` into column descriptors.
    ///
    /// Fields without a tag, or tagged `-`, are skipped. Descriptors keep
    /// field declaration order.
    pub fn compile(name: impl Into<String>, fields: &[FieldDef]) -> Result<Entity> {
        let name = name.into();
        let mut columns: Vec<Column> = vec![];

        for (field_index, field) in fields.iter().enumerate() {
            let Some(src) = field.tag else { continue };
            let Some(tag) = Tag::parse(field.name, src)? else {
                continue;
            };

            let column = compile_column(field, field_index, &tag)?;

            if columns.iter().any(|c| c.name == column.name) {
                return Err(Error::duplicate_column(field.name, column.name));
            }

            columns.push(column);
        }

        let entity = Entity { name, columns };
        entity.verify()?;
        Ok(entity)
    }

    /// Name of the record type the entity was compiled from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name. Column names are lower-cased, so the
    /// lookup ignores ASCII case.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    /// Partition key columns, in ordinal order.
    pub fn partition_keys(&self) -> Vec<&Column> {
        let mut keys: Vec<_> = self.columns.iter().filter(|c| c.is_partition_key()).collect();
        keys.sort_by_key(|c| c.primary_key);
        keys
    }

    /// Clustering key columns, in ordinal order.
    pub fn clustering_keys(&self) -> Vec<&Column> {
        let mut keys: Vec<_> = self.columns.iter().filter(|c| c.is_clustering_key()).collect();
        keys.sort_by_key(|c| c.clustering_key);
        keys
    }

    /// Partition keys followed by clustering keys.
    pub fn key_columns(&self) -> Vec<&Column> {
        let mut keys = self.partition_keys();
        keys.extend(self.clustering_keys());
        keys
    }

    /// Clustering order entries, in ordinal order.
    pub fn clustering_order(&self) -> Vec<(&Column, Direction)> {
        let mut order: Vec<_> = self
            .columns
            .iter()
            .filter_map(|c| c.order.map(|order| (c, order)))
            .collect();
        order.sort_by_key(|(_, order)| order.ordinal);
        order
            .into_iter()
            .map(|(column, order)| (column, order.direction))
            .collect()
    }

    pub fn indexed_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.indexed)
    }

    pub fn has_counters(&self) -> bool {
        self.columns.iter().any(Column::is_counter)
    }

    fn verify(&self) -> Result<()> {
        self.verify_unique_ordinals("primary_key", |c| c.primary_key)?;
        self.verify_unique_ordinals("clustering_key", |c| c.clustering_key)?;
        self.verify_unique_ordinals("order_by_num", |c| c.order.map(|o| o.ordinal))?;

        if self.has_counters() {
            if let Some(column) = self
                .columns
                .iter()
                .find(|c| !c.is_counter() && !c.is_key())
            {
                return Err(Error::counter_conflict(&column.field_name));
            }
        }

        if self.partition_keys().is_empty() {
            return Err(Error::missing_primary_key(&self.name));
        }

        Ok(())
    }

    fn verify_unique_ordinals(
        &self,
        key: &'static str,
        ordinal: impl Fn(&Column) -> Option<usize>,
    ) -> Result<()> {
        let mut seen = vec![];

        for column in &self.columns {
            if let Some(ordinal) = ordinal(column) {
                if seen.contains(&ordinal) {
                    return Err(Error::duplicate_key_ordinal(
                        &column.field_name,
                        key,
                        ordinal,
                    ));
                }
                seen.push(ordinal);
            }
        }

        Ok(())
    }
}

fn compile_column(field: &FieldDef, field_index: usize, tag: &Tag<'_>) -> Result<Column> {
    let name = tag
        .get("column_name")
        .filter(|name| !name.is_empty())
        .unwrap_or(field.name)
        .to_lowercase();

    let ty = match tag.get("column_type") {
        Some(ty) if ty.eq_ignore_ascii_case("collection") => {
            ColumnType::Collection(compile_collection(field, tag)?)
        }
        Some(ty) if !ty.is_empty() => ColumnType::Scalar(Type::from_source(ty)),
        _ => ColumnType::Scalar(Type::from_source(field.ty)),
    };

    let primary_key = tag
        .get("primary_key")
        .map(|value| parse_ordinal(field, value))
        .transpose()?;

    let clustering_key = tag
        .get("clustering_key")
        .map(|value| parse_ordinal(field, value))
        .transpose()?;

    let order = match tag.get("order_by") {
        Some(value) => {
            let direction = Direction::from_name(value)
                .ok_or_else(|| Error::invalid_order_direction(field.name, value))?;
            let ordinal = tag
                .get("order_by_num")
                .and_then(|num| num.parse().ok())
                .ok_or_else(|| Error::missing_order_ordinal(field.name))?;

            Some(ClusteringOrder { direction, ordinal })
        }
        None => None,
    };

    let indexed = tag
        .get("index_key")
        .is_some_and(|value| !value.eq_ignore_ascii_case("false"));

    Ok(Column {
        field_name: field.name.to_string(),
        field_index,
        name,
        ty,
        primary_key,
        clustering_key,
        order,
        indexed,
    })
}

fn compile_collection(field: &FieldDef, tag: &Tag<'_>) -> Result<CollectionType> {
    let kind = tag
        .get("column_subtype")
        .and_then(CollectionKind::from_name)
        .ok_or_else(|| Error::missing_subtype(field.name))?;

    let elem = |key| {
        tag.get(key)
            .filter(|ty| !ty.is_empty())
            .map(Type::from_source)
    };

    let value = elem("column_valuetype").ok_or_else(|| Error::missing_collection_types(field.name))?;

    match kind {
        CollectionKind::Map => {
            let key =
                elem("column_keytype").ok_or_else(|| Error::missing_collection_types(field.name))?;
            Ok(CollectionType::map(key, value))
        }
        CollectionKind::List => Ok(CollectionType::list(value)),
        CollectionKind::Set => Ok(CollectionType::set(value)),
    }
}

fn parse_ordinal(field: &FieldDef, value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| Error::missing_key_ordinal(field.name, value))
}
