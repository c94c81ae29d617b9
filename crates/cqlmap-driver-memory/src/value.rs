use cqlmap_core::{
    bail,
    schema::{CollectionKind, ColumnType, Type},
    stmt::Value,
    Result,
};

use std::cmp::Ordering;

/// Total order used for clustering, `ORDER BY` and range relations.
/// Values of different variants order by variant.
pub(crate) fn compare(a: &Value, b: &Value) -> Ordering {
    use Value::*;

    match (a, b) {
        (Bool(a), Bool(b)) => a.cmp(b),
        (TinyInt(a), TinyInt(b)) => a.cmp(b),
        (SmallInt(a), SmallInt(b)) => a.cmp(b),
        (Int(a), Int(b)) => a.cmp(b),
        (BigInt(a), BigInt(b)) => a.cmp(b),
        (Float(a), Float(b)) => a.total_cmp(b),
        (Double(a), Double(b)) => a.total_cmp(b),
        (Text(a), Text(b)) => a.cmp(b),
        (Uuid(a), Uuid(b)) => a.cmp(b),
        (Timestamp(a), Timestamp(b)) => a.cmp(b),
        (Blob(a), Blob(b)) => a.cmp(b),
        (List(a), List(b)) | (Set(a), Set(b)) => compare_seq(a, b),
        (Map(a), Map(b)) => {
            for ((ak, av), (bk, bv)) in a.iter().zip(b) {
                let ord = compare(ak, bk).then_with(|| compare(av, bv));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.len().cmp(&b.len())
        }
        (a, b) => rank(a).cmp(&rank(b)),
    }
}

fn compare_seq(a: &[Value], b: &[Value]) -> Ordering {
    for (a, b) in a.iter().zip(b) {
        let ord = compare(a, b);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::TinyInt(_) => 2,
        Value::SmallInt(_) => 3,
        Value::Int(_) => 4,
        Value::BigInt(_) => 5,
        Value::Float(_) => 6,
        Value::Double(_) => 7,
        Value::Text(_) => 8,
        Value::Uuid(_) => 9,
        Value::Timestamp(_) => 10,
        Value::Blob(_) => 11,
        Value::List(_) => 12,
        Value::Set(_) => 13,
        Value::Map(_) => 14,
    }
}

/// Stores sets sorted without duplicates and maps sorted by key, with the
/// last entry winning for a repeated key.
pub(crate) fn normalize(value: Value) -> Value {
    match value {
        Value::Set(mut items) => {
            items.sort_by(compare);
            items.dedup_by(|a, b| compare(a, b) == Ordering::Equal);
            Value::Set(items)
        }
        Value::Map(entries) => {
            let mut map: Vec<(Value, Value)> = Vec::with_capacity(entries.len());

            for (key, value) in entries {
                match map.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => entry.1 = value,
                    None => map.push((key, value)),
                }
            }

            map.sort_by(|(a, _), (b, _)| compare(a, b));
            Value::Map(map)
        }
        value => value,
    }
}

/// Applies `column = column + delta`.
pub(crate) fn add(column: &str, ty: &ColumnType, current: Value, delta: Value) -> Result<Value> {
    let kind = collection_kind(ty);

    Ok(match delta {
        Value::BigInt(delta) if is_counter(ty) => Value::BigInt(counter(&current).wrapping_add(delta)),
        Value::List(items) if kind == Some(CollectionKind::List) => {
            let mut list = into_items(current);
            list.extend(items);
            Value::List(list)
        }
        Value::Set(items) if kind == Some(CollectionKind::Set) => {
            let mut set = into_items(current);
            set.extend(items);
            normalize(Value::Set(set))
        }
        Value::Map(entries) if kind == Some(CollectionKind::Map) => {
            let mut map = into_entries(current);
            map.extend(entries);
            normalize(Value::Map(map))
        }
        Value::Null => current,
        delta => bail!(
            "cannot add {} to column `{column}` of type {ty}",
            delta.type_name()
        ),
    })
}

/// Applies `column = column - delta`. Map entries are removed by key.
pub(crate) fn sub(column: &str, ty: &ColumnType, current: Value, delta: Value) -> Result<Value> {
    let kind = collection_kind(ty);

    Ok(match delta {
        Value::BigInt(delta) if is_counter(ty) => Value::BigInt(counter(&current).wrapping_sub(delta)),
        Value::List(items) if kind == Some(CollectionKind::List) => {
            let mut list = into_items(current);
            list.retain(|item| !items.contains(item));
            Value::List(list)
        }
        Value::Set(items) if kind == Some(CollectionKind::Set) => {
            let mut set = into_items(current);
            set.retain(|item| !items.contains(item));
            Value::Set(set)
        }
        Value::Set(keys) if kind == Some(CollectionKind::Map) => {
            let mut map = into_entries(current);
            map.retain(|(key, _)| !keys.contains(key));
            Value::Map(map)
        }
        Value::Null => current,
        delta => bail!(
            "cannot subtract {} from column `{column}` of type {ty}",
            delta.type_name()
        ),
    })
}

pub(crate) fn is_counter(ty: &ColumnType) -> bool {
    matches!(ty, ColumnType::Scalar(Type::Counter))
}

fn collection_kind(ty: &ColumnType) -> Option<CollectionKind> {
    match ty {
        ColumnType::Collection(collection) => Some(collection.kind),
        ColumnType::Scalar(_) => None,
    }
}

fn counter(value: &Value) -> i64 {
    match value {
        Value::BigInt(n) => *n,
        _ => 0,
    }
}

fn into_items(value: Value) -> Vec<Value> {
    match value {
        Value::List(items) | Value::Set(items) => items,
        _ => vec![],
    }
}

fn into_entries(value: Value) -> Vec<(Value, Value)> {
    match value {
        Value::Map(entries) => entries,
        _ => vec![],
    }
}
