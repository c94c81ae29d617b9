use cqlmap_core::stmt::Value;

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::Hash,
};

/// A Rust type that maps onto exactly one [`Value`] variant.
///
/// Loading is strict: a value of any other variant is handed back
/// unchanged, with no widening or narrowing. `Null` loads as `None` for
/// `Option<T>` and as an empty collection for collection types.
pub trait Primitive: Sized {
    /// Name of the expected value type, as used in error messages
    const TYPE_NAME: &'static str;

    fn to_value(&self) -> Value;

    /// Converts `value`, or returns it when its variant does not match.
    fn load(value: Value) -> Result<Self, Value>;
}

/// Bytes stored in a `blob` column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(pub Vec<u8>);

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident($name:literal),)*) => {
        $(
            impl Primitive for $ty {
                const TYPE_NAME: &'static str = $name;

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn load(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        value => Err(value),
                    }
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool("boolean"),
    i8 => TinyInt("tinyint"),
    i16 => SmallInt("smallint"),
    i32 => Int("int"),
    i64 => BigInt("bigint"),
    f32 => Float("float"),
    f64 => Double("double"),
    String => Text("text"),
    uuid::Uuid => Uuid("uuid"),
    jiff::Timestamp => Timestamp("timestamp"),
}

impl Primitive for Blob {
    const TYPE_NAME: &'static str = "blob";

    fn to_value(&self) -> Value {
        Value::Blob(self.0.clone())
    }

    fn load(value: Value) -> Result<Self, Value> {
        match value {
            Value::Blob(bytes) => Ok(Blob(bytes)),
            value => Err(value),
        }
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn load(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            value => T::load(value).map(Some),
        }
    }
}

impl<T: Primitive> Primitive for Vec<T> {
    const TYPE_NAME: &'static str = "list";

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Primitive::to_value).collect())
    }

    fn load(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(vec![]),
            Value::List(items) => items.into_iter().map(T::load).collect(),
            value => Err(value),
        }
    }
}

impl<T: Primitive + Eq + Hash> Primitive for HashSet<T> {
    const TYPE_NAME: &'static str = "set";

    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(Primitive::to_value).collect())
    }

    fn load(value: Value) -> Result<Self, Value> {
        load_set(value)
    }
}

impl<T: Primitive + Ord> Primitive for BTreeSet<T> {
    const TYPE_NAME: &'static str = "set";

    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(Primitive::to_value).collect())
    }

    fn load(value: Value) -> Result<Self, Value> {
        load_set(value)
    }
}

impl<K: Primitive + Eq + Hash, V: Primitive> Primitive for HashMap<K, V> {
    const TYPE_NAME: &'static str = "map";

    fn to_value(&self) -> Value {
        map_value(self.iter())
    }

    fn load(value: Value) -> Result<Self, Value> {
        load_map(value)
    }
}

impl<K: Primitive + Ord, V: Primitive> Primitive for BTreeMap<K, V> {
    const TYPE_NAME: &'static str = "map";

    fn to_value(&self) -> Value {
        map_value(self.iter())
    }

    fn load(value: Value) -> Result<Self, Value> {
        load_map(value)
    }
}

fn load_set<T: Primitive, C: FromIterator<T>>(value: Value) -> Result<C, Value> {
    match value {
        Value::Null => Ok(std::iter::empty::<T>().collect()),
        Value::Set(items) => items.into_iter().map(T::load).collect(),
        value => Err(value),
    }
}

fn map_value<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
    K: Primitive + 'a,
    V: Primitive + 'a,
{
    Value::Map(entries.map(|(k, v)| (k.to_value(), v.to_value())).collect())
}

fn load_map<K: Primitive, V: Primitive, C: FromIterator<(K, V)>>(value: Value) -> Result<C, Value> {
    match value {
        Value::Null => Ok(std::iter::empty::<(K, V)>().collect()),
        Value::Map(entries) => entries
            .into_iter()
            .map(|(k, v)| Ok((K::load(k)?, V::load(v)?)))
            .collect(),
        value => Err(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_scalars() {
        assert_eq!(i32::load(Value::Int(7)), Ok(7));
        assert_eq!(i32::load(Value::BigInt(7)), Err(Value::BigInt(7)));
        assert_eq!(i64::load(Value::Int(7)), Err(Value::Int(7)));
        assert_eq!(String::load(Value::Null), Err(Value::Null));
    }

    #[test]
    fn null_loads_as_none_or_empty() {
        assert_eq!(Option::<String>::load(Value::Null), Ok(None));
        assert_eq!(Vec::<i32>::load(Value::Null), Ok(vec![]));
        assert_eq!(HashSet::<String>::load(Value::Null), Ok(HashSet::new()));
        assert_eq!(BTreeMap::<String, i32>::load(Value::Null), Ok(BTreeMap::new()));
    }

    #[test]
    fn collection_kinds_do_not_mix() {
        let list = Value::list(["a"]);
        assert!(HashSet::<String>::load(list.clone()).is_err());
        assert_eq!(Vec::<String>::load(list), Ok(vec!["a".to_string()]));
    }

    #[test]
    fn maps() {
        let value = Value::map([("a", 1_i32), ("b", 2)]);
        let map = BTreeMap::<String, i32>::load(value.clone()).unwrap();
        assert_eq!(map.to_value(), value);
    }
}
