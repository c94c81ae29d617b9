//! Literal formatting and collection encoding.
//!
//! Values are checked against the column's declared type when a [`Literal`]
//! is built, so serializing a statement never fails.
//!
//! Embedded single quotes in text values are written as-is. Callers must
//! not pass text containing `'`.

use cqlmap_core::{
    schema::{CollectionKind, CollectionType, Column, ColumnType, Type},
    stmt::Value,
    Error, Result,
};

use std::fmt::{self, Write};

/// Literal text for one value, checked against its column type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(String);

impl Literal {
    /// Formats `value` for `column`, dispatching on scalar or collection type.
    pub fn for_column(column: &Column, value: &Value) -> Result<Literal> {
        match &column.ty {
            ColumnType::Scalar(ty) => Literal::scalar(&column.name, value, ty),
            ColumnType::Collection(collection) => {
                Literal::collection(&column.name, value, collection)
            }
        }
    }

    /// Formats a scalar value.
    ///
    /// Text-like types are single-quoted, timestamps are written as quoted
    /// RFC 3339, everything else uses its default rendering.
    pub fn scalar(column: &str, value: &Value, ty: &Type) -> Result<Literal> {
        let mut dst = String::new();
        write_scalar(&mut dst, column, value, ty)?;
        Ok(Literal(dst))
    }

    /// Encodes a collection value.
    ///
    /// Lists are written `[a,b]`, sets `{a,b}` and maps `{k:v,...}`, with
    /// every element formatted as a scalar of the declared element type.
    pub fn collection(column: &str, value: &Value, collection: &CollectionType) -> Result<Literal> {
        let mut dst = String::new();

        if value.is_null() {
            dst.push_str("null");
            return Ok(Literal(dst));
        }

        match collection.kind {
            CollectionKind::List | CollectionKind::Set => {
                let (open, close) = match collection.kind {
                    CollectionKind::List => ('[', ']'),
                    _ => ('{', '}'),
                };
                let items = value.as_sequence().ok_or_else(|| {
                    Error::invalid_collection_shape(
                        column,
                        collection.kind.as_str(),
                        value.type_name(),
                    )
                })?;
                write_sequence(&mut dst, column, items, &collection.value, open, close)?;
            }
            CollectionKind::Map => {
                let entries = value.as_map().ok_or_else(|| {
                    Error::invalid_collection_shape(column, "map", value.type_name())
                })?;
                let key_ty = collection.key.as_ref().unwrap_or(&Type::Text);

                dst.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        dst.push(',');
                    }
                    write_scalar(&mut dst, column, key, key_ty)?;
                    dst.push(':');
                    write_scalar(&mut dst, column, value, &collection.value)?;
                }
                dst.push('}');
            }
        }

        Ok(Literal(dst))
    }

    /// Encodes a sequence of map keys as a set, for removing map entries.
    pub fn keys(column: &str, value: &Value, key_ty: &Type) -> Result<Literal> {
        let items = value
            .as_sequence()
            .ok_or_else(|| Error::invalid_collection_shape(column, "set", value.type_name()))?;

        let mut dst = String::new();
        write_sequence(&mut dst, column, items, key_ty, '{', '}')?;
        Ok(Literal(dst))
    }

    /// A quoted text literal.
    pub fn text(text: &str) -> Literal {
        Literal(format!("'{text}'"))
    }

    /// Wraps text that is already a valid literal, such as a counter delta.
    pub fn raw(text: impl Into<String>) -> Literal {
        Literal(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_sequence(
    dst: &mut String,
    column: &str,
    items: &[Value],
    ty: &Type,
    open: char,
    close: char,
) -> Result<()> {
    dst.push(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            dst.push(',');
        }
        write_scalar(dst, column, item, ty)?;
    }
    dst.push(close);
    Ok(())
}

fn write_scalar(dst: &mut String, column: &str, value: &Value, ty: &Type) -> Result<()> {
    if value.is_null() {
        dst.push_str("null");
        return Ok(());
    }

    if let Value::List(_) | Value::Set(_) | Value::Map(_) = value {
        return Err(Error::invalid_collection_shape(
            column,
            "scalar",
            value.type_name(),
        ));
    }

    if ty.is_timestamp() {
        let Value::Timestamp(ts) = value else {
            return Err(Error::invalid_timestamp(column, value.type_name()));
        };
        // The store keeps millisecond precision
        let ts = jiff::Timestamp::from_millisecond(ts.as_millisecond())?;
        let _ = write!(dst, "'{ts}'");
        return Ok(());
    }

    if ty.is_textual() {
        dst.push('\'');
        write_default(dst, value);
        dst.push('\'');
        return Ok(());
    }

    write_default(dst, value);
    Ok(())
}

fn write_default(dst: &mut String, value: &Value) {
    let _ = match value {
        Value::Null => write!(dst, "null"),
        Value::Bool(v) => write!(dst, "{v}"),
        Value::TinyInt(v) => write!(dst, "{v}"),
        Value::SmallInt(v) => write!(dst, "{v}"),
        Value::Int(v) => write!(dst, "{v}"),
        Value::BigInt(v) => write!(dst, "{v}"),
        Value::Float(v) if !v.is_finite() => write_non_finite(dst, f64::from(*v)),
        Value::Double(v) if !v.is_finite() => write_non_finite(dst, *v),
        Value::Float(v) => write!(dst, "{v}"),
        Value::Double(v) => write!(dst, "{v}"),
        Value::Text(v) => write!(dst, "{v}"),
        Value::Uuid(v) => write!(dst, "{}", v.hyphenated()),
        Value::Timestamp(v) => write!(dst, "'{v}'"),
        Value::Blob(bytes) => {
            dst.push_str("0x");
            bytes.iter().try_for_each(|b| write!(dst, "{b:02x}"))
        }
        Value::List(_) | Value::Set(_) | Value::Map(_) => unreachable!(),
    };
}

/// `NaN`, `Infinity` or `-Infinity`
fn write_non_finite(dst: &mut String, v: f64) -> fmt::Result {
    if v.is_nan() {
        dst.write_str("NaN")
    } else if v.is_sign_negative() {
        dst.write_str("-Infinity")
    } else {
        dst.write_str("Infinity")
    }
}
