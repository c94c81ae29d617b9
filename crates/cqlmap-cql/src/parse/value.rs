use super::{Parser, Token};
use crate::stmt::Value;

use cqlmap_core::{
    bail, err,
    schema::{CollectionKind, CollectionType, ColumnType, Type},
    Result,
};

pub(super) fn parse(p: &mut Parser<'_>, ty: &ColumnType) -> Result<Value> {
    match ty {
        ColumnType::Scalar(ty) => scalar(p, ty),
        ColumnType::Collection(collection) => collection_value(p, collection),
    }
}

fn collection_value(p: &mut Parser<'_>, collection: &CollectionType) -> Result<Value> {
    if p.is_keyword("null")? {
        p.next_token()?;
        return Ok(Value::Null);
    }

    match collection.kind {
        CollectionKind::List => {
            p.expect(&Token::LBracket)?;
            let items = elements(p, &Token::RBracket, |p| scalar(p, &collection.value))?;
            Ok(Value::List(items))
        }
        CollectionKind::Set => {
            p.expect(&Token::LBrace)?;
            let items = elements(p, &Token::RBrace, |p| scalar(p, &collection.value))?;
            Ok(Value::Set(items))
        }
        CollectionKind::Map => {
            let key_ty = collection.key.as_ref().unwrap_or(&Type::Text);

            p.expect(&Token::LBrace)?;
            let entries = elements(p, &Token::RBrace, |p| {
                let key = scalar(p, key_ty)?;
                p.expect(&Token::Colon)?;
                let value = scalar(p, &collection.value)?;
                Ok((key, value))
            })?;
            Ok(Value::Map(entries))
        }
    }
}

fn elements<T>(
    p: &mut Parser<'_>,
    close: &Token,
    item: impl FnMut(&mut Parser<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    if p.take(close)? {
        return Ok(vec![]);
    }

    let items = p.comma_separated(item)?;
    p.expect(close)?;
    Ok(items)
}

fn scalar(p: &mut Parser<'_>, ty: &Type) -> Result<Value> {
    let token = p.expect_token()?;

    if token.is_keyword("null") {
        return Ok(Value::Null);
    }

    Ok(match (ty, token) {
        (Type::Boolean, token) if token.is_keyword("true") => Value::Bool(true),
        (Type::Boolean, token) if token.is_keyword("false") => Value::Bool(false),
        (Type::Tinyint, Token::Number(n)) => Value::TinyInt(n.parse()?),
        (Type::Smallint, Token::Number(n)) => Value::SmallInt(n.parse()?),
        (Type::Int, Token::Number(n)) => Value::Int(n.parse()?),
        (Type::Bigint | Type::Counter | Type::Varint, Token::Number(n)) => {
            Value::BigInt(n.parse()?)
        }
        (Type::Float, token) => Value::Float(float(p, token)? as f32),
        (Type::Double | Type::Decimal, token) => Value::Double(float(p, token)?),
        (Type::Uuid | Type::Timeuuid, Token::Uuid(uuid)) => Value::Uuid(uuid.parse()?),
        (Type::Timestamp, Token::Str(ts)) => Value::Timestamp(ts.parse()?),
        (Type::Timestamp, Token::Number(millis)) => {
            Value::Timestamp(jiff::Timestamp::from_millisecond(millis.parse()?)?)
        }
        (Type::Blob, Token::Blob(hex)) => Value::Blob(decode_hex(&hex)?),
        (ty, Token::Str(s))
            if ty.is_textual() || matches!(ty, Type::Date | Type::Time | Type::Custom(_)) =>
        {
            Value::Text(s)
        }
        (ty, token) => bail!("expected {ty} literal, found {token}"),
    })
}

fn float(p: &mut Parser<'_>, token: Token) -> Result<f64> {
    match token {
        Token::Number(n) => n.parse().map_err(|_| err!("invalid number `{n}`")),
        Token::Ident(ident) if ident.eq_ignore_ascii_case("nan") => Ok(f64::NAN),
        Token::Ident(ident) if ident.eq_ignore_ascii_case("infinity") => Ok(f64::INFINITY),
        Token::Minus if p.take_keyword("infinity")? => Ok(f64::NEG_INFINITY),
        token => bail!("expected number, found {token}"),
    }
}

fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    if hex.len() % 2 != 0 {
        bail!("blob literal has an odd number of digits");
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| -> Result<u8> { Ok(u8::from_str_radix(&hex[i..i + 2], 16)?) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(src: &str, ty: ColumnType) -> Value {
        crate::parse::literal(src, &ty).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(literal("42", ColumnType::Scalar(Type::Int)), Value::Int(42));
        assert_eq!(
            literal("-7", ColumnType::Scalar(Type::Bigint)),
            Value::BigInt(-7)
        );
        assert_eq!(
            literal("'London'", ColumnType::Scalar(Type::Text)),
            Value::from("London")
        );
        assert_eq!(
            literal("true", ColumnType::Scalar(Type::Boolean)),
            Value::Bool(true)
        );
        assert_eq!(
            literal("0xcafe", ColumnType::Scalar(Type::Blob)),
            Value::Blob(vec![0xca, 0xfe])
        );
        assert_eq!(literal("null", ColumnType::Scalar(Type::Int)), Value::Null);
    }

    #[test]
    fn non_finite_floats() {
        let double = ColumnType::Scalar(Type::Double);
        assert_eq!(literal("Infinity", double.clone()), Value::Double(f64::INFINITY));
        assert_eq!(
            literal("-Infinity", double.clone()),
            Value::Double(f64::NEG_INFINITY)
        );
        assert!(matches!(literal("NaN", double), Value::Double(v) if v.is_nan()));
    }

    #[test]
    fn uuids() {
        let id = "a8098c1a-f86e-11da-bd1a-00112444be1e";
        assert_eq!(
            literal(id, ColumnType::Scalar(Type::Uuid)),
            Value::Uuid(id.parse().unwrap())
        );
    }

    #[test]
    fn timestamps() {
        let ts: jiff::Timestamp = "2024-03-01T12:30:00Z".parse().unwrap();
        assert_eq!(
            literal("'2024-03-01T12:30:00Z'", ColumnType::Scalar(Type::Timestamp)),
            Value::Timestamp(ts)
        );
    }

    #[test]
    fn collections() {
        let set = ColumnType::Collection(CollectionType::set(Type::Text));
        let map = ColumnType::Collection(CollectionType::map(Type::Text, Type::Int));

        assert_eq!(literal("{'x','y'}", set.clone()), Value::set(["x", "y"]));
        assert_eq!(literal("{}", set), Value::Set(vec![]));
        assert_eq!(
            literal("{'a':1,'b':2}", map),
            Value::map([("a", 1_i32), ("b", 2)])
        );
    }

    #[test]
    fn type_mismatch_is_an_error() {
        assert!(crate::parse::literal("'x'", &ColumnType::Scalar(Type::Int)).is_err());
        assert!(crate::parse::literal("1 2", &ColumnType::Scalar(Type::Int)).is_err());
    }
}
