use super::{Parser, Token};
use crate::{
    stmt::{
        Assignment, AssignmentExpr, ColumnDef, Condition, CreateIndex, CreateKeyspace,
        CreateTable, Delete, Direction, DropKeyspace, DropTable, Filter, Insert, Name, Operand,
        Relation, Replication, Select, Statement, Update, Using,
    },
    Literal,
};

use cqlmap_core::{
    bail,
    schema::{CollectionKind, CollectionType, ColumnType, Type},
    Result,
};

pub(super) fn parse(p: &mut Parser<'_>) -> Result<Statement> {
    let keyword = p.ident()?.to_ascii_uppercase();

    match keyword.as_str() {
        "CREATE" => {
            let object = p.ident()?.to_ascii_uppercase();
            match object.as_str() {
                "KEYSPACE" => create_keyspace(p),
                "TABLE" => create_table(p),
                "INDEX" => create_index(p),
                _ => bail!("unsupported statement `CREATE {object}`"),
            }
        }
        "DROP" => {
            let object = p.ident()?.to_ascii_uppercase();
            let if_exists = p.take_keywords(&["IF", "EXISTS"])?;
            let name = name(p)?;
            match object.as_str() {
                "KEYSPACE" => Ok(DropKeyspace { name, if_exists }.into()),
                "TABLE" => Ok(DropTable { name, if_exists }.into()),
                _ => bail!("unsupported statement `DROP {object}`"),
            }
        }
        "INSERT" => insert(p),
        "UPDATE" => update(p),
        "DELETE" => delete(p),
        "SELECT" => select(p),
        _ => bail!("unsupported statement `{keyword}`"),
    }
}

fn name(p: &mut Parser<'_>) -> Result<Name> {
    let mut parts = vec![p.ident()?];

    while p.take(&Token::Period)? {
        parts.push(p.ident()?);
    }

    Ok(Name(parts))
}

fn create_keyspace(p: &mut Parser<'_>) -> Result<Statement> {
    let if_not_exists = p.take_keywords(&["IF", "NOT", "EXISTS"])?;
    let name = name(p)?;
    p.expect_keywords(&["WITH", "REPLICATION"])?;
    p.expect(&Token::Eq)?;
    p.expect(&Token::LBrace)?;

    let mut replication = Replication::default();

    let options = p.comma_separated(|p| {
        let key = match p.expect_token()? {
            Token::Str(key) => key,
            token => bail!("expected replication option, found {token}"),
        };
        p.expect(&Token::Colon)?;
        let value = p.expect_token()?;
        Ok((key, value))
    })?;

    for (key, value) in options {
        match (key.as_str(), value) {
            ("class", Token::Str(class)) => replication.class = class,
            ("replication_factor", Token::Number(n) | Token::Str(n)) => {
                replication.replication_factor = n.parse()?;
            }
            (key, _) => bail!("unsupported replication option `{key}`"),
        }
    }

    p.expect(&Token::RBrace)?;

    Ok(CreateKeyspace {
        name,
        if_not_exists,
        replication,
    }
    .into())
}

fn create_table(p: &mut Parser<'_>) -> Result<Statement> {
    let if_not_exists = p.take_keywords(&["IF", "NOT", "EXISTS"])?;
    let name = name(p)?;

    let mut stmt = CreateTable {
        name,
        if_not_exists,
        columns: vec![],
        partition_key: vec![],
        clustering_key: vec![],
        clustering_order: vec![],
    };

    p.expect(&Token::LParen)?;

    loop {
        if p.take_keywords(&["PRIMARY", "KEY"])? {
            p.expect(&Token::LParen)?;

            if p.is_next(&Token::LParen)? {
                stmt.partition_key = p.parenthesized(Parser::ident)?;
            } else {
                stmt.partition_key = vec![p.ident()?];
            }

            while p.take(&Token::Comma)? {
                stmt.clustering_key.push(p.ident()?);
            }

            p.expect(&Token::RParen)?;
        } else {
            let name = p.ident()?;
            let ty = column_type(p)?;
            stmt.columns.push(ColumnDef { name, ty });
        }

        if !p.take(&Token::Comma)? {
            break;
        }
    }

    p.expect(&Token::RParen)?;

    if p.take_keywords(&["WITH", "CLUSTERING", "ORDER", "BY"])? {
        stmt.clustering_order = p.parenthesized(column_order)?;
    }

    Ok(stmt.into())
}

fn column_type(p: &mut Parser<'_>) -> Result<ColumnType> {
    let name = p.ident()?;

    let Some(kind) = CollectionKind::from_name(&name) else {
        return Ok(ColumnType::Scalar(scalar_type(name)));
    };

    p.expect(&Token::Lt)?;
    let first = scalar_type(p.ident()?);

    let collection = if kind == CollectionKind::Map {
        p.expect(&Token::Comma)?;
        CollectionType::map(first, scalar_type(p.ident()?))
    } else if kind == CollectionKind::List {
        CollectionType::list(first)
    } else {
        CollectionType::set(first)
    };

    p.expect(&Token::Gt)?;
    Ok(ColumnType::Collection(collection))
}

fn scalar_type(name: String) -> Type {
    Type::from_cql(&name).unwrap_or(Type::Custom(name))
}

fn column_order(p: &mut Parser<'_>) -> Result<(String, Direction)> {
    let column = p.ident()?;
    let direction = match p.peek()? {
        Some(Token::Ident(ident)) => match Direction::from_name(ident) {
            Some(direction) => {
                p.next_token()?;
                direction
            }
            None => Direction::Asc,
        },
        _ => Direction::Asc,
    };
    Ok((column, direction))
}

fn create_index(p: &mut Parser<'_>) -> Result<Statement> {
    let if_not_exists = p.take_keywords(&["IF", "NOT", "EXISTS"])?;
    let index_name = p.ident()?;
    p.expect_keywords(&["ON"])?;
    let on = name(p)?;
    p.expect(&Token::LParen)?;
    let column = p.ident()?;
    p.expect(&Token::RParen)?;

    Ok(CreateIndex {
        name: index_name,
        on,
        column,
        if_not_exists,
    }
    .into())
}

fn insert(p: &mut Parser<'_>) -> Result<Statement> {
    p.expect_keywords(&["INTO"])?;
    let table = name(p)?;
    let columns = p.parenthesized(Parser::ident)?;
    p.expect_keywords(&["VALUES"])?;
    let values = p.parenthesized(literal)?;

    if columns.len() != values.len() {
        bail!(
            "INSERT lists {} columns but {} values",
            columns.len(),
            values.len()
        );
    }

    let using = using(p)?;

    Ok(Insert {
        table,
        columns,
        values,
        using,
    }
    .into())
}

fn update(p: &mut Parser<'_>) -> Result<Statement> {
    let table = name(p)?;
    let using = using(p)?;
    p.expect_keywords(&["SET"])?;
    let assignments = p.comma_separated(assignment)?;
    let filter = filter(p)?;

    Ok(Update {
        table,
        using,
        assignments,
        filter,
    }
    .into())
}

fn assignment(p: &mut Parser<'_>) -> Result<Assignment> {
    let column = p.ident()?;
    p.expect(&Token::Eq)?;

    let self_reference = matches!(p.peek()?, Some(Token::Ident(ident)) if *ident == column)
        && matches!(p.peek_nth(1)?, Some(Token::Plus | Token::Minus));

    let expr = if self_reference {
        p.next_token()?;
        match p.expect_token()? {
            Token::Plus => AssignmentExpr::Add(literal(p)?),
            _ => AssignmentExpr::Sub(literal(p)?),
        }
    } else {
        AssignmentExpr::Value(literal(p)?)
    };

    Ok(Assignment { column, expr })
}

fn delete(p: &mut Parser<'_>) -> Result<Statement> {
    let columns = if p.is_keyword("FROM")? {
        vec![]
    } else {
        p.comma_separated(Parser::ident)?
    };

    p.expect_keywords(&["FROM"])?;
    let table = name(p)?;
    let filter = filter(p)?;

    Ok(Delete {
        columns,
        table,
        filter,
    }
    .into())
}

fn select(p: &mut Parser<'_>) -> Result<Statement> {
    let columns = if p.take(&Token::Star)? {
        vec!["*".to_string()]
    } else {
        p.comma_separated(Parser::ident)?
    };

    p.expect_keywords(&["FROM"])?;
    let table = name(p)?;

    let mut stmt = Select {
        columns,
        table,
        filter: filter(p)?,
        group_by: vec![],
        order_by: vec![],
        limit: None,
        allow_filtering: false,
    };

    if p.take_keywords(&["GROUP", "BY"])? {
        stmt.group_by = p.comma_separated(Parser::ident)?;
    }

    if p.take_keywords(&["ORDER", "BY"])? {
        stmt.order_by = p.comma_separated(column_order)?;
    }

    if p.take_keyword("LIMIT")? {
        stmt.limit = Some(p.number()?);
    }

    stmt.allow_filtering = p.take_keywords(&["ALLOW", "FILTERING"])?;

    Ok(stmt.into())
}

fn using(p: &mut Parser<'_>) -> Result<Using> {
    let mut using = Using::default();

    if !p.take_keyword("USING")? {
        return Ok(using);
    }

    loop {
        if p.take_keyword("TTL")? {
            using.ttl = Some(p.number()?);
        } else if p.take_keyword("TIMESTAMP")? {
            using.timestamp = Some(p.number()?);
        } else {
            bail!("expected `TTL` or `TIMESTAMP` after `USING`");
        }

        if !p.take_keyword("AND")? {
            return Ok(using);
        }
    }
}

fn filter(p: &mut Parser<'_>) -> Result<Filter> {
    if !p.take_keyword("WHERE")? {
        return Ok(Filter::default());
    }

    let mut conditions = vec![condition(p)?];

    while p.take_keyword("AND")? {
        conditions.push(condition(p)?);
    }

    Ok(Filter(conditions))
}

fn condition(p: &mut Parser<'_>) -> Result<Condition> {
    let column = p.ident()?;

    let relation = match p.expect_token()? {
        Token::Eq => Relation::Eq,
        Token::Ne => Relation::Ne,
        Token::Lt => Relation::Lt,
        Token::Le => Relation::Le,
        Token::Gt => Relation::Gt,
        Token::Ge => Relation::Ge,
        token if token.is_keyword("IN") => Relation::In,
        token if token.is_keyword("CONTAINS") => {
            if p.take_keyword("KEY")? {
                Relation::ContainsKey
            } else {
                Relation::Contains
            }
        }
        token => bail!("expected relation, found {token}"),
    };

    let operand = if relation == Relation::In {
        Operand::List(p.parenthesized(literal)?)
    } else {
        Operand::Literal(literal(p)?)
    };

    Ok(Condition {
        column,
        relation,
        operand,
    })
}

/// Parses an untyped literal and renders it back in canonical form.
fn literal(p: &mut Parser<'_>) -> Result<Literal> {
    let mut dst = String::new();
    write_literal(p, &mut dst)?;
    Ok(Literal::raw(dst))
}

fn write_literal(p: &mut Parser<'_>, dst: &mut String) -> Result<()> {
    match p.expect_token()? {
        Token::Str(s) => {
            dst.push('\'');
            dst.push_str(&s.replace('\'', "''"));
            dst.push('\'');
        }
        Token::Number(n) | Token::Uuid(n) => dst.push_str(&n),
        Token::Ident(ident) => dst.push_str(&ident),
        Token::Blob(hex) => {
            dst.push_str("0x");
            dst.push_str(&hex);
        }
        Token::Minus => {
            dst.push('-');
            write_literal(p, dst)?;
        }
        Token::LBracket => {
            dst.push('[');
            write_elements(p, dst, &Token::RBracket)?;
            dst.push(']');
        }
        Token::LBrace => {
            dst.push('{');
            write_elements(p, dst, &Token::RBrace)?;
            dst.push('}');
        }
        token => bail!("expected literal, found {token}"),
    }

    Ok(())
}

/// Writes collection elements up to and including `close`. Map entries are
/// written `k:v`.
fn write_elements(p: &mut Parser<'_>, dst: &mut String, close: &Token) -> Result<()> {
    if p.take(close)? {
        return Ok(());
    }

    loop {
        write_literal(p, dst)?;

        if p.take(&Token::Colon)? {
            dst.push(':');
            write_literal(p, dst)?;
        }

        if p.take(&Token::Comma)? {
            dst.push(',');
        } else {
            return p.expect(close);
        }
    }
}
