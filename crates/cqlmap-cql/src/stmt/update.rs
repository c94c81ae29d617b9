use super::{
    Assignments, CounterOp, Delta, Filter, Name, Record, Statement, UpdateValue, Using, Value,
    WhereClause,
};
use crate::Literal;

use cqlmap_core::{
    schema::{CollectionKind, Column, ColumnType, Entity},
    Error, Result,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub table: Name,

    pub using: Using,

    /// `SET` list, in assignment order
    pub assignments: Vec<Assignment>,

    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub column: String,
    pub expr: AssignmentExpr,
}

/// The right-hand side of `column = ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentExpr {
    /// `column = value`
    Value(Literal),

    /// `column = column + value`
    Add(Literal),

    /// `column = column - value`
    Sub(Literal),
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}

impl Statement {
    /// Applies `assignments` to the rows matching `filter`.
    pub fn update(
        table: Name,
        entity: &Entity,
        assignments: &Assignments,
        filter: &[WhereClause],
    ) -> Result<Self> {
        if assignments.is_empty() {
            return Err(Error::empty_update(table.to_string()));
        }

        let filter = Filter::compile_required(&table, entity, filter)?;

        let compiled = assignments
            .iter()
            .map(|(name, value)| Assignment::compile(entity, name, value))
            .collect::<Result<_>>()?;

        Ok(Update {
            table,
            using: *assignments.using_params(),
            assignments: compiled,
            filter,
        }
        .into())
    }

    /// Writes every non-key column of `record` to the row addressed by its
    /// key columns.
    ///
    /// Collection columns are replaced whole. Counter columns are skipped,
    /// since they only accept increments.
    pub fn update_record(
        table: Name,
        entity: &Entity,
        record: &dyn Record,
        using: Using,
    ) -> Result<Self> {
        let mut filter = vec![];
        let mut assignments = Assignments::new().using(using);

        for column in entity.columns() {
            if column.is_counter() {
                continue;
            }

            let value = record
                .field(column.field_index)
                .ok_or_else(|| Error::field_unavailable(&column.field_name))?;

            if column.is_key() {
                filter.push(WhereClause::eq(&column.name, value));
            } else if column.is_collection() {
                assignments.insert(&column.name, UpdateValue::Collection(Delta::All, value));
            } else {
                assignments.insert(&column.name, UpdateValue::Set(value));
            }
        }

        Statement::update(table, entity, &assignments, &filter)
    }
}

impl Assignment {
    fn compile(entity: &Entity, name: &str, value: &UpdateValue) -> Result<Assignment> {
        let column = entity
            .column(name)
            .ok_or_else(|| Error::unknown_target_column(name))?;

        if column.is_key() {
            return Err(Error::invalid_update_value(
                &column.name,
                "key columns cannot be assigned",
            ));
        }

        let expr = match value {
            UpdateValue::Set(_) if column.is_counter() => {
                return Err(Error::invalid_update_value(
                    &column.name,
                    "counter columns only accept increments and decrements",
                ))
            }
            UpdateValue::Set(value) => AssignmentExpr::Value(Literal::for_column(column, value)?),
            UpdateValue::Counter(op, amount) => {
                if !column.is_counter() {
                    return Err(Error::invalid_update_value(
                        &column.name,
                        "column is not a counter",
                    ));
                }

                let amount = Literal::raw(amount.to_string());
                match op {
                    CounterOp::Incr => AssignmentExpr::Add(amount),
                    CounterOp::Decr => AssignmentExpr::Sub(amount),
                }
            }
            UpdateValue::Collection(delta, value) => collection_delta(column, *delta, value)?,
        };

        Ok(Assignment {
            column: column.name.clone(),
            expr,
        })
    }
}

fn collection_delta(column: &Column, delta: Delta, value: &Value) -> Result<AssignmentExpr> {
    let ColumnType::Collection(collection) = &column.ty else {
        return Err(Error::invalid_update_value(
            &column.name,
            "column is not a collection",
        ));
    };

    Ok(match delta {
        Delta::All => AssignmentExpr::Value(Literal::collection(&column.name, value, collection)?),
        Delta::Add => AssignmentExpr::Add(Literal::collection(&column.name, value, collection)?),
        Delta::Remove if collection.kind == CollectionKind::Map => {
            let key_ty = collection.key.as_ref().unwrap_or(&collection.value);
            AssignmentExpr::Sub(Literal::keys(&column.name, value, key_ty)?)
        }
        Delta::Remove => {
            AssignmentExpr::Sub(Literal::collection(&column.name, value, collection)?)
        }
    })
}
