use crate::{session::Session, Binder, ListOptions, Model, Page};

use cqlmap_core::{
    schema::Entity,
    stmt::{Assignments, Query, Record, Row, Using, WhereClause},
    Error, Result,
};
use cqlmap_cql::{stmt::Name, Statement};

use std::{fmt, marker::PhantomData, sync::Arc};

/// A registered table: its qualified name and the entity compiled for it.
#[derive(Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub name: Name,
    pub entity: Entity,
}

/// Typed access to one table.
///
/// Every operation builds its statement in full, checking columns and
/// values against the entity, before anything reaches the executor.
pub struct Table<M> {
    schema: Arc<TableSchema>,
    session: Session,

    /// Page size used by `list` when the options carry none
    page_size: Option<u32>,

    _model: PhantomData<fn() -> M>,
}

impl<M: Model> Table<M> {
    pub(crate) fn new(schema: Arc<TableSchema>, session: Session, page_size: Option<u32>) -> Table<M> {
        Table {
            schema,
            session,
            page_size,
            _model: PhantomData,
        }
    }

    /// Unqualified table name
    pub fn name(&self) -> &str {
        self.schema.name.unqualified()
    }

    /// `keyspace.table`
    pub fn qualified_name(&self) -> &Name {
        &self.schema.name
    }

    pub fn entity(&self) -> &Entity {
        &self.schema.entity
    }

    pub fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    pub async fn insert(&self, record: &M) -> Result<()> {
        self.insert_with(record, Using::default()).await
    }

    /// Inserts with `USING TTL` / `USING TIMESTAMP` parameters.
    pub async fn insert_with(&self, record: &M, using: Using) -> Result<()> {
        let stmt = Statement::insert(self.schema.name.clone(), self.entity(), record, using)?;
        self.session.execute(&stmt).await
    }

    /// Writes every non-key column of `record`, addressing the row by the
    /// record's key columns. Counter columns are left untouched.
    pub async fn update(&self, record: &M) -> Result<()> {
        self.update_with(record, Using::default()).await
    }

    pub async fn update_with(&self, record: &M, using: Using) -> Result<()> {
        let stmt = Statement::update_record(self.schema.name.clone(), self.entity(), record, using)?;
        self.session.execute(&stmt).await
    }

    /// Applies `assignments` to the rows matching `filter`.
    pub async fn update_fields(
        &self,
        assignments: &Assignments,
        filter: &[WhereClause],
    ) -> Result<()> {
        let stmt = Statement::update(self.schema.name.clone(), self.entity(), assignments, filter)?;
        self.session.execute(&stmt).await
    }

    /// Deletes `columns` (the whole row when empty) from the rows matching
    /// `filter`.
    pub async fn delete<S: AsRef<str>>(&self, columns: &[S], filter: &[WhereClause]) -> Result<()> {
        let stmt = Statement::delete(self.schema.name.clone(), self.entity(), columns, filter)?;
        self.session.execute(&stmt).await
    }

    /// Deletes the row addressed by the record's key columns.
    pub async fn delete_record(&self, record: &M) -> Result<()> {
        let filter = key_filter(self.entity(), record)?;
        self.delete::<&str>(&[], &filter).await
    }

    /// Reads the first row matching `query`.
    pub async fn read(&self, query: &Query) -> Result<Option<M>> {
        let mut record = M::default();

        if self.read_into(query, &mut record).await? {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// Reads the first row matching `query` into an existing record.
    pub async fn read_and_bind(&self, record: &mut M, query: &Query) -> Result<()> {
        if self.read_into(query, record).await? {
            Ok(())
        } else {
            Err(Error::record_not_found(format!(
                "no row of `{}` matches the query",
                self.schema.name
            )))
        }
    }

    /// Reads the first row matching `query` without binding it.
    pub async fn read_row(&self, query: &Query) -> Result<Option<Row>> {
        let (stmt, _) = self.select(query)?;
        let mut rows = self.session.query(&stmt, None, None).await?.rows;
        rows.next().await.transpose()
    }

    /// Reads one page of rows matching `query`.
    pub async fn list(&self, query: &Query, options: ListOptions) -> Result<Page<M>> {
        let mut query = query.clone();
        if options.limit.is_some() {
            query.limit = options.limit;
        }

        let (stmt, binder) = self.select(&query)?;
        let page_size = options.page_size.or(self.page_size);
        let response = self
            .session
            .query(&stmt, page_size, options.paging_state)
            .await?;

        let mut rows = response.rows;
        let mut items = vec![];

        while let Some(row) = rows.next().await {
            let mut record = M::default();
            binder.bind(row?, &mut record)?;
            items.push(record);
        }

        Ok(Page {
            items,
            paging_state: response.paging_state,
        })
    }

    async fn read_into(&self, query: &Query, record: &mut M) -> Result<bool> {
        let (stmt, binder) = self.select(query)?;
        let mut rows = self.session.query(&stmt, None, None).await?.rows;

        match rows.next().await {
            Some(row) => {
                binder.bind(row?, record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn select(&self, query: &Query) -> Result<(Statement, Binder<'_>)> {
        let stmt = Statement::select(self.schema.name.clone(), self.entity(), query)?;
        let binder = match stmt.as_select() {
            Some(select) => Binder::with_projection(self.entity(), &select.columns)?,
            None => Binder::new(self.entity()),
        };

        Ok((stmt, binder))
    }
}

/// `key = value` clauses addressing the row of `record`.
fn key_filter(entity: &Entity, record: &dyn Record) -> Result<Vec<WhereClause>> {
    entity
        .key_columns()
        .into_iter()
        .map(|column| {
            let value = record
                .field(column.field_index)
                .ok_or_else(|| Error::field_unavailable(&column.field_name))?;
            Ok(WhereClause::eq(&column.name, value))
        })
        .collect()
}

impl<M> Clone for Table<M> {
    fn clone(&self) -> Self {
        Table {
            schema: self.schema.clone(),
            session: self.session.clone(),
            page_size: self.page_size,
            _model: PhantomData,
        }
    }
}

impl<M> fmt::Debug for Table<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.schema.name)
            .field("entity", &self.schema.entity.name())
            .finish()
    }
}
