mod assignments;
pub use assignments::{Assignments, CounterOp, Delta, UpdateValue};

mod query;
pub use query::Query;

mod record;
pub use record::Record;

mod row;
pub use row::Row;

mod row_stream;
pub use row_stream::RowStream;

mod using;
pub use using::Using;

mod value;
pub use value::Value;

mod where_clause;
pub use where_clause::{Relation, WhereClause};

pub use crate::schema::Direction;
