use super::Error;

/// Error raised while building a statement, before anything reaches the
/// executor.
///
/// The subject is the column the problem was found on, or the qualified
/// table name when the problem concerns the statement as a whole.
#[derive(Debug)]
pub(super) struct InvalidStatement {
    subject: Box<str>,
    reason: Reason,
}

#[derive(Debug)]
enum Reason {
    InvalidCollectionShape {
        expected: &'static str,
        found: &'static str,
    },
    UnknownWhereColumn,
    UnknownTargetColumn,
    EmptyWhereClause,
    EmptyUpdate,
    InvalidInOperand(&'static str),
    InvalidUpdateValue(Box<str>),
    InvalidTimestamp(&'static str),
}

impl std::error::Error for InvalidStatement {}

impl core::fmt::Display for InvalidStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use Reason::*;

        write!(f, "invalid statement for `{}`: ", self.subject)?;

        match &self.reason {
            InvalidCollectionShape { expected, found } => {
                write!(f, "expected a {expected} value, found {found}")
            }
            UnknownWhereColumn => f.write_str("where clause references an unknown column"),
            UnknownTargetColumn => f.write_str("unknown column"),
            EmptyWhereClause => f.write_str("where clause is empty"),
            EmptyUpdate => f.write_str("no columns to update"),
            InvalidInOperand(found) => {
                write!(f, "IN operand must be a non-empty list, found {found}")
            }
            InvalidUpdateValue(detail) => f.write_str(detail),
            InvalidTimestamp(found) => write!(f, "expected a timestamp value, found {found}"),
        }
    }
}

impl Error {
    fn invalid_statement(subject: impl Into<String>, reason: Reason) -> Error {
        Error::from(super::ErrorKind::InvalidStatement(InvalidStatement {
            subject: subject.into().into(),
            reason,
        }))
    }

    fn invalid_statement_reason(&self) -> Option<&Reason> {
        match self.kind() {
            super::ErrorKind::InvalidStatement(err) => Some(&err.reason),
            _ => None,
        }
    }

    /// Creates an error for a collection value whose runtime shape (sequence
    /// or mapping) does not match the column's collection kind.
    pub fn invalid_collection_shape(
        column: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Error {
        Error::invalid_statement(column, Reason::InvalidCollectionShape { expected, found })
    }

    pub fn unknown_where_column(column: impl Into<String>) -> Error {
        Error::invalid_statement(column, Reason::UnknownWhereColumn)
    }

    /// Creates an error for a SET, DELETE, SELECT, GROUP BY or ORDER BY column
    /// that the entity does not declare.
    pub fn unknown_target_column(column: impl Into<String>) -> Error {
        Error::invalid_statement(column, Reason::UnknownTargetColumn)
    }

    pub fn empty_where_clause(table: impl Into<String>) -> Error {
        Error::invalid_statement(table, Reason::EmptyWhereClause)
    }

    pub fn empty_update(table: impl Into<String>) -> Error {
        Error::invalid_statement(table, Reason::EmptyUpdate)
    }

    pub fn invalid_in_operand(column: impl Into<String>, found: &'static str) -> Error {
        Error::invalid_statement(column, Reason::InvalidInOperand(found))
    }

    /// Creates an error for an update whose kind does not fit the column, for
    /// example a plain value assigned to a counter.
    pub fn invalid_update_value(column: impl Into<String>, detail: impl Into<String>) -> Error {
        Error::invalid_statement(column, Reason::InvalidUpdateValue(detail.into().into()))
    }

    pub fn invalid_timestamp(column: impl Into<String>, found: &'static str) -> Error {
        Error::invalid_statement(column, Reason::InvalidTimestamp(found))
    }

    /// Returns `true` if this error was raised while building a statement.
    pub fn is_invalid_statement(&self) -> bool {
        self.invalid_statement_reason().is_some()
    }

    pub fn is_invalid_collection_shape(&self) -> bool {
        matches!(
            self.invalid_statement_reason(),
            Some(Reason::InvalidCollectionShape { .. })
        )
    }

    pub fn is_unknown_where_column(&self) -> bool {
        matches!(
            self.invalid_statement_reason(),
            Some(Reason::UnknownWhereColumn)
        )
    }

    pub fn is_unknown_target_column(&self) -> bool {
        matches!(
            self.invalid_statement_reason(),
            Some(Reason::UnknownTargetColumn)
        )
    }

    pub fn is_empty_where_clause(&self) -> bool {
        matches!(
            self.invalid_statement_reason(),
            Some(Reason::EmptyWhereClause)
        )
    }

    pub fn is_empty_update(&self) -> bool {
        matches!(self.invalid_statement_reason(), Some(Reason::EmptyUpdate))
    }

    pub fn is_invalid_in_operand(&self) -> bool {
        matches!(
            self.invalid_statement_reason(),
            Some(Reason::InvalidInOperand(_))
        )
    }

    pub fn is_invalid_update_value(&self) -> bool {
        matches!(
            self.invalid_statement_reason(),
            Some(Reason::InvalidUpdateValue(_))
        )
    }

    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(
            self.invalid_statement_reason(),
            Some(Reason::InvalidTimestamp(_))
        )
    }
}
