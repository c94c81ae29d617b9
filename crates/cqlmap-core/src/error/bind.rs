use super::Error;

/// Error raised while binding a result row into a record.
#[derive(Debug)]
pub(super) struct BindError {
    subject: Box<str>,
    reason: Reason,
}

#[derive(Debug)]
enum Reason {
    UnknownColumn,
    FieldNotSettable,
    FieldUnavailable,
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl std::error::Error for BindError {}

impl core::fmt::Display for BindError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.reason {
            Reason::UnknownColumn => {
                write!(f, "result column `{}` has no matching field", self.subject)
            }
            Reason::FieldNotSettable => write!(f, "field `{}` cannot be set", self.subject),
            Reason::FieldUnavailable => {
                write!(f, "record has no readable field `{}`", self.subject)
            }
            Reason::TypeMismatch { expected, found } => write!(
                f,
                "cannot bind field `{}`: expected {expected}, found {found}",
                self.subject
            ),
        }
    }
}

impl Error {
    fn bind(subject: impl Into<String>, reason: Reason) -> Error {
        Error::from(super::ErrorKind::Bind(BindError {
            subject: subject.into().into(),
            reason,
        }))
    }

    fn bind_reason(&self) -> Option<&Reason> {
        match self.kind() {
            super::ErrorKind::Bind(err) => Some(&err.reason),
            _ => None,
        }
    }

    /// Creates an error for a returned column that matches no descriptor.
    pub fn unknown_column(column: impl Into<String>) -> Error {
        Error::bind(column, Reason::UnknownColumn)
    }

    /// Creates an error for a field the record refuses to assign.
    pub fn field_not_settable(field: impl Into<String>) -> Error {
        Error::bind(field, Reason::FieldNotSettable)
    }

    /// Creates an error for a descriptor whose field ordinal the record does
    /// not expose.
    pub fn field_unavailable(field: impl Into<String>) -> Error {
        Error::bind(field, Reason::FieldUnavailable)
    }

    /// Creates an error for a value whose type does not exactly match the
    /// field's type.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Error {
        Error::bind(field, Reason::TypeMismatch { expected, found })
    }

    /// Returns `true` if this error was raised while binding a row.
    pub fn is_bind(&self) -> bool {
        self.bind_reason().is_some()
    }

    pub fn is_unknown_column(&self) -> bool {
        matches!(self.bind_reason(), Some(Reason::UnknownColumn))
    }

    pub fn is_field_not_settable(&self) -> bool {
        matches!(self.bind_reason(), Some(Reason::FieldNotSettable))
    }

    pub fn is_field_unavailable(&self) -> bool {
        matches!(self.bind_reason(), Some(Reason::FieldUnavailable))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.bind_reason(), Some(Reason::TypeMismatch { .. }))
    }
}
