use super::Error;

/// Error raised while compiling a field's tag into a column descriptor.
///
/// Every variant names the offending field, so a failing entity can be
/// fixed without re-reading the whole record type.
#[derive(Debug)]
pub(super) struct InvalidTag {
    field: Box<str>,
    reason: Reason,
}

#[derive(Debug)]
enum Reason {
    Malformed(Box<str>),
    MissingSubtype,
    MissingCollectionTypes,
    CounterConflict,
    MissingKeyOrdinal(Box<str>),
    DuplicateKeyOrdinal(&'static str, usize),
    InvalidOrderDirection(Box<str>),
    MissingOrderOrdinal,
    DuplicateColumn(Box<str>),
    MissingPrimaryKey,
}

impl std::error::Error for InvalidTag {}

impl core::fmt::Display for InvalidTag {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use Reason::*;

        if let MissingPrimaryKey = self.reason {
            return write!(
                f,
                "invalid entity `{}`: no field is tagged with `primary_key`",
                self.field
            );
        }

        write!(f, "invalid tag on field `{}`: ", self.field)?;

        match &self.reason {
            Malformed(detail) => write!(f, "malformed tag: {detail}"),
            MissingSubtype => f.write_str("collection column requires a valid `column_subtype`"),
            MissingCollectionTypes => f.write_str(
                "collection column is missing `column_keytype` or `column_valuetype`",
            ),
            CounterConflict => f.write_str(
                "counter columns cannot be mixed with non-counter, non-key columns",
            ),
            MissingKeyOrdinal(value) => write!(f, "key ordinal `{value}` is not a number"),
            DuplicateKeyOrdinal(key, ordinal) => {
                write!(f, "`{key}` ordinal {ordinal} is used more than once")
            }
            InvalidOrderDirection(value) => {
                write!(f, "`order_by` must be ASC or DESC, got `{value}`")
            }
            MissingOrderOrdinal => f.write_str("`order_by` requires a numeric `order_by_num`"),
            DuplicateColumn(column) => write!(f, "column name `{column}` is already in use"),
            MissingPrimaryKey => unreachable!(),
        }
    }
}

impl Error {
    fn invalid_tag(field: impl Into<String>, reason: Reason) -> Error {
        Error::from(super::ErrorKind::InvalidTag(InvalidTag {
            field: field.into().into(),
            reason,
        }))
    }

    fn invalid_tag_reason(&self) -> Option<&Reason> {
        match self.kind() {
            super::ErrorKind::InvalidTag(err) => Some(&err.reason),
            _ => None,
        }
    }

    /// Creates an error for a tag pair that does not split into `key=value`,
    /// repeats a key, or uses an unrecognized key.
    pub fn malformed_tag(field: impl Into<String>, detail: impl Into<String>) -> Error {
        Error::invalid_tag(field, Reason::Malformed(detail.into().into()))
    }

    /// Creates an error for a collection column with no usable subtype.
    pub fn missing_subtype(field: impl Into<String>) -> Error {
        Error::invalid_tag(field, Reason::MissingSubtype)
    }

    /// Creates an error for a collection column missing its element types.
    pub fn missing_collection_types(field: impl Into<String>) -> Error {
        Error::invalid_tag(field, Reason::MissingCollectionTypes)
    }

    /// Creates an error for a non-counter, non-key column in an entity that
    /// also declares counter columns.
    pub fn counter_conflict(field: impl Into<String>) -> Error {
        Error::invalid_tag(field, Reason::CounterConflict)
    }

    pub fn missing_key_ordinal(field: impl Into<String>, value: impl Into<String>) -> Error {
        Error::invalid_tag(field, Reason::MissingKeyOrdinal(value.into().into()))
    }

    pub fn duplicate_key_ordinal(
        field: impl Into<String>,
        key: &'static str,
        ordinal: usize,
    ) -> Error {
        Error::invalid_tag(field, Reason::DuplicateKeyOrdinal(key, ordinal))
    }

    pub fn invalid_order_direction(field: impl Into<String>, value: impl Into<String>) -> Error {
        Error::invalid_tag(field, Reason::InvalidOrderDirection(value.into().into()))
    }

    pub fn missing_order_ordinal(field: impl Into<String>) -> Error {
        Error::invalid_tag(field, Reason::MissingOrderOrdinal)
    }

    pub fn duplicate_column(field: impl Into<String>, column: impl Into<String>) -> Error {
        Error::invalid_tag(field, Reason::DuplicateColumn(column.into().into()))
    }

    /// Creates an error for an entity without any partition key column.
    pub fn missing_primary_key(entity: impl Into<String>) -> Error {
        Error::invalid_tag(entity, Reason::MissingPrimaryKey)
    }

    /// Returns `true` if this error was raised while compiling tags.
    pub fn is_invalid_tag(&self) -> bool {
        self.invalid_tag_reason().is_some()
    }

    pub fn is_malformed_tag(&self) -> bool {
        matches!(self.invalid_tag_reason(), Some(Reason::Malformed(_)))
    }

    pub fn is_missing_subtype(&self) -> bool {
        matches!(self.invalid_tag_reason(), Some(Reason::MissingSubtype))
    }

    pub fn is_missing_collection_types(&self) -> bool {
        matches!(self.invalid_tag_reason(), Some(Reason::MissingCollectionTypes))
    }

    pub fn is_counter_conflict(&self) -> bool {
        matches!(self.invalid_tag_reason(), Some(Reason::CounterConflict))
    }

    pub fn is_missing_key_ordinal(&self) -> bool {
        matches!(self.invalid_tag_reason(), Some(Reason::MissingKeyOrdinal(_)))
    }

    pub fn is_duplicate_key_ordinal(&self) -> bool {
        matches!(
            self.invalid_tag_reason(),
            Some(Reason::DuplicateKeyOrdinal(..))
        )
    }

    pub fn is_invalid_order_direction(&self) -> bool {
        matches!(
            self.invalid_tag_reason(),
            Some(Reason::InvalidOrderDirection(_))
        )
    }

    pub fn is_missing_order_ordinal(&self) -> bool {
        matches!(self.invalid_tag_reason(), Some(Reason::MissingOrderOrdinal))
    }

    pub fn is_duplicate_column(&self) -> bool {
        matches!(self.invalid_tag_reason(), Some(Reason::DuplicateColumn(_)))
    }

    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self.invalid_tag_reason(), Some(Reason::MissingPrimaryKey))
    }
}
