use super::Value;
use crate::Result;

/// Field access on a mapped record, addressed by field ordinal.
///
/// Ordinals are positions in the record type's field list, the same
/// positions the entity compiler stores in `Column::field_index`.
pub trait Record {
    /// Returns the value of the field at `index`, or `None` if the record
    /// has no such field.
    fn field(&self, index: usize) -> Option<Value>;

    /// Assigns `value` to the field at `index`.
    ///
    /// Implementations reject values whose type does not exactly match the
    /// field's type.
    fn set_field(&mut self, index: usize, value: Value) -> Result<()>;
}
