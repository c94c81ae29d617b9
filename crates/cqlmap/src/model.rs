use cqlmap_core::{
    schema::{Entity, FieldDef},
    stmt::Record,
    Result,
};

/// A record type mapped to a table. Usually derived with
/// `#[derive(cqlmap::Model)]`.
///
/// Results are bound into `Default` instances, so every model needs a
/// default value.
pub trait Model: Record + Default + Send + Sync + 'static {
    /// Name of the record type
    const NAME: &'static str;

    /// Every field of the type in declaration order, tagged or not.
    fn fields() -> &'static [FieldDef];

    /// Compiles the field tags into column descriptors.
    fn entity() -> Result<Entity> {
        Entity::compile(Self::NAME, Self::fields())
    }
}
