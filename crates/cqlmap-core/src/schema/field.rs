/// Static description of one field of a mapped record type.
///
/// `#[derive(Model)]` emits one of these per struct field, in declaration
/// order. The position of a `FieldDef` in the slice is the field's ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field identifier
    pub name: &'static str,

    /// Raw `key=value,...` tag, if the field carries one
    pub tag: Option<&'static str>,

    /// Source type name, used when the tag does not set `column_type`
    pub ty: &'static str,
}

impl FieldDef {
    pub const fn new(name: &'static str, tag: Option<&'static str>, ty: &'static str) -> FieldDef {
        FieldDef { name, tag, ty }
    }
}
