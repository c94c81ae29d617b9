use super::{ty, ErrorSet};

#[derive(Debug)]
pub(crate) struct Field {
    /// Ordinal of the field in the containing model
    pub(crate) index: usize,

    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Raw tag from `#[cql("...")]`
    pub(crate) tag: Option<syn::LitStr>,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Type name handed to the entity compiler's type mapper
    pub(crate) source_ty: String,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field, index: usize) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut tag = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("cql") {
                continue;
            }

            if tag.is_some() {
                errs.push(syn::Error::new_spanned(attr, "duplicate #[cql] attribute"));
                continue;
            }

            match attr.parse_args::<syn::LitStr>() {
                Ok(lit) => tag = Some(lit),
                Err(err) => errs.push(syn::Error::new(
                    err.span(),
                    "expected a tag string, e.g. #[cql(\"column_name=id,primary_key=0\")]",
                )),
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            index,
            ident: ident.clone(),
            tag,
            ty: field.ty.clone(),
            source_ty: ty::source_name(&field.ty),
        })
    }

    /// Name reported in field definitions and errors. Raw identifiers lose
    /// their `r#` prefix.
    pub(crate) fn name(&self) -> String {
        let name = self.ident.to_string();
        match name.strip_prefix("r#") {
            Some(name) => name.to_string(),
            None => name,
        }
    }

    /// Whether the field is mapped to a column. Fields tagged `-` are
    /// skipped the same way untagged fields are.
    pub(crate) fn is_mapped(&self) -> bool {
        self.tag.as_ref().is_some_and(|tag| tag.value().trim() != "-")
    }
}
