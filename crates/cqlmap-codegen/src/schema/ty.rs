use quote::ToTokens;

/// Renders the name the type mapper sees for a field type: the last path
/// segment, with `Option` unwrapped and whitespace removed. `Option<String>`
/// becomes `String`, `jiff::Timestamp` becomes `Timestamp`.
pub(super) fn source_name(ty: &syn::Type) -> String {
    let ty = unwrap_option(ty).unwrap_or(ty);

    let rendered = match ty {
        syn::Type::Path(path) => match path.path.segments.last() {
            Some(segment) => segment.to_token_stream().to_string(),
            None => ty.to_token_stream().to_string(),
        },
        _ => ty.to_token_stream().to_string(),
    };

    rendered.split_whitespace().collect()
}

fn unwrap_option(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };

    let segment = path.path.segments.last()?;

    if segment.ident != "Option" {
        return None;
    }

    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    match args.args.first()? {
        syn::GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}
