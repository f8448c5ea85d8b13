use quote::quote;
use syn::{
    AngleBracketedGenericArguments, Attribute, Expr, ExprLit, GenericArgument, Lit, Meta, Path,
    PathArguments, Type, TypePath,
};

fn is_std_path(path: &syn::Path, module: &str, name: &str) -> bool {
    match path.segments.len() {
        1 => path.segments[0].ident == name,
        3 => {
            (path.segments[0].ident == "std" || path.segments[0].ident == "core")
                && path.segments[1].ident == module
                && path.segments[2].ident == name
        }
        _ => false,
    }
}

pub fn inner_of_option(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { path, .. }) = ty else {
        return None;
    };
    if !is_std_path(path, "option", "Option") {
        return None;
    }

    if let Some(seg) = path.segments.last()
        && let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) =
            &seg.arguments
        && let Some(GenericArgument::Type(t)) = args.first()
    {
        return Some(t);
    }
    None
}

pub fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { path, .. }) if path.is_ident("bool"))
}

/// First non-empty `///` line on an item, used as its usage description.
pub fn doc_summary(attrs: &[Attribute]) -> Option<String> {
    attrs.iter().find_map(|attr| {
        if !attr.path().is_ident("doc") {
            return None;
        }
        let Meta::NameValue(nv) = &attr.meta else {
            return None;
        };
        let Expr::Lit(ExprLit {
            lit: Lit::Str(doc), ..
        }) = &nv.value
        else {
            return None;
        };
        let line = doc.value().trim().to_string();
        (!line.is_empty()).then_some(line)
    })
}

/// `<type>` placeholder shown in usage text when no explicit `value = "..."` is given.
pub fn value_placeholder(ty: &Type) -> String {
    let ty = inner_of_option(ty).unwrap_or(ty);
    match ty {
        Type::Path(TypePath { path, .. }) => path
            .segments
            .last()
            .map(|seg| format!("<{}>", seg.ident.to_string().to_ascii_lowercase()))
            .unwrap_or_else(|| String::from("<value>")),
        _ => String::from("<value>"),
    }
}

/// Expression turning the generated `raw: String` into a field value.
/// `Option<T>` fields parse as `T` and are wrapped in `Some`.
pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    match inner_of_option(ty) {
        Some(inner) => {
            let inner_expr = parse_value_expr(inner, parse_with);
            quote! { Some(#inner_expr) }
        }
        None => parse_value_expr(ty, parse_with),
    }
}

fn parse_value_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    if let Some(parse_with) = parse_with {
        return quote! { #parse_with(&raw)? };
    }
    quote! {
        raw.parse::<#ty>()
            .map_err(|e| crate::Error::invalid_input(format!(
                "Invalid value for --{name}: {raw} ({e})"
            )))?
    }
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        match ch {
            '_' => out.push('-'),
            c if c.is_ascii_uppercase() => {
                if idx != 0 && !out.ends_with('-') {
                    out.push('-');
                }
                out.push(c.to_ascii_lowercase());
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{
        doc_summary, inner_of_option, is_bool, to_kebab_case, value_placeholder,
    };

    #[test]
    fn inner_of_option_supports_short_std_and_core_paths() {
        let short_ty: syn::Type = parse_quote!(Option<u64>);
        let std_ty: syn::Type = parse_quote!(std::option::Option<usize>);
        let core_ty: syn::Type = parse_quote!(core::option::Option<bool>);
        let non_opt: syn::Type = parse_quote!(Vec<u64>);

        let short_inner = inner_of_option(&short_ty).expect("expected Option inner type");
        let std_inner = inner_of_option(&std_ty).expect("expected std Option inner type");
        let core_inner = inner_of_option(&core_ty).expect("expected core Option inner type");

        assert_eq!(quote::quote!(#short_inner).to_string(), "u64");
        assert_eq!(quote::quote!(#std_inner).to_string(), "usize");
        assert_eq!(quote::quote!(#core_inner).to_string(), "bool");
        assert!(inner_of_option(&non_opt).is_none());
    }

    #[test]
    fn is_bool_only_matches_plain_bool() {
        let plain: syn::Type = parse_quote!(bool);
        let wrapped: syn::Type = parse_quote!(Option<bool>);
        assert!(is_bool(&plain));
        assert!(!is_bool(&wrapped));
    }

    #[test]
    fn value_placeholder_uses_lowercased_type_name() {
        let cost: syn::Type = parse_quote!(Cost);
        let seed: syn::Type = parse_quote!(Option<u64>);
        let tuple: syn::Type = parse_quote!((u8, u8));

        assert_eq!(value_placeholder(&cost), "<cost>");
        assert_eq!(value_placeholder(&seed), "<u64>");
        assert_eq!(value_placeholder(&tuple), "<value>");
    }

    #[test]
    fn doc_summary_returns_first_non_empty_line() {
        let item: syn::ItemStruct = parse_quote! {
            ///
            /// Number of cities.
            /// Second line.
            struct Field;
        };
        assert_eq!(doc_summary(&item.attrs).as_deref(), Some("Number of cities."));
    }

    #[test]
    fn to_kebab_case_handles_pascal_and_snake_names() {
        assert_eq!(to_kebab_case("Strategy"), "strategy");
        assert_eq!(to_kebab_case("LogFormat"), "log-format");
        assert_eq!(to_kebab_case("min_cost"), "min-cost");
        assert_eq!(to_kebab_case("already-kebab"), "already-kebab");
    }
}
