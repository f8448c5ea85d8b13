use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Variant, parse_macro_input};

use crate::utils;

/// One enum variant and every spelling that selects it.
struct ValueVariant {
    ident: Ident,
    canonical: String,
    aliases: Vec<String>,
}

impl ValueVariant {
    fn from_variant(variant: &Variant) -> syn::Result<Self> {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "CliValue only supports enums with unit variants",
            ));
        }

        let mut spec = Self {
            ident: variant.ident.clone(),
            canonical: utils::to_kebab_case(&variant.ident.to_string()),
            aliases: Vec::new(),
        };
        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("cli")) {
            attr.parse_nested_meta(|meta| {
                let value = meta.value()?.parse::<LitStr>()?.value();
                match meta.path.get_ident().map(Ident::to_string).as_deref() {
                    Some("name") => spec.canonical = value,
                    Some("alias") => spec.aliases.push(value),
                    _ => return Err(meta.error("unsupported cli attribute; expected name/alias")),
                }
                Ok(())
            })?;
        }
        Ok(spec)
    }

    /// Lower-cased spellings matched by `parse`, canonical first.
    fn spellings(&self) -> Vec<String> {
        std::iter::once(&self.canonical)
            .chain(&self.aliases)
            .map(|s| s.to_ascii_lowercase())
            .collect()
    }
}

fn option_name(input: &DeriveInput) -> syn::Result<String> {
    let mut name = utils::to_kebab_case(&input.ident.to_string());
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("cli_value")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("option") {
                return Err(meta.error("unsupported cli_value attribute; expected option = \"...\""));
            }
            name = meta.value()?.parse::<LitStr>()?.value();
            Ok(())
        })?;
    }
    Ok(name)
}

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "CliValue can only be derived for enums",
        ));
    };

    let option_lit = LitStr::new(&option_name(input)?, Span::call_site());
    let variants = data_enum
        .variants
        .iter()
        .map(ValueVariant::from_variant)
        .collect::<syn::Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    let mut parse_arms = Vec::with_capacity(variants.len());
    for variant in &variants {
        let spellings = variant.spellings();
        if let Some(dup) = spellings.iter().find(|s| !seen.insert(s.to_string())) {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                format!("spelling `{dup}` selects more than one variant"),
            ));
        }
        let ident = &variant.ident;
        parse_arms.push(quote! { #(#spellings)|* => Ok(Self::#ident), });
    }

    let idents: Vec<&Ident> = variants.iter().map(|v| &v.ident).collect();
    let canonicals: Vec<&str> = variants.iter().map(|v| v.canonical.as_str()).collect();
    let expected = canonicals.join("|");
    let enum_ident = &input.ident;

    Ok(quote! {
        impl #enum_ident {
            /// Canonical spellings accepted on the command line.
            pub const VALUES: &'static [&'static str] = &[#(#canonicals),*];

            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        #expected
                    ))),
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    #(Self::#idents => #canonicals,)*
                }
            }
        }

        impl std::str::FromStr for #enum_ident {
            type Err = crate::Error;

            fn from_str(raw: &str) -> crate::Result<Self> {
                Self::parse(raw)
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    })
}
